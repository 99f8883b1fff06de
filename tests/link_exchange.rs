use spilink::link::{LinkError, LinkStatsSnapshot};
use spilink::protocol::{ControlPacket, command_datagram, parse_command_datagram};
use spilink::{Error, LinkConfig, Master, Request, Response, Slave, SpiTransfer};

/// Full-duplex wire between a master and a slave endpoint.
struct Wire {
    slave: Slave,
    received: Vec<Result<Request, Error>>,
    shift: usize,
}

impl Wire {
    fn new(config: LinkConfig) -> Self {
        Self {
            slave: Slave::new(config).unwrap(),
            received: Vec::new(),
            shift: 0,
        }
    }
}

impl SpiTransfer for Wire {
    type Error = ();

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), Self::Error> {
        // A shifted wire models a bus that lost sync by `shift` bytes.
        let staged = self.slave.tx_buffer();
        rx.fill(0);
        rx[self.shift..].copy_from_slice(&staged[..staged.len() - self.shift]);
        let result = self.slave.complete(tx);
        self.received.push(result);
        Ok(())
    }
}

struct DeadBus;

impl SpiTransfer for DeadBus {
    type Error = &'static str;

    fn transfer(&mut self, _tx: &[u8], _rx: &mut [u8]) -> Result<(), Self::Error> {
        Err("dma timeout")
    }
}

#[test]
fn operator_commands_reach_slave_and_video_comes_back() {
    let config = LinkConfig::default();
    let mut master = Master::new(config).unwrap();
    let mut wire = Wire::new(config);

    let packet = ControlPacket::new(0x90, 0x80, 0xA0, 0x80, 0);
    let datagram = command_datagram(&Request::set_ctrl(packet)).unwrap();
    let request = parse_command_datagram(&datagram).unwrap();

    wire.slave.stage_video(b"\xFF\xD8chunk-0").unwrap();
    let response = master.transact(&mut wire, &request).unwrap();

    assert_eq!(response, Response::video(&b"\xFF\xD8chunk-0"[..]));
    let delivered = wire.received.pop().unwrap().unwrap();
    assert_eq!(delivered, request);
    match delivered {
        Request::SetCtrl(bytes) => assert_eq!(ControlPacket::parse(&bytes).unwrap(), packet),
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn video_is_delivered_at_most_once() {
    let config = LinkConfig::default();
    let mut master = Master::new(config).unwrap();
    let mut wire = Wire::new(config);

    wire.slave.stage_video(b"datagram").unwrap();
    let first = master.transact(&mut wire, &Request::None).unwrap();
    let second = master.transact(&mut wire, &Request::None).unwrap();

    assert_eq!(first, Response::video(&b"datagram"[..]));
    assert_eq!(second, Response::None);

    let snapshot = master.stats().snapshot();
    assert_eq!(snapshot.frames_sent, 2);
    assert_eq!(snapshot.frames_received, 2);
    assert_eq!(snapshot.idle_frames, 1);
    assert_eq!(wire.slave.stats().snapshot().frames_sent, 2);
}

#[test]
fn pulse_flag_crosses_the_wire() {
    let config = LinkConfig::new(4096).unwrap();
    let mut master = Master::new(config).unwrap();
    let mut wire = Wire::new(config);

    let request = Request::PulseFlag {
        flag: 0x01,
        duration_ms: 500,
    };
    master.transact(&mut wire, &request).unwrap();

    assert_eq!(wire.received.pop().unwrap(), Ok(request));
}

#[test]
fn largest_datagram_fits_and_larger_is_dropped() {
    let config = LinkConfig::default();
    let mut master = Master::new(config).unwrap();
    let mut wire = Wire::new(config);

    let largest = vec![0x42u8; config.max_payload()];
    wire.slave.stage_video(&largest).unwrap();
    assert!(wire.slave.stage_video(&vec![0u8; 2100]).is_err());

    let response = master.transact(&mut wire, &Request::Neutral).unwrap();

    assert_eq!(response.payload(), largest.as_slice());
    assert_eq!(wire.slave.stats().snapshot().oversized_dropped, 1);
}

#[test]
fn desynchronized_bus_is_rejected_and_recovers() {
    let config = LinkConfig::default();
    let mut master = Master::new(config).unwrap();
    let mut wire = Wire::new(config);

    wire.slave.stage_video(b"lost").unwrap();
    wire.shift = 1;
    let result = master.transact(&mut wire, &Request::Neutral);

    assert!(matches!(
        result,
        Err(LinkError::Frame(Error::BadMagic { found: 0x00, .. }))
    ));

    wire.shift = 0;
    wire.slave.stage_video(b"next").unwrap();
    let response = master.transact(&mut wire, &Request::Neutral).unwrap();
    assert_eq!(response, Response::video(&b"next"[..]));

    let snapshot: LinkStatsSnapshot = master.stats().snapshot();
    assert_eq!(snapshot.bad_magic, 1);
    assert_eq!(snapshot.rejected_frames(), 1);
}

#[test]
fn bus_failure_is_surfaced() {
    let mut master = Master::new(LinkConfig::default()).unwrap();

    let result = master.transact(&mut DeadBus, &Request::Neutral);

    match result {
        Err(LinkError::Bus(reason)) => assert_eq!(reason, "dma timeout"),
        other => panic!("expected bus error, got {other:?}"),
    }
    let err = master.transact(&mut DeadBus, &Request::None).unwrap_err();
    assert!(err.as_frame().is_none());
    let snapshot = master.stats().snapshot();
    assert_eq!(snapshot.bus_errors, 2);
    assert_eq!(snapshot.frames_sent, 0);
}

#[test]
fn mismatched_transfer_sizes_are_detected() {
    let uplink = LinkConfig::default();
    let drone = LinkConfig::new(4096).unwrap();

    assert_eq!(
        uplink.check_peer(&drone),
        Err(Error::XferSizeMismatch {
            local: 2048,
            peer: 4096
        })
    );

    let master = Master::new(uplink).unwrap();
    let slave = Slave::new(drone).unwrap();
    assert!(matches!(
        master.complete(slave.tx_buffer()),
        Err(Error::XferSizeMismatch { .. })
    ));
    assert_eq!(master.stats().snapshot().size_mismatch, 1);
}
