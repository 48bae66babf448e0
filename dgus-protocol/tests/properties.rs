//! Property tests for the DGUS frame codec

use dgus_hal::{MockTransport, Transport};
use dgus_protocol::{wire, Datagram, FrameParser, FrameWriter, RX_BUFFER_SIZE};
use proptest::prelude::*;

/// Build a read-variable frame as the display would send it
fn read_var_frame(vp: u16, words: u8, data: &[u8]) -> Vec<u8> {
    let mut frame = vec![0x5A, 0xA5, (data.len() + 4) as u8, 0x83];
    frame.extend_from_slice(&vp.to_be_bytes());
    frame.push(words);
    frame.extend_from_slice(data);
    frame
}

/// Feed `bytes` in the given chunk sizes, polling after each chunk
fn parse_chunked(bytes: &[u8], chunks: &[usize]) -> Vec<Datagram> {
    let mut link = MockTransport::default();
    let mut parser = FrameParser::new();
    let mut out = Vec::new();
    let mut rest = bytes;
    let mut sizes = chunks.iter().cycle();

    while !rest.is_empty() {
        let n = (*sizes.next().unwrap_or(&1)).clamp(1, rest.len());
        link.inject_rx_data(&rest[..n]);
        rest = &rest[n..];
        while let Ok(Some(datagram)) = parser.poll(&mut link) {
            out.push(datagram);
        }
    }
    out
}

proptest! {
    #[test]
    fn decoding_is_independent_of_chunking(
        vp in any::<u16>(),
        words in any::<u8>(),
        data in prop::collection::vec(any::<u8>(), 0..=RX_BUFFER_SIZE - 4),
        chunks in prop::collection::vec(1usize..16, 1..8),
    ) {
        let frame = read_var_frame(vp, words, &data);

        let whole = parse_chunked(&frame, &[frame.len()]);
        let bytewise = parse_chunked(&frame, &[1]);
        let chunked = parse_chunked(&frame, &chunks);

        prop_assert_eq!(whole.len(), 1);
        match &whole[0] {
            Datagram::VarChanged(report) => {
                prop_assert_eq!(report.vp, vp);
                prop_assert_eq!(report.words, words);
                prop_assert_eq!(report.data(), &data[..]);
            }
            other => prop_assert!(false, "unexpected datagram {:?}", other),
        }
        prop_assert_eq!(&whole, &bytewise);
        prop_assert_eq!(&whole, &chunked);
    }

    #[test]
    fn garbage_before_a_frame_is_skipped(
        garbage in prop::collection::vec(0u8..0x5A, 0..32),
        vp in any::<u16>(),
        value in any::<u16>(),
    ) {
        let mut bytes = garbage.clone();
        bytes.extend(read_var_frame(vp, 1, &value.to_be_bytes()));

        let datagrams = parse_chunked(&bytes, &[3]);
        prop_assert_eq!(datagrams.len(), 1);
        match &datagrams[0] {
            Datagram::VarChanged(report) => {
                prop_assert_eq!(report.vp, vp);
                prop_assert_eq!(wire::read_u16(report.data()), Some(value));
            }
            other => prop_assert!(false, "unexpected datagram {:?}", other),
        }
    }

    #[test]
    fn word_round_trip(value in any::<u16>()) {
        prop_assert_eq!(wire::read_u16(&wire::u16_to_wire(value)), Some(value));

        let mut link = MockTransport::default();
        FrameWriter::new(&mut link).write_u16(0x1000, value);
        let frame = link.take_tx();
        prop_assert_eq!(frame.len(), 8);
        prop_assert_eq!(wire::read_u16(&frame[6..]), Some(value));
    }

    #[test]
    fn signed_word_round_trip(value in any::<i16>()) {
        prop_assert_eq!(wire::read_i16(&wire::i16_to_wire(value)), Some(value));
    }

    #[test]
    fn fixed_point_round_trip_two_bytes(
        value in -3000.0f32..3000.0,
        decimals in 0u8..=1,
    ) {
        let (bytes, len) = wire::fixed_to_wire(value, decimals, 2);
        let decoded = wire::fixed_from_wire(&bytes[..len], decimals, 2).unwrap();
        let bound = 0.5 / wire::pow10(decimals) as f32 + value.abs() * 1e-6 + 1e-6;
        prop_assert!((decoded - value).abs() <= bound, "{} -> {}", value, decoded);
    }

    #[test]
    fn fixed_point_round_trip_four_bytes(
        value in -30000.0f32..30000.0,
        decimals in 0u8..=2,
    ) {
        let (bytes, len) = wire::fixed_to_wire(value, decimals, 4);
        let decoded = wire::fixed_from_wire(&bytes[..len], decimals, 4).unwrap();
        let bound = 0.5 / wire::pow10(decimals) as f32 + value.abs() * 1e-6 + 1e-6;
        prop_assert!((decoded - value).abs() <= bound, "{} -> {}", value, decoded);
    }
}

#[test]
fn scenario_frame_dispatches_offset_three() {
    let mut link = MockTransport::default();
    link.inject_rx_data(&[0x5A, 0xA5, 0x06, 0x83, 0x00, 0x0A, 0x00, 0x01, 0x2A]);
    let mut parser = FrameParser::new();

    match parser.poll(&mut link) {
        Ok(Some(Datagram::VarChanged(report))) => {
            assert_eq!(report.vp, 0x000A);
            assert_eq!(report.data(), &[0x01, 0x2A]);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(link.available(), 0);
}
