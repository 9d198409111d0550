use proptest::prelude::*;

use super::*;
use crate::cursor::ReadCursor;
use crate::error::HandshakeError;
use crate::identity::Identity;
use crate::socket_type::SocketType;
use crate::version::ProtocolVersion;

fn identity(bytes: &[u8]) -> Identity {
    Identity::from_slice(bytes).expect("test identity is within the wire limit")
}

#[test]
fn short_lengths_occupy_a_single_octet() {
    for value in [0u64, 1, 127, 254] {
        let mut out = Vec::new();
        encode_length(value, &mut out, false);
        assert_eq!(out, [value as u8]);
    }
}

#[test]
fn lengths_of_255_and_above_use_the_extended_form() {
    let mut out = Vec::new();
    encode_length(255, &mut out, false);
    assert_eq!(out[0], LONG_FORM_MARKER);
    assert_eq!(out[1..], 255u64.to_be_bytes());
}

#[test]
fn long_form_can_be_forced_for_small_values() {
    let mut out = Vec::new();
    encode_length(3, &mut out, true);
    assert_eq!(out.len(), 9);
    assert_eq!(out[0], LONG_FORM_MARKER);
    assert_eq!(out[1..], 3u64.to_be_bytes());
}

#[test]
fn decode_restores_the_cursor_on_a_truncated_extended_form() {
    let mut encoded = Vec::new();
    encode_length(1000, &mut encoded, false);
    encoded.truncate(5);

    let mut cursor = ReadCursor::new(&encoded);
    assert_eq!(decode_length(&mut cursor), None);
    assert_eq!(cursor.position(), 0);
}

proptest! {
    #[test]
    fn length_round_trips_in_both_forms(value in any::<u64>(), long_form in any::<bool>()) {
        let mut encoded = Vec::new();
        encode_length(value, &mut encoded, long_form);

        let mut cursor = ReadCursor::new(&encoded);
        prop_assert_eq!(decode_length(&mut cursor), Some(value));
        prop_assert!(cursor.is_empty());
    }
}

#[test]
fn compat_probe_is_ten_octets_ending_in_the_signature_tail() {
    let probe = encode_compat_signature(&identity(b"abc"));
    assert_eq!(probe.len(), GREETING_SIGNATURE_LEN);
    assert_eq!(probe[0], LONG_FORM_MARKER);
    assert_eq!(probe[1..9], 4u64.to_be_bytes());
    assert_eq!(probe[9], SIGNATURE_TAIL);
}

#[test]
fn compat_probe_prefixes_a_valid_legacy_greeting() {
    // Probe + raw identity bytes is exactly the legacy identity frame: a
    // long-form length covering flags + identity, the 0x7F flags octet, and
    // the identity itself.
    let local = identity(b"peer");
    let mut legacy_greeting = encode_compat_signature(&local);
    legacy_greeting.extend_from_slice(local.as_bytes());

    let mut cursor = ReadCursor::new(&legacy_greeting);
    assert_eq!(
        parse_legacy_identity(&mut cursor),
        Ok(Some(b"peer".to_vec()))
    );
    assert!(cursor.is_empty());
}

#[test]
fn full_greeting_layout_matches_the_wire_format() {
    let greeting = encode_greeting(SocketType::Dealer, &identity(b"id"), true);

    assert_eq!(greeting[0], LONG_FORM_MARKER);
    assert_eq!(greeting[1..9], [0; 8]);
    assert_eq!(greeting[9], SIGNATURE_TAIL);
    assert_eq!(greeting[10], PROTOCOL_REVISION);
    assert_eq!(greeting[11], SocketType::Dealer.to_wire());
    assert_eq!(greeting[12], FLAGS_FINAL);
    assert_eq!(greeting[13], 2);
    assert_eq!(&greeting[14..], b"id");
}

#[test]
fn body_only_greeting_omits_the_signature() {
    let body = encode_greeting(SocketType::Rep, &identity(b""), false);
    assert_eq!(body, [PROTOCOL_REVISION, SocketType::Rep.to_wire(), FLAGS_FINAL, 0]);
}

proptest! {
    #[test]
    fn greeting_round_trips_for_any_role_and_identity(
        ordinal in 0u8..9,
        bytes in proptest::collection::vec(any::<u8>(), 0..=255),
        include_signature in any::<bool>(),
    ) {
        let socket_type = SocketType::from_wire(ordinal).expect("ordinal is in range");
        let local = Identity::new(bytes.clone()).expect("length is within the wire limit");
        let greeting = encode_greeting(socket_type, &local, include_signature);

        let mut cursor = ReadCursor::new(&greeting);
        let parsed = parse_greeting(&mut cursor, include_signature);
        prop_assert_eq!(parsed, Ok(Some(bytes)));
        prop_assert!(cursor.is_empty());
    }
}

#[test]
fn boundary_identities_round_trip_exactly() {
    for len in [0usize, 255] {
        let local = Identity::new(vec![0x5A; len]).expect("boundary length is valid");
        let greeting = encode_greeting(SocketType::Pair, &local, true);
        let mut cursor = ReadCursor::new(&greeting);
        let parsed = parse_greeting(&mut cursor, true).expect("greeting is well formed");
        assert_eq!(parsed.expect("greeting is complete").len(), len);
    }
}

#[test]
fn parse_rejects_a_bad_signature_octet() {
    let mut greeting = encode_greeting(SocketType::Req, &identity(b"x"), true);
    greeting[0] = 0x40;

    let mut cursor = ReadCursor::new(&greeting);
    assert_eq!(
        parse_greeting(&mut cursor, true),
        Err(HandshakeError::IllegalSignature { actual: 0x40 })
    );
}

#[test]
fn parse_rejects_nonzero_flags() {
    for expect_signature in [true, false] {
        let mut greeting = encode_greeting(SocketType::Req, &identity(b"x"), expect_signature);
        let flags_at = if expect_signature { 12 } else { 2 };
        greeting[flags_at] = 0x01;

        let mut cursor = ReadCursor::new(&greeting);
        assert_eq!(
            parse_greeting(&mut cursor, expect_signature),
            Err(HandshakeError::MalformedGreeting { flags: 0x01 })
        );
    }
}

#[test]
fn parse_reports_pending_and_restores_the_cursor_on_every_truncation() {
    let greeting = encode_greeting(SocketType::Router, &identity(b"router-1"), true);

    for len in 0..greeting.len() {
        let mut cursor = ReadCursor::new(&greeting[..len]);
        assert_eq!(parse_greeting(&mut cursor, true), Ok(None), "prefix of {len} octets");
        assert_eq!(cursor.position(), 0, "prefix of {len} octets");
    }
}

#[test]
fn detection_classifies_a_short_form_legacy_frame_from_one_octet() {
    let buffer = [0x05, 0x00, b'p', b'e', b'e', b'r'];
    let mut cursor = ReadCursor::new(&buffer);

    assert_eq!(
        detect_protocol_version(&mut cursor),
        Some(ProtocolVersion::Zmtp1)
    );
    assert_eq!(cursor.position(), 0);
}

#[test]
fn detection_classifies_an_even_tail_as_legacy() {
    // A long-form legacy length whose final octet has a clear low bit, such
    // as the 302-octet frame announced by a 301-byte identity.
    let mut buffer = Vec::new();
    encode_length(302, &mut buffer, false);
    buffer.push(0x00);

    let mut cursor = ReadCursor::new(&buffer);
    assert_eq!(
        detect_protocol_version(&mut cursor),
        Some(ProtocolVersion::Zmtp1)
    );
    assert_eq!(cursor.position(), 0);
}

#[test]
fn detection_consumes_the_probe_on_the_modern_outcome() {
    let probe = encode_compat_signature(&identity(b"me"));
    let mut cursor = ReadCursor::new(&probe);

    assert_eq!(
        detect_protocol_version(&mut cursor),
        Some(ProtocolVersion::Zmtp2)
    );
    assert_eq!(cursor.position(), GREETING_SIGNATURE_LEN);
}

#[test]
fn detection_restores_the_cursor_on_short_input() {
    let probe = encode_compat_signature(&identity(b"me"));

    for len in 1..GREETING_SIGNATURE_LEN {
        let mut cursor = ReadCursor::new(&probe[..len]);
        assert_eq!(detect_protocol_version(&mut cursor), None, "prefix of {len} octets");
        assert_eq!(cursor.position(), 0, "prefix of {len} octets");
    }
}

#[test]
fn legacy_identity_supports_the_extended_length_form() {
    let identity_bytes = vec![0xC3; 300];
    let mut frame = Vec::new();
    encode_length(identity_bytes.len() as u64 + 1, &mut frame, false);
    frame.push(0x00);
    frame.extend_from_slice(&identity_bytes);

    let mut cursor = ReadCursor::new(&frame);
    assert_eq!(parse_legacy_identity(&mut cursor), Ok(Some(identity_bytes)));
    assert!(cursor.is_empty());
}

#[test]
fn legacy_identity_of_length_one_is_anonymous() {
    let frame = [0x01, 0x00];
    let mut cursor = ReadCursor::new(&frame);
    assert_eq!(parse_legacy_identity(&mut cursor), Ok(Some(Vec::new())));
    assert!(cursor.is_empty());
}

#[test]
fn legacy_identity_rejects_a_zero_frame_length() {
    let frame = [0x00];
    let mut cursor = ReadCursor::new(&frame);
    assert_eq!(
        parse_legacy_identity(&mut cursor),
        Err(HandshakeError::MalformedLegacyGreeting)
    );
}

#[test]
fn legacy_identity_reports_pending_on_truncated_frames() {
    let frame = [0x05, 0x00, b'p', b'e'];
    let mut cursor = ReadCursor::new(&frame);
    assert_eq!(parse_legacy_identity(&mut cursor), Ok(None));
    assert_eq!(cursor.position(), 0);
}
