use crate::cursor::ReadCursor;
use crate::error::HandshakeError;
use crate::identity::Identity;
use crate::socket_type::SocketType;
use crate::version::ProtocolVersion;

use super::length::{LONG_FORM_MARKER, decode_length, encode_length};

/// Length of the ZMTP/2.0 greeting signature (and of the compatibility
/// probe): the long-form length prefix plus the trailing marker octet.
pub const GREETING_SIGNATURE_LEN: usize = 10;

/// Final octet of every signature and compatibility probe.
///
/// Its low-order bit is what version detection inspects, per the backwards
/// compatibility scheme of <http://rfc.zeromq.org/spec:15>.
pub const SIGNATURE_TAIL: u8 = 0x7F;

/// Protocol revision octet written into every ZMTP/2.0 greeting body.
pub const PROTOCOL_REVISION: u8 = 0x01;

/// Flags octet of a conforming greeting: a final, non-continuation frame.
pub const FLAGS_FINAL: u8 = 0x00;

/// Builds a ZMTP/2.0 greeting for the local endpoint.
///
/// With `include_signature` the full wire form is produced: the 10-octet
/// signature, revision, socket-type ordinal, flags, identity length, and the
/// identity bytes. Without it only the body is produced -- the second half of
/// a split handshake, sent when the compatibility probe already stood in for
/// the signature.
#[must_use]
pub fn encode_greeting(
    socket_type: SocketType,
    identity: &Identity,
    include_signature: bool,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(GREETING_SIGNATURE_LEN + 4 + identity.len());
    if include_signature {
        encode_length(0, &mut out, true);
        out.push(SIGNATURE_TAIL);
    }
    out.push(PROTOCOL_REVISION);
    out.push(socket_type.to_wire());
    out.push(FLAGS_FINAL);
    out.push(identity.wire_len());
    out.extend_from_slice(identity.as_bytes());
    out
}

/// Builds the 10-octet compatibility-detection probe.
///
/// The probe is a long-form ZMTP/1.0 length prefix covering the local
/// identity plus its flags octet, followed by [`SIGNATURE_TAIL`]. It is a
/// byte-for-byte valid prefix of both greeting formats: a legacy peer reads
/// it as the start of an ordinary identity frame, while a ZMTP/2.0 peer
/// recognizes the signature pattern. Sending it first lets each side defer
/// its version commitment until the peer's own first bytes arrive.
#[must_use]
pub fn encode_compat_signature(identity: &Identity) -> Vec<u8> {
    let mut out = Vec::with_capacity(GREETING_SIGNATURE_LEN);
    encode_length(identity.len() as u64 + 1, &mut out, true);
    out.push(SIGNATURE_TAIL);
    out
}

/// Deduces the remote protocol version from the first
/// [`GREETING_SIGNATURE_LEN`] buffered octets.
///
/// A first octet other than `0xFF` can only start a short-form legacy frame.
/// Otherwise the octet after the 8-byte length field decides: a clear
/// low-order bit means a legacy frame length, a set bit means the ZMTP/2.0
/// signature tail. On the legacy outcome the cursor is restored to where it
/// started so the same octets can be re-parsed as a ZMTP/1.0 greeting; on the
/// ZMTP/2.0 outcome the probe octets are consumed. Returns `None` (cursor
/// restored) when fewer than ten octets are buffered and the first is `0xFF`.
#[must_use]
pub fn detect_protocol_version(cursor: &mut ReadCursor<'_>) -> Option<ProtocolVersion> {
    let start = cursor.position();
    let first = cursor.read_u8()?;
    if first != LONG_FORM_MARKER {
        cursor.rewind_to(start);
        return Some(ProtocolVersion::Zmtp1);
    }
    let Some(()) = cursor.skip(8) else {
        cursor.rewind_to(start);
        return None;
    };
    let Some(last) = cursor.read_u8() else {
        cursor.rewind_to(start);
        return None;
    };
    if last & 0x01 == 0 {
        cursor.rewind_to(start);
        return Some(ProtocolVersion::Zmtp1);
    }
    Some(ProtocolVersion::Zmtp2)
}

/// Parses a ZMTP/2.0 greeting and returns the remote identity bytes.
///
/// When `expect_signature` is set the greeting must open with the 10-octet
/// signature; only its first octet is validated, the rest is skipped. The
/// revision and socket-type octets are skipped unvalidated in both forms --
/// pattern compatibility is the socket layer's concern. The flags octet must
/// equal [`FLAGS_FINAL`].
///
/// Returns `Ok(None)` with the cursor restored when the buffered octets end
/// before the greeting does; the caller retries after the next delivery.
///
/// # Errors
///
/// [`HandshakeError::IllegalSignature`] when an expected signature does not
/// open with `0xFF`, and [`HandshakeError::MalformedGreeting`] when the flags
/// octet is not `0x00`.
pub fn parse_greeting(
    cursor: &mut ReadCursor<'_>,
    expect_signature: bool,
) -> Result<Option<Vec<u8>>, HandshakeError> {
    let start = cursor.position();
    if expect_signature {
        let Some(first) = cursor.read_u8() else {
            return Ok(pending(cursor, start));
        };
        if first != LONG_FORM_MARKER {
            return Err(HandshakeError::IllegalSignature { actual: first });
        }
        if cursor.skip(GREETING_SIGNATURE_LEN - 1).is_none() {
            return Ok(pending(cursor, start));
        }
    }
    if cursor.skip(2).is_none() {
        return Ok(pending(cursor, start));
    }
    let Some(flags) = cursor.read_u8() else {
        return Ok(pending(cursor, start));
    };
    if flags != FLAGS_FINAL {
        return Err(HandshakeError::MalformedGreeting { flags });
    }
    let Some(len) = cursor.read_u8() else {
        return Ok(pending(cursor, start));
    };
    let Some(identity) = cursor.read_slice(usize::from(len)) else {
        return Ok(pending(cursor, start));
    };
    Ok(Some(identity.to_vec()))
}

/// Parses the identity frame of a ZMTP/1.0 greeting.
///
/// The frame length covers a one-octet flags field plus the identity, so the
/// flags octet is read and discarded and the remaining `length - 1` octets
/// form the identity. Legacy flags carry frame semantics rather than the
/// fixed `0x00` of ZMTP/2.0 greetings and are therefore not validated.
///
/// Returns `Ok(None)` with the cursor restored when the buffered octets end
/// before the frame does.
///
/// # Errors
///
/// [`HandshakeError::MalformedLegacyGreeting`] when the announced length is
/// zero, which cannot account for the mandatory flags octet.
pub fn parse_legacy_identity(
    cursor: &mut ReadCursor<'_>,
) -> Result<Option<Vec<u8>>, HandshakeError> {
    let start = cursor.position();
    let Some(frame_len) = decode_length(cursor) else {
        return Ok(None);
    };
    if frame_len == 0 {
        return Err(HandshakeError::MalformedLegacyGreeting);
    }
    if cursor.read_u8().is_none() {
        return Ok(pending(cursor, start));
    }
    let identity_len = usize::try_from(frame_len - 1).unwrap_or(usize::MAX);
    let Some(identity) = cursor.read_slice(identity_len) else {
        return Ok(pending(cursor, start));
    };
    Ok(Some(identity.to_vec()))
}

fn pending<T>(cursor: &mut ReadCursor<'_>, start: usize) -> Option<T> {
    cursor.rewind_to(start);
    None
}
