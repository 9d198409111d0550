use crate::cursor::ReadCursor;

/// Marker octet that introduces the 8-byte extended length form.
pub const LONG_FORM_MARKER: u8 = 0xFF;

/// Encodes a ZMTP/1.0 frame length into `out`.
///
/// Lengths below 255 normally occupy a single octet. Values of 255 and above
/// -- or any value when `long_form` is set -- are written as the
/// [`LONG_FORM_MARKER`] followed by the length as eight big-endian octets.
/// The handshake forces the long form when building greeting signatures: the
/// ZMTP/2.0 compatibility scheme relies on the leading `0xFF` octet being
/// present regardless of the encoded value.
pub fn encode_length(value: u64, out: &mut Vec<u8>, long_form: bool) {
    if !long_form && value < u64::from(LONG_FORM_MARKER) {
        out.push(value as u8);
        return;
    }
    out.push(LONG_FORM_MARKER);
    out.extend_from_slice(&value.to_be_bytes());
}

/// Decodes a ZMTP/1.0 frame length from the cursor.
///
/// Accepts both the single-octet short form and the `0xFF`-prefixed extended
/// form, mirroring [`encode_length`]. Returns `None` and restores the cursor
/// when the buffered bytes end mid-prefix, so the caller can retry once more
/// data has arrived.
#[must_use]
pub fn decode_length(cursor: &mut ReadCursor<'_>) -> Option<u64> {
    let start = cursor.position();
    let first = cursor.read_u8()?;
    if first != LONG_FORM_MARKER {
        return Some(u64::from(first));
    }
    match cursor.read_u64_be() {
        Some(value) => Some(value),
        None => {
            cursor.rewind_to(start);
            None
        }
    }
}
