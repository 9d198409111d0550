//! Byte-level codecs for the handshake exchange.
//!
//! [`length`] implements the ZMTP/1.0 frame-length prefix that both protocol
//! versions reuse for their greeting signatures. [`greeting`] builds on it to
//! encode and parse the greetings themselves, including the 10-octet
//! compatibility probe and the version-detection peek.

mod greeting;
mod length;

pub use greeting::{
    FLAGS_FINAL, GREETING_SIGNATURE_LEN, PROTOCOL_REVISION, SIGNATURE_TAIL, detect_protocol_version,
    encode_compat_signature, encode_greeting, parse_greeting, parse_legacy_identity,
};
pub use length::{LONG_FORM_MARKER, decode_length, encode_length};

#[cfg(test)]
mod tests;
