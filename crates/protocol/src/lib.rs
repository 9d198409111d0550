#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! ZMTP handshake negotiation for a single point-to-point byte stream.
//!
//! The crate implements the connection-start exchange of the ZMTP messaging
//! transport: building the outbound greeting, auto-detecting whether the
//! remote peer speaks ZMTP/1.0 or ZMTP/2.0, parsing the peer's greeting, and
//! driving the multi-step "split" exchange required when detection commits
//! to ZMTP/2.0 after only the compatibility probe has been sent. Everything
//! else -- the transport that moves bytes, the frame codec installed once the
//! handshake finishes, identity generation -- stays outside, reached through
//! the narrow [`ByteSink`] and [`ReadCursor`] seams.
//!
//! The engine is sans-IO and never blocks: each [`HandshakeEngine::advance`]
//! call either makes progress with the bytes on hand or reports
//! [`HandshakePoll::Pending`] with the cursor restored, leaving the caller to
//! buffer more data and retry. Protocol violations surface as
//! [`HandshakeError`] and end the connection.
//!
//! # Examples
//!
//! An interop endpoint detecting a legacy (ZMTP/1.0) peer from its first
//! bytes:
//!
//! ```
//! use zmtp_protocol::{
//!     HandshakeEngine, HandshakeMode, Identity, ProtocolVersion, ReadCursor, SocketType,
//! };
//!
//! let mut engine = HandshakeEngine::new(
//!     SocketType::Req,
//!     HandshakeMode::Interop,
//!     Identity::from_slice(b"local")?,
//! );
//!
//! // A ZMTP/1.0 greeting: length (flags + identity), flags, identity bytes.
//! let inbound = [0x05, 0x00, b'p', b'e', b'e', b'r'];
//! let mut cursor = ReadCursor::new(&inbound);
//! let mut sink: Vec<u8> = Vec::new();
//!
//! let outcome = engine
//!     .advance(&mut cursor, &mut sink)?
//!     .into_outcome()
//!     .expect("legacy detection completes in one step");
//! assert_eq!(outcome.version(), ProtocolVersion::Zmtp1);
//! assert_eq!(outcome.remote_identity(), b"peer");
//! assert_eq!(sink, b"local");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

mod cursor;
mod error;
mod handshake;
mod identity;
mod socket_type;
mod version;
mod wire;

pub use cursor::ReadCursor;
pub use error::HandshakeError;
pub use handshake::{
    ByteSink, HandshakeEngine, HandshakeMode, HandshakeOutcome, HandshakePoll, HandshakeState,
};
pub use identity::{Identity, IdentityTooLong, MAX_IDENTITY_LEN};
pub use socket_type::SocketType;
pub use version::ProtocolVersion;
pub use wire::{
    FLAGS_FINAL, GREETING_SIGNATURE_LEN, LONG_FORM_MARKER, PROTOCOL_REVISION, SIGNATURE_TAIL,
    decode_length, detect_protocol_version, encode_compat_signature, encode_greeting,
    encode_length, parse_greeting, parse_legacy_identity,
};
