use core::fmt;
use std::io;

/// Errors that can occur while negotiating the connection handshake.
///
/// Every variant is fatal for the connection: the engine performs no further
/// processing once one is surfaced, and the caller is expected to close the
/// transport. Running out of buffered bytes is deliberately *not* an error --
/// the engine reports that as [`HandshakePoll::Pending`](crate::HandshakePoll)
/// so callers can retry once more data arrives.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HandshakeError {
    /// The first octet of an expected ZMTP/2.0 signature was not `0xFF`.
    IllegalSignature {
        /// The octet actually received.
        actual: u8,
    },
    /// The greeting's flags octet was not `0x00` (final, non-continuation).
    MalformedGreeting {
        /// The flags octet actually received.
        flags: u8,
    },
    /// A ZMTP/1.0 greeting announced a frame length of zero.
    ///
    /// Legacy greetings always count their one-byte flags octet, so a
    /// conforming peer can never produce a zero length.
    MalformedLegacyGreeting,
    /// The engine already produced its outcome; handshake engines are
    /// single-use and must be discarded after completion.
    AlreadyComplete,
}

impl HandshakeError {
    /// Returns the offending signature octet for
    /// [`HandshakeError::IllegalSignature`], if any.
    #[must_use]
    pub const fn illegal_signature_octet(&self) -> Option<u8> {
        match self {
            Self::IllegalSignature { actual } => Some(*actual),
            _ => None,
        }
    }

    /// Returns the offending flags octet for
    /// [`HandshakeError::MalformedGreeting`], if any.
    #[must_use]
    pub const fn malformed_flags(&self) -> Option<u8> {
        match self {
            Self::MalformedGreeting { flags } => Some(*flags),
            _ => None,
        }
    }

    /// Returns `true` when the error reports a wire-level protocol violation
    /// rather than misuse of an already finished engine.
    #[must_use]
    pub const fn is_protocol_violation(&self) -> bool {
        !matches!(self, Self::AlreadyComplete)
    }
}

impl fmt::Display for HandshakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalSignature { actual } => write!(
                f,
                "illegal ZMTP/2.0 greeting, first signature octet was 0x{actual:02x} instead of 0xff"
            ),
            Self::MalformedGreeting { flags } => write!(
                f,
                "malformed ZMTP/2.0 greeting, flags octet was 0x{flags:02x} instead of 0x00"
            ),
            Self::MalformedLegacyGreeting => {
                f.write_str("malformed ZMTP/1.0 greeting, frame length of zero cannot carry the flags octet")
            }
            Self::AlreadyComplete => {
                f.write_str("handshake already completed; the engine must not be driven again")
            }
        }
    }
}

impl std::error::Error for HandshakeError {}

impl From<HandshakeError> for io::Error {
    fn from(err: HandshakeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}
