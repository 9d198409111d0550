use core::fmt;
use std::io;

use thiserror::Error;

/// Maximum identity length representable on the wire.
///
/// The ZMTP/2.0 greeting encodes the identity length in a single octet, so no
/// identity longer than this can be announced. [`Identity::new`] enforces the
/// bound at construction rather than truncating during encoding, which would
/// silently corrupt the wire length.
pub const MAX_IDENTITY_LEN: usize = 255;

/// Error returned when a local identity exceeds [`MAX_IDENTITY_LEN`] bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub struct IdentityTooLong {
    length: usize,
}

impl IdentityTooLong {
    pub(crate) const fn new(length: usize) -> Self {
        Self { length }
    }

    /// Returns the rejected identity length.
    #[must_use]
    pub const fn length(self) -> usize {
        self.length
    }

    /// Returns how many bytes over the wire limit the identity was.
    #[must_use]
    pub const fn excess(self) -> usize {
        self.length.saturating_sub(MAX_IDENTITY_LEN)
    }
}

impl fmt::Display for IdentityTooLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "identity of {} bytes exceeds the {MAX_IDENTITY_LEN}-byte wire limit",
            self.length
        )
    }
}

impl From<IdentityTooLong> for io::Error {
    fn from(err: IdentityTooLong) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

/// An opaque identity token announced to the remote peer during the
/// handshake.
///
/// Identities are plain byte sequences with no structure imposed by the
/// transport. The wire format caps them at [`MAX_IDENTITY_LEN`] bytes, so the
/// constructor validates the length once and the codecs can encode without
/// re-checking. Generating an identity when the application supplies none is
/// the responsibility of the surrounding session layer, not of this type.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Identity {
    bytes: Vec<u8>,
}

impl Identity {
    /// Creates an identity from the given bytes.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityTooLong`] when the byte sequence cannot be
    /// represented in the greeting's single-octet length field.
    pub fn new(bytes: Vec<u8>) -> Result<Self, IdentityTooLong> {
        if bytes.len() > MAX_IDENTITY_LEN {
            return Err(IdentityTooLong::new(bytes.len()));
        }
        Ok(Self { bytes })
    }

    /// Creates an identity by copying the given slice.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityTooLong`] when the slice exceeds the wire limit. The
    /// check runs before the copy, so oversized input never allocates.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, IdentityTooLong> {
        if bytes.len() > MAX_IDENTITY_LEN {
            return Err(IdentityTooLong::new(bytes.len()));
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Returns the anonymous (zero-length) identity.
    ///
    /// Peers that do not wish to identify themselves announce an empty token;
    /// the wire format represents this as a length octet of zero.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Returns the identity bytes.
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the identity length in bytes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for the anonymous identity.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consumes the identity and returns the underlying bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the length as the single octet written to the wire.
    ///
    /// The construction-time bound guarantees the cast is lossless.
    #[must_use]
    #[inline]
    pub(crate) fn wire_len(&self) -> u8 {
        debug_assert!(self.bytes.len() <= MAX_IDENTITY_LEN);
        self.bytes.len() as u8
    }
}

impl TryFrom<Vec<u8>> for Identity {
    type Error = IdentityTooLong;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl TryFrom<&[u8]> for Identity {
    type Error = IdentityTooLong;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl AsRef<[u8]> for Identity {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
