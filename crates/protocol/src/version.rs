use core::fmt;

/// A negotiated ZMTP protocol version.
///
/// Only two versions exist on the wire: the original ZMTP/1.0 framing and the
/// ZMTP/2.0 greeting introduced by <http://rfc.zeromq.org/spec:15>. The
/// backwards-compatibility handshake commits to exactly one of them per
/// connection, so the type is a closed enum rather than an open integer.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ProtocolVersion {
    /// ZMTP/1.0, negotiated through the backwards-compatibility path.
    Zmtp1,
    /// ZMTP/2.0, the version this crate speaks natively.
    Zmtp2,
}

impl ProtocolVersion {
    /// Returns the numeric major version (`1` or `2`).
    ///
    /// Higher layers that log or compare versions can rely on this instead of
    /// matching on the enum, keeping the numeric mapping in one place.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Zmtp1 => 1,
            Self::Zmtp2 => 2,
        }
    }

    /// Returns a short identifier suitable for diagnostics (`"ZMTP/1.0"` or
    /// `"ZMTP/2.0"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zmtp1 => "ZMTP/1.0",
            Self::Zmtp2 => "ZMTP/2.0",
        }
    }

    /// Returns `true` when the version uses the legacy ZMTP/1.0 framing.
    ///
    /// The legacy path changes everything downstream of the handshake (frame
    /// layout, flag semantics), so callers typically branch on this predicate
    /// when installing the post-handshake codec.
    #[must_use = "check whether the legacy framing was negotiated"]
    #[inline]
    pub const fn is_legacy(self) -> bool {
        matches!(self, Self::Zmtp1)
    }

    /// Maps a numeric major version back to the enum, if it names a known
    /// version.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Zmtp1),
            2 => Some(Self::Zmtp2),
            _ => None,
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ProtocolVersion> for u8 {
    fn from(version: ProtocolVersion) -> Self {
        version.as_u8()
    }
}
