use core::fmt;

use crate::version::ProtocolVersion;

/// Negotiation state of a [`HandshakeEngine`](super::HandshakeEngine).
///
/// `Initial` is the start state in both negotiation modes. Strict engines
/// move straight to `Terminal` on their single round-trip. Interop engines
/// either reach `Terminal` directly (legacy peer) or pass through
/// `AwaitingSplitBody` when version detection committed to ZMTP/2.0 but only
/// the compatibility probe had been sent, leaving the greeting body for a
/// second exchange.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HandshakeState {
    /// No inbound bytes have been interpreted yet.
    Initial,
    /// The probe was answered by a ZMTP/2.0 peer; the peer's greeting body is
    /// still outstanding.
    AwaitingSplitBody,
    /// The outcome has been produced; the engine is spent.
    Terminal,
}

impl HandshakeState {
    /// Returns a short identifier for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::AwaitingSplitBody => "awaiting-split-body",
            Self::Terminal => "terminal",
        }
    }

    /// Returns `true` once the engine has produced its outcome.
    #[must_use]
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal)
    }
}

impl fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of driving the engine with inbound bytes.
///
/// More data (or another round-trip) pending and successful completion are
/// both ordinary outcomes of a single call, so they share a tagged type
/// instead of overloading an absent value; protocol violations travel
/// separately through `Result`'s error arm.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HandshakePoll {
    /// The handshake needs more inbound bytes or another round-trip.
    Pending,
    /// The handshake finished; the outcome now belongs to the caller.
    Complete(HandshakeOutcome),
}

impl HandshakePoll {
    /// Returns `true` when more inbound data is required.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` when the handshake finished.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Extracts the outcome, if the handshake finished.
    #[must_use]
    pub fn into_outcome(self) -> Option<HandshakeOutcome> {
        match self {
            Self::Complete(outcome) => Some(outcome),
            Self::Pending => None,
        }
    }
}

/// The product of a completed handshake: the negotiated protocol version and
/// the identity announced by the remote peer.
///
/// Produced exactly once per engine, at the transition into
/// [`HandshakeState::Terminal`]; ownership passes to the caller and the
/// engine retains no reference. The remote identity is kept as raw bytes
/// rather than an [`Identity`](crate::Identity) because a legacy peer may
/// announce more than 255 bytes through the extended length form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HandshakeOutcome {
    version: ProtocolVersion,
    remote_identity: Vec<u8>,
}

impl HandshakeOutcome {
    pub(crate) const fn new(version: ProtocolVersion, remote_identity: Vec<u8>) -> Self {
        Self {
            version,
            remote_identity,
        }
    }

    /// Returns the negotiated protocol version.
    #[must_use]
    pub const fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Returns the identity announced by the remote peer.
    #[must_use]
    pub fn remote_identity(&self) -> &[u8] {
        &self.remote_identity
    }

    /// Consumes the outcome and returns the remote identity bytes.
    #[must_use]
    pub fn into_remote_identity(self) -> Vec<u8> {
        self.remote_identity
    }
}

impl fmt::Display for HandshakeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} peer with a {}-byte identity",
            self.version,
            self.remote_identity.len()
        )
    }
}
