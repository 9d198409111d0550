use core::fmt;

use tracing::{debug, trace};

use crate::cursor::ReadCursor;
use crate::error::HandshakeError;
use crate::identity::Identity;
use crate::socket_type::SocketType;
use crate::version::ProtocolVersion;
use crate::wire::{
    detect_protocol_version, encode_compat_signature, encode_greeting, parse_greeting,
    parse_legacy_identity,
};

use super::outcome::{HandshakeOutcome, HandshakePoll, HandshakeState};

/// Negotiation mode fixed at engine construction.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HandshakeMode {
    /// Assume the peer speaks ZMTP/2.0; send the full greeting immediately
    /// and complete in a single round-trip.
    Strict,
    /// Send only the compatibility probe and auto-detect whether the peer
    /// speaks ZMTP/1.0 or ZMTP/2.0 from its first bytes.
    Interop,
}

impl HandshakeMode {
    /// Returns a short identifier for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Interop => "interop",
        }
    }

    /// Returns `true` when backward-compatible auto-detection is enabled.
    #[must_use]
    #[inline]
    pub const fn is_interop(self) -> bool {
        matches!(self, Self::Interop)
    }
}

impl fmt::Display for HandshakeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination for outbound handshake bytes.
///
/// The engine queues bytes and never awaits their delivery; the transport
/// must only guarantee that bytes queued during one [`advance`] call reach
/// the peer before the engine processes bytes delivered to a later call.
/// `Vec<u8>` implements the trait by appending, which is what the tests use
/// to capture traffic.
///
/// [`advance`]: HandshakeEngine::advance
pub trait ByteSink {
    /// Queues `bytes` for delivery to the remote peer.
    fn send(&mut self, bytes: &[u8]);
}

impl ByteSink for Vec<u8> {
    fn send(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn send(&mut self, bytes: &[u8]) {
        (**self).send(bytes);
    }
}

/// Handshake negotiation engine for a single connection attempt.
///
/// Create one engine per connection, send the bytes returned by
/// [`connect_greeting`](Self::connect_greeting) as soon as the transport
/// opens, then call [`advance`](Self::advance) with the buffered inbound
/// bytes after each delivery until it yields
/// [`HandshakePoll::Complete`] or an error. A finished or failed engine must
/// be discarded; it cannot be reused for another connection.
///
/// # Examples
///
/// Two strict peers complete in a single exchange:
///
/// ```
/// use zmtp_protocol::{
///     HandshakeEngine, HandshakeMode, Identity, ProtocolVersion, ReadCursor, SocketType,
/// };
///
/// let mut engine = HandshakeEngine::new(
///     SocketType::Dealer,
///     HandshakeMode::Strict,
///     Identity::from_slice(b"local")?,
/// );
/// let peer = HandshakeEngine::new(
///     SocketType::Router,
///     HandshakeMode::Strict,
///     Identity::from_slice(b"remote")?,
/// );
///
/// let inbound = peer.connect_greeting();
/// let mut cursor = ReadCursor::new(&inbound);
/// let mut sink: Vec<u8> = Vec::new();
///
/// let poll = engine.advance(&mut cursor, &mut sink)?;
/// let outcome = poll.into_outcome().expect("single round-trip completes");
/// assert_eq!(outcome.version(), ProtocolVersion::Zmtp2);
/// assert_eq!(outcome.remote_identity(), b"remote");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct HandshakeEngine {
    socket_type: SocketType,
    mode: HandshakeMode,
    local_identity: Identity,
    state: HandshakeState,
}

impl HandshakeEngine {
    /// Creates an engine for a fresh connection attempt.
    #[must_use]
    pub const fn new(
        socket_type: SocketType,
        mode: HandshakeMode,
        local_identity: Identity,
    ) -> Self {
        Self {
            socket_type,
            mode,
            local_identity,
            state: HandshakeState::Initial,
        }
    }

    /// Returns the negotiation mode the engine was built with.
    #[must_use]
    pub const fn mode(&self) -> HandshakeMode {
        self.mode
    }

    /// Returns the local socket role advertised in the greeting.
    #[must_use]
    pub const fn socket_type(&self) -> SocketType {
        self.socket_type
    }

    /// Returns the identity announced to the peer.
    #[must_use]
    pub const fn local_identity(&self) -> &Identity {
        &self.local_identity
    }

    /// Returns the current negotiation state.
    #[must_use]
    pub const fn state(&self) -> HandshakeState {
        self.state
    }

    /// Produces the bytes to send immediately after the connection opens.
    ///
    /// Strict engines emit the full ZMTP/2.0 greeting; interop engines emit
    /// only the 10-octet compatibility probe and hold the rest of the
    /// greeting back until the peer's version is known. The call has no side
    /// effects and does not advance the negotiation state, so producing the
    /// same bytes again (for a reconnect-and-replay transport, say) is safe
    /// until the first [`advance`](Self::advance) call.
    #[must_use]
    pub fn connect_greeting(&self) -> Vec<u8> {
        match self.mode {
            HandshakeMode::Strict => encode_greeting(self.socket_type, &self.local_identity, true),
            HandshakeMode::Interop => encode_compat_signature(&self.local_identity),
        }
    }

    /// Drives the negotiation with buffered inbound bytes.
    ///
    /// The cursor must cover every inbound byte not yet consumed by a
    /// previous call. On return the cursor's
    /// [`position`](ReadCursor::position) tells the caller how many bytes the
    /// engine consumed; any path that cannot finish its current step restores
    /// the position it started from, so unconsumed bytes are never lost and a
    /// wrong version guess never corrupts the stream. `Ok(Pending)` means
    /// more inbound data (or another round-trip) is required; the caller
    /// re-invokes after the next delivery.
    ///
    /// # Errors
    ///
    /// Any [`HandshakeError`] is fatal for the connection. Calling `advance`
    /// again after completion yields [`HandshakeError::AlreadyComplete`].
    pub fn advance<S: ByteSink>(
        &mut self,
        cursor: &mut ReadCursor<'_>,
        sink: &mut S,
    ) -> Result<HandshakePoll, HandshakeError> {
        match self.state {
            HandshakeState::Terminal => Err(HandshakeError::AlreadyComplete),
            HandshakeState::AwaitingSplitBody => match parse_greeting(cursor, false)? {
                None => Ok(HandshakePoll::Pending),
                Some(identity) => Ok(self.complete(ProtocolVersion::Zmtp2, identity)),
            },
            HandshakeState::Initial => match self.mode {
                HandshakeMode::Strict => match parse_greeting(cursor, true)? {
                    None => Ok(HandshakePoll::Pending),
                    Some(identity) => Ok(self.complete(ProtocolVersion::Zmtp2, identity)),
                },
                HandshakeMode::Interop => self.advance_interop(cursor, sink),
            },
        }
    }

    /// Runs version detection and the mode-specific follow-up while the
    /// engine is still in [`HandshakeState::Initial`].
    fn advance_interop<S: ByteSink>(
        &mut self,
        cursor: &mut ReadCursor<'_>,
        sink: &mut S,
    ) -> Result<HandshakePoll, HandshakeError> {
        let Some(version) = detect_protocol_version(cursor) else {
            return Ok(HandshakePoll::Pending);
        };
        trace!(version = %version, "peer protocol version detected");

        match version {
            ProtocolVersion::Zmtp1 => {
                // The detector rewound the cursor, so the same octets parse
                // as the peer's legacy identity frame. Hold the local
                // identity send until the frame is complete: a partial frame
                // must leave the engine untouched or a retry would send the
                // identity twice.
                match parse_legacy_identity(cursor)? {
                    None => Ok(HandshakePoll::Pending),
                    Some(identity) => {
                        // The probe already on the wire plus the raw identity
                        // bytes form a complete ZMTP/1.0 greeting.
                        sink.send(self.local_identity.as_bytes());
                        Ok(self.complete(ProtocolVersion::Zmtp1, identity))
                    }
                }
            }
            ProtocolVersion::Zmtp2 => {
                sink.send(&encode_greeting(
                    self.socket_type,
                    &self.local_identity,
                    false,
                ));
                self.state = HandshakeState::AwaitingSplitBody;
                trace!(state = %self.state, "probe answered, awaiting peer greeting body");
                Ok(HandshakePoll::Pending)
            }
        }
    }

    fn complete(&mut self, version: ProtocolVersion, remote_identity: Vec<u8>) -> HandshakePoll {
        self.state = HandshakeState::Terminal;
        debug!(
            version = %version,
            remote_identity_len = remote_identity.len(),
            "handshake complete"
        );
        HandshakePoll::Complete(HandshakeOutcome::new(version, remote_identity))
    }
}
