//! The per-connection handshake negotiation engine.
//!
//! [`HandshakeEngine`] owns the negotiation state for exactly one connection
//! attempt: it produces the initial outbound bytes when the connection opens
//! and is then driven with inbound bytes until it yields a
//! [`HandshakeOutcome`] or an error. The engine performs no I/O of its own --
//! outbound bytes go through the caller-supplied [`ByteSink`], inbound bytes
//! arrive through a [`ReadCursor`](crate::ReadCursor) over the caller's
//! receive buffer.

mod engine;
mod outcome;

pub use engine::{ByteSink, HandshakeEngine, HandshakeMode};
pub use outcome::{HandshakeOutcome, HandshakePoll, HandshakeState};
