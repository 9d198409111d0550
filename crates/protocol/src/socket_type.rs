use core::fmt;

/// The messaging pattern role a socket plays, as advertised in the ZMTP/2.0
/// greeting.
///
/// Each role maps to a single wire ordinal defined by
/// <http://rfc.zeromq.org/spec:15>. The greeting encoder writes the ordinal
/// verbatim; the parser deliberately does not validate the peer's byte, since
/// pattern compatibility checks belong to the socket layer rather than to the
/// handshake.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum SocketType {
    /// Exclusive pair.
    Pair = 0,
    /// Publisher.
    Pub = 1,
    /// Subscriber.
    Sub = 2,
    /// Synchronous requester.
    Req = 3,
    /// Synchronous replier.
    Rep = 4,
    /// Asynchronous requester.
    Dealer = 5,
    /// Asynchronous replier.
    Router = 6,
    /// Pipeline consumer.
    Pull = 7,
    /// Pipeline producer.
    Push = 8,
}

impl SocketType {
    /// Returns the wire ordinal carried in the greeting's socket-type octet.
    #[must_use]
    #[inline]
    pub const fn to_wire(self) -> u8 {
        self as u8
    }

    /// Maps a wire ordinal back to a socket type, if it names a known role.
    #[must_use]
    pub const fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Pair),
            1 => Some(Self::Pub),
            2 => Some(Self::Sub),
            3 => Some(Self::Req),
            4 => Some(Self::Rep),
            5 => Some(Self::Dealer),
            6 => Some(Self::Router),
            7 => Some(Self::Pull),
            8 => Some(Self::Push),
            _ => None,
        }
    }

    /// Returns the conventional upper-case name for the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pair => "PAIR",
            Self::Pub => "PUB",
            Self::Sub => "SUB",
            Self::Req => "REQ",
            Self::Rep => "REP",
            Self::Dealer => "DEALER",
            Self::Router => "ROUTER",
            Self::Pull => "PULL",
            Self::Push => "PUSH",
        }
    }

    /// All socket types, in wire-ordinal order.
    pub const ALL: [Self; 9] = [
        Self::Pair,
        Self::Pub,
        Self::Sub,
        Self::Req,
        Self::Rep,
        Self::Dealer,
        Self::Router,
        Self::Pull,
        Self::Push,
    ];
}

impl fmt::Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_ordinals_round_trip() {
        for socket_type in SocketType::ALL {
            assert_eq!(
                SocketType::from_wire(socket_type.to_wire()),
                Some(socket_type)
            );
        }
    }

    #[test]
    fn ordinals_are_dense_and_start_at_zero() {
        for (index, socket_type) in SocketType::ALL.iter().enumerate() {
            assert_eq!(usize::from(socket_type.to_wire()), index);
        }
        assert_eq!(SocketType::from_wire(9), None);
        assert_eq!(SocketType::from_wire(u8::MAX), None);
    }

    #[test]
    fn display_matches_conventional_names() {
        assert_eq!(SocketType::Router.to_string(), "ROUTER");
        assert_eq!(SocketType::Pair.to_string(), "PAIR");
    }
}
