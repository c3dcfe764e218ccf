// RPC Session Handle
//
// One `RpcClient` is attached to each connected mount. It carries
// everything the transport needs to reach the server and nothing else.

use std::fmt;
use std::net::SocketAddr;
use std::ops::BitOr;
use std::time::Duration;

use crate::protocol::v3::{AuthType, RpcProgram};

/// Session behaviour flags understood by the transport
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionFlags(u32);

impl SessionFlags {
    /// Give up after the retry count instead of retrying forever
    pub const SOFT: Self = Self(0x01);
    /// Allow external interruption of a blocked call
    pub const INT: Self = Self(0x02);
    /// Do not reconnect a dropped datagram session
    pub const NOCONN: Self = Self(0x04);
    /// Use a fixed timeout instead of RTT estimation
    pub const DUMBTIMR: Self = Self(0x08);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl BitOr for SessionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for SessionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::SOFT, "SOFT"),
            (Self::INT, "INT"),
            (Self::NOCONN, "NOCONN"),
            (Self::DUMBTIMR, "DUMBTIMR"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "SessionFlags({})", set.join(" | "))
    }
}

/// Socket type used to reach the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SocketType {
    #[default]
    Stream,
    Datagram,
}

impl SocketType {
    /// The matching `SOCK_*` constant
    pub fn raw(self) -> i32 {
        match self {
            SocketType::Stream => libc::SOCK_STREAM,
            SocketType::Datagram => libc::SOCK_DGRAM,
        }
    }

    /// Default protocol for this socket type
    pub fn default_protocol(self) -> i32 {
        match self {
            SocketType::Stream => libc::IPPROTO_TCP,
            SocketType::Datagram => libc::IPPROTO_UDP,
        }
    }
}

/// Session handle owned by a mount
#[derive(Debug, Clone)]
pub struct RpcClient {
    /// Program every call is issued against
    pub program: &'static RpcProgram,
    pub flags: SessionFlags,
    pub auth_type: AuthType,
    /// Export path on the server
    pub path: String,
    pub server: SocketAddr,
    pub sotype: SocketType,
    pub soproto: i32,
    /// Per-call timeout enforced by the transport
    pub timeout: Duration,
    /// Retransmissions before a soft session gives up
    pub retry: u32,
    /// Extension procedures; always `None` since NFSv3 defines none
    pub proc_table: Option<&'static [u32]>,
}

impl RpcClient {
    pub fn is_stream(&self) -> bool {
        self.sotype == SocketType::Stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_empty() {
        let flags = SessionFlags::default();
        assert!(flags.is_empty());
        assert_eq!(flags.bits(), 0);
        assert!(!flags.contains(SessionFlags::SOFT));
    }

    #[test]
    fn test_flags_insert_and_contains() {
        let mut flags = SessionFlags::empty();
        flags.insert(SessionFlags::SOFT);
        flags.insert(SessionFlags::DUMBTIMR);

        assert!(flags.contains(SessionFlags::SOFT));
        assert!(flags.contains(SessionFlags::DUMBTIMR));
        assert!(!flags.contains(SessionFlags::INT));
        assert!(flags.contains(SessionFlags::SOFT | SessionFlags::DUMBTIMR));
        assert!(!flags.contains(SessionFlags::SOFT | SessionFlags::INT));
    }

    #[test]
    fn test_flags_debug() {
        let flags = SessionFlags::SOFT | SessionFlags::INT;
        assert_eq!(format!("{:?}", flags), "SessionFlags(SOFT | INT)");
        assert_eq!(format!("{:?}", SessionFlags::empty()), "SessionFlags()");
    }

    #[test]
    fn test_socket_types() {
        assert_eq!(SocketType::default(), SocketType::Stream);
        assert_eq!(SocketType::Stream.raw(), libc::SOCK_STREAM);
        assert_eq!(SocketType::Datagram.raw(), libc::SOCK_DGRAM);
        assert_eq!(SocketType::Stream.default_protocol(), libc::IPPROTO_TCP);
        assert_eq!(SocketType::Datagram.default_protocol(), libc::IPPROTO_UDP);
    }
}
