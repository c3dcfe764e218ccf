// NFS Mount State
//
// Per-mount configuration handed down by the filesystem layer, plus the
// RPC session attached to it once connected.

use std::net::SocketAddr;
use std::ops::BitOr;
use std::time::Duration;

use crate::rpc::{RpcClient, SocketType};

/// Default per-call timeout
pub const DEFAULT_TIMEO: Duration = Duration::from_secs(1);

/// Default retransmission count
pub const DEFAULT_RETRANS: u32 = 10;

/// Mount option flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MountFlags(u32);

impl MountFlags {
    pub const SOFT: Self = Self(0x0000_0001);
    pub const INT: Self = Self(0x0000_0040);
    pub const NOCONN: Self = Self(0x0000_0080);
    /// Speak the NFS version 3 dialect
    pub const NFSV3: Self = Self(0x0000_0200);
    pub const DUMBTIMR: Self = Self(0x0000_0800);
    pub const RESVPORT: Self = Self(0x0000_8000);
    pub const RDIRPLUS: Self = Self(0x0001_0000);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for MountFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A mounted NFS export
#[derive(Debug, Clone)]
pub struct NfsMount {
    pub flags: MountFlags,
    /// Server address; a mount without one cannot be connected
    pub server: Option<SocketAddr>,
    /// Export path on the server
    pub path: String,
    pub sotype: SocketType,
    pub soproto: i32,
    pub timeout: Duration,
    pub retry: u32,
    rpc: Option<RpcClient>,
}

impl Default for NfsMount {
    fn default() -> Self {
        Self {
            flags: MountFlags::NFSV3,
            server: None,
            path: String::new(),
            sotype: SocketType::Stream,
            soproto: SocketType::Stream.default_protocol(),
            timeout: DEFAULT_TIMEO,
            retry: DEFAULT_RETRANS,
            rpc: None,
        }
    }
}

impl NfsMount {
    /// NFSv3 over TCP mount of `path` on `server`
    pub fn new(server: SocketAddr, path: impl Into<String>) -> Self {
        Self {
            server: Some(server),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Switch to a datagram socket with its default protocol
    pub fn with_datagram(mut self) -> Self {
        self.sotype = SocketType::Datagram;
        self.soproto = SocketType::Datagram.default_protocol();
        self
    }

    /// Add `flags` to the ones already set
    pub fn with_flags(mut self, flags: MountFlags) -> Self {
        self.flags.insert(flags);
        self
    }

    /// Replace every flag, `NFSV3` included
    pub fn set_flags(mut self, flags: MountFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_v3(&self) -> bool {
        self.flags.contains(MountFlags::NFSV3)
    }

    /// Attached session, if any
    pub fn session(&self) -> Option<&RpcClient> {
        self.rpc.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.rpc.is_some()
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut RpcClient> {
        self.rpc.as_mut()
    }

    pub(crate) fn attach(&mut self, rpc: RpcClient) -> &mut RpcClient {
        self.rpc.insert(rpc)
    }

    pub(crate) fn detach(&mut self) -> Option<RpcClient> {
        self.rpc.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_defaults() {
        let mount = NfsMount::new("10.0.0.1:2049".parse().unwrap(), "/export");
        assert!(mount.is_v3());
        assert_eq!(mount.path, "/export");
        assert_eq!(mount.sotype, SocketType::Stream);
        assert_eq!(mount.soproto, libc::IPPROTO_TCP);
        assert_eq!(mount.timeout, DEFAULT_TIMEO);
        assert_eq!(mount.retry, DEFAULT_RETRANS);
        assert!(!mount.is_attached());
    }

    #[test]
    fn test_default_mount_has_no_server() {
        let mount = NfsMount::default();
        assert!(mount.server.is_none());
        assert!(mount.path.is_empty());
    }

    #[test]
    fn test_with_datagram() {
        let mount = NfsMount::new("10.0.0.1:2049".parse().unwrap(), "/export").with_datagram();
        assert_eq!(mount.sotype, SocketType::Datagram);
        assert_eq!(mount.soproto, libc::IPPROTO_UDP);
    }

    #[test]
    fn test_mount_flags() {
        let mut flags = MountFlags::SOFT | MountFlags::RDIRPLUS;
        assert!(flags.contains(MountFlags::SOFT));
        assert!(!flags.contains(MountFlags::NFSV3));

        flags.insert(MountFlags::NFSV3);
        flags.remove(MountFlags::SOFT);
        assert!(flags.contains(MountFlags::NFSV3));
        assert!(!flags.contains(MountFlags::SOFT));
        assert_eq!(MountFlags::from_bits(flags.bits()), flags);
    }

    #[test]
    fn test_with_flags_keeps_v3() {
        let mount = NfsMount::default().with_flags(MountFlags::SOFT);
        assert!(mount.is_v3());
        assert!(mount.flags.contains(MountFlags::SOFT));
    }

    #[test]
    fn test_v2_mount() {
        let mount = NfsMount::default().set_flags(MountFlags::SOFT);
        assert!(!mount.is_v3());
        assert_eq!(mount.flags, MountFlags::SOFT);
    }
}
