// NFS Client Transaction Layer (NFSv3)
//
// This module connects mounts to the server and runs NFS procedures.
// See RFC 1813 for the protocol.

pub mod backoff;
pub mod flags;
pub mod mount;
pub mod socket;

pub use backoff::Backoff;
pub use flags::translate_flags;
pub use mount::{MountFlags, NfsMount};
pub use socket::{NfsClient, ReplyOutcome, classify_reply};
