// Arctic Wolf NFS Client - Library
//
// This library provides the client-side NFSv3 transaction layer: session
// setup over a pluggable RPC transport, synchronous calls and reply
// status classification.

pub mod config;
pub mod error;
pub mod logging;
pub mod nfs;
pub mod protocol;
pub mod rpc;

// Re-export commonly used types
pub use config::Config;
pub use error::{NfsError, Result};
pub use nfs::{MountFlags, NfsClient, NfsMount};
pub use protocol::{NfsProcedure, ProtocolConstants, ReplyHeader};
pub use rpc::{RpcClient, SessionFlags, SocketType, Transport, TransportError};
