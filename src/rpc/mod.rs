// RPC client session layer
//
// The session handle bound to a mount and the transport contract that
// performs the actual socket I/O and message framing.

pub mod client;
pub mod transport;

pub use client::{RpcClient, SessionFlags, SocketType};
pub use transport::{Transport, TransportError};
