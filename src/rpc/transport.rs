// RPC Transport Contract
//
// The transaction layer never touches a socket. Connection lifecycle,
// record marking and call marshalling are delegated to a `Transport`.

use std::io;
use std::time::Duration;
use thiserror::Error;

use super::client::RpcClient;
use crate::protocol::v3::ProtocolConstants;

/// Failures reported by the transport
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("RPC call timed out after {retries} retries")]
    TimedOut { retries: u32 },

    #[error("RPC session is not connected")]
    Disconnected,

    #[error("RPC call not accepted (accept_stat {0})")]
    Rejected(u32),

    #[error("malformed RPC reply: {0}")]
    Malformed(String),

    #[error("transport error (errno {0})")]
    Errno(i32),
}

impl TransportError {
    /// System error code equivalent
    pub fn errno(&self) -> i32 {
        match self {
            TransportError::Io(e) => e.raw_os_error().unwrap_or(libc::EIO),
            TransportError::TimedOut { .. } => libc::ETIMEDOUT,
            TransportError::Disconnected => libc::ENOTCONN,
            TransportError::Rejected(_) => libc::EPROTO,
            TransportError::Malformed(_) => libc::EBADMSG,
            TransportError::Errno(errno) => *errno,
        }
    }
}

/// RPC client transport
///
/// Implementations own the socket state behind each `RpcClient` and
/// enforce the timeout, retry and interrupt settings it carries.
pub trait Transport {
    /// One-time transport setup, run once per client before any session
    fn init(&self, _constants: &ProtocolConstants) {}

    /// Establish the session described by `client` (connect / handshake)
    fn connect(&self, client: &mut RpcClient) -> Result<(), TransportError>;

    /// Perform one full RPC round trip
    ///
    /// Marshals `request` under `prog`/`vers`/`procnum`, transmits it and
    /// writes the reply (header included) into `response`.
    fn call(
        &self,
        client: &RpcClient,
        prog: u32,
        vers: u32,
        procnum: u32,
        request: &[u8],
        response: &mut [u8],
    ) -> Result<(), TransportError>;

    /// Close the session immediately
    fn disconnect(&self, client: &mut RpcClient);

    /// Shut a stream session down in order before closing it
    fn safe_disconnect(&self, client: &mut RpcClient);

    /// Wait out a "try later" backoff before the next attempt
    ///
    /// Blocks the calling thread by default. Transports honouring the
    /// interruptible flag may return early.
    fn pause(&self, _client: &RpcClient, delay: Duration) {
        std::thread::sleep(delay);
    }
}
