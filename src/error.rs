// NFS client errors
//
// Every failure the transaction layer can return, each with the system
// error code callers in the filesystem layer expect.

use std::collections::TryReserveError;
use thiserror::Error;

use crate::rpc::TransportError;

#[derive(Debug, Error)]
pub enum NfsError {
    #[error("invalid mount: {0}")]
    InvalidArgument(String),

    #[error("out of memory allocating RPC session")]
    OutOfMemory,

    #[error("mount has no RPC session")]
    NotConnected,

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Server NFS status that maps directly onto an errno
    #[error("NFS status {0}")]
    Status(u32),

    /// Server NFS status outside the errno range
    #[error("operation not supported (NFS status {0})")]
    NotSupported(u32),

    #[error("stale file handle")]
    Stale,

    #[error("server authentication error (errno {0})")]
    Auth(i32),
}

impl NfsError {
    /// System error code for this failure
    pub fn errno(&self) -> i32 {
        match self {
            NfsError::InvalidArgument(_) => libc::EFAULT,
            NfsError::OutOfMemory => libc::ENOMEM,
            NfsError::NotConnected => libc::ENOTCONN,
            NfsError::Transport(e) => e.errno(),
            NfsError::Status(status) => *status as i32,
            NfsError::NotSupported(_) => libc::EOPNOTSUPP,
            NfsError::Stale => libc::ESTALE,
            NfsError::Auth(errno) => *errno,
        }
    }
}

impl From<TryReserveError> for NfsError {
    fn from(_: TryReserveError) -> Self {
        NfsError::OutOfMemory
    }
}

pub type Result<T> = std::result::Result<T, NfsError>;
