// NFSv3 Protocol Types
//
// This module provides:
// - Process-wide XDR constants computed once at client start
// - NFSv3 program identity and procedure numbers
// - RPC reply header decoding

pub mod constants;
pub mod nfs;
pub mod rpc;

// Re-export for convenience
pub use constants::ProtocolConstants;
pub use nfs::{NFS3_PROGRAM, NfsProcedure};
pub use rpc::{AuthType, ReplyHeader, RpcProgram};
