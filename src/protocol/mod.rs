// Protocol middleware layer
//
// This module provides the wire-level vocabulary shared with the RPC
// transport: program identity, reply header decoding and XDR constants.

pub mod v3;

// Re-export commonly used types
pub use v3::{NFS3_PROGRAM, NfsProcedure, ProtocolConstants, ReplyHeader, RpcProgram};
