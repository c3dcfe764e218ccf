// RPC Protocol Middleware
//
// Program descriptors, authentication selection and the reply header
// that prefixes every NFS response buffer.

use bytes::{BufMut, BytesMut};
use std::fmt;
use std::io::Cursor;
use xdr_codec::Unpack;

use crate::rpc::TransportError;

/// RPC message direction for replies
pub const MSG_REPLY: u32 = 1;

/// Reply status for an accepted call
pub const MSG_ACCEPTED: u32 = 0;

/// Accept status of a call the server executed
pub const SUCCESS: u32 = 0;

/// Static identity of an RPC program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcProgram {
    pub prog_id: u32,
    pub prog_version: u32,
    pub prog_name: &'static str,
}

impl fmt::Display for RpcProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.prog_name, self.prog_id, self.prog_version)
    }
}

/// Authentication flavor used for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthType {
    /// AUTH_NONE
    #[default]
    None,
    /// AUTH_UNIX
    Unix,
}

impl AuthType {
    pub fn flavor(self) -> u32 {
        match self {
            AuthType::None => 0,
            AuthType::Unix => 1,
        }
    }
}

/// Leading words of an NFS response buffer
///
/// Layout (XDR, big-endian words):
/// `xid | mtype | reply_stat | verf_flavor | verf_len | accept_stat | nfs_status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplyHeader {
    pub xid: u32,
    pub mtype: u32,
    pub reply_stat: u32,
    /// Verifier flavor word; the server reuses it to carry an errno
    pub verf_flavor: u32,
    pub verf_len: u32,
    /// RPC accept status; anything but SUCCESS means the call never ran
    pub accept_stat: u32,
    pub nfs_status: u32,
}

impl ReplyHeader {
    /// Encoded size in bytes
    pub const SIZE: usize = 7 * 4;

    /// Header of a successful reply
    pub fn success(xid: u32) -> Self {
        Self {
            xid,
            mtype: MSG_REPLY,
            reply_stat: MSG_ACCEPTED,
            accept_stat: SUCCESS,
            ..Self::default()
        }
    }

    pub fn with_nfs_status(mut self, status: u32) -> Self {
        self.nfs_status = status;
        self
    }

    pub fn with_accept_stat(mut self, accept_stat: u32) -> Self {
        self.accept_stat = accept_stat;
        self
    }

    pub fn with_auth_status(mut self, errno: i32) -> Self {
        self.verf_flavor = errno as u32;
        self
    }

    /// Decode the header from the start of a response buffer
    pub fn decode(data: &[u8]) -> Result<Self, TransportError> {
        if data.len() < Self::SIZE {
            return Err(TransportError::Malformed(format!(
                "reply of {} bytes is shorter than the {} byte header",
                data.len(),
                Self::SIZE
            )));
        }

        let mut cursor = Cursor::new(&data[..Self::SIZE]);
        let mut word = || -> Result<u32, TransportError> {
            let (value, _bytes_read) = u32::unpack(&mut cursor)
                .map_err(|e| TransportError::Malformed(e.to_string()))?;
            Ok(value)
        };

        Ok(Self {
            xid: word()?,
            mtype: word()?,
            reply_stat: word()?,
            verf_flavor: word()?,
            verf_len: word()?,
            accept_stat: word()?,
            nfs_status: word()?,
        })
    }

    /// Encode the header into its wire form
    pub fn to_bytes(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(Self::SIZE);
        buf.put_u32(self.xid);
        buf.put_u32(self.mtype);
        buf.put_u32(self.reply_stat);
        buf.put_u32(self.verf_flavor);
        buf.put_u32(self.verf_len);
        buf.put_u32(self.accept_stat);
        buf.put_u32(self.nfs_status);
        buf
    }

    /// Authentication verifier status, read as a signed errno
    pub fn auth_status(&self) -> i32 {
        self.verf_flavor as i32
    }
}
