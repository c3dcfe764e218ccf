// NFS Transaction Layer
//
// Turns a mount into an RPC session and runs NFS calls over it.
// One call to `request` is a two-state machine: Attempt issues the RPC,
// the reply header either finishes the call (Done) or, for an NFSv3
// "try later", loops back to Attempt after a growing backoff.

use std::collections::TryReserveError;
use tracing::{debug, error, info, warn};

use super::backoff::Backoff;
use super::flags::translate_flags;
use super::mount::NfsMount;
use crate::config::{Config, RetryConfig};
use crate::error::{NfsError, Result};
use crate::protocol::v3::nfs::{NFS_STATUS_MAX, NFS3_PROGRAM, NfsProcedure};
use crate::protocol::v3::rpc::SUCCESS;
use crate::protocol::v3::{AuthType, ProtocolConstants, ReplyHeader, RpcProgram};
use crate::rpc::{RpcClient, Transport, TransportError};

/// What a reply header tells the caller to do next
#[derive(Debug)]
pub enum ReplyOutcome {
    /// Call finished, successfully or not
    Done(Result<()>),
    /// Server is busy; resend the same request
    TryLater,
}

/// Classify a decoded reply header
///
/// A call the server did not accept is a transport error. Otherwise the
/// NFS status is checked first and is always final. A non-zero
/// verifier status carries an errno; EAGAIN on a v3 mount is the only
/// retryable outcome.
pub fn classify_reply(reply: &ReplyHeader, program: &RpcProgram, v3: bool) -> ReplyOutcome {
    if reply.accept_stat != SUCCESS {
        error!(
            "{}: call rejected, accept_stat {}",
            program.prog_name, reply.accept_stat
        );
        let err = TransportError::Rejected(reply.accept_stat);
        return ReplyOutcome::Done(Err(err.into()));
    }

    if reply.nfs_status != 0 {
        let status = reply.nfs_status;
        let err = if status > NFS_STATUS_MAX {
            NfsError::NotSupported(status)
        } else {
            NfsError::Status(status)
        };
        return ReplyOutcome::Done(Err(err));
    }

    let errno = reply.auth_status();
    if errno == 0 {
        return ReplyOutcome::Done(Ok(()));
    }

    if v3 && errno == libc::EAGAIN {
        return ReplyOutcome::TryLater;
    }

    let err = if errno == libc::ESTALE {
        error!("{}: ESTALE on mount from server", program.prog_name);
        NfsError::Stale
    } else {
        error!("{}: unknown error {} from server", program.prog_name, errno);
        NfsError::Auth(errno)
    };
    ReplyOutcome::Done(Err(err))
}

/// NFS client bound to one transport
pub struct NfsClient<T: Transport> {
    transport: T,
    constants: ProtocolConstants,
    retry: RetryConfig,
}

impl<T: Transport> NfsClient<T> {
    /// Client with the default configuration
    pub fn new(transport: T) -> Self {
        Self::init(transport, &Config::default())
    }

    /// Compute the protocol constants and run the transport's one-time setup
    pub fn init(transport: T, config: &Config) -> Self {
        let constants =
            ProtocolConstants::new(config.protocol.clock_hz, config.protocol.tick_interval_ms);
        debug!("NFS init: ticks={}", constants.ticks);

        transport.init(&constants);

        Self {
            transport,
            constants,
            retry: config.retry.clone(),
        }
    }

    pub fn constants(&self) -> &ProtocolConstants {
        &self.constants
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build an RPC session for `mount`, attach it and connect it
    ///
    /// On a transport failure the session stays attached; the caller may
    /// reconnect or disconnect it.
    pub fn connect(&self, mount: &mut NfsMount) -> Result<()> {
        let rpc = new_session(mount)?;

        if let Some(mut old) = mount.detach() {
            warn!("Replacing existing RPC session to {}", old.server);
            self.transport.disconnect(&mut old);
        }

        debug!("Connecting to {}:{} ({:?})", rpc.server, rpc.path, rpc.flags);
        let rpc = mount.attach(rpc);
        self.transport.connect(rpc)?;

        info!("{} session established with {}", rpc.program.prog_name, rpc.server);
        Ok(())
    }

    /// Tear the session down immediately
    pub fn disconnect(&self, mount: &mut NfsMount) {
        match mount.session_mut() {
            Some(rpc) => {
                self.transport.disconnect(rpc);
                info!("Disconnected from {}", rpc.server);
            }
            None => debug!("Disconnect: mount has no RPC session"),
        }
    }

    /// Shut a stream session down in order; datagram sessions are simply closed
    pub fn safe_disconnect(&self, mount: &mut NfsMount) {
        let stream = match mount.session() {
            Some(rpc) => rpc.is_stream(),
            None => {
                debug!("Safe disconnect: mount has no RPC session");
                return;
            }
        };

        if !stream {
            debug!("Safe disconnect on datagram session, closing");
            self.disconnect(mount);
            return;
        }

        if let Some(rpc) = mount.session_mut() {
            self.transport.safe_disconnect(rpc);
            info!("Disconnected from {} (orderly)", rpc.server);
        }
    }

    /// Run one NFS procedure to completion
    ///
    /// On success `response` holds the reply exactly as the transport
    /// wrote it, header first.
    pub fn request(
        &self,
        mount: &NfsMount,
        procedure: NfsProcedure,
        request: &[u8],
        response: &mut [u8],
    ) -> Result<()> {
        let rpc = mount.session().ok_or(NfsError::NotConnected)?;
        let program = rpc.program;
        let mut backoff = Backoff::from_config(&self.retry);

        loop {
            if let Err(e) = self.transport.call(
                rpc,
                program.prog_id,
                program.prog_version,
                procedure.number(),
                request,
                response,
            ) {
                error!("RPC {} failed: {}", procedure, e);
                return Err(e.into());
            }

            let reply = ReplyHeader::decode(response)?;

            match classify_reply(&reply, program, mount.is_v3()) {
                ReplyOutcome::Done(Ok(())) => {
                    debug!("NFS_SUCCESS {} xid={}", procedure, reply.xid);
                    return Ok(());
                }
                ReplyOutcome::Done(Err(e)) => {
                    debug!("{} failed: {}", procedure, e);
                    return Err(e);
                }
                ReplyOutcome::TryLater => {
                    let delay = backoff.grow();
                    warn!(
                        "{}: server busy on {}, retry {} in {:?}",
                        program.prog_name,
                        procedure,
                        backoff.retries(),
                        delay
                    );
                    if self.retry.sleep {
                        self.transport.pause(rpc, delay);
                    }
                }
            }
        }
    }
}

/// Fully initialised session for `mount`, not yet attached
fn new_session(mount: &NfsMount) -> Result<RpcClient> {
    let server = mount
        .server
        .ok_or_else(|| NfsError::InvalidArgument("no server address".to_string()))?;
    if mount.path.is_empty() {
        return Err(NfsError::InvalidArgument("empty export path".to_string()));
    }

    let path = copy_path(&mount.path)?;

    Ok(RpcClient {
        program: &NFS3_PROGRAM,
        flags: translate_flags(mount.flags),
        auth_type: AuthType::None,
        path,
        server,
        sotype: mount.sotype,
        soproto: mount.soproto,
        timeout: mount.timeout,
        retry: mount.retry,
        proc_table: None,
    })
}

#[cfg(test)]
thread_local! {
    /// Overrides the byte count `copy_path` reserves
    static RESERVE_OVERRIDE: std::cell::Cell<Option<usize>> = const { std::cell::Cell::new(None) };
}

/// Owned copy of the export path, failing instead of aborting on allocation
fn copy_path(path: &str) -> std::result::Result<String, TryReserveError> {
    #[cfg(test)]
    let reserve = RESERVE_OVERRIDE.with(|r| r.get()).unwrap_or(path.len());
    #[cfg(not(test))]
    let reserve = path.len();

    let mut copy = String::new();
    copy.try_reserve_exact(reserve)?;
    copy.push_str(path);
    Ok(copy)
}
