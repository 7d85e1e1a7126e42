//! Listener lifecycle: bind, readiness, shutdown.

use may::coroutine::JoinHandle;
use may_minihttp::{HttpServerWithHeaders, HttpService};
use std::any::Any;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// How long [`ServerHandle::wait_ready`] polls before giving up.
pub const READY_TIMEOUT: Duration = Duration::from_millis(250);
const READY_POLL: Duration = Duration::from_millis(5);

/// Serves `T` with `may_minihttp`, one coroutine per accepted connection.
///
/// Up to 32 request headers are parsed; proxies in front of the service add a few.
pub struct HttpServer<T>(pub T);

/// A bound listener and its accept-loop coroutine.
pub struct ServerHandle {
    addr: SocketAddr,
    accept_loop: JoinHandle<()>,
}

/// How the accept loop ended once [`ServerHandle::stop`] returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerExit {
    /// Cancelled, or returned on its own.
    Stopped,
    /// Panicked with the given message before the cancel landed.
    Panicked(String),
}

impl ServerHandle {
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Block until the listener accepts a TCP connection, for at most [`READY_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// `TimedOut` if nothing accepted in time.
    pub fn wait_ready(&self) -> io::Result<()> {
        self.wait_ready_within(READY_TIMEOUT)
    }

    /// [`wait_ready`](Self::wait_ready) with a caller-chosen deadline.
    ///
    /// # Errors
    ///
    /// `TimedOut` if nothing accepted within `timeout`.
    pub fn wait_ready_within(&self, timeout: Duration) -> io::Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("listener on {} not ready after {timeout:?}", self.addr),
                ));
            }
            thread::sleep(READY_POLL);
        }
    }

    /// Cancel the accept loop and wait for it.
    ///
    /// Cancellation itself unwinds the coroutine; only a panic carrying a message is
    /// reported as [`ServerExit::Panicked`] and logged at error level.
    pub fn stop(self) -> ServerExit {
        // SAFETY: cancel() is unsafe in may because it unwinds the target coroutine at its
        // next yield point. This handle is the only one to the accept loop and it is joined
        // right after, so nothing observes the loop mid-unwind.
        unsafe {
            self.accept_loop.coroutine().cancel();
        }
        let exit = exit_of(self.accept_loop.join());
        match &exit {
            ServerExit::Stopped => debug!(addr = %self.addr, "Listener stopped"),
            ServerExit::Panicked(message) => error!(
                addr = %self.addr,
                panic_message = %message,
                "Accept loop panicked before shutdown"
            ),
        }
        exit
    }

    /// Block until the accept loop ends; it only does so when cancelled or on panic.
    ///
    /// # Errors
    ///
    /// The panic payload if the accept loop panicked.
    pub fn join(self) -> thread::Result<()> {
        self.accept_loop.join()
    }
}

impl<T: HttpService + Clone + Send + Sync + 'static> HttpServer<T> {
    /// Bind `addr` (the first address it resolves to) and start accepting.
    ///
    /// # Errors
    ///
    /// Fails if `addr` resolves to nothing or the port cannot be bound.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid address"))?;
        let accept_loop = HttpServerWithHeaders::<_, 32>(self.0).start(addr)?;
        info!(addr = %addr, "HTTP server listening");
        Ok(ServerHandle { addr, accept_loop })
    }
}

fn exit_of(joined: thread::Result<()>) -> ServerExit {
    match joined {
        Ok(()) => ServerExit::Stopped,
        Err(payload) => match panic_message(payload.as_ref()) {
            Some(message) => ServerExit::Panicked(message.to_string()),
            None => ServerExit::Stopped,
        },
    }
}

/// Message of a `panic!`, if the payload is one; may's cancel marker is not.
fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}
