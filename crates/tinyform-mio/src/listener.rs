use std::net::SocketAddr;

use anyhow::Error;
use tinyform::Listener;
use tracing::{event, Level};

use crate::{check_io, stream::TcpConnection};

/// Non-blocking TCP listener for the form server.
///
/// Mio sockets are non-blocking from creation, so accept is polled directly
/// without a readiness registry.
pub struct TcpServer {
    listener: mio::net::TcpListener,
    local_addr: SocketAddr,
}

impl TcpServer {
    /// Bind a listening socket on the given address.
    pub fn bind(addr: SocketAddr) -> Result<Self, Error> {
        let listener = mio::net::TcpListener::bind(addr)?;
        let local_addr = listener.local_addr()?;

        event!(Level::DEBUG, addr = ?local_addr, "listening");

        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// The address the listener actually bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Listener for TcpServer {
    type Connection = TcpConnection;

    fn accept(&mut self) -> Result<Option<Self::Connection>, Error> {
        let Some((stream, remote_addr)) = check_io(self.listener.accept())? else {
            return Ok(None);
        };

        event!(Level::DEBUG, ?remote_addr, "stream accepted");

        let connection = TcpConnection::new(stream)?;
        Ok(Some(connection))
    }
}
