//! Transport abstraction consumed by the form server.

use anyhow::Error;

/// Non-blocking connection acceptor.
pub trait Listener {
    /// Connection type produced by this listener.
    type Connection: Connection;

    /// Accept one pending connection, if any is waiting.
    fn accept(&mut self) -> Result<Option<Self::Connection>, Error>;
}

/// One accepted client connection.
pub trait Connection {
    /// True until the peer disconnects or [`close`](Connection::close) is
    /// called.
    fn is_open(&self) -> bool;

    /// True if received data is waiting to be read.
    fn has_data(&mut self) -> Result<bool, Error>;

    /// Read one line, with the trailing newline stripped.
    ///
    /// May block briefly while the rest of a started line arrives. Returns
    /// `None` once the connection is closed and nothing buffered remains.
    fn read_line(&mut self) -> Result<Option<String>, Error>;

    /// Send text to the peer.
    fn write_all(&mut self, text: &str) -> Result<(), Error>;

    /// Flush and close the connection.
    fn close(&mut self);
}
