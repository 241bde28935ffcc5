//! Mio-based non-blocking TCP transport for `tinyform`.
//!
//! [`TcpServer`] implements the core crate's [`tinyform::Listener`] trait
//! with a non-blocking accept, and hands out [`TcpConnection`]s backed by a
//! buffered non-blocking socket.

mod listener;
mod stream;

use std::io::ErrorKind;

use anyhow::Error;

pub use self::{listener::TcpServer, stream::TcpConnection};

fn check_io<T>(value: Result<T, std::io::Error>) -> Result<Option<T>, Error> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(error) => {
            // WouldBlock just means we've run out of things to handle
            if error.kind() == ErrorKind::WouldBlock {
                Ok(None)
            } else {
                Err(error.into())
            }
        }
    }
}
