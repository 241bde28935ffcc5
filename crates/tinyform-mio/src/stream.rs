use std::{
    io::{ErrorKind, Read, Write},
    net::Shutdown,
};

use anyhow::Error;
use bytes::BytesMut;
use mio::{Events, Interest, Poll, Token};
use tinyform::Connection;
use tracing::{event, Level};

const CONNECTION: Token = Token(0);

/// One accepted TCP connection, with a buffered non-blocking socket.
///
/// Reads never block on their own; `read_line` waits on the connection's
/// poll when a started line has not fully arrived yet. There is no read
/// timeout, matching the single-client polling model: a stalled peer stalls
/// this service iteration only.
pub struct TcpConnection {
    poll: Poll,
    events: Events,
    stream: mio::net::TcpStream,
    buffer: BytesMut,
    open: bool,
}

impl TcpConnection {
    pub(crate) fn new(mut stream: mio::net::TcpStream) -> Result<Self, Error> {
        let poll = Poll::new()?;
        poll.registry()
            .register(&mut stream, CONNECTION, Interest::READABLE)?;

        Ok(Self {
            poll,
            events: Events::with_capacity(4),
            stream,
            buffer: BytesMut::new(),
            open: true,
        })
    }

    /// Pull everything currently readable into the buffer.
    fn fill(&mut self) -> Result<(), Error> {
        if !self.open {
            return Ok(());
        }

        let mut chunk = [0; 1024];
        loop {
            match self.stream.read(&mut chunk) {
                // Read of zero means the stream has been closed
                Ok(0) => {
                    event!(Level::DEBUG, "stream closed by peer");
                    self.open = false;
                    break;
                }
                Ok(len) => self.buffer.extend_from_slice(&chunk[..len]),
                Err(error) => match error.kind() {
                    ErrorKind::WouldBlock => break,
                    ErrorKind::Interrupted => continue,
                    _ => return Err(error.into()),
                },
            }
        }

        Ok(())
    }

    /// Split one newline-terminated line off the buffer, if complete.
    fn take_line(&mut self) -> Option<String> {
        let position = self.buffer.iter().position(|byte| *byte == b'\n')?;

        let line = self.buffer.split_to(position + 1);
        let mut line = &line[..position];
        if line.last() == Some(&b'\r') {
            line = &line[..line.len() - 1];
        }

        Some(String::from_utf8_lossy(line).into_owned())
    }
}

impl Connection for TcpConnection {
    fn is_open(&self) -> bool {
        self.open
    }

    fn has_data(&mut self) -> Result<bool, Error> {
        self.fill()?;
        Ok(!self.buffer.is_empty())
    }

    fn read_line(&mut self) -> Result<Option<String>, Error> {
        loop {
            self.fill()?;

            if let Some(line) = self.take_line() {
                return Ok(Some(line));
            }

            if !self.open {
                // Whatever is left is the final, unterminated line
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                let rest = self.buffer.split();
                return Ok(Some(String::from_utf8_lossy(&rest).into_owned()));
            }

            // Wait for the rest of the line to arrive
            self.poll.poll(&mut self.events, None)?;
        }
    }

    fn write_all(&mut self, text: &str) -> Result<(), Error> {
        let mut data = text.as_bytes();
        let mut write_interest = false;

        while !data.is_empty() {
            match self.stream.write(data) {
                Ok(len) => data = &data[len..],
                Err(error) => match error.kind() {
                    ErrorKind::WouldBlock => {
                        if !write_interest {
                            self.poll.registry().reregister(
                                &mut self.stream,
                                CONNECTION,
                                Interest::READABLE | Interest::WRITABLE,
                            )?;
                            write_interest = true;
                        }
                        self.poll.poll(&mut self.events, None)?;
                    }
                    ErrorKind::Interrupted => continue,
                    _ => return Err(error.into()),
                },
            }
        }

        if write_interest {
            self.poll
                .registry()
                .reregister(&mut self.stream, CONNECTION, Interest::READABLE)?;
        }

        Ok(())
    }

    fn close(&mut self) {
        if self.open {
            event!(Level::DEBUG, "closing stream");
            let _ = self.stream.shutdown(Shutdown::Both);
            self.open = false;
        }
    }
}
