use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use crate::smtp_probe::error::ProbeError;

/// A parsed SMTP reply: the status code plus the text of every line.
#[derive(Debug, Clone)]
pub struct SmtpReply {
    pub code: u16,
    pub lines: Vec<String>,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_transient_failure(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub fn is_permanent_failure(&self) -> bool {
        (500..600).contains(&self.code)
    }

    /// First line of the reply text; empty when the server sent none.
    pub fn first_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }
}

/// Absolute point in time after which the dialogue must not continue.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    at: Instant,
}

impl Deadline {
    pub(crate) fn new(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    fn remaining(&self) -> Option<Duration> {
        let now = Instant::now();
        if now >= self.at { None } else { Some(self.at - now) }
    }
}

/// One blocking SMTP connection with deadline-bounded reads and writes.
///
/// The socket timeouts are re-armed from the remaining budget before every
/// exchange, so the overall dialogue can never outlive the deadline by more
/// than one socket operation.
pub(crate) struct SmtpSession {
    host: String,
    stream: TcpStream,
    buffer: Vec<u8>,
    deadline: Deadline,
    transcript: Vec<String>,
}

impl SmtpSession {
    /// Connect to `host:port`, trying each resolved address in turn, each
    /// attempt bounded by `connect_timeout`.
    pub(crate) fn connect(
        host: &str,
        port: u16,
        connect_timeout: Duration,
        deadline: Deadline,
    ) -> Result<Self, ProbeError> {
        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|source| ProbeError::Connect {
                host: host.to_string(),
                source,
            })?
            .collect();

        let mut last_err: Option<io::Error> = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, connect_timeout) {
                Ok(stream) => {
                    return Ok(Self {
                        host: host.to_string(),
                        stream,
                        buffer: Vec::new(),
                        deadline,
                        transcript: Vec::new(),
                    });
                }
                Err(err) => last_err = Some(err),
            }
        }

        Err(match last_err {
            Some(source) => ProbeError::Connect {
                host: host.to_string(),
                source,
            },
            None => ProbeError::NoAddress {
                host: host.to_string(),
            },
        })
    }

    /// Send one command line and read the reply to it.
    pub(crate) fn command(&mut self, line: &str) -> Result<SmtpReply, ProbeError> {
        self.send(line)?;
        self.read_reply()
    }

    pub(crate) fn send(&mut self, line: &str) -> Result<(), ProbeError> {
        self.arm()?;
        self.transcript.push(format!("C: {line}"));
        let mut data = line.as_bytes().to_vec();
        data.extend_from_slice(b"\r\n");
        self.stream.write_all(&data).map_err(|e| self.stream_err(e))?;
        self.stream.flush().map_err(|e| self.stream_err(e))
    }

    pub(crate) fn read_reply(&mut self) -> Result<SmtpReply, ProbeError> {
        let mut lines = Vec::new();
        let mut code: Option<u16> = None;
        loop {
            let line = self.read_line()?;
            self.transcript.push(format!("S: {line}"));
            let code_digits = line
                .get(..3)
                .ok_or_else(|| self.protocol(format!("short reply line: {line:?}")))?;
            let parsed = code_digits
                .parse::<u16>()
                .map_err(|_| self.protocol(format!("bad status code in {line:?}")))?;
            if let Some(existing) = code {
                if existing != parsed {
                    return Err(
                        self.protocol(format!("inconsistent reply codes: {existing} vs {parsed}"))
                    );
                }
            } else {
                code = Some(parsed);
            }
            let is_last = line.as_bytes().get(3) != Some(&b'-');
            lines.push(line.get(4..).unwrap_or("").to_string());
            if is_last {
                break;
            }
        }
        Ok(SmtpReply {
            code: code.unwrap_or(0),
            lines,
        })
    }

    fn read_line(&mut self) -> Result<String, ProbeError> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|byte| *byte == b'\n') {
                let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
                if line.ends_with(b"\r\n") {
                    line.truncate(line.len() - 2);
                } else if line.ends_with(b"\n") {
                    line.truncate(line.len() - 1);
                }
                return String::from_utf8(line)
                    .map_err(|err| self.protocol(format!("reply is not UTF-8: {err}")));
            }

            self.arm()?;
            let mut buf = [0u8; 512];
            let read = self.stream.read(&mut buf).map_err(|e| self.stream_err(e))?;
            if read == 0 {
                return Err(ProbeError::Io {
                    host: self.host.clone(),
                    source: io::Error::new(io::ErrorKind::UnexpectedEof, "connection closed"),
                });
            }
            self.buffer.extend_from_slice(&buf[..read]);
        }
    }

    /// Best-effort QUIT; the socket is dropped either way.
    pub(crate) fn quit(&mut self) {
        if self.send("QUIT").is_ok() {
            let _ = self.read_reply();
        }
    }

    pub(crate) fn take_transcript(&mut self) -> Vec<String> {
        std::mem::take(&mut self.transcript)
    }

    pub(crate) fn handshake_failure(&self, command: &'static str, code: u16) -> ProbeError {
        ProbeError::Handshake {
            host: self.host.clone(),
            command,
            code,
        }
    }

    /// Re-arm the socket timeouts from the remaining budget.
    fn arm(&mut self) -> Result<(), ProbeError> {
        let Some(remaining) = self.deadline.remaining() else {
            return Err(ProbeError::Timeout {
                host: self.host.clone(),
            });
        };
        self.stream
            .set_read_timeout(Some(remaining))
            .map_err(|e| self.stream_err(e))?;
        self.stream
            .set_write_timeout(Some(remaining))
            .map_err(|e| self.stream_err(e))
    }

    fn stream_err(&self, source: io::Error) -> ProbeError {
        match source.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => ProbeError::Timeout {
                host: self.host.clone(),
            },
            _ => ProbeError::Io {
                host: self.host.clone(),
                source,
            },
        }
    }

    fn protocol(&self, message: String) -> ProbeError {
        ProbeError::Protocol {
            host: self.host.clone(),
            message,
        }
    }
}
