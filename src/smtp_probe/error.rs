use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{host} resolved to no usable address")]
    NoAddress { host: String },
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error talking to {host}: {source}")]
    Io {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("probe deadline exceeded talking to {host}")]
    Timeout { host: String },
    #[error("protocol error from {host}: {message}")]
    Protocol { host: String, message: String },
    #[error("{command} rejected by {host} with code {code}")]
    Handshake {
        host: String,
        command: &'static str,
        code: u16,
    },
}
