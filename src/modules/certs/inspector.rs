use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::debug;
use rustls::pki_types::{CertificateDer, ServerName};
use rustls::{ClientConfig, ClientConnection, RootCertStore};
use x509_parser::prelude::{FromDer, X509Certificate};

use crate::utils::from_unix_timestamp;
use crate::{HTTPS_PORT, NETWORK_TIMEOUT_SECS};

/// Reasons a host's certificate expiration could not be determined
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InspectError {
    /// DNS failure, refused or timed out connection, failed TLS handshake
    #[error("failed to connect to {host}: {reason}")]
    Connection { host: String, reason: String },

    #[error("no peer certificates found for {0}")]
    NoCertificate(String),

    #[error("leaf certificate of {host} is malformed: {reason}")]
    MalformedCertificate { host: String, reason: String },
}

/// Anything that can tell when a host's certificate expires
pub trait CertificateInspector {
    fn inspect(&self, host: &str) -> Result<DateTime<Utc>, InspectError>;
}

/// Inspector performing a real TLS handshake against `host:443`
pub struct TlsInspector {
    config: Arc<ClientConfig>,
    port: u16,
    timeout: Duration,
}

impl TlsInspector {
    /// Create an inspector trusting the bundled webpki roots
    pub fn new() -> Result<Self, rustls::Error> {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        Self::with_roots(roots)
    }

    /// Create an inspector trusting the given root store
    pub fn with_roots(roots: RootCertStore) -> Result<Self, rustls::Error> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()?
            .with_root_certificates(roots)
            .with_no_client_auth();

        Ok(Self {
            config: Arc::new(config),
            port: HTTPS_PORT,
            timeout: Duration::from_secs(NETWORK_TIMEOUT_SECS),
        })
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Bound for connecting, and separately for the whole handshake
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn connect(&self, host: &str) -> io::Result<TcpStream> {
        let mut last_error = None;

        // Try every resolved address until one accepts
        for addr in (host, self.port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(self.timeout))?;
                    stream.set_write_timeout(Some(self.timeout))?;
                    debug!("Connected to {} via {}", host, addr);
                    return Ok(stream);
                }
                Err(e) => {
                    debug!("Connecting to {} via {} failed: {}", host, addr, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")
        }))
    }
}

impl CertificateInspector for TlsInspector {
    fn inspect(&self, host: &str) -> Result<DateTime<Utc>, InspectError> {
        let connection_error = |reason: String| InspectError::Connection {
            host: host.to_string(),
            reason,
        };

        let server_name =
            ServerName::try_from(host.to_string()).map_err(|e| connection_error(e.to_string()))?;
        let sock = self
            .connect(host)
            .map_err(|e| connection_error(e.to_string()))?;
        let mut conn = ClientConnection::new(Arc::clone(&self.config), server_name)
            .map_err(|e| connection_error(e.to_string()))?;

        // Drive the handshake only; no application data is exchanged
        let mut stream = DeadlineStream {
            sock: &sock,
            deadline: Instant::now() + self.timeout,
        };
        while conn.is_handshaking() {
            conn.complete_io(&mut stream)
                .map_err(|e| connection_error(e.to_string()))?;
        }

        let expiration = match conn.peer_certificates() {
            Some(chain) => leaf_expiration(host, chain),
            None => Err(InspectError::NoCertificate(host.to_string())),
        };

        // Closing errors are irrelevant once the certificate has been read
        let _ = sock.shutdown(Shutdown::Both);

        expiration
    }
}

/// Socket view whose reads and writes share one overall deadline, so a peer
/// trickling bytes cannot stretch the handshake past it
struct DeadlineStream<'a> {
    sock: &'a TcpStream,
    deadline: Instant,
}

impl DeadlineStream<'_> {
    fn remaining(&self) -> io::Result<Duration> {
        let left = self.deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "TLS handshake deadline exceeded",
            ));
        }
        Ok(left)
    }
}

impl Read for DeadlineStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let left = self.remaining()?;
        self.sock.set_read_timeout(Some(left))?;
        let mut sock = self.sock;
        sock.read(buf)
    }
}

impl Write for DeadlineStream<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let left = self.remaining()?;
        self.sock.set_write_timeout(Some(left))?;
        let mut sock = self.sock;
        sock.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut sock = self.sock;
        sock.flush()
    }
}

/// Read the not-after instant of the first (leaf) certificate of a chain
pub fn leaf_expiration(
    host: &str,
    chain: &[CertificateDer<'_>],
) -> Result<DateTime<Utc>, InspectError> {
    let leaf = chain
        .first()
        .ok_or_else(|| InspectError::NoCertificate(host.to_string()))?;

    let malformed = |reason: String| InspectError::MalformedCertificate {
        host: host.to_string(),
        reason,
    };

    let (_, cert) =
        X509Certificate::from_der(leaf.as_ref()).map_err(|e| malformed(e.to_string()))?;
    let not_after = cert.validity().not_after.timestamp();

    from_unix_timestamp(not_after)
        .ok_or_else(|| malformed(format!("not-after {} is out of range", not_after)))
}
