//! TCP transport implementation.
//!
//! Line-delimited JSON-RPC over raw TCP. Every connection gets its own MCP
//! session; all sessions share one server and therefore one Tazapay client.

use std::net::SocketAddr;

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{Instrument, info, info_span, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Delay before retrying after a failed accept.
const ACCEPT_BACKOFF: std::time::Duration = std::time::Duration::from_millis(100);

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Accept connections until the process is stopped.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);

        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        warn!(%peer, "Failed to set TCP_NODELAY: {}", e);
                    }
                    let server = server.clone();
                    tokio::spawn(
                        Self::serve_connection(server, stream, peer)
                            .instrument(info_span!("tcp_session", %peer)),
                    );
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            }
        }
    }

    async fn serve_connection(server: McpServer, stream: TcpStream, peer: SocketAddr) {
        info!("Accepted connection");

        let service = match server.serve(stream).await {
            Ok(service) => service,
            Err(e) => {
                warn!("MCP handshake failed: {}", e);
                return;
            }
        };

        match service.waiting().await {
            Ok(reason) => info!(?reason, "Client {} disconnected", peer),
            Err(e) => warn!("Session for {} ended with error: {:?}", peer, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address() {
        let transport = TcpTransport::new(TcpConfig {
            port: 4000,
            host: "0.0.0.0".to_string(),
        });
        assert_eq!(transport.address(), "0.0.0.0:4000");
    }
}
