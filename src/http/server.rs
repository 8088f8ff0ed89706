//! HTTP/HTTPS server startup logic.

use std::net::SocketAddr;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;

use crate::config::{AppConfig, TlsMode};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    #[error("Failed to load TLS configuration: {0}")]
    TlsConfig(String),

    #[error("Invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),
}

/// Start the HTTP/HTTPS server based on configuration.
///
/// Returns once the server has shut down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port).parse()?;

    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone());

    match config.http.tls.mode {
        TlsMode::None => {
            tracing::info!(%addr, "Starting HTTP server (no TLS)");

            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        TlsMode::Manual => {
            let (Some(cert_path), Some(key_path)) = (
                config.http.tls.cert_path.as_deref(),
                config.http.tls.key_path.as_deref(),
            ) else {
                return Err(ServerError::TlsConfig(
                    "manual TLS requires cert_path and key_path".to_string(),
                ));
            };

            tracing::info!(%addr, cert = %cert_path, key = %key_path, "Starting HTTPS server");

            let rustls_config = RustlsConfig::from_pem_file(cert_path, key_path)
                .await
                .map_err(|e| ServerError::TlsConfig(format!("Failed to load certificates: {}", e)))?;

            shutdown::setup_reload_handler(
                rustls_config.clone(),
                cert_path.to_string(),
                key_path.to_string(),
            );

            axum_server::bind_rustls(addr, rustls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}
