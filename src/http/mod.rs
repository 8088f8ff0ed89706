//! HTTP server module with optional TLS.
//!
//! Two listener modes:
//! - **None (default)**: Plain HTTP, for development or behind a reverse proxy
//! - **Manual**: User-provided certificate and key files
//!
//! The server shuts down gracefully on SIGTERM/SIGINT and, in manual TLS mode,
//! reloads its certificate on SIGHUP.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
