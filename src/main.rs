//! Keygen Worker Service Entry Point
//!
//! This is the main entry point for the keygen worker service.
//! It initializes configuration, the key format, and starts the HTTP server.

use keygen_worker::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
