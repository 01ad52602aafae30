//! HTTP server command
//!
//! Connects to PostgreSQL, applies migrations and runs the user API
//! until Ctrl+C or SIGTERM.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use userctl_server::db::{run_migrations, PgUserStore};
use userctl_server::http::{run_server, ServerConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Don't apply pending migrations at startup
    #[arg(long)]
    pub skip_migrations: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_permissive: self.cors_permissive,
            request_timeout: Duration::from_secs(self.timeout),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    tracing::info!("Starting userctl server on {}", config.bind_addr);

    let pool = args.database.connect().await?;

    if args.skip_migrations {
        tracing::warn!("Skipping database migrations");
    } else {
        run_migrations(&pool)
            .await
            .context("Failed to apply migrations")?;
    }

    // Run server (blocks until shutdown; closes the pool on the way out)
    run_server(Arc::new(PgUserStore::new(pool)), config)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn defaults_to_port_4000() {
        let parsed = Harness::try_parse_from([
            "serve",
            "--database-url",
            "postgres://localhost/userctl",
        ]);
        // PORT may be set in the environment running the tests
        if std::env::var_os("PORT").is_some() {
            return;
        }
        let config = parsed.unwrap().serve.server_config();
        assert_eq!(config.bind_addr.port(), 4000);
        assert!(!config.cors_permissive);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let harness = Harness::try_parse_from([
            "serve",
            "--port",
            "8081",
            "--host",
            "127.0.0.1",
            "--timeout",
            "5",
            "--cors-permissive",
            "--database-url",
            "postgres://localhost/userctl",
        ])
        .unwrap();

        let config = harness.serve.server_config();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 8081)));
        assert!(config.cors_permissive);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
