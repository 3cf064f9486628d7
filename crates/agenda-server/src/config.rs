//! Command-line / environment configuration.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::http::CALLBACK_PATH;

/// agenda-server - homework agenda web service
#[derive(Parser, Debug)]
#[command(name = "agenda-server")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Public base URL of this service; the OAuth callback is built from it
    #[arg(long, env = "STATIC_URL", default_value = "http://localhost")]
    pub static_url: String,

    /// Address to bind
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    #[arg(long, env = "PORT", default_value = "80")]
    pub port: u16,

    /// Directory served for `/` and any unmatched GET
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    pub static_dir: PathBuf,

    /// Prefix of the protected agenda area
    #[arg(long, env = "AGENDA_PATH", default_value = "/agenda")]
    pub agenda_path: String,

    #[arg(long, env = "GH_OAUTH_ID")]
    pub github_client_id: String,

    #[arg(long, env = "GH_OAUTH_SECRET", hide_env_values = true)]
    pub github_client_secret: String,

    /// host:port of the backing store; readiness is probed over TCP.
    ///
    /// If omitted, the service reports ready as soon as it starts.
    #[arg(long, env = "BACKING_STORE_ADDR")]
    pub backing_store_addr: Option<String>,

    /// Interval between readiness probes
    #[arg(long, default_value = "5000")]
    pub probe_interval_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("agenda path must start with '/' and not end with '/': {0:?}")]
    InvalidAgendaPath(String),

    #[error("static url must not be empty")]
    EmptyStaticUrl,

    #[error("probe interval must be at least 100ms, got {0}ms")]
    ProbeIntervalTooShort(u64),
}

#[derive(Debug, Clone)]
pub struct GithubCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub static_url: String,
    pub listen: SocketAddr,
    pub static_dir: PathBuf,
    pub agenda_path: String,
    pub github: GithubCredentials,
    pub backing_store_addr: Option<String>,
    pub probe_interval: Duration,
}

impl Settings {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let agenda_path = args.agenda_path;
        if !agenda_path.starts_with('/') || agenda_path.ends_with('/') {
            return Err(ConfigError::InvalidAgendaPath(agenda_path));
        }
        let static_url = args.static_url.trim_end_matches('/').to_string();
        if static_url.is_empty() {
            return Err(ConfigError::EmptyStaticUrl);
        }
        if args.probe_interval_ms < 100 {
            return Err(ConfigError::ProbeIntervalTooShort(args.probe_interval_ms));
        }

        Ok(Self {
            static_url,
            listen: SocketAddr::new(args.bind, args.port),
            static_dir: args.static_dir,
            agenda_path,
            github: GithubCredentials {
                client_id: args.github_client_id,
                client_secret: args.github_client_secret,
            },
            backing_store_addr: args.backing_store_addr.filter(|addr| !addr.trim().is_empty()),
            probe_interval: Duration::from_millis(args.probe_interval_ms),
        })
    }

    /// Absolute URL the identity provider redirects back to.
    pub fn callback_url(&self) -> String {
        format!("{}{}", self.static_url, CALLBACK_PATH)
    }
}
