//! CLI argument parsing, validation, and startup helpers.

use crate::ServerConfig;
use crate::jwt::{DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_REFRESH_TOKEN_TTL_SECS};
use clap::Parser;
use tracing::error;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;

#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "passgate",
    about = "Session-token gateway with JWT access and refresh authentication"
)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Path to file containing the access token secret. Prefer using ACCESS_TOKEN_SECRET env var instead
    #[arg(long)]
    pub access_secret_file: Option<String>,

    /// Path to file containing the refresh token secret. Prefer using REFRESH_TOKEN_SECRET env var instead
    #[arg(long)]
    pub refresh_secret_file: Option<String>,

    /// Access token lifetime in seconds
    #[arg(long, default_value_t = DEFAULT_ACCESS_TOKEN_TTL_SECS)]
    pub access_ttl_secs: u64,

    /// Refresh token lifetime in seconds
    #[arg(long, default_value_t = DEFAULT_REFRESH_TOKEN_TTL_SECS)]
    pub refresh_ttl_secs: u64,

    /// Log output format
    #[arg(short, long, default_value = "pretty")]
    pub log_format: LogFormat,
}

/// Initialize logging based on the specified format.
pub fn init_logging(format: &LogFormat) {
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt::init(),
        LogFormat::Json => tracing_subscriber::fmt().json().init(),
        LogFormat::Compact => tracing_subscriber::fmt().compact().init(),
    }
}

/// Load one signing secret from an environment variable or file.
/// Returns None and logs an error if the secret cannot be loaded.
fn load_token_secret(env_var: &str, secret_file: Option<&str>) -> Option<String> {
    let secret = if let Ok(secret) = std::env::var(env_var) {
        // Clear the environment variable to prevent leaking
        // SAFETY: We're single-threaded at this point during startup,
        // and no other code is reading this environment variable.
        unsafe { std::env::remove_var(env_var) };
        secret
    } else if let Some(path) = secret_file {
        match std::fs::read_to_string(path) {
            Ok(content) => content.trim().to_string(),
            Err(e) => {
                error!(path = %path, error = %e, "Failed to read token secret file");
                return None;
            }
        }
    } else {
        error!(
            "Token secret is required. Set the {} environment variable (recommended) or use a --*-secret-file flag",
            env_var
        );
        return None;
    };

    if secret.len() < MIN_TOKEN_SECRET_LENGTH {
        error!(
            "{} is shorter than {} characters. Use a longer secret",
            env_var, MIN_TOKEN_SECRET_LENGTH
        );
        return None;
    }

    Some(secret)
}

/// Load both signing secrets, refusing identical values.
/// With a shared secret, only the typ claim would separate a stolen
/// refresh token from the protected routes.
pub fn load_token_secrets(args: &Args) -> Option<(String, String)> {
    let access = load_token_secret("ACCESS_TOKEN_SECRET", args.access_secret_file.as_deref())?;
    let refresh = load_token_secret("REFRESH_TOKEN_SECRET", args.refresh_secret_file.as_deref())?;

    if access == refresh {
        error!("ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must be different values");
        return None;
    }

    Some((access, refresh))
}

/// Build ServerConfig from validated arguments.
pub fn build_config(args: &Args, access_secret: String, refresh_secret: String) -> ServerConfig {
    ServerConfig {
        access_secret: access_secret.into_bytes(),
        refresh_secret: refresh_secret.into_bytes(),
        access_ttl_secs: args.access_ttl_secs,
        refresh_ttl_secs: args.refresh_ttl_secs,
    }
}
