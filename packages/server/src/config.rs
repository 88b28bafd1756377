//! Command line and environment configuration for the relay server.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use thiserror::Error;

use crate::infrastructure::telegram::DEFAULT_API_BASE;

/// Exit status for configuration errors (`EX_CONFIG` in sysexits.h)
pub const CONFIG_ERROR_EXIT_CODE: i32 = 78;

const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

#[derive(Parser, Debug, Clone)]
#[command(name = "jobrelay-server")]
#[command(about = "Relays job order requests to a Telegram chat", long_about = None)]
pub struct Cli {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Telegram bot token
    #[arg(long, env = BOT_TOKEN_ENV, hide_env_values = true)]
    pub telegram_bot_token: Option<String>,

    /// Destination chat id (groups and channels are negative)
    #[arg(long, env = CHAT_ID_ENV, allow_negative_numbers = true)]
    pub telegram_chat_id: Option<String>,

    /// Base URL of the Telegram Bot API
    #[arg(long, env = "TELEGRAM_API_BASE", default_value = DEFAULT_API_BASE)]
    pub telegram_api_base: String,

    /// Deadline for each outbound Telegram call, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 10)]
    pub upstream_timeout_secs: u64,

    /// File that stores the visitor count
    #[arg(long, env = "VISITOR_COUNTER_FILE", default_value = "visitor_count.json")]
    pub counter_file: PathBuf,

    /// Maximum request body size in MiB
    #[arg(long, env = "MAX_BODY_MB", default_value_t = 50)]
    pub max_body_mb: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingSecret(&'static str),
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Validated server configuration
#[derive(Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
    pub upstream_timeout: Duration,
    pub counter_file: PathBuf,
    pub max_body_bytes: usize,
}

// トークンをログに出さない
impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("counter_file", &self.counter_file)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingSecret(name))
}

impl TryFrom<Cli> for RelayConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let bot_token = required(cli.telegram_bot_token, BOT_TOKEN_ENV)?;
        let chat_id = required(cli.telegram_chat_id, CHAT_ID_ENV)?;

        if cli.upstream_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "UPSTREAM_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }
        let max_body_bytes =
            cli.max_body_mb
                .checked_mul(1024 * 1024)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "MAX_BODY_MB",
                    reason: format!("{} MiB is too large", cli.max_body_mb),
                })?;

        Ok(Self {
            host: cli.host,
            port: cli.port,
            bot_token,
            chat_id,
            api_base: cli.telegram_api_base,
            upstream_timeout: Duration::from_secs(cli.upstream_timeout_secs),
            counter_file: cli.counter_file,
            max_body_bytes,
        })
    }
}
