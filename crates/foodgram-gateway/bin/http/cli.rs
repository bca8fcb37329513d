use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "FOODGRAM_GATEWAY_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "FOODGRAM_GATEWAY_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "FOODGRAM_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "FOODGRAM_MYSQL_DSN";
pub const RECIPES_FILE_ENV: &str = "FOODGRAM_RECIPES_FILE";
pub const SHORT_CODE_SALT_ENV: &str = "FOODGRAM_SHORT_CODE_SALT";
pub const SHORT_CODE_MIN_LENGTH_ENV: &str = "FOODGRAM_SHORT_CODE_MIN_LENGTH";
pub const LOG_FORMAT_ENV: &str = "FOODGRAM_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "foodgram-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Prefix of the short links handed out, e.g. `https://foodgram.example`.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    /// JSON array of recipes served by the in-memory backend.
    #[arg(long, env = RECIPES_FILE_ENV)]
    pub recipes_file: Option<PathBuf>,

    #[arg(long, env = SHORT_CODE_SALT_ENV, default_value = foodgram_generator::DEFAULT_SALT)]
    pub short_code_salt: String,

    #[arg(
        long,
        env = SHORT_CODE_MIN_LENGTH_ENV,
        default_value_t = foodgram_core::shortcode::MIN_LENGTH
    )]
    pub short_code_min_length: usize,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,
}
