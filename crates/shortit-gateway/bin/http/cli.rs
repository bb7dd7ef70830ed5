use clap::{Parser, ValueEnum};
use shortit_core::alphabet::{Alphabet, DEFAULT_ALPHABET};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "SHORTIT_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "SHORTIT_STORAGE_BACKEND";
pub const SQLITE_PATH_ENV: &str = "SHORTIT_SQLITE_PATH";
pub const CODE_LENGTH_ENV: &str = "SHORTIT_CODE_LENGTH";
pub const ALPHABET_ENV: &str = "SHORTIT_ALPHABET";
pub const MAX_ATTEMPTS_ENV: &str = "SHORTIT_MAX_ATTEMPTS";
pub const STORAGE_TIMEOUT_ENV: &str = "SHORTIT_STORAGE_TIMEOUT_MS";
pub const CACHE_CAPACITY_ENV: &str = "SHORTIT_CACHE_CAPACITY";
pub const LOG_FORMAT_ENV: &str = "SHORTIT_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_SQLITE_PATH: &str = "short_urls.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "sqlite")]
    Sqlite,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
            StorageBackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "shortit-gateway", about = "HTTP front end for the shortit URL shortener")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    /// Database file, created on first start.
    #[arg(long, env = SQLITE_PATH_ENV, default_value = DEFAULT_SQLITE_PATH)]
    pub sqlite_path: PathBuf,

    /// Maximum length of generated short codes.
    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = 6)]
    pub code_length: usize,

    /// Characters generated short codes are drawn from.
    #[arg(long, env = ALPHABET_ENV, default_value = DEFAULT_ALPHABET)]
    pub alphabet: Alphabet,

    /// Candidates tried per URL before reporting a generation failure.
    #[arg(
        long,
        env = MAX_ATTEMPTS_ENV,
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    #[arg(long, env = STORAGE_TIMEOUT_ENV, default_value_t = 5_000)]
    pub storage_timeout_ms: u64,

    /// Entries per lookup direction kept in memory; 0 disables the cache.
    #[arg(long, env = CACHE_CAPACITY_ENV, default_value_t = 10_000)]
    pub cache_capacity: u64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
