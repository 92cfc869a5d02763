pub mod config;
pub mod logging;
pub mod shutdown;

pub use config::{parse_listen_addr, AppConfig, CliArgs, LoggingConfig, Section, ServerConfig};
