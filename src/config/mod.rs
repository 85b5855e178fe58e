use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
/// Same as axum's built-in request body limit
const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Application configuration and constants
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub template_dir: PathBuf,
    pub static_dir: PathBuf,
    pub port: u16,
    pub host: String,
    pub max_body_bytes: usize,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            template_dir: PathBuf::from("tmpl"),
            static_dir: PathBuf::from("static"),
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Defaults overridden by `WIKI_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();
        if let Some(dir) = lookup("WIKI_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("WIKI_TEMPLATE_DIR") {
            config.template_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("WIKI_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(host) = lookup("WIKI_HOST") {
            config.host = host;
        }
        config.port = parse_or("WIKI_PORT", lookup("WIKI_PORT"), config.port);
        config.max_body_bytes =
            parse_or("WIKI_MAX_BODY_BYTES", lookup("WIKI_MAX_BODY_BYTES"), config.max_body_bytes);
        config
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = IpAddr::from_str(&self.host).unwrap_or_else(|_| {
            log::warn!("Invalid host '{}', binding to {}", self.host, DEFAULT_HOST);
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        });
        SocketAddr::new(ip, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unparsable {}='{}'", key, value);
            default
        }),
        None => default,
    }
}
