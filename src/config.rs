//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:$PORT`, `PORT` defaults to `8080`)
//! - `PUBLIC_BASE_URL` - Absolute base URL used in OG tags and shortlinks
//!   (default: `https://parabens.vc`)
//! - `SHORTLINK_DB` - Shortlink snapshot file (default: `data/shortlinks.json`)
//! - `XDG_CACHE_DIR` / `XDG_CACHE_HOME` - Base directory for rendered preview images
//! - `STATIC_DIR` - Static assets directory (default: `static`)
//! - `OG_CONVERTER` - SVG to PNG converter binary (default: `rsvg-convert`)
//! - `OG_RENDER_TIMEOUT_SECS` - Converter timeout (default: 5)
//! - `OG_QUEUE_CAPACITY` - Pending render jobs before callers wait (default: 32)
//! - `BEHIND_PROXY` - Whether a trusted reverse proxy sets forwarding headers;
//!   rate limits key on them only when `true`
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Domain the service is published under; also names the cache subdirectory.
pub const SITE_DOMAIN: &str = "parabens.vc";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub public_base_url: String,
    pub shortlink_db_path: PathBuf,
    /// Base directory for the preview image cache. Rendered files live under `og/`.
    pub cache_dir: PathBuf,
    pub static_dir: PathBuf,
    pub og_converter: String,
    pub og_render_timeout: Duration,
    pub og_queue_capacity: usize,
    /// When true, a trusted reverse proxy terminates TLS and sets forwarding headers.
    pub behind_proxy: bool,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| {
            let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
            format!("0.0.0.0:{port}")
        });

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| format!("https://{SITE_DOMAIN}"));

        let shortlink_db_path = env::var("SHORTLINK_DB")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/shortlinks.json"));

        let cache_dir = Self::resolve_cache_dir();

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let og_converter =
            env::var("OG_CONVERTER").unwrap_or_else(|_| "rsvg-convert".to_string());

        let og_render_timeout_secs: u64 = match env::var("OG_RENDER_TIMEOUT_SECS") {
            Ok(v) => v
                .parse()
                .context("OG_RENDER_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => 5,
        };

        let og_queue_capacity: usize = match env::var("OG_QUEUE_CAPACITY") {
            Ok(v) => v
                .parse()
                .context("OG_QUEUE_CAPACITY must be a positive integer")?,
            Err(_) => 32,
        };

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            listen_addr,
            public_base_url,
            shortlink_db_path,
            cache_dir,
            static_dir,
            og_converter,
            og_render_timeout: Duration::from_secs(og_render_timeout_secs),
            og_queue_capacity,
            behind_proxy,
            log_level,
            log_format,
        })
    }

    /// Resolves the preview image cache directory.
    ///
    /// Priority:
    /// 1. `XDG_CACHE_DIR`
    /// 2. `XDG_CACHE_HOME`
    /// 3. Platform cache directory
    /// 4. `$HOME/.cache`
    /// 5. System temp directory
    ///
    /// The site domain is appended to whichever base wins.
    fn resolve_cache_dir() -> PathBuf {
        let base = env::var("XDG_CACHE_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                env::var("XDG_CACHE_HOME")
                    .ok()
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            })
            .or_else(dirs::cache_dir)
            .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
            .unwrap_or_else(env::temp_dir);

        base.join(SITE_DOMAIN)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `public_base_url` is not an absolute HTTP(S) URL
    /// - the render timeout or queue capacity is out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let base = url::Url::parse(&self.public_base_url)
            .with_context(|| format!("PUBLIC_BASE_URL is not a valid URL: '{}'", self.public_base_url))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!(
                "PUBLIC_BASE_URL must use http or https, got '{}'",
                self.public_base_url
            );
        }

        let timeout = self.og_render_timeout.as_secs();
        if timeout == 0 || timeout > 60 {
            anyhow::bail!("OG_RENDER_TIMEOUT_SECS must be between 1 and 60, got {timeout}");
        }

        if self.og_queue_capacity == 0 || self.og_queue_capacity > 10_000 {
            anyhow::bail!(
                "OG_QUEUE_CAPACITY must be between 1 and 10000, got {}",
                self.og_queue_capacity
            );
        }

        if self.og_converter.trim().is_empty() {
            anyhow::bail!("OG_CONVERTER must not be empty");
        }

        Ok(())
    }

    /// Returns the public base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.public_base_url.trim_end_matches('/')
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Public base URL: {}", self.public_base_url);
        tracing::info!("  Shortlink snapshot: {}", self.shortlink_db_path.display());
        tracing::info!("  Preview cache: {}", self.cache_dir.display());
        tracing::info!("  Static assets: {}", self.static_dir.display());
        tracing::info!(
            "  Converter: {} (timeout {}s, queue {})",
            self.og_converter,
            self.og_render_timeout.as_secs(),
            self.og_queue_capacity
        );
        tracing::info!(
            "  Rate limit key: {}",
            if self.behind_proxy { "forwarding headers (behind proxy)" } else { "peer address" }
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
