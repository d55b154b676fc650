//! DTOs for the shortlink endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum accepted length of a greeting path.
pub const MAX_PATH_LEN: usize = 512;

/// Request to shorten a greeting path.
///
/// `path` is the page path as shown in the browser, with or without the
/// leading slash, optionally with an occasion segment and a query string:
/// `"/aniversario/Ana?theme=warm"`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortlinkRequest {
    #[validate(length(min = 1, max = 512, message = "Path must be 1-512 characters"))]
    pub path: String,
}

/// A created or existing shortlink.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortlinkResponse {
    pub code: String,
    /// `<base>/s/<code>`
    pub short_url: String,
    /// Stored path without the leading slash.
    pub path: String,
    /// Absolute URL the short link redirects to.
    pub destination: String,
}

impl ShortlinkResponse {
    /// Builds the response for `code` mapped to the stored `path`.
    pub fn new(base_url: &str, code: String, path: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let clean = path.trim().trim_start_matches('/');

        Self {
            short_url: format!("{base}/s/{code}"),
            path: clean.to_string(),
            destination: format!("{base}/{clean}"),
            code,
        }
    }
}
