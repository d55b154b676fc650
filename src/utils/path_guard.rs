//! Detection of scanner requests and off-site paths.
//!
//! Every unmatched path renders a greeting, so `/wp-login.php` would otherwise
//! produce a page congratulating "wp-login.php". Such paths get a plain 404.
//! Stored shortlink paths become `Location` headers, so they must stay on
//! this origin.

use std::sync::LazyLock;

use regex::Regex;

static SUSPICIOUS_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\.(php\d?|phtml|aspx?|jsp|cgi|pl|py|rb|sh|bash|exe|dll|bat|cmd|sql|db|sqlite|bak|old|swp|ya?ml|json|xml|ini|conf|cfg|env|log|html?|txt|zip|tar|gz|tgz|rar|7z)$",
    )
    .expect("extension pattern is valid")
});

/// Returns true if a decoded message looks like a file path or URL rather than a name.
///
/// # Examples
///
/// ```ignore
/// assert!(looks_like_path("wp-login.php"));
/// assert!(looks_like_path("../etc/passwd"));
/// assert!(!looks_like_path("Maria Silva"));
/// assert!(!looks_like_path("A / B / C"));
/// ```
pub fn looks_like_path(message: &str) -> bool {
    let message = message.trim();
    if message.is_empty() {
        return false;
    }

    if message.contains("..") || message.contains("://") || message.starts_with('.') {
        return true;
    }

    if message.contains(char::is_whitespace) || message.starts_with('/') {
        return false;
    }

    message.contains(['/', '\\']) || SUSPICIOUS_EXTENSION.is_match(message)
}

/// Returns true if a path would be read by browsers as another origin.
///
/// `//host/...` is protocol-relative, and browsers treat `/\host` the same way.
pub fn is_off_site(path: &str) -> bool {
    path.starts_with("//") || path.starts_with("/\\")
}
