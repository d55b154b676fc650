//! Shortlink entity representing a code-to-path mapping.

/// A short code together with the destination path it resolves to.
///
/// `created` tells whether this call minted the code or found an existing one,
/// which the HTTP layer maps to `201 Created` vs `200 OK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortlink {
    pub code: String,
    pub path: String,
    pub created: bool,
}

impl Shortlink {
    /// A shortlink that was just minted.
    pub fn created(code: String, path: String) -> Self {
        Self {
            code,
            path,
            created: true,
        }
    }

    /// A shortlink that already existed for the requested path.
    pub fn existing(code: String, path: String) -> Self {
        Self {
            code,
            path,
            created: false,
        }
    }
}
