//! Greeting message text helpers.
//!
//! Messages travel inside URL paths (`/Maria_Silva`, `/aniversario/Jo%C3%A3o`),
//! so these helpers convert between the path form and the text shown on the page
//! and in preview images.

use url::form_urlencoded;

/// Message shown when the path carries no name.
pub const DEFAULT_DISPLAY_MESSAGE: &str = "você é um(a) amigo(a)";

/// Maximum number of characters rendered into a preview image.
pub const OG_TEXT_LIMIT: usize = 48;

/// Cache key used for empty preview text.
pub const DEFAULT_OG_KEY: &str = "default";

const NAME_PARTICLES: &[&str] = &["da", "de", "do", "das", "dos"];
const ENCODED_PUNCTUATION: &[&str] = &["%21", "%3f", "%2e", "%e2%80%a6"];
const THEMES: &[(&str, &str)] = &[
    ("light", "theme-light"),
    ("warm", "theme-warm"),
    ("elegant", "theme-elegant"),
    ("pixel", "theme-pixel"),
];

/// Turns a raw path segment into message text.
///
/// Percent escapes are decoded, underscores become spaces and the result is
/// trimmed. Input with a malformed escape is returned untouched.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(decode_path("Maria_Silva"), "Maria Silva");
/// assert_eq!(decode_path("Jo%C3%A3o"), "João");
/// ```
pub fn decode_path(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    if has_malformed_escape(raw) {
        return raw.to_string();
    }

    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.replace('_', " ").trim().to_string(),
        Err(_) => raw.to_string(),
    }
}

fn has_malformed_escape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return true;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    false
}

/// Turns message text into a path segment, the inverse of [`decode_path`].
pub fn encode_path_segment(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }

    urlencoding::encode(&value.replace(' ', "_")).into_owned()
}

/// Builds the sentence shown after the greeting.
///
/// Messages addressed to "você" or starting with a proper name are kept as
/// they are; anything else gets "você " in front, so `/parabens/passou` reads
/// "Parabéns, você passou!".
pub fn build_display_message(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return DEFAULT_DISPLAY_MESSAGE.to_string();
    }

    let lower = value.to_lowercase();
    if ["voce ", "você ", "vc "]
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        return value.to_string();
    }

    if starts_with_proper_name(value) {
        return value.to_string();
    }

    format!("você {value}")
}

/// Returns true if `value` opens with a capitalized name.
///
/// Name particles (`da`, `de`, `do`, `das`, `dos`) are accepted between
/// capitalized words, as in "Maria da Silva".
pub fn starts_with_proper_name(value: &str) -> bool {
    proper_name_length(&tokenize_words(value)) > 0
}

/// Number of leading tokens that form a proper name.
fn proper_name_length(tokens: &[&str]) -> usize {
    match tokens.first() {
        Some(first) if is_capitalized(first) => {}
        _ => return 0,
    }

    let mut i = 1;
    while i < tokens.len() {
        let lower = tokens[i].to_lowercase();
        if NAME_PARTICLES.contains(&lower.as_str()) {
            match tokens.get(i + 1) {
                Some(next) if is_capitalized(next) => i += 2,
                _ => break,
            }
        } else if is_capitalized(tokens[i]) {
            i += 1;
        } else {
            break;
        }
    }
    i
}

/// Splits `value` into words made of Latin letters and apostrophes.
pub fn tokenize_words(value: &str) -> Vec<&str> {
    value
        .split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{C0}'..='\u{FF}').contains(&c) || c == '\'' || c == '\u{2019}'
}

/// Returns true if the first character of `token` is an uppercase letter.
pub fn is_capitalized(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

/// Returns true if `value` already ends in `!`, `?`, `.` or `…`.
pub fn has_final_punctuation(value: &str) -> bool {
    matches!(value.trim().chars().last(), Some('!' | '?' | '.' | '…'))
}

/// Like [`has_final_punctuation`], but also recognizes percent-encoded forms.
pub fn has_encoded_final_punctuation(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.is_empty() {
        return false;
    }
    if has_final_punctuation(raw) {
        return true;
    }

    let lower = raw.to_ascii_lowercase();
    ENCODED_PUNCTUATION
        .iter()
        .any(|suffix| lower.ends_with(suffix))
}

/// Text rendered into a preview image: whitespace collapsed, capped at
/// [`OG_TEXT_LIMIT`] characters plus an ellipsis.
pub fn og_image_text_prefix(message: &str) -> String {
    let collapsed = message.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() > OG_TEXT_LIMIT {
        let mut truncated: String = collapsed.chars().take(OG_TEXT_LIMIT).collect();
        truncated.push('…');
        truncated
    } else {
        collapsed
    }
}

/// Slug naming the cached preview image for `message`.
///
/// Always matches `[a-z0-9-]{1,48}`.
pub fn og_cache_key(message: &str) -> String {
    let prefix = og_image_text_prefix(message);

    let slug: String = prefix
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect();

    let mut key = slug.trim_matches('-').to_string();
    key.truncate(OG_TEXT_LIMIT);

    if key.is_empty() {
        DEFAULT_OG_KEY.to_string()
    } else {
        key
    }
}

/// Absolute URL of the preview image for `message`.
pub fn og_image_url(base_url: &str, message: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let prefix = og_image_text_prefix(message);

    if prefix.is_empty() {
        return format!("{base}/og-image.png");
    }

    let text: String = form_urlencoded::byte_serialize(prefix.as_bytes()).collect();
    format!("{base}/og-image.png?text={text}")
}

/// CSS class for a `?theme=` value; unknown themes yield `None`.
pub fn theme_class(theme: &str) -> Option<&'static str> {
    let theme = theme.trim().to_lowercase();
    THEMES
        .iter()
        .find(|(name, _)| *name == theme)
        .map(|(_, class)| *class)
}
