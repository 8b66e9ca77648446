use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

static TITLE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid title separator regex"));
static FORBIDDEN_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^/\-A-Za-z0-9]").expect("valid slug charset regex"));
static REPEATED_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\-/]{2,}").expect("valid separator regex"));
static NUMERIC_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)-([0-9]+)$").expect("valid suffix regex"));

/// Everything that can go wrong while deriving, validating or claiming a slug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    #[error("Slugs can only contain '/', '-' and alphanumeric characters.")]
    InvalidCharacters,
    #[error("Consecutive '-' or '/' characters are not allowed in the slug.")]
    ConsecutiveSeparators,
    #[error("This slug is already in use.")]
    SlugConflict,
    #[error("Could not check slug availability: {0}")]
    LookupFailed(String),
    #[error("A slug can only be derived from a text title.")]
    DerivationSkipped,
    #[error("No free slug found after {attempts} attempts.")]
    TooManyCollisions { attempts: usize },
}

/// Data-free discriminant of [`SlugError`], compared when deciding whether a
/// status message needs to be shown again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCharacters,
    ConsecutiveSeparators,
    SlugConflict,
    LookupFailed,
    DerivationSkipped,
    TooManyCollisions,
}

impl SlugError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCharacters => ErrorKind::InvalidCharacters,
            Self::ConsecutiveSeparators => ErrorKind::ConsecutiveSeparators,
            Self::SlugConflict => ErrorKind::SlugConflict,
            Self::LookupFailed(_) => ErrorKind::LookupFailed,
            Self::DerivationSkipped => ErrorKind::DerivationSkipped,
            Self::TooManyCollisions { .. } => ErrorKind::TooManyCollisions,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacters => write!(f, "invalid-characters"),
            Self::ConsecutiveSeparators => write!(f, "consecutive-separators"),
            Self::SlugConflict => write!(f, "slug-conflict"),
            Self::LookupFailed => write!(f, "lookup-failed"),
            Self::DerivationSkipped => write!(f, "derivation-skipped"),
            Self::TooManyCollisions => write!(f, "too-many-collisions"),
        }
    }
}

/// Derive a slug from a title: every run of non-alphanumeric characters
/// becomes a single `-`, and the result is placed under `prefix`.
///
/// Case is preserved. `create_slug("/blog", "hello, cruel world!")` gives
/// `/blog/hello-cruel-world`.
pub fn create_slug(prefix: &str, title: &str) -> String {
    let fragments: Vec<&str> = TITLE_SEPARATOR
        .split(title)
        .filter(|fragment| !fragment.is_empty())
        .collect();

    format!("{}/{}", prefix.trim_end_matches('/'), fragments.join("-"))
}

/// Like [`create_slug`], but for a title that arrived as a JSON form value.
/// Anything other than a string is refused.
pub fn try_create_slug_from_value(prefix: &str, title: &Value) -> Result<String, SlugError> {
    match title {
        Value::String(title) => Ok(create_slug(prefix, title)),
        _ => Err(SlugError::DerivationSkipped),
    }
}

/// Non-string titles derive to the empty string.
pub fn create_slug_from_value(prefix: &str, title: &Value) -> String {
    try_create_slug_from_value(prefix, title).unwrap_or_default()
}

/// Check a slug typed by the user. The character check runs first, so a slug
/// that breaks both rules reports [`SlugError::InvalidCharacters`].
pub fn validate_slug(slug: &str) -> Result<(), SlugError> {
    if FORBIDDEN_CHAR.is_match(slug) {
        return Err(SlugError::InvalidCharacters);
    }
    if REPEATED_SEPARATOR.is_match(slug) {
        return Err(SlugError::ConsecutiveSeparators);
    }
    Ok(())
}

/// `None` when the slug is acceptable.
pub fn invalid_slug(slug: &str) -> Option<SlugError> {
    validate_slug(slug).err()
}

/// Bump a trailing `-N` suffix, or append `-2` when there is none.
pub fn increment_slug(slug: &str) -> String {
    match NUMERIC_SUFFIX.captures(slug) {
        Some(caps) => {
            let stem = caps.get(1).map_or("", |m| m.as_str());
            let digits = caps.get(2).map_or("", |m| m.as_str());
            format!("{}-{}", stem, increment_decimal(digits))
        }
        None => format!("{}-2", slug),
    }
}

// Numeric increment of an ASCII digit string. Leading zeros are dropped the
// way a numeric parse would drop them; long runs never overflow.
fn increment_decimal(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if let Ok(n) = trimmed.parse::<u64>() {
        if let Some(next) = n.checked_add(1) {
            return next.to_string();
        }
    }
    if trimmed.is_empty() {
        return "1".to_string();
    }

    let mut out: Vec<u8> = trimmed.bytes().collect();
    let mut carry = true;
    for byte in out.iter_mut().rev() {
        if !carry {
            break;
        }
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            carry = false;
        }
    }
    if carry {
        out.insert(0, b'1');
    }
    String::from_utf8(out).unwrap_or_default()
}
