//! Typed validation rule constructors.
//!
//! Each constructor returns an immutable, stateless [`ValidationRule`] that
//! either normalizes the raw field value or reports the first violated check
//! as a [`Diagnostic`]. Rules are cheap to build, `Send + Sync`, and safe to
//! share across requests.

use std::sync::Arc;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use pagination::{PageDefaults, PageRequest, PageRequestError};
use regex::Regex;
use url::Url;
use uuid::Uuid;

use super::patterns::{self, PatternCategory};
use super::{Diagnostic, DiagnosticCode};

/// Smallest accepted username length.
pub const USERNAME_MIN: usize = 3;
/// Largest accepted username length.
pub const USERNAME_MAX: usize = 100;
/// Largest accepted email length.
pub const EMAIL_MAX: usize = 255;

/// A named check from a raw field value to a normalized `T`.
pub struct ValidationRule<T> {
    name: &'static str,
    check: Arc<dyn Fn(&str, &str) -> Result<T, Diagnostic> + Send + Sync>,
}

impl<T> Clone for ValidationRule<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: 'static> ValidationRule<T> {
    /// Build a rule from a check closure.
    pub fn new(
        name: &'static str,
        check: impl Fn(&str, &str) -> Result<T, Diagnostic> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            check: Arc::new(check),
        }
    }

    /// Name the rule was constructed with.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the rule against `raw`, attributing failures to `field`.
    ///
    /// # Errors
    ///
    /// Returns the first violated check as a [`Diagnostic`]; later checks of
    /// the rule are not evaluated.
    pub fn apply(&self, field: &str, raw: &str) -> Result<T, Diagnostic> {
        (self.check)(field, raw)
    }

    /// Compose a normalization step onto an existing rule.
    pub fn map<U: 'static>(
        self,
        transform: impl Fn(T) -> U + Send + Sync + 'static,
    ) -> ValidationRule<U> {
        let check = self.check;
        ValidationRule {
            name: self.name,
            check: Arc::new(move |field, raw| check(field, raw).map(&transform)),
        }
    }
}

fn check_length(
    field: &str,
    raw: &str,
    min: usize,
    max: usize,
) -> Result<(), Diagnostic> {
    let length = raw.chars().count();
    if length < min {
        return Err(Diagnostic::field(
            DiagnosticCode::TooShort,
            field,
            format!("must be at least {min} characters"),
        ));
    }
    if length > max {
        return Err(Diagnostic::field(
            DiagnosticCode::TooLong,
            field,
            format!("must not exceed {max} characters"),
        ));
    }
    Ok(())
}

fn check_injection_patterns(field: &str, raw: &str) -> Result<(), Diagnostic> {
    if patterns::is_unsafe(PatternCategory::SqlInjection, raw) {
        return Err(Diagnostic::field(
            DiagnosticCode::UnsafeSqlPattern,
            field,
            "contains potentially dangerous SQL patterns",
        ));
    }
    if patterns::is_unsafe(PatternCategory::ScriptInjection, raw) {
        return Err(Diagnostic::field(
            DiagnosticCode::UnsafeScriptPattern,
            field,
            "contains potentially dangerous script patterns",
        ));
    }
    Ok(())
}

/// Bounded string with injection screening.
///
/// Checks run in order: length, SQL patterns, script patterns — each against
/// the input exactly as received. Trimming happens only on final success.
pub fn bounded_safe_string(min: usize, max: usize) -> ValidationRule<String> {
    ValidationRule::new("bounded_safe_string", move |field, raw| {
        check_length(field, raw, min, max)?;
        check_injection_patterns(field, raw)?;
        Ok(raw.trim().to_owned())
    })
}

/// Free-text content with the same screening as [`bounded_safe_string`].
pub fn free_text_content(max: usize) -> ValidationRule<String> {
    ValidationRule::new("free_text_content", move |field, raw| {
        check_length(field, raw, 1, max)?;
        check_injection_patterns(field, raw)?;
        Ok(raw.trim().to_owned())
    })
}

/// Canonical hyphenated UUID.
///
/// Only the 8-4-4-4-12 form is accepted; the 32-hex compact form and any
/// other decoration are rejected.
pub fn identifier() -> ValidationRule<Uuid> {
    ValidationRule::new("identifier", |field, raw| {
        if raw.len() == 36 {
            if let Ok(parsed) = Uuid::parse_str(raw) {
                return Ok(parsed);
            }
        }
        Err(Diagnostic::field(
            DiagnosticCode::InvalidIdentifier,
            field,
            "must be a valid UUID",
        ))
    })
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Dotted local part without leading/trailing/doubled dots, dotted
        // domain labels, alphabetic top-level label of two or more characters.
        let pattern =
            r"^[A-Za-z0-9_'+-]+(\.[A-Za-z0-9_'+-]+)*@([A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Structurally valid email address, normalized to lowercase.
pub fn email() -> ValidationRule<String> {
    ValidationRule::new("email", |field, raw| {
        if raw.chars().count() > EMAIL_MAX {
            return Err(Diagnostic::field(
                DiagnosticCode::TooLong,
                field,
                format!("must not exceed {EMAIL_MAX} characters"),
            ));
        }
        if !email_regex().is_match(raw) {
            return Err(Diagnostic::field(
                DiagnosticCode::InvalidEmail,
                field,
                "must be a valid email address",
            ));
        }
        Ok(raw.trim().to_lowercase())
    })
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z0-9_-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Username restricted to letters, digits, underscore, and hyphen.
///
/// The charset already excludes quote, semicolon, and comment tokens, so no
/// generic injection scan is applied.
pub fn username() -> ValidationRule<String> {
    ValidationRule::new("username", |field, raw| {
        check_length(field, raw, USERNAME_MIN, USERNAME_MAX)?;
        if !username_regex().is_match(raw) {
            return Err(Diagnostic::field(
                DiagnosticCode::InvalidUsername,
                field,
                "may only contain letters, numbers, underscores, and hyphens",
            ));
        }
        Ok(raw.trim().to_owned())
    })
}

/// Structurally valid http(s) URL.
///
/// Any other scheme — including `javascript:`, `data:`, `file:`, and
/// `ftp:` — is rejected.
pub fn url() -> ValidationRule<Url> {
    ValidationRule::new("url", |field, raw| {
        let parsed = Url::parse(raw).map_err(|_| {
            Diagnostic::field(DiagnosticCode::InvalidUrl, field, "must be a valid URL")
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Diagnostic::field(
                DiagnosticCode::UnsupportedScheme,
                field,
                "only HTTP and HTTPS protocols are allowed",
            ));
        }
        Ok(parsed)
    })
}

/// Strict ISO-8601 date-time with a mandatory time component and offset.
///
/// A bare calendar date is rejected. Already-typed [`DateTime<Utc>`] values
/// need no rule; the type itself carries the invariant.
pub fn iso_timestamp() -> ValidationRule<DateTime<Utc>> {
    ValidationRule::new("iso_timestamp", |field, raw| {
        DateTime::parse_from_rfc3339(raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|_| {
                Diagnostic::field(
                    DiagnosticCode::InvalidTimestamp,
                    field,
                    "must be an ISO 8601 date-time",
                )
            })
    })
}

/// Resolve raw pagination fields, mapping failures onto diagnostics.
///
/// Defaults are an explicit [`PageDefaults`] value resolved here, at the
/// validation boundary, before any business logic runs.
///
/// # Errors
///
/// Returns a [`Diagnostic`] naming the first offending field.
pub fn resolve_page(
    raw_page: Option<&str>,
    raw_limit: Option<&str>,
    defaults: PageDefaults,
) -> Result<PageRequest, Diagnostic> {
    PageRequest::resolve(raw_page, raw_limit, defaults).map_err(|error| match error {
        PageRequestError::PageNotInteger | PageRequestError::PageOutOfRange { .. } => {
            Diagnostic::field(DiagnosticCode::InvalidPage, "page", error.to_string())
        }
        PageRequestError::LimitNotInteger | PageRequestError::LimitOutOfRange { .. } => {
            Diagnostic::field(DiagnosticCode::InvalidLimit, "limit", error.to_string())
        }
    })
}

/// Composite presence rule for partial-update payloads.
///
/// Fails when every listed optional field is absent, independent of the
/// per-field rules.
///
/// # Errors
///
/// Returns a payload-level [`Diagnostic`] listing the field group.
pub fn at_least_one_present(fields: &[(&'static str, bool)]) -> Result<(), Diagnostic> {
    if fields.iter().any(|(_, present)| *present) {
        return Ok(());
    }
    let names = fields
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");
    Err(Diagnostic::payload(
        DiagnosticCode::MissingField,
        format!("at least one of {names} must be provided"),
    ))
}
