//! Input validation for untrusted request fields.
//!
//! [`patterns`] owns the static injection/script detection sets and
//! [`rules`] builds the typed validation rules on top of them. Every rule
//! either normalizes its input or yields a [`Diagnostic`] naming the first
//! violated check; values that pass are trusted by the rest of the crate and
//! are never re-scanned downstream.

pub mod patterns;
pub mod rules;

use std::fmt;

pub use patterns::{PatternCategory, is_unsafe};
pub use rules::ValidationRule;

/// Stable machine-readable code identifying a failed validation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// A required field (or field group) is absent.
    MissingField,
    /// The value is shorter than the accepted minimum.
    TooShort,
    /// The value is longer than the accepted maximum.
    TooLong,
    /// The value matches a SQL-injection pattern.
    UnsafeSqlPattern,
    /// The value matches a script-injection pattern.
    UnsafeScriptPattern,
    /// The value is not a canonical hyphenated UUID.
    InvalidIdentifier,
    /// The value is not a structurally valid email address.
    InvalidEmail,
    /// The value contains characters outside the username charset.
    InvalidUsername,
    /// The value is not a structurally valid URL.
    InvalidUrl,
    /// The URL scheme is not http or https.
    UnsupportedScheme,
    /// The page field is not an integer in the accepted range.
    InvalidPage,
    /// The limit field is not an integer in the accepted range.
    InvalidLimit,
    /// The value is not a strict ISO-8601 date-time.
    InvalidTimestamp,
    /// The value is not a recognised status token.
    InvalidStatus,
}

impl DiagnosticCode {
    /// Wire representation of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::UnsafeSqlPattern => "unsafe_sql_pattern",
            Self::UnsafeScriptPattern => "unsafe_script_pattern",
            Self::InvalidIdentifier => "invalid_identifier",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidUsername => "invalid_username",
            Self::InvalidUrl => "invalid_url",
            Self::UnsupportedScheme => "unsupported_scheme",
            Self::InvalidPage => "invalid_page",
            Self::InvalidLimit => "invalid_limit",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidStatus => "invalid_status",
        }
    }
}

/// One failed validation check: `(code, field, message)`.
///
/// The first violated check for a field short-circuits the remaining checks,
/// so a rule application yields at most one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Machine-readable failure code.
    pub code: DiagnosticCode,
    /// Field the failure applies to, absent for payload-level checks.
    pub field: Option<String>,
    /// Human-readable description of the failure.
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic for a named field.
    pub fn field(code: DiagnosticCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Build a payload-level diagnostic not tied to a single field.
    pub fn payload(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            field: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{field}: {} ({})", self.message, self.code.as_str()),
            None => write!(f, "{} ({})", self.message, self.code.as_str()),
        }
    }
}
