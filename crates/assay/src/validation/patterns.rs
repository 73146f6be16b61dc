//! Field validators for the recognised semantic column types.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================
// All patterns are anchored at the start of the value. Mobile, telephone and
// government ID are also anchored at the end; email is not unless
// `EmailMatch::Full` is selected.

static MOBILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^05\d-\d{7}$").unwrap());

static TELEPHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}-\d{7}$").unwrap());

static EMAIL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9]+[._-])*[A-Za-z0-9]+@[A-Za-z0-9-]+(\.[A-Za-z]{2,})+").unwrap()
});

static EMAIL_FULL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9]+[._-])*[A-Za-z0-9]+@[A-Za-z0-9-]+(\.[A-Za-z]{2,})+$").unwrap()
});

static GOVERNMENT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-\d{4}-\d{7}-\d$").unwrap());

/// Semantic type of a validated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Mobile number, e.g. `050-1234567`.
    Mobile,
    /// Landline number, e.g. `4-1234567`.
    Telephone,
    /// Email address.
    Email,
    /// Government (Emirates) ID, e.g. `784-1990-1234567-1`.
    GovernmentId,
}

impl FieldKind {
    /// All kinds in reporting order.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Mobile,
        FieldKind::Telephone,
        FieldKind::Email,
        FieldKind::GovernmentId,
    ];

    /// Column name this kind is read from by default.
    pub fn default_column(&self) -> &'static str {
        match self {
            FieldKind::Mobile => "Mobile No.",
            FieldKind::Telephone => "Telephone",
            FieldKind::Email => "Email ID",
            FieldKind::GovernmentId => "EID",
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Mobile => "mobile number",
            FieldKind::Telephone => "telephone number",
            FieldKind::Email => "email address",
            FieldKind::GovernmentId => "government ID",
        }
    }
}

/// How much of a value the email pattern has to cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailMatch {
    /// A valid address at the start of the value is enough (`a@b.comXXX` passes).
    #[default]
    Prefix,
    /// The whole value must be an address.
    Full,
}

/// A stateless predicate over a single field value.
pub trait FieldValidator {
    /// The field type this validator recognises.
    fn kind(&self) -> FieldKind;

    /// Whether `value` has the expected format.
    fn validate(&self, value: &str) -> bool;
}

/// Regex-backed validator for one field kind.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    kind: FieldKind,
    pattern: &'static Regex,
}

impl PatternValidator {
    /// Validator for `kind`, with prefix matching for email.
    pub fn new(kind: FieldKind) -> Self {
        Self::with_email_match(kind, EmailMatch::default())
    }

    /// Validator for `kind`; `email_match` only affects `FieldKind::Email`.
    pub fn with_email_match(kind: FieldKind, email_match: EmailMatch) -> Self {
        let pattern: &'static Regex = match (kind, email_match) {
            (FieldKind::Mobile, _) => &*MOBILE,
            (FieldKind::Telephone, _) => &*TELEPHONE,
            (FieldKind::Email, EmailMatch::Prefix) => &*EMAIL_PREFIX,
            (FieldKind::Email, EmailMatch::Full) => &*EMAIL_FULL,
            (FieldKind::GovernmentId, _) => &*GOVERNMENT_ID,
        };
        Self { kind, pattern }
    }

    /// The underlying pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl FieldValidator for PatternValidator {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn validate(&self, value: &str) -> bool {
        self.pattern.is_match(value)
    }
}
