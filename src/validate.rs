//! Validator - pure form field constraint checks.
//!
//! [`validate`] runs every rule on every call (no short-circuiting between
//! fields) and recomputes the error mapping wholesale, so the result is
//! never partially stale. A draft is valid iff the returned mapping is
//! empty.

use indexmap::IndexMap;

use crate::error::ErrorKind;
use crate::types::{Field, RegistrationDraft};

// =============================================================================
// Field Errors
// =============================================================================

/// Field-keyed validation errors, iterated in form order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    errors: IndexMap<Field, ErrorKind>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<ErrorKind> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, kind: ErrorKind) {
        self.errors.insert(field, kind);
    }

    /// Clear one field's error, leaving the rest untouched.
    ///
    /// `shift_remove` keeps the remaining errors in form order.
    pub fn clear(&mut self, field: Field) -> Option<ErrorKind> {
        self.errors.shift_remove(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, ErrorKind)> + '_ {
        self.errors.iter().map(|(field, kind)| (*field, *kind))
    }

    /// The human-readable message for one field, if it has an error.
    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|kind| message(field, kind))
    }
}

/// Human-readable message for a (field, kind) pair.
pub fn message(field: Field, kind: ErrorKind) -> &'static str {
    match (field, kind) {
        (Field::Username, ErrorKind::Required) => "Username is required",
        (Field::Username, ErrorKind::TooShort) => "Username must be at least 3 characters",
        (Field::Email, ErrorKind::Required) => "Email is required",
        (Field::Email, ErrorKind::InvalidFormat) => "Enter a valid email address",
        (Field::Password, ErrorKind::Required) => "Password is required",
        (Field::Password, ErrorKind::TooShort) => "Password must be at least 6 characters",
        (Field::ConfirmPassword, ErrorKind::Required) => "Please confirm your password",
        (Field::ConfirmPassword, ErrorKind::Mismatch) => "Passwords do not match",
        (Field::Phone, ErrorKind::InvalidFormat) => "Enter a valid phone number (8-10 digits)",
        _ => "Invalid value",
    }
}

// =============================================================================
// Rules
// =============================================================================

const USERNAME_MIN_CHARS: usize = 3;
const PASSWORD_MIN_CHARS: usize = 6;
const PHONE_MIN_DIGITS: usize = 8;
const PHONE_MAX_DIGITS: usize = 10;

/// Validate a draft. Pure and deterministic; all rules run every call.
pub fn validate(draft: &RegistrationDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    // Username: required, then minimum length on the raw value.
    if draft.username.trim().is_empty() {
        errors.insert(Field::Username, ErrorKind::Required);
    } else if draft.username.chars().count() < USERNAME_MIN_CHARS {
        errors.insert(Field::Username, ErrorKind::TooShort);
    }

    // Email: required, then local@domain.tld shape.
    if draft.email.trim().is_empty() {
        errors.insert(Field::Email, ErrorKind::Required);
    } else if !is_email_shaped(&draft.email) {
        errors.insert(Field::Email, ErrorKind::InvalidFormat);
    }

    // Password: required, then minimum length.
    if draft.password.is_empty() {
        errors.insert(Field::Password, ErrorKind::Required);
    } else if draft.password.chars().count() < PASSWORD_MIN_CHARS {
        errors.insert(Field::Password, ErrorKind::TooShort);
    }

    // Confirmation: required, then equality with the password.
    if draft.confirm_password.is_empty() {
        errors.insert(Field::ConfirmPassword, ErrorKind::Required);
    } else if draft.confirm_password != draft.password {
        errors.insert(Field::ConfirmPassword, ErrorKind::Mismatch);
    }

    // Phone: optional, but must be 8-10 ASCII digits when present.
    if !draft.phone.is_empty() && !is_phone_shaped(&draft.phone) {
        errors.insert(Field::Phone, ErrorKind::InvalidFormat);
    }

    errors
}

/// local@domain.tld shape: no whitespace, exactly one `@`, non-empty local
/// part, and a domain containing a `.` with non-empty parts on both sides.
fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.splitn(3, '@');
    let local = parts.next().unwrap_or("");
    let Some(domain) = parts.next() else {
        return false;
    };
    // A third chunk means a second '@'.
    if parts.next().is_some() {
        return false;
    }
    if local.is_empty() || domain.is_empty() {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// 8-10 ASCII digits, nothing else.
fn is_phone_shaped(phone: &str) -> bool {
    let len = phone.len();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&len)
        && phone.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// Tests
// =============================================================================
