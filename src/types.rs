//! Core types for regwidget.
//!
//! These types define the foundation that everything builds on:
//! the form draft, the committed registration record, field identities,
//! widget kinds, and the callback aliases used throughout the crate.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

// =============================================================================
// Field
// =============================================================================

/// Identity of a single form field.
///
/// Used as the key of validation errors and as the target of field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
    Phone,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Field; 5] = [
        Field::Username,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
        Field::Phone,
    ];

    /// Stable name, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm_password",
            Field::Phone => "phone",
        }
    }

    /// Human-readable label shown next to the field.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
            Field::Phone => "Phone",
        }
    }

    /// Whether the field must be filled in for a draft to validate.
    pub fn required(&self) -> bool {
        !matches!(self, Field::Phone)
    }

    /// Whether the field's value is masked when rendered.
    pub fn masked(&self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Widget Kind
// =============================================================================

/// The two widget kinds the registry manages.
///
/// The registry partitions its handle table by kind, so ids may collide
/// across kinds without conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Registration,
    Display,
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WidgetKind::Registration => "registration",
            WidgetKind::Display => "display",
        })
    }
}

// =============================================================================
// Registration Draft
// =============================================================================

/// The in-progress, uncommitted form data.
///
/// Owned exclusively by the form controller; reset to all-empty on a
/// successful submit. Password fields never leave the controller - see
/// [`RegistrationDraft::into_record`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

impl RegistrationDraft {
    /// Read a single field's value.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
            Field::Phone => &self.phone,
        }
    }

    /// Commit the draft into a record, stripping both password fields.
    pub fn into_record(self) -> RegistrationRecord {
        RegistrationRecord {
            username: self.username,
            email: self.email,
            phone: self.phone,
            registered_at: None,
        }
    }
}

// =============================================================================
// Registration Record
// =============================================================================

/// A committed, password-stripped registration result.
///
/// Produced by the form controller on success and consumed read-only by the
/// display renderer. Serializes with camelCase keys (`registeredAt`) so JSON
/// handed over by an embedding page deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
}

impl RegistrationRecord {
    pub fn new(username: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            phone: phone.into(),
            registered_at: None,
        }
    }

    pub fn registered_at(mut self, timestamp: impl Into<String>) -> Self {
        self.registered_at = Some(timestamp.into());
        self
    }
}

// =============================================================================
// Display Data
// =============================================================================

/// Input accepted by the display widget: nothing, one record, or many.
///
/// Normalized into a single owned sequence before rendering; the caller's
/// value is consumed (or cloned) as a snapshot and never retained by
/// reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayData {
    #[default]
    None,
    One(RegistrationRecord),
    Many(Vec<RegistrationRecord>),
}

impl DisplayData {
    /// Normalize into one uniform sequence.
    pub fn into_records(self) -> Vec<RegistrationRecord> {
        match self {
            DisplayData::None => Vec::new(),
            DisplayData::One(record) => vec![record],
            DisplayData::Many(records) => records,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            DisplayData::None => true,
            DisplayData::One(_) => false,
            DisplayData::Many(records) => records.is_empty(),
        }
    }
}

impl From<RegistrationRecord> for DisplayData {
    fn from(record: RegistrationRecord) -> Self {
        DisplayData::One(record)
    }
}

impl From<Vec<RegistrationRecord>> for DisplayData {
    fn from(records: Vec<RegistrationRecord>) -> Self {
        DisplayData::Many(records)
    }
}

impl From<Option<Vec<RegistrationRecord>>> for DisplayData {
    fn from(records: Option<Vec<RegistrationRecord>>) -> Self {
        match records {
            Some(records) => DisplayData::Many(records),
            None => DisplayData::None,
        }
    }
}

// =============================================================================
// Callback Types
// =============================================================================

/// Callback carrying a committed registration record (Rc for shared
/// ownership in closures - the standard pattern for event callbacks that
/// need to be captured more than once).
pub type RecordCallback = Rc<dyn Fn(&RegistrationRecord)>;

/// Refresh action on the display widget's empty/header view.
pub type RefreshCallback = Rc<dyn Fn()>;

/// Click notification carrying a widget id.
pub type ClickCallback = Rc<dyn Fn(&str)>;

// =============================================================================
// Tests
// =============================================================================
