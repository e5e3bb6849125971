//! View models - the data a host paints.
//!
//! Widgets project their reactive state into these plain bundles; the render
//! effect hands them to the host, which draws them however it likes (DOM,
//! terminal, in-memory text). Nothing in here mutates or retains widget
//! state.

use crate::types::Field;

// =============================================================================
// Widget View
// =============================================================================

/// Everything a host knows how to paint.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetView {
    Form(FormView),
    Display(DisplayView),
    Demo(DemoView),
    ClickStats(ClickStatsView),
}

// =============================================================================
// Form
// =============================================================================

/// Snapshot of the registration form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FieldView>,
    pub submitting: bool,
    pub success: bool,
}

/// One rendered form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
    pub masked: bool,
    pub value: String,
    pub error: Option<&'static str>,
}

/// Placeholder text shown while a field is empty.
pub fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Username => "Enter a username",
        Field::Email => "example@email.com",
        Field::Password => "At least 6 characters",
        Field::ConfirmPassword => "Repeat the password",
        Field::Phone => "Optional, 8-10 digits",
    }
}

// =============================================================================
// Display
// =============================================================================

/// Snapshot of the registration-record display.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayView {
    /// No records: the empty-state message, verbatim as configured.
    Empty { message: String, can_refresh: bool },
    /// One entry per record.
    List {
        entries: Vec<RecordEntry>,
        can_refresh: bool,
    },
}

/// One registration record, formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEntry {
    pub username: String,
    /// Already formatted; falls back to the raw string or an "unknown"
    /// marker upstream.
    pub registered_at: String,
    pub email: String,
    /// `None` when the record's phone is empty - the entry is omitted.
    pub phone: Option<String>,
}

// =============================================================================
// Demo
// =============================================================================

/// Snapshot of a click-counter demo widget.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoView {
    pub title: String,
    pub message: String,
    pub count: u64,
}

/// Snapshot of the click-stats summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickStatsView {
    /// (widget id, clicks), in first-click order.
    pub entries: Vec<(String, u64)>,
    pub total: u64,
}

impl ClickStatsView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
