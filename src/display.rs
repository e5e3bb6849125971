//! Display Renderer - read-only projection of registration records.
//!
//! The display widget holds a snapshot of records in a signal and projects
//! it into a [`DisplayView`]: an explicit empty state (caller-supplied
//! message, optional refresh action) or a list with one entry per record.
//! Projection is pure; the caller's input is normalized into an owned
//! sequence and never retained by reference.

use spark_signals::{Signal, flush_sync, signal};

use crate::types::{DisplayData, RefreshCallback, RegistrationRecord};
use crate::view::{DisplayView, RecordEntry};

/// Empty-state message used when the caller supplies none.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No registrations yet";

/// Marker shown when a record carries no registration time.
pub const UNKNOWN_REGISTERED_AT: &str = "unknown";

/// How timestamps render once parsed.
const REGISTERED_AT_FORMAT: &str = "%Y/%m/%d %H:%M";

// =============================================================================
// Config
// =============================================================================

/// Recognized options for a display widget.
#[derive(Default)]
pub struct DisplayConfig {
    /// Target container; surfaces fall back to their default when `None`.
    pub container_id: Option<String>,
    /// Initial records.
    pub data: DisplayData,
    /// Optional refresh action surfaced on the rendered view.
    pub on_refresh: Option<RefreshCallback>,
    /// Empty-state message; [`DEFAULT_EMPTY_MESSAGE`] when omitted.
    pub empty_message: Option<String>,
}

// =============================================================================
// Display State
// =============================================================================

/// Live state of one mounted display widget.
///
/// The record snapshot lives in a signal so the mount's render effect
/// repaints whenever [`DisplayState::set_records`] replaces it.
pub struct DisplayState {
    data: Signal<Vec<RegistrationRecord>>,
    empty_message: String,
    on_refresh: Option<RefreshCallback>,
}

impl DisplayState {
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            data: signal(config.data.into_records()),
            empty_message: config
                .empty_message
                .unwrap_or_else(|| DEFAULT_EMPTY_MESSAGE.to_string()),
            on_refresh: config.on_refresh,
        }
    }

    /// Replace the snapshot with new records.
    pub fn set_records(&self, data: DisplayData) {
        self.data.set(data.into_records());
        // Effects are batched; flush so the mount repaints in place.
        flush_sync();
    }

    /// The current snapshot.
    pub fn records(&self) -> Vec<RegistrationRecord> {
        self.data.get()
    }

    /// Invoke the refresh action, if one was configured.
    pub fn refresh(&self) -> bool {
        match &self.on_refresh {
            Some(on_refresh) => {
                on_refresh();
                true
            }
            None => false,
        }
    }

    /// Project the current snapshot.
    pub fn view(&self) -> DisplayView {
        project(
            &self.data.get(),
            &self.empty_message,
            self.on_refresh.is_some(),
        )
    }
}

// =============================================================================
// Projection
// =============================================================================

/// Project records into a display view. Pure.
pub fn project(records: &[RegistrationRecord], empty_message: &str, can_refresh: bool) -> DisplayView {
    if records.is_empty() {
        return DisplayView::Empty {
            message: empty_message.to_string(),
            can_refresh,
        };
    }

    let entries = records
        .iter()
        .map(|record| RecordEntry {
            username: record.username.clone(),
            registered_at: format_registered_at(record.registered_at.as_deref()),
            email: record.email.clone(),
            phone: if record.phone.is_empty() {
                None
            } else {
                Some(record.phone.clone())
            },
        })
        .collect();

    DisplayView::List {
        entries,
        can_refresh,
    }
}

/// Format a registration timestamp.
///
/// RFC 3339 strings format as `%Y/%m/%d %H:%M`; anything unparseable passes
/// through raw; an absent timestamp renders the "unknown" marker.
pub fn format_registered_at(registered_at: Option<&str>) -> String {
    let Some(raw) = registered_at else {
        return UNKNOWN_REGISTERED_AT.to_string();
    };

    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => timestamp.format(REGISTERED_AT_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(username: &str) -> RegistrationRecord {
        RegistrationRecord::new(username, format!("{username}@x.com"), "")
    }

    #[test]
    fn test_empty_uses_default_message() {
        let view = project(&[], DEFAULT_EMPTY_MESSAGE, false);
        assert_eq!(
            view,
            DisplayView::Empty {
                message: "No registrations yet".into(),
                can_refresh: false,
            }
        );
    }

    #[test]
    fn test_empty_uses_caller_message_verbatim() {
        let state = DisplayState::new(DisplayConfig {
            empty_message: Some("nothing here!".into()),
            ..Default::default()
        });
        match state.view() {
            DisplayView::Empty { message, .. } => assert_eq!(message, "nothing here!"),
            other => panic!("expected empty view, got {other:?}"),
        }
    }

    #[test]
    fn test_one_record_normalizes_to_single_entry() {
        let state = DisplayState::new(DisplayConfig {
            data: DisplayData::One(record("bob")),
            ..Default::default()
        });
        match state.view() {
            DisplayView::List { entries, .. } => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].username, "bob");
                assert_eq!(entries[0].registered_at, UNKNOWN_REGISTERED_AT);
                assert_eq!(entries[0].phone, None);
            }
            other => panic!("expected list view, got {other:?}"),
        }
    }

    #[test]
    fn test_phone_entry_present_when_non_empty() {
        let records = vec![RegistrationRecord::new("carol", "c@x.com", "12345678")];
        match project(&records, DEFAULT_EMPTY_MESSAGE, false) {
            DisplayView::List { entries, .. } => {
                assert_eq!(entries[0].phone.as_deref(), Some("12345678"));
            }
            other => panic!("expected list view, got {other:?}"),
        }
    }

    #[test]
    fn test_set_records_replaces_snapshot() {
        let state = DisplayState::new(DisplayConfig::default());
        assert!(state.records().is_empty());

        state.set_records(vec![record("a"), record("b")].into());
        assert_eq!(state.records().len(), 2);

        state.set_records(DisplayData::None);
        assert!(state.records().is_empty());
    }

    #[test]
    fn test_refresh_reports_configured_action() {
        use std::cell::Cell;
        use std::rc::Rc;

        let fired = Rc::new(Cell::new(false));
        let fired_probe = fired.clone();
        let state = DisplayState::new(DisplayConfig {
            on_refresh: Some(Rc::new(move || fired_probe.set(true))),
            ..Default::default()
        });

        assert!(state.refresh());
        assert!(fired.get());

        let bare = DisplayState::new(DisplayConfig::default());
        assert!(!bare.refresh());
    }

    #[test]
    fn test_format_registered_at() {
        assert_eq!(format_registered_at(None), "unknown");
        assert_eq!(
            format_registered_at(Some("2024-01-15T14:30:00+08:00")),
            "2024/01/15 14:30"
        );
        // Unparseable strings pass through raw.
        assert_eq!(format_registered_at(Some("last tuesday")), "last tuesday");
    }
}
