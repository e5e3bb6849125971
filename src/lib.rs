//! # regwidget
//!
//! Embeddable registration widgets: a reactive registration form, a
//! registration-record display, and a legacy click-tracking demo surface,
//! managed over named containers by a host-agnostic lifecycle registry.
//!
//! ## Architecture
//!
//! Widget state lives in [spark-signals](https://crates.io/crates/spark-signals)
//! signals. Each mount gets one render effect that projects the state into
//! a plain view model and paints it through the [`host::Host`] capability
//! trait:
//!
//! ```text
//! Widget state (signals) → view model → render effect → Host
//! ```
//!
//! The host is the environment seam - a DOM bridge, a terminal, or the
//! in-memory reference host - so the core never touches its environment
//! directly. All state is in-memory; nothing persists.
//!
//! ## Modules
//!
//! - [`types`] - Core types (fields, draft, record, widget kinds)
//! - [`error`] - Error taxonomy (validation / submission / environment)
//! - [`validate`] - Pure field constraint checks
//! - [`form`] - Form controller state machine and the registrar seam
//! - [`display`] - Record display projection
//! - [`view`] - View models the host paints
//! - [`host`] - Environment capability trait + in-memory reference host
//! - [`registry`] - Multi-instance widget lifecycle registry
//! - [`surface`] - Bare per-kind entry points with default containers
//! - [`demo`] - Legacy click-tracking demo surface
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use regwidget::{Field, FormConfig, MemoryHost, Widgets};
//!
//! let host = Rc::new(RefCell::new(MemoryHost::new()));
//! let mut widgets = Widgets::new(host.clone());
//!
//! widgets.registration().init(FormConfig::default()).unwrap();
//!
//! let form = widgets.registration().controller(None).unwrap();
//! form.set_field(Field::Username, "alice");
//! form.set_field(Field::Email, "a@b.com");
//! form.set_field(Field::Password, "secret1");
//! form.set_field(Field::ConfirmPassword, "secret1");
//!
//! assert!(form.submit());
//! widgets.tick(); // drives the simulated registration step
//! assert!(form.is_success());
//! ```

pub mod demo;
pub mod display;
pub mod error;
pub mod form;
pub mod host;
pub mod registry;
pub mod surface;
pub mod types;
pub mod validate;
pub mod view;

// Re-export commonly used items

pub use types::{
    ClickCallback, DisplayData, Field, RecordCallback, RefreshCallback, RegistrationDraft,
    RegistrationRecord, WidgetKind,
};

pub use error::{EnvironmentError, ErrorKind, SubmissionError, ValidationError};

pub use validate::{FieldErrors, validate};

pub use form::{FormConfig, FormController, Registrar, SimulatedRegistrar};

pub use display::{DEFAULT_EMPTY_MESSAGE, DisplayConfig, DisplayState};

pub use view::{
    ClickStatsView, DemoView, DisplayView, FieldView, FormView, RecordEntry, WidgetView,
};

pub use host::{Host, MemoryHost, MountId};

pub use registry::WidgetRegistry;

pub use surface::{
    DEFAULT_DISPLAY_CONTAINER, DEFAULT_FORM_CONTAINER, DisplaySurface, RegistrationSurface,
    Widgets,
};

pub use demo::{
    ClickTracker, DemoPage, DemoPageConfig, DemoWidget, MemoryDemoPage, STATS_CONTAINER,
    attach_click_tracking,
};
