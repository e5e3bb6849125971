//! Form Controller - field state, guarded submission, success/failure
//! transitions.
//!
//! The controller is a small state machine: `Editing -> Submitting ->
//! {Success, Editing}`. Field values live in signals so a mount's render
//! effect repaints on every edit. Submission is guarded by the validator;
//! the asynchronous registration step sits behind the [`Registrar`]
//! collaborator and is polled cooperatively by [`FormController::tick`] -
//! the crate's only suspension point.
//!
//! Callback ordering is part of the contract: `on_submit` fires strictly
//! before the asynchronous step begins, `on_success` only after it
//! resolves. A failed step is logged and reverts to editing with the draft
//! preserved; there is no external error callback.

use std::cell::RefCell;

use spark_signals::{Signal, flush_sync, signal};

use crate::error::SubmissionError;
use crate::types::{Field, RecordCallback, RegistrationDraft, RegistrationRecord};
use crate::validate::{FieldErrors, validate};
use crate::view::{FieldView, FormView, placeholder};

// =============================================================================
// Registrar
// =============================================================================

/// The asynchronous registration step.
///
/// `begin` is called exactly once per submit attempt, after `on_submit` has
/// fired; `poll` is then driven by [`FormController::tick`] until it yields
/// an outcome. No cancellation: an in-flight attempt always resolves.
pub trait Registrar {
    fn begin(&mut self, record: &RegistrationRecord);
    fn poll(&mut self) -> Option<Result<(), SubmissionError>>;
}

/// Default number of ticks a simulated attempt stays pending.
pub const DEFAULT_DELAY_TICKS: u32 = 1;

/// Stand-in for a real registration backend.
///
/// Resolves after a configurable number of ticks, successfully by default;
/// [`SimulatedRegistrar::failing`] resolves with an injected failure
/// instead.
pub struct SimulatedRegistrar {
    delay_ticks: u32,
    remaining: Option<u32>,
    fail_reason: Option<String>,
}

impl SimulatedRegistrar {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DELAY_TICKS)
    }

    pub fn with_delay(delay_ticks: u32) -> Self {
        Self {
            delay_ticks,
            remaining: None,
            fail_reason: None,
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            delay_ticks: DEFAULT_DELAY_TICKS,
            remaining: None,
            fail_reason: Some(reason.into()),
        }
    }
}

impl Default for SimulatedRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

impl Registrar for SimulatedRegistrar {
    fn begin(&mut self, _record: &RegistrationRecord) {
        self.remaining = Some(self.delay_ticks);
    }

    fn poll(&mut self) -> Option<Result<(), SubmissionError>> {
        let remaining = self.remaining.as_mut()?;
        if *remaining > 0 {
            *remaining -= 1;
        }
        if *remaining > 0 {
            return None;
        }

        self.remaining = None;
        match &self.fail_reason {
            Some(reason) => Some(Err(SubmissionError::new(reason.clone()))),
            None => Some(Ok(())),
        }
    }
}

// =============================================================================
// Config
// =============================================================================

/// Recognized options for a registration form widget.
#[derive(Default)]
pub struct FormConfig {
    /// Target container; surfaces fall back to their default when `None`.
    pub container_id: Option<String>,
    /// Fires with the stripped record before the asynchronous step begins.
    pub on_submit: Option<RecordCallback>,
    /// Fires with the same record after the step resolves successfully.
    pub on_success: Option<RecordCallback>,
    /// Registration backend; [`SimulatedRegistrar`] when omitted.
    pub registrar: Option<Box<dyn Registrar>>,
}

// =============================================================================
// Form Controller
// =============================================================================

/// Title shown on the rendered form.
const FORM_TITLE: &str = "Registration";

pub struct FormController {
    username: Signal<String>,
    email: Signal<String>,
    password: Signal<String>,
    confirm_password: Signal<String>,
    phone: Signal<String>,
    errors: Signal<FieldErrors>,
    submitting: Signal<bool>,
    success: Signal<bool>,
    pending: RefCell<Option<RegistrationRecord>>,
    registrar: RefCell<Box<dyn Registrar>>,
    on_submit: Option<RecordCallback>,
    on_success: Option<RecordCallback>,
}

impl FormController {
    pub fn new(config: FormConfig) -> Self {
        Self {
            username: signal(String::new()),
            email: signal(String::new()),
            password: signal(String::new()),
            confirm_password: signal(String::new()),
            phone: signal(String::new()),
            errors: signal(FieldErrors::new()),
            submitting: signal(false),
            success: signal(false),
            pending: RefCell::new(None),
            registrar: RefCell::new(
                config
                    .registrar
                    .unwrap_or_else(|| Box::new(SimulatedRegistrar::new())),
            ),
            on_submit: config.on_submit,
            on_success: config.on_success,
        }
    }

    fn field_signal(&self, field: Field) -> &Signal<String> {
        match field {
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
            Field::Phone => &self.phone,
        }
    }

    /// Current value of one field.
    pub fn value(&self, field: Field) -> String {
        self.field_signal(field).get()
    }

    /// Edit one field.
    ///
    /// Clears that field's error if it has one; other fields are not
    /// revalidated.
    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.field_signal(field).set(value.into());

        let errors = self.errors.get();
        if errors.contains(field) {
            let mut errors = errors;
            errors.clear(field);
            self.errors.set(errors);
        }

        // Effects are batched; flush so the mount repaints before control
        // returns to the event handler.
        flush_sync();
    }

    /// Snapshot of the whole draft.
    pub fn draft(&self) -> RegistrationDraft {
        RegistrationDraft {
            username: self.username.get(),
            email: self.email.get(),
            password: self.password.get(),
            confirm_password: self.confirm_password.get(),
            phone: self.phone.get(),
        }
    }

    /// Current validation errors.
    pub fn errors(&self) -> FieldErrors {
        self.errors.get()
    }

    /// True while a submission is in flight. The embedding UI uses this to
    /// disable re-entry.
    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// True after the last submission resolved successfully, until the next
    /// submit attempt.
    pub fn is_success(&self) -> bool {
        self.success.get()
    }

    /// Attempt a submission.
    ///
    /// Ignored while one is already in flight. On validation failure the
    /// full error mapping is published and the state stays Editing. On pass
    /// the stripped record is built, `on_submit` fires, and the registrar's
    /// asynchronous step begins.
    ///
    /// Returns true when a submission actually started.
    pub fn submit(&self) -> bool {
        if self.submitting.get() {
            return false;
        }

        let draft = self.draft();
        let errors = validate(&draft);
        if !errors.is_empty() {
            self.errors.set(errors);
            flush_sync();
            return false;
        }

        self.errors.set(FieldErrors::new());
        self.success.set(false);
        self.submitting.set(true);

        let record = draft.into_record();
        if let Some(on_submit) = &self.on_submit {
            on_submit(&record);
        }
        self.registrar.borrow_mut().begin(&record);
        *self.pending.borrow_mut() = Some(record);
        flush_sync();
        true
    }

    /// Drive the in-flight submission one step.
    ///
    /// Returns true when the submission resolved this tick.
    pub fn tick(&self) -> bool {
        if self.pending.borrow().is_none() {
            return false;
        }

        let Some(outcome) = self.registrar.borrow_mut().poll() else {
            return false;
        };
        let Some(record) = self.pending.borrow_mut().take() else {
            return false;
        };

        match outcome {
            Ok(()) => {
                self.reset_draft();
                self.submitting.set(false);
                self.success.set(true);
                // Repaint before notifying, so the callback observes the
                // success state.
                flush_sync();
                if let Some(on_success) = &self.on_success {
                    on_success(&record);
                }
            }
            Err(error) => {
                // Log-only: the draft is preserved and no callback fires.
                tracing::error!(error = %error, username = %record.username, "registration submission failed");
                self.submitting.set(false);
            }
        }
        flush_sync();
        true
    }

    fn reset_draft(&self) {
        for field in Field::ALL {
            self.field_signal(field).set(String::new());
        }
    }

    /// Project the controller into a renderable snapshot.
    pub fn view(&self) -> FormView {
        let errors = self.errors.get();
        let fields = Field::ALL
            .iter()
            .map(|&field| FieldView {
                field,
                label: field.label(),
                placeholder: placeholder(field),
                required: field.required(),
                masked: field.masked(),
                value: self.value(field),
                error: errors.message_for(field),
            })
            .collect();

        FormView {
            title: FORM_TITLE.to_string(),
            fields,
            submitting: self.submitting.get(),
            success: self.success.get(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::ErrorKind;

    fn fill_valid(controller: &FormController) {
        controller.set_field(Field::Username, "alice");
        controller.set_field(Field::Email, "a@b.com");
        controller.set_field(Field::Password, "secret1");
        controller.set_field(Field::ConfirmPassword, "secret1");
    }

    #[test]
    fn test_invalid_submit_stays_editing_with_errors() {
        let controller = FormController::new(FormConfig::default());
        controller.set_field(Field::Username, "ab");

        assert!(!controller.submit());
        assert!(!controller.is_submitting());
        assert!(!controller.is_success());

        let errors = controller.errors();
        assert_eq!(errors.get(Field::Username), Some(ErrorKind::TooShort));
        assert_eq!(errors.get(Field::Email), Some(ErrorKind::Required));
    }

    #[test]
    fn test_edit_clears_only_that_fields_error() {
        let controller = FormController::new(FormConfig::default());
        assert!(!controller.submit());
        assert_eq!(controller.errors().len(), 4);

        controller.set_field(Field::Email, "a@b.com");
        let errors = controller.errors();
        assert!(!errors.contains(Field::Email));
        assert!(errors.contains(Field::Username));
        assert!(errors.contains(Field::Password));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_successful_submit_orders_callbacks_and_resets_draft() {
        let journal: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let submit_journal = journal.clone();
        let success_journal = journal.clone();
        let controller = FormController::new(FormConfig {
            on_submit: Some(Rc::new(move |record| {
                submit_journal
                    .borrow_mut()
                    .push(format!("submit:{}", record.username));
            })),
            on_success: Some(Rc::new(move |record| {
                success_journal
                    .borrow_mut()
                    .push(format!("success:{}", record.username));
            })),
            ..Default::default()
        });

        fill_valid(&controller);
        controller.set_field(Field::Phone, "12345678");

        assert!(controller.submit());
        assert!(controller.is_submitting());
        // on_submit fires before the asynchronous step resolves.
        assert_eq!(*journal.borrow(), ["submit:alice"]);

        assert!(controller.tick());
        assert!(!controller.is_submitting());
        assert!(controller.is_success());
        assert_eq!(*journal.borrow(), ["submit:alice", "success:alice"]);

        // Draft reset to all-empty.
        for field in Field::ALL {
            assert_eq!(controller.value(field), "", "{field} should be empty");
        }
    }

    #[test]
    fn test_duplicate_submit_ignored_while_pending() {
        let count = Rc::new(RefCell::new(0u32));
        let count_probe = count.clone();
        let controller = FormController::new(FormConfig {
            on_submit: Some(Rc::new(move |_| *count_probe.borrow_mut() += 1)),
            registrar: Some(Box::new(SimulatedRegistrar::with_delay(3))),
            ..Default::default()
        });

        fill_valid(&controller);
        assert!(controller.submit());
        assert!(!controller.submit());
        assert!(!controller.tick());
        assert!(!controller.submit());
        assert_eq!(*count.borrow(), 1);

        assert!(!controller.tick());
        assert!(controller.tick());
        assert!(controller.is_success());
    }

    #[test]
    fn test_failed_submit_preserves_draft_and_clears_submitting() {
        let controller = FormController::new(FormConfig {
            registrar: Some(Box::new(SimulatedRegistrar::failing("backend down"))),
            ..Default::default()
        });

        fill_valid(&controller);
        assert!(controller.submit());
        assert!(controller.tick());

        assert!(!controller.is_submitting());
        assert!(!controller.is_success());
        assert_eq!(controller.value(Field::Username), "alice");
        assert_eq!(controller.value(Field::Password), "secret1");

        // The attempt is over; nothing left to resolve.
        assert!(!controller.tick());
    }

    #[test]
    fn test_tick_without_pending_is_noop() {
        let controller = FormController::new(FormConfig::default());
        assert!(!controller.tick());
    }

    #[test]
    fn test_view_snapshot() {
        let controller = FormController::new(FormConfig::default());
        controller.set_field(Field::Username, "bob");

        let view = controller.view();
        assert_eq!(view.title, "Registration");
        assert_eq!(view.fields.len(), 5);
        assert_eq!(view.fields[0].value, "bob");
        assert!(view.fields[2].masked);
        assert!(!view.fields[4].required);
        assert!(!view.submitting);
        assert!(!view.success);
    }

    #[test]
    fn test_simulated_registrar_delay_semantics() {
        let mut registrar = SimulatedRegistrar::with_delay(2);
        assert!(registrar.poll().is_none(), "nothing pending before begin");

        registrar.begin(&RegistrationRecord::new("a", "a@b.com", ""));
        assert!(registrar.poll().is_none());
        assert_eq!(registrar.poll(), Some(Ok(())));
        assert!(registrar.poll().is_none(), "attempt resolved exactly once");
    }
}
