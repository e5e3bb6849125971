//! Widget Registry - lifecycle of named widget instances.
//!
//! An explicit registry instance (no process-wide state) that maps a
//! logical widget id to a (container id, mount handle) pair, partitioned by
//! [`WidgetKind`] so ids may collide across kinds. `init` is the only
//! handle-creating operation and is idempotent: a second init for the same
//! (id, kind) tears the first mount down before creating the replacement,
//! so there is never more than one live handle per pair.
//!
//! Each mount gets ONE render effect: it reads the widget's reactive state
//! (creating the dependencies) and repaints the mount through the host.
//! The handle owns the effect's stop function and runs it on teardown.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use spark_signals::{effect, flush_sync};

use crate::display::{DisplayConfig, DisplayState};
use crate::error::EnvironmentError;
use crate::form::{FormConfig, FormController};
use crate::host::{Host, MountId};
use crate::types::{DisplayData, WidgetKind};
use crate::view::WidgetView;

// =============================================================================
// Handle
// =============================================================================

/// The registry's record of one live mount.
struct Handle<T> {
    container_id: String,
    mount: MountId,
    stop_effect: Option<Box<dyn FnOnce()>>,
    instance: T,
}

impl<T> Drop for Handle<T> {
    fn drop(&mut self) {
        // Stop the render effect even if the handle is dropped without an
        // explicit teardown (registry dropped wholesale).
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

// =============================================================================
// Widget Registry
// =============================================================================

/// Manages several named widgets over one host.
pub struct WidgetRegistry {
    host: Rc<RefCell<dyn Host>>,
    registration: IndexMap<String, Handle<Rc<FormController>>>,
    display: IndexMap<String, Handle<Rc<DisplayState>>>,
}

impl WidgetRegistry {
    pub fn new(host: Rc<RefCell<dyn Host>>) -> Self {
        Self {
            host,
            registration: IndexMap::new(),
            display: IndexMap::new(),
        }
    }

    /// Shared handle to the underlying host.
    pub fn host(&self) -> Rc<RefCell<dyn Host>> {
        self.host.clone()
    }

    // =========================================================================
    // Init
    // =========================================================================

    /// Mount a registration form widget, replacing any prior handle for
    /// this id.
    pub fn init_registration(
        &mut self,
        id: &str,
        container_id: &str,
        config: FormConfig,
    ) -> Result<(), EnvironmentError> {
        if let Some(previous) = self.registration.shift_remove(id) {
            self.teardown(previous, Some(container_id));
        }

        self.host.borrow_mut().ensure_container(container_id)?;

        let controller = Rc::new(FormController::new(config));
        let mount = self
            .host
            .borrow_mut()
            .mount(container_id, &WidgetView::Form(controller.view()))?;

        let stop = {
            let controller = controller.clone();
            let host = self.host.clone();
            effect(move || {
                let view = WidgetView::Form(controller.view());
                host.borrow_mut().update(mount, &view);
            })
        };
        // Run the effect's first pass now so it tracks its dependencies.
        flush_sync();

        self.registration.insert(
            id.to_string(),
            Handle {
                container_id: container_id.to_string(),
                mount,
                stop_effect: Some(Box::new(stop)),
                instance: controller,
            },
        );
        tracing::debug!(widget = id, container = container_id, "registration widget mounted");
        Ok(())
    }

    /// Mount a display widget, replacing any prior handle for this id.
    pub fn init_display(
        &mut self,
        id: &str,
        container_id: &str,
        config: DisplayConfig,
    ) -> Result<(), EnvironmentError> {
        if let Some(previous) = self.display.shift_remove(id) {
            self.teardown(previous, Some(container_id));
        }

        self.host.borrow_mut().ensure_container(container_id)?;

        let state = Rc::new(DisplayState::new(config));
        let mount = self
            .host
            .borrow_mut()
            .mount(container_id, &WidgetView::Display(state.view()))?;

        let stop = {
            let state = state.clone();
            let host = self.host.clone();
            effect(move || {
                let view = WidgetView::Display(state.view());
                host.borrow_mut().update(mount, &view);
            })
        };
        // Run the effect's first pass now so it tracks its dependencies.
        flush_sync();

        self.display.insert(
            id.to_string(),
            Handle {
                container_id: container_id.to_string(),
                mount,
                stop_effect: Some(Box::new(stop)),
                instance: state,
            },
        );
        tracing::debug!(widget = id, container = container_id, "display widget mounted");
        Ok(())
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Re-render a display widget in place with new data.
    ///
    /// Valid only for display handles; returns false for an unknown id.
    /// There is no auto-init at this level - that convenience belongs to
    /// the bare display surface.
    pub fn update(&mut self, id: &str, data: DisplayData) -> bool {
        let Some(handle) = self.display.get(id) else {
            tracing::debug!(widget = id, "update ignored: no display handle");
            return false;
        };
        handle.instance.set_records(data);
        true
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    pub fn show(&mut self, id: &str, kind: WidgetKind) -> bool {
        self.set_visibility(id, kind, true)
    }

    pub fn hide(&mut self, id: &str, kind: WidgetKind) -> bool {
        self.set_visibility(id, kind, false)
    }

    fn set_visibility(&mut self, id: &str, kind: WidgetKind, visible: bool) -> bool {
        let container_id = match kind {
            WidgetKind::Registration => self
                .registration
                .get(id)
                .map(|handle| handle.container_id.clone()),
            WidgetKind::Display => self.display.get(id).map(|handle| handle.container_id.clone()),
        };
        match container_id {
            Some(container_id) => self.host.borrow_mut().set_visible(&container_id, visible),
            None => false,
        }
    }

    // =========================================================================
    // Destroy
    // =========================================================================

    /// Unmount, drop the handle, and remove the container element.
    ///
    /// Returns false (without panicking) when no handle exists.
    pub fn destroy(&mut self, id: &str, kind: WidgetKind) -> bool {
        let destroyed = match kind {
            WidgetKind::Registration => match self.registration.shift_remove(id) {
                Some(handle) => {
                    self.teardown(handle, None);
                    true
                }
                None => false,
            },
            WidgetKind::Display => match self.display.shift_remove(id) {
                Some(handle) => {
                    self.teardown(handle, None);
                    true
                }
                None => false,
            },
        };
        if destroyed {
            tracing::debug!(widget = id, kind = %kind, "widget destroyed");
        }
        destroyed
    }

    /// Stop the effect, unmount, and remove the backing container unless it
    /// is about to be reused by a replacement mount.
    fn teardown<T>(&self, mut handle: Handle<T>, keep_container: Option<&str>) {
        if let Some(stop) = handle.stop_effect.take() {
            stop();
        }
        let mut host = self.host.borrow_mut();
        host.unmount(handle.mount);
        if keep_container != Some(handle.container_id.as_str()) {
            host.remove_container(&handle.container_id);
        }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// All tracked ids; insertion order per kind, Registration then Display
    /// when unfiltered.
    pub fn list_ids(&self, kind: Option<WidgetKind>) -> Vec<String> {
        match kind {
            Some(WidgetKind::Registration) => self.registration.keys().cloned().collect(),
            Some(WidgetKind::Display) => self.display.keys().cloned().collect(),
            None => self
                .registration
                .keys()
                .chain(self.display.keys())
                .cloned()
                .collect(),
        }
    }

    pub fn contains(&self, id: &str, kind: WidgetKind) -> bool {
        match kind {
            WidgetKind::Registration => self.registration.contains_key(id),
            WidgetKind::Display => self.display.contains_key(id),
        }
    }

    /// The controller behind a registration widget - the seam the embedding
    /// UI drives (field edits, submit).
    pub fn registration_controller(&self, id: &str) -> Option<Rc<FormController>> {
        self.registration.get(id).map(|handle| handle.instance.clone())
    }

    /// The state behind a display widget (records, refresh action).
    pub fn display_state(&self, id: &str) -> Option<Rc<DisplayState>> {
        self.display.get(id).map(|handle| handle.instance.clone())
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Drive pending submissions of all registration widgets one step.
    pub fn tick(&self) {
        for handle in self.registration.values() {
            handle.instance.tick();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
