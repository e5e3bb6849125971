//! Bare per-kind surfaces - the script-tag-style entry points.
//!
//! [`Widgets`] bundles one registry and exposes the two "just give me the
//! widget" APIs on top of it: a registration surface and a display surface,
//! each with a fixed default container id. At this level instances are
//! keyed by container id (the widget id IS the container id); the
//! multi-instance API is the registry itself.
//!
//! Callers hold the `Widgets` value (or the registry) and pass it around -
//! there is no process-wide singleton.

use std::cell::RefCell;
use std::rc::Rc;

use crate::display::DisplayConfig;
use crate::error::EnvironmentError;
use crate::form::{FormConfig, FormController};
use crate::host::Host;
use crate::registry::WidgetRegistry;
use crate::types::{DisplayData, WidgetKind};

/// Default container for the registration form surface.
pub const DEFAULT_FORM_CONTAINER: &str = "registration-widget-container";

/// Default container for the display surface.
pub const DEFAULT_DISPLAY_CONTAINER: &str = "registration-display-container";

// =============================================================================
// Widgets Bundle
// =============================================================================

/// Everything an embedding page gets: both bare surfaces plus the
/// multi-instance registry.
pub struct Widgets {
    registry: WidgetRegistry,
}

impl Widgets {
    pub fn new(host: Rc<RefCell<dyn Host>>) -> Self {
        Self {
            registry: WidgetRegistry::new(host),
        }
    }

    /// The multi-instance API for managing several named widgets.
    pub fn registry(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    /// The bare registration form surface.
    pub fn registration(&mut self) -> RegistrationSurface<'_> {
        RegistrationSurface {
            registry: &mut self.registry,
        }
    }

    /// The bare display surface.
    pub fn display(&mut self) -> DisplaySurface<'_> {
        DisplaySurface {
            registry: &mut self.registry,
        }
    }

    /// Drive pending submissions one step.
    pub fn tick(&self) {
        self.registry.tick();
    }
}

// =============================================================================
// Registration Surface
// =============================================================================

pub struct RegistrationSurface<'a> {
    registry: &'a mut WidgetRegistry,
}

impl RegistrationSurface<'_> {
    /// Mount the form at `config.container_id`, defaulting to
    /// [`DEFAULT_FORM_CONTAINER`]; replaces any instance already there.
    pub fn init(&mut self, config: FormConfig) -> Result<(), EnvironmentError> {
        let container_id = config
            .container_id
            .clone()
            .unwrap_or_else(|| DEFAULT_FORM_CONTAINER.to_string());
        self.registry
            .init_registration(&container_id, &container_id, config)
    }

    /// Tear down the instance at the given (or default) container.
    pub fn destroy(&mut self, container_id: Option<&str>) -> bool {
        let container_id = container_id.unwrap_or(DEFAULT_FORM_CONTAINER);
        self.registry.destroy(container_id, WidgetKind::Registration)
    }

    /// The controller behind the instance at the given (or default)
    /// container.
    pub fn controller(&self, container_id: Option<&str>) -> Option<Rc<FormController>> {
        let container_id = container_id.unwrap_or(DEFAULT_FORM_CONTAINER);
        self.registry.registration_controller(container_id)
    }
}

// =============================================================================
// Display Surface
// =============================================================================

pub struct DisplaySurface<'a> {
    registry: &'a mut WidgetRegistry,
}

impl DisplaySurface<'_> {
    /// Mount the display at `config.container_id`, defaulting to
    /// [`DEFAULT_DISPLAY_CONTAINER`]; replaces any instance already there.
    pub fn init(&mut self, config: DisplayConfig) -> Result<(), EnvironmentError> {
        let container_id = config
            .container_id
            .clone()
            .unwrap_or_else(|| DEFAULT_DISPLAY_CONTAINER.to_string());
        self.registry.init_display(&container_id, &container_id, config)
    }

    /// Push new data to the instance at the given (or default) container.
    ///
    /// Unlike the registry-level `update`, an unknown container
    /// auto-initializes a fresh widget there (with a warning).
    pub fn update(
        &mut self,
        data: DisplayData,
        container_id: Option<&str>,
    ) -> Result<(), EnvironmentError> {
        let container_id = container_id.unwrap_or(DEFAULT_DISPLAY_CONTAINER);
        if self.registry.update(container_id, data.clone()) {
            return Ok(());
        }

        tracing::warn!(
            container = container_id,
            "display widget not found; initializing a new widget"
        );
        self.registry.init_display(
            container_id,
            container_id,
            DisplayConfig {
                container_id: Some(container_id.to_string()),
                data,
                ..Default::default()
            },
        )
    }

    /// Tear down the instance at the given (or default) container.
    pub fn destroy(&mut self, container_id: Option<&str>) -> bool {
        let container_id = container_id.unwrap_or(DEFAULT_DISPLAY_CONTAINER);
        self.registry.destroy(container_id, WidgetKind::Display)
    }
}

// =============================================================================
// Tests
// =============================================================================
