//! In-memory reference host.
//!
//! Stands in for a real environment: containers are entries in an ordered
//! table, mounts are monotonically numbered, and views render to plain
//! text readable back through [`MemoryHost::text`]. Tests and demos observe
//! widget output exactly as a DOM or terminal bridge would paint it.

use indexmap::IndexMap;

use super::render::render_view;
use super::{Host, MountId};
use crate::error::EnvironmentError;
use crate::view::WidgetView;

struct Container {
    visible: bool,
    /// The one live mount in this container, with its rendered lines.
    content: Option<(MountId, Vec<String>)>,
}

/// Reference [`Host`] implementation backed by plain data.
#[derive(Default)]
pub struct MemoryHost {
    containers: IndexMap<String, Container>,
    /// Mount id -> owning container id.
    mounts: IndexMap<MountId, String>,
    next_mount: u64,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered text of a container's mount, if any.
    pub fn text(&self, container_id: &str) -> Option<String> {
        let container = self.containers.get(container_id)?;
        let (_, lines) = container.content.as_ref()?;
        Some(lines.join("\n"))
    }

    pub fn is_visible(&self, container_id: &str) -> bool {
        self.containers
            .get(container_id)
            .is_some_and(|container| container.visible)
    }

    /// Container ids in creation order.
    pub fn container_ids(&self) -> Vec<String> {
        self.containers.keys().cloned().collect()
    }

    /// Number of live mounts across all containers.
    pub fn mount_count(&self) -> usize {
        self.mounts.len()
    }

    fn alloc_mount(&mut self) -> MountId {
        let id = MountId::new(self.next_mount);
        self.next_mount += 1;
        id
    }
}

impl Host for MemoryHost {
    fn ensure_container(&mut self, id: &str) -> Result<bool, EnvironmentError> {
        if self.containers.contains_key(id) {
            return Ok(false);
        }
        self.containers.insert(
            id.to_string(),
            Container {
                visible: true,
                content: None,
            },
        );
        Ok(true)
    }

    fn has_container(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    fn remove_container(&mut self, id: &str) -> bool {
        let Some(container) = self.containers.shift_remove(id) else {
            return false;
        };
        if let Some((mount, _)) = container.content {
            self.mounts.shift_remove(&mount);
        }
        true
    }

    fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        match self.containers.get_mut(id) {
            Some(container) => {
                container.visible = visible;
                true
            }
            None => false,
        }
    }

    fn mount(&mut self, container_id: &str, view: &WidgetView) -> Result<MountId, EnvironmentError> {
        if !self.containers.contains_key(container_id) {
            return Err(EnvironmentError::MissingContainer(container_id.to_string()));
        }

        let mount = self.alloc_mount();
        let lines = render_view(view);

        let container = self
            .containers
            .get_mut(container_id)
            .ok_or_else(|| EnvironmentError::MissingContainer(container_id.to_string()))?;

        // A container holds one mount; replacing drops the old one.
        if let Some((previous, _)) = container.content.take() {
            self.mounts.shift_remove(&previous);
        }
        container.content = Some((mount, lines));
        self.mounts.insert(mount, container_id.to_string());
        Ok(mount)
    }

    fn update(&mut self, mount: MountId, view: &WidgetView) -> bool {
        let Some(container_id) = self.mounts.get(&mount).cloned() else {
            return false;
        };
        let Some(container) = self.containers.get_mut(&container_id) else {
            return false;
        };
        match &mut container.content {
            Some((live, lines)) if *live == mount => {
                *lines = render_view(view);
                true
            }
            _ => false,
        }
    }

    fn unmount(&mut self, mount: MountId) -> bool {
        let Some(container_id) = self.mounts.shift_remove(&mount) else {
            return false;
        };
        if let Some(container) = self.containers.get_mut(&container_id) {
            if matches!(&container.content, Some((live, _)) if *live == mount) {
                container.content = None;
            }
        }
        true
    }
}

// =============================================================================
// Tests
// =============================================================================
