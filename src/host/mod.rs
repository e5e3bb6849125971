//! Host - the environment capability seam.
//!
//! Widgets never touch their environment directly. Everything they need
//! from it - container elements, visibility, and the mount/update/unmount
//! cycle - goes through the [`Host`] trait, so any rendering environment
//! (a DOM bridge, a terminal, the in-memory reference host) is
//! substitutable.
//!
//! [`MemoryHost`] is the reference implementation used by tests and demos:
//! it keeps an ordered container table and paints views as plain text.

mod memory;
mod render;

pub use memory::MemoryHost;

use crate::error::EnvironmentError;
use crate::view::WidgetView;

// =============================================================================
// Mount Id
// =============================================================================

/// Opaque reference to a live mount, used for update/unmount.
///
/// Minted by [`Host`] implementations; meaningless outside the host that
/// issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(u64);

impl MountId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

// =============================================================================
// Host Trait
// =============================================================================

/// Capability interface over the rendering environment.
///
/// Containers are identified by caller-visible string ids; mounts by the
/// opaque [`MountId`] handed back from [`Host::mount`]. A container holds
/// at most one live mount - mounting into an occupied container replaces
/// the previous mount.
pub trait Host {
    /// Create the container if missing. Returns true when it was created.
    fn ensure_container(&mut self, id: &str) -> Result<bool, EnvironmentError>;

    fn has_container(&self, id: &str) -> bool;

    /// Remove the container element and anything mounted in it.
    fn remove_container(&mut self, id: &str) -> bool;

    /// Toggle container visibility. False when the container is missing.
    fn set_visible(&mut self, id: &str, visible: bool) -> bool;

    /// Mount a view into a container, replacing any previous mount there.
    fn mount(&mut self, container_id: &str, view: &WidgetView) -> Result<MountId, EnvironmentError>;

    /// Re-render a live mount in place. False when the mount is stale.
    fn update(&mut self, mount: MountId, view: &WidgetView) -> bool;

    /// Tear down a mount, leaving the container element in place.
    fn unmount(&mut self, mount: MountId) -> bool;
}
