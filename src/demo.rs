//! Legacy click-tracking demo surface.
//!
//! The oldest layer of the toolkit: a per-widget click counter with a
//! summary rendered into a designated stats container, plus the demo
//! counter widget and the external `DemoPage` collaborator seam that feeds
//! clicks into it.
//!
//! Unlike the registry-managed widgets, [`ClickTracker`] never creates its
//! stats container - if the embedding page didn't put one there, the
//! summary simply isn't rendered.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use spark_signals::{Signal, effect, flush_sync, signal};

use crate::error::EnvironmentError;
use crate::host::{Host, MountId};
use crate::types::ClickCallback;
use crate::view::{ClickStatsView, DemoView, WidgetView};

/// Designated stats container id.
pub const STATS_CONTAINER: &str = "click-stats";

// =============================================================================
// Click Tracker
// =============================================================================

/// Per-widget click statistics.
pub struct ClickTracker {
    host: Rc<RefCell<dyn Host>>,
    stats_container: String,
    counts: IndexMap<String, u64>,
    mount: Option<MountId>,
}

impl ClickTracker {
    pub fn new(host: Rc<RefCell<dyn Host>>) -> Self {
        Self::with_container(host, STATS_CONTAINER)
    }

    pub fn with_container(host: Rc<RefCell<dyn Host>>, stats_container: impl Into<String>) -> Self {
        Self {
            host,
            stats_container: stats_container.into(),
            counts: IndexMap::new(),
            mount: None,
        }
    }

    /// Count one click and refresh the rendered summary.
    pub fn record_click(&mut self, widget_id: &str) {
        let count = self.counts.entry(widget_id.to_string()).or_insert(0);
        *count += 1;
        tracing::debug!(widget = widget_id, total = *count, "widget clicked");
        self.render_summary();
    }

    /// All counts, in first-click order.
    pub fn stats(&self) -> &IndexMap<String, u64> {
        &self.counts
    }

    /// Clicks recorded for one widget (zero when unknown).
    pub fn widget_clicks(&self, widget_id: &str) -> u64 {
        self.counts.get(widget_id).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Drop all counts and refresh the rendered summary.
    pub fn reset(&mut self) {
        self.counts.clear();
        tracing::debug!("click stats reset");
        self.render_summary();
    }

    fn view(&self) -> ClickStatsView {
        ClickStatsView {
            entries: self
                .counts
                .iter()
                .map(|(widget_id, count)| (widget_id.clone(), *count))
                .collect(),
            total: self.total(),
        }
    }

    /// Paint the summary into the stats container, when the page has one.
    fn render_summary(&mut self) {
        let view = WidgetView::ClickStats(self.view());
        let mut host = self.host.borrow_mut();

        if let Some(mount) = self.mount {
            if host.update(mount, &view) {
                return;
            }
            // The container went away since the last render.
            self.mount = None;
        }
        if !host.has_container(&self.stats_container) {
            return;
        }
        if let Ok(mount) = host.mount(&self.stats_container, &view) {
            self.mount = Some(mount);
        }
    }
}

// =============================================================================
// Demo Widget
// =============================================================================

/// A click-counter widget: title, message, reactive count.
pub struct DemoWidget {
    title: String,
    message: String,
    count: Signal<u64>,
    on_button_click: Option<Rc<dyn Fn()>>,
}

impl DemoWidget {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            count: signal(0),
            on_button_click: None,
        }
    }

    pub fn on_button_click(mut self, callback: Rc<dyn Fn()>) -> Self {
        self.on_button_click = Some(callback);
        self
    }

    /// Press the widget's button: bump the count, then notify.
    pub fn click(&self) {
        self.count.set(self.count.get() + 1);
        // Repaint before the click propagates to the page's handler.
        flush_sync();
        if let Some(on_button_click) = &self.on_button_click {
            on_button_click();
        }
    }

    pub fn count(&self) -> u64 {
        self.count.get()
    }

    pub fn view(&self) -> DemoView {
        DemoView {
            title: self.title.clone(),
            message: self.message.clone(),
            count: self.count.get(),
        }
    }
}

// =============================================================================
// Demo Page Collaborator
// =============================================================================

/// Options the demo page is initialized with.
pub struct DemoPageConfig {
    pub container_id: String,
    /// Fires with the clicked widget's id.
    pub on_widget_click: Option<ClickCallback>,
}

/// The external collaborator hosting the demo widgets.
pub trait DemoPage {
    fn init(&mut self, config: DemoPageConfig) -> Result<(), EnvironmentError>;
}

/// Number of widgets the reference demo page mounts.
const DEMO_WIDGET_COUNT: usize = 3;

/// Reference [`DemoPage`]: mounts three demo widgets into per-widget
/// containers under the page container.
pub struct MemoryDemoPage {
    host: Rc<RefCell<dyn Host>>,
    widgets: Vec<(String, Rc<DemoWidget>)>,
    stops: Vec<Box<dyn FnOnce()>>,
}

impl MemoryDemoPage {
    pub fn new(host: Rc<RefCell<dyn Host>>) -> Self {
        Self {
            host,
            widgets: Vec::new(),
            stops: Vec::new(),
        }
    }

    /// The mounted widgets, as (widget id, widget) pairs.
    pub fn widgets(&self) -> &[(String, Rc<DemoWidget>)] {
        &self.widgets
    }

    /// Press the nth widget's button.
    pub fn click(&self, index: usize) {
        if let Some((_, widget)) = self.widgets.get(index) {
            widget.click();
        }
    }
}

impl DemoPage for MemoryDemoPage {
    fn init(&mut self, config: DemoPageConfig) -> Result<(), EnvironmentError> {
        self.host.borrow_mut().ensure_container(&config.container_id)?;

        for n in 1..=DEMO_WIDGET_COUNT {
            let widget_id = format!("widget-{n}");
            let container_id = format!("{}-{widget_id}", config.container_id);
            self.host.borrow_mut().ensure_container(&container_id)?;

            let mut widget = DemoWidget::new(
                format!("Widget {n}"),
                format!("Demo widget #{n}"),
            );
            if let Some(on_widget_click) = &config.on_widget_click {
                let on_widget_click = on_widget_click.clone();
                let id = widget_id.clone();
                widget = widget.on_button_click(Rc::new(move || on_widget_click(&id)));
            }
            let widget = Rc::new(widget);

            let mount = self
                .host
                .borrow_mut()
                .mount(&container_id, &WidgetView::Demo(widget.view()))?;
            let stop = {
                let widget = widget.clone();
                let host = self.host.clone();
                effect(move || {
                    let view = WidgetView::Demo(widget.view());
                    host.borrow_mut().update(mount, &view);
                })
            };

            self.widgets.push((widget_id, widget));
            self.stops.push(Box::new(stop));
        }
        // Run the effects' first pass so they track their dependencies.
        flush_sync();
        Ok(())
    }
}

impl Drop for MemoryDemoPage {
    fn drop(&mut self) {
        for stop in self.stops.drain(..) {
            stop();
        }
    }
}

// =============================================================================
// Wiring
// =============================================================================

/// Initialize a demo page with its clicks recorded into the tracker - the
/// glue an embedding page runs at load time.
pub fn attach_click_tracking(
    page: &mut dyn DemoPage,
    tracker: &Rc<RefCell<ClickTracker>>,
    container_id: &str,
) -> Result<(), EnvironmentError> {
    let tracker = tracker.clone();
    page.init(DemoPageConfig {
        container_id: container_id.to_string(),
        on_widget_click: Some(Rc::new(move |widget_id| {
            tracker.borrow_mut().record_click(widget_id);
        })),
    })
}

// =============================================================================
// Tests
// =============================================================================
