//! Plain-text rendering of widget views for the in-memory host.
//!
//! Each view becomes a framed block of lines. This is deliberately simple -
//! it exists so tests and demos can observe exactly what a mount currently
//! shows.

use unicode_width::UnicodeWidthStr;

use crate::view::{ClickStatsView, DemoView, DisplayView, FormView, WidgetView};

/// Render a view into the lines a container holds.
pub(crate) fn render_view(view: &WidgetView) -> Vec<String> {
    match view {
        WidgetView::Form(form) => frame(form_lines(form)),
        WidgetView::Display(display) => frame(display_lines(display)),
        WidgetView::Demo(demo) => frame(demo_lines(demo)),
        WidgetView::ClickStats(stats) => frame(stats_lines(stats)),
    }
}

// =============================================================================
// Per-view lines
// =============================================================================

fn form_lines(form: &FormView) -> Vec<String> {
    let mut lines = vec![form.title.clone(), String::new()];

    if form.success {
        lines.push("✓ Registration complete. Thanks for signing up.".to_string());
        lines.push(String::new());
    }

    for field in &form.fields {
        let marker = if field.required { " *" } else { "" };
        let value = if field.value.is_empty() {
            format!("({})", field.placeholder)
        } else if field.masked {
            "•".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };
        lines.push(format!("{}{}: {}", field.label, marker, value));
        if let Some(error) = field.error {
            lines.push(format!("  ! {error}"));
        }
    }

    lines.push(String::new());
    lines.push(if form.submitting {
        "[ Registering... ]".to_string()
    } else {
        "[ Register ]".to_string()
    });
    lines
}

fn display_lines(display: &DisplayView) -> Vec<String> {
    match display {
        DisplayView::Empty {
            message,
            can_refresh,
        } => {
            let mut lines = vec![message.clone()];
            if *can_refresh {
                lines.push("[ Reload ]".to_string());
            }
            lines
        }
        DisplayView::List {
            entries,
            can_refresh,
        } => {
            let mut lines = vec!["Registered records".to_string()];
            if *can_refresh {
                lines.push("[ Reload ]".to_string());
            }
            for entry in entries {
                lines.push(String::new());
                lines.push(format!("{}  {}", entry.username, entry.registered_at));
                lines.push(format!("  email: {}", entry.email));
                if let Some(phone) = &entry.phone {
                    lines.push(format!("  phone: {phone}"));
                }
            }
            lines
        }
    }
}

fn demo_lines(demo: &DemoView) -> Vec<String> {
    vec![
        demo.title.clone(),
        demo.message.clone(),
        format!("Clicks: {}", demo.count),
        "[ Click me ]".to_string(),
    ]
}

fn stats_lines(stats: &ClickStatsView) -> Vec<String> {
    if stats.is_empty() {
        return vec!["No clicks recorded".to_string()];
    }

    let mut lines: Vec<String> = stats
        .entries
        .iter()
        .map(|(widget_id, count)| format!("Widget {widget_id}: {count}"))
        .collect();
    lines.push(format!("Total clicks: {}", stats.total));
    lines
}

// =============================================================================
// Framing
// =============================================================================

/// Wrap lines in a single-line box, padded to the widest line's display
/// width.
fn frame(lines: Vec<String>) -> Vec<String> {
    let inner = lines.iter().map(|line| line.width()).max().unwrap_or(0);

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("┌{}┐", "─".repeat(inner + 2)));
    for line in lines {
        let pad = inner - line.width();
        out.push(format!("│ {}{} │", line, " ".repeat(pad)));
    }
    out.push(format!("└{}┘", "─".repeat(inner + 2)));
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_pads_to_widest_line() {
        let framed = frame(vec!["ab".to_string(), "a".to_string()]);
        assert_eq!(framed[0], "┌────┐");
        assert_eq!(framed[1], "│ ab │");
        assert_eq!(framed[2], "│ a  │");
        assert_eq!(framed[3], "└────┘");
    }

    #[test]
    fn test_stats_lines_include_total() {
        let lines = stats_lines(&ClickStatsView {
            entries: vec![("widget-1".to_string(), 2), ("widget-2".to_string(), 1)],
            total: 3,
        });
        assert_eq!(lines, ["Widget widget-1: 2", "Widget widget-2: 1", "Total clicks: 3"]);
    }

    #[test]
    fn test_empty_stats() {
        let lines = stats_lines(&ClickStatsView {
            entries: Vec::new(),
            total: 0,
        });
        assert_eq!(lines, ["No clicks recorded"]);
    }
}
