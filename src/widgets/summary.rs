//! Key metrics summary.

use super::{truncate, WidgetContext, WidgetView};
use crate::layout::WidgetKind;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// One headline metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    pub label: &'static str,
    pub value: &'static str,
    pub note: Option<&'static str>,
}

pub const METRICS: [Metric; 3] = [
    Metric {
        label: "Average",
        value: "$12,450",
        note: Some("+14.2% from last period"),
    },
    Metric {
        label: "Projected Growth",
        value: "23.5%",
        note: None,
    },
    Metric {
        label: "Target",
        value: "$18,000",
        note: None,
    },
];

pub struct SummaryView;

impl SummaryView {
    pub fn create() -> Box<dyn WidgetView> {
        Box::new(Self)
    }
}

impl WidgetView for SummaryView {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Summary
    }

    fn title(&self) -> &'static str {
        "Summary"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Key metrics from your data")
    }

    fn render(&self, width: u16, _height: u16, _context: &WidgetContext<'_>) -> Vec<Line<'static>> {
        let width = width as usize;
        let mut lines = Vec::new();
        for metric in METRICS {
            let label = truncate(metric.label, width);
            let gap = width.saturating_sub(label.chars().count() + metric.value.len()).max(1);
            lines.push(Line::from(vec![
                Span::raw(label),
                Span::raw(" ".repeat(gap)),
                Span::styled(metric.value, Style::default().add_modifier(Modifier::BOLD)),
            ]));
            if let Some(note) = metric.note {
                lines.push(Line::styled(
                    truncate(note, width),
                    Style::default().fg(Color::Green),
                ));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::chart::Forecast;

    fn render(width: u16) -> Vec<Line<'static>> {
        SummaryView.render(width, 10, &WidgetContext::new(&Forecast::default()))
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_values_are_right_aligned() {
        let lines = render(20);
        assert_eq!(text(&lines[0]), "Average      $12,450");
        assert_eq!(text(&lines[0]).chars().count(), 20);
    }

    #[test]
    fn test_note_follows_its_metric() {
        let lines = render(40);
        assert_eq!(lines.len(), 4);
        assert_eq!(text(&lines[1]), "+14.2% from last period");
        assert!(text(&lines[2]).starts_with("Projected Growth"));
    }
}
