//! Monthly revenue forecast drawn as vertical columns.
//!
//! The values live in a [`Forecast`] owned by the host. Dragging a column
//! moves its point: the pointer's height inside the plot gives a ratio
//! (1 at the top row, 0 one row below the plot) that maps onto
//! `0..=MAX_VALUE`.

use super::{truncate, WidgetContext, WidgetView};
use crate::layout::WidgetKind;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Upper bound of the value axis.
pub const MAX_VALUE: u32 = 10_000;

/// Month labels, January to December.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Values a fresh session starts with.
pub const INITIAL_VALUES: [u32; 12] = [
    4000, 3000, 5000, 2780, 1890, 2390, 3490, 4000, 5000, 6000, 7000, 8000,
];

const BAR_COLOR: Color = Color::Cyan;
const ACTIVE_BAR_COLOR: Color = Color::Yellow;

/// Value for a vertical position `ratio`, rounded and clamped to the axis.
pub fn value_for_ratio(ratio: f64) -> u32 {
    let value = (ratio * f64::from(MAX_VALUE)).round();
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, f64::from(MAX_VALUE)) as u32
}

/// Editable chart values. Session state only; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forecast {
    values: [u32; 12],
}

impl Default for Forecast {
    fn default() -> Self {
        Self {
            values: INITIAL_VALUES,
        }
    }
}

impl Forecast {
    pub fn values(&self) -> &[u32; 12] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    /// Moves point `index` to the height given by `ratio`. Returns the new
    /// value, or `None` for an unknown index.
    pub fn set_from_ratio(&mut self, index: usize, ratio: f64) -> Option<u32> {
        let slot = self.values.get_mut(index)?;
        *slot = value_for_ratio(ratio);
        tracing::debug!("forecast point {} set to {}", MONTHS[index], *slot);
        Some(*slot)
    }
}

/// Where the columns sit inside a content area: one slot per month, a label
/// row at the bottom and the plot above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotLayout {
    /// Columns per month, gap included.
    pub slot: u16,
    /// Columns drawn for each bar.
    pub bar: u16,
    /// Plot rows, excluding the label row.
    pub height: u16,
}

impl PlotLayout {
    /// Layout for a content area of `width` by `height` cells, or `None`
    /// when there is no room for one column per month.
    pub fn new(width: u16, height: u16) -> Option<Self> {
        let slot = width / MONTHS.len() as u16;
        let plot = height.saturating_sub(1);
        if slot == 0 || plot == 0 {
            return None;
        }
        Some(Self {
            slot,
            bar: slot.saturating_sub(1).max(1),
            height: plot,
        })
    }

    /// Month under content column `dx`.
    pub fn point_at(&self, dx: u16) -> Option<usize> {
        let index = (dx / self.slot) as usize;
        (index < MONTHS.len()).then_some(index)
    }

    /// Ratio for a pointer `dy` rows below the top of the plot. Rows above
    /// the plot give ratios over 1, rows below it negative ones.
    pub fn ratio_at(&self, dy: i32) -> f64 {
        1.0 - f64::from(dy) / f64::from(self.height)
    }

    /// Filled rows for `value`.
    pub fn bar_rows(&self, value: u32) -> u16 {
        bar_len(value, self.height as usize) as u16
    }
}

/// Number of cells for `value` when the full axis spans `cells`.
pub fn bar_len(value: u32, cells: usize) -> usize {
    let value = value.min(MAX_VALUE) as usize;
    (value * cells + MAX_VALUE as usize / 2) / MAX_VALUE as usize
}

pub struct RevenueChart;

impl RevenueChart {
    pub fn create() -> Box<dyn WidgetView> {
        Box::new(Self)
    }
}

fn plot_lines(plot: PlotLayout, context: &WidgetContext<'_>) -> Vec<Line<'static>> {
    let values = context.forecast.values();
    let gap = " ".repeat((plot.slot - plot.bar) as usize);
    let mut lines: Vec<Line<'static>> = (0..plot.height)
        .map(|row| {
            let level = plot.height - row;
            let spans = values.iter().enumerate().flat_map(|(i, &value)| {
                let color = if context.active_point == Some(i) {
                    ACTIVE_BAR_COLOR
                } else {
                    BAR_COLOR
                };
                let fill = if plot.bar_rows(value) >= level { "█" } else { " " };
                [
                    Span::styled(fill.repeat(plot.bar as usize), Style::default().fg(color)),
                    Span::raw(gap.clone()),
                ]
            });
            Line::from(spans.collect::<Vec<_>>())
        })
        .collect();

    let labels: String = MONTHS
        .iter()
        .map(|month| {
            let label: String = month.chars().take(plot.bar as usize).collect();
            format!("{label:<width$}", width = plot.slot as usize)
        })
        .collect();
    lines.push(Line::styled(labels, Style::default().fg(Color::DarkGray)));
    lines
}

impl WidgetView for RevenueChart {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Chart
    }

    fn title(&self) -> &'static str {
        "Revenue Forecast"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Drag a column to adjust the forecast")
    }

    fn render(&self, width: u16, height: u16, context: &WidgetContext<'_>) -> Vec<Line<'static>> {
        if let Some(plot) = PlotLayout::new(width, height) {
            return plot_lines(plot, context);
        }
        // Too small for columns: one text line per month.
        MONTHS
            .iter()
            .zip(context.forecast.values())
            .take(height as usize)
            .map(|(month, value)| {
                Line::raw(truncate(&format!("{month} ${value}"), width as usize))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_value_for_ratio_clamps_at_both_ends() {
        assert_eq!(value_for_ratio(1.0), 10_000);
        assert_eq!(value_for_ratio(1.25), 10_000);
        assert_eq!(value_for_ratio(0.0), 0);
        assert_eq!(value_for_ratio(-0.5), 0);
        assert_eq!(value_for_ratio(f64::NAN), 0);
    }

    #[test]
    fn test_value_for_ratio_rounds() {
        assert_eq!(value_for_ratio(0.5), 5000);
        assert_eq!(value_for_ratio(0.25), 2500);
        assert_eq!(value_for_ratio(1.0 / 3.0), 3333);
        assert_eq!(value_for_ratio(2.0 / 3.0), 6667);
    }

    #[test]
    fn test_set_from_ratio_updates_one_point() {
        let mut forecast = Forecast::default();
        assert_eq!(forecast.set_from_ratio(2, 0.75), Some(7500));
        assert_eq!(forecast.get(2), Some(7500));
        assert_eq!(forecast.get(1), Some(INITIAL_VALUES[1]));

        assert_eq!(forecast.set_from_ratio(0, -3.0), Some(0));
        assert_eq!(forecast.set_from_ratio(11, 9.0), Some(MAX_VALUE));
        assert_eq!(forecast.set_from_ratio(12, 0.5), None);
    }

    #[test]
    fn test_bar_len_scales_to_cells() {
        assert_eq!(bar_len(0, 20), 0);
        assert_eq!(bar_len(5000, 20), 10);
        assert_eq!(bar_len(10_000, 20), 20);
        assert_eq!(bar_len(99_999, 20), 20);
    }

    #[test]
    fn test_plot_layout() {
        let plot = PlotLayout::new(58, 13).expect("room for columns");
        assert_eq!(plot, PlotLayout { slot: 4, bar: 3, height: 12 });
        assert_eq!(plot.point_at(0), Some(0));
        assert_eq!(plot.point_at(47), Some(11));
        assert_eq!(plot.point_at(48), None);
        assert_eq!(plot.ratio_at(0), 1.0);
        assert_eq!(plot.ratio_at(6), 0.5);
        assert_eq!(plot.ratio_at(12), 0.0);
        assert!(PlotLayout::new(11, 10).is_none());
        assert!(PlotLayout::new(40, 1).is_none());
    }

    #[test]
    fn test_columns_rise_from_bottom() {
        let forecast = Forecast::default();
        let lines = RevenueChart.render(24, 5, &WidgetContext::new(&forecast));
        // slot 2, bar 1, 4 plot rows and a label row
        assert_eq!(lines.len(), 5);
        // Jan 4000 -> 2 rows, Dec 8000 -> 3 rows
        let column = |index: usize| -> Vec<char> {
            lines[..4]
                .iter()
                .map(|l| text(l).chars().nth(index).unwrap_or('?'))
                .collect()
        };
        assert_eq!(column(0), vec![' ', ' ', '█', '█']);
        assert_eq!(column(22), vec![' ', '█', '█', '█']);
        assert!(text(&lines[4]).starts_with("J F M A "), "{}", text(&lines[4]));
    }

    #[test]
    fn test_active_point_is_highlighted() {
        let forecast = Forecast::default();
        let mut context = WidgetContext::new(&forecast);
        context.active_point = Some(1);
        let lines = RevenueChart.render(48, 4, &context);
        let bottom = &lines[2];
        // two spans per month: bar then gap
        assert_eq!(bottom.spans[0].style.fg, Some(BAR_COLOR));
        assert_eq!(bottom.spans[2].style.fg, Some(ACTIVE_BAR_COLOR));
        assert_eq!(text(&lines[3]), "Jan Feb Mar Apr May Jun Jul Aug Sep Oct Nov Dec ");
    }

    #[test]
    fn test_edited_value_is_drawn() {
        let mut forecast = Forecast::default();
        forecast.set_from_ratio(0, 0.0);
        let lines = RevenueChart.render(24, 5, &WidgetContext::new(&forecast));
        assert!(lines.iter().take(4).all(|l| text(l).starts_with(' ')));
    }

    #[test]
    fn test_narrow_area_falls_back_to_text() {
        let forecast = Forecast::default();
        let lines = RevenueChart.render(8, 3, &WidgetContext::new(&forecast));
        assert_eq!(lines.len(), 3);
        assert_eq!(text(&lines[0]), "Jan $40…");
    }
}
