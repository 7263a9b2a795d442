//! Rendering for the canvas and footer.

use crate::layout::Widget;
use crate::storage::KeyValueStore;
use crate::tui::app::App;
use crate::widgets::{WidgetContext, FALLBACK_DESCRIPTION, FALLBACK_TITLE};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Footer hint shown when there is no status message.
pub const HELP_TEXT: &str = "1-5 add  r reset  q quit  drag header to move, ◢ to resize";

const ACTIVE_BORDER: Color = Color::Cyan;
const IDLE_BORDER: Color = Color::DarkGray;

/// Renders the whole screen: widgets in canvas order, then the footer.
///
/// Also records the canvas area on `app` for mouse mapping.
pub fn render_dashboard<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();
    app.set_viewport(area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let active = app.controller.session().widget_id();
    let mut context = WidgetContext::new(&app.forecast);
    context.active_point = app.active_point();
    for widget in app.canvas.widgets() {
        let is_active = active == Some(widget.id.as_str());
        render_widget(frame, app, &context, widget, chunks[0], is_active);
    }

    render_footer(frame, app, chunks[1]);
}

/// Area below a widget's border and description line, where view content
/// goes. Mouse handling uses the same area to locate chart columns.
pub(crate) fn content_area(cells: Rect, has_description: bool) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(cells);
    let skip = u16::from(has_description).min(inner.height);
    Rect::new(inner.x, inner.y + skip, inner.width, inner.height - skip)
}

fn render_widget<S: KeyValueStore>(
    frame: &mut Frame,
    app: &App<S>,
    context: &WidgetContext<'_>,
    widget: &Widget,
    area: Rect,
    active: bool,
) {
    let Some((cells, full)) = app.scale.visible_cells(&widget.rect, area) else {
        return;
    };

    let view = app.views.create(widget.kind);
    let title = view.as_ref().map_or(FALLBACK_TITLE, |v| v.title());
    let description = match &view {
        Some(v) => v.description(),
        None => Some(FALLBACK_DESCRIPTION),
    };

    let border = if active { ACTIVE_BORDER } else { IDLE_BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(cells);
    let content = content_area(cells, description.is_some());

    let mut lines = Vec::new();
    if let Some(text) = description {
        lines.push(Line::styled(
            text,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    if let Some(view) = &view {
        lines.extend(view.render(content.width, content.height, context));
    }

    frame.render_widget(Clear, cells);
    frame.render_widget(block, cells);
    frame.render_widget(Paragraph::new(lines), inner);

    // Clipped widgets get no controls.
    if full && cells.width >= 6 && cells.height >= 2 {
        let buf = frame.buffer_mut();
        let controls = Style::default().fg(border);
        buf.set_string(cells.right() - 4, cells.y, "[x]", controls);
        buf.set_string(cells.right() - 1, cells.bottom() - 1, "◢", controls);
    }
}

fn render_footer<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let left = match &app.status_message {
        Some((message, _)) => Span::styled(message.clone(), Style::default().fg(Color::Yellow)),
        None => Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
    };
    let right = format!("{} widgets", app.canvas.len());
    let padding = (area.width as usize)
        .saturating_sub(left.content.chars().count() + right.len())
        .max(1);
    let footer = Paragraph::new(Line::from(vec![
        left,
        Span::raw(" ".repeat(padding)),
        Span::styled(right, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(footer, area);
}
