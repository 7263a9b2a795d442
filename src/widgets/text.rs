//! Text-only views: instructions, notes and a to-do list.

use super::{truncate, WidgetContext, WidgetView, FALLBACK_DESCRIPTION};
use crate::layout::WidgetKind;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;

/// Steps shown by the instructions widget.
pub const INSTRUCTIONS: [&str; 5] = [
    "Drag a widget by its header to move it",
    "Drag the ◢ corner to resize it",
    "Drag a chart column up or down to edit it",
    "Click [x] to remove a widget",
    "Keys 1-5 add widgets, r resets, q quits",
];

/// Starter items of the to-do widget.
pub const TODO_ITEMS: [(&str, bool); 3] = [
    ("Arrange your widgets", true),
    ("Review the revenue forecast", false),
    ("Check the quarterly target", false),
];

/// Greedy word wrap to `width` columns. Words longer than a line are cut.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
        if current.chars().count() > width {
            lines.push(truncate(&current, width));
            current.clear();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub struct InstructionsView;

impl InstructionsView {
    pub fn create() -> Box<dyn WidgetView> {
        Box::new(Self)
    }
}

impl WidgetView for InstructionsView {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Instructions
    }

    fn title(&self) -> &'static str {
        "Instructions"
    }

    fn render(&self, width: u16, _height: u16, _context: &WidgetContext<'_>) -> Vec<Line<'static>> {
        INSTRUCTIONS
            .iter()
            .enumerate()
            .map(|(i, step)| Line::raw(truncate(&format!("{}. {step}", i + 1), width as usize)))
            .collect()
    }
}

pub struct NotesView;

impl NotesView {
    pub fn create() -> Box<dyn WidgetView> {
        Box::new(Self)
    }
}

impl WidgetView for NotesView {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Notes
    }

    fn title(&self) -> &'static str {
        "Notes"
    }

    fn render(&self, width: u16, _height: u16, _context: &WidgetContext<'_>) -> Vec<Line<'static>> {
        wrap(FALLBACK_DESCRIPTION, width as usize)
            .into_iter()
            .map(Line::raw)
            .collect()
    }
}

pub struct TodoView;

impl TodoView {
    pub fn create() -> Box<dyn WidgetView> {
        Box::new(Self)
    }
}

impl WidgetView for TodoView {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Todo
    }

    fn title(&self) -> &'static str {
        "To-do"
    }

    fn render(&self, width: u16, _height: u16, _context: &WidgetContext<'_>) -> Vec<Line<'static>> {
        TODO_ITEMS
            .iter()
            .map(|&(item, done)| {
                let mark = if done { "[x]" } else { "[ ]" };
                let text = truncate(&format!("{mark} {item}"), width as usize);
                if done {
                    Line::styled(text, Style::default().add_modifier(Modifier::CROSSED_OUT))
                } else {
                    Line::raw(text)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::chart::Forecast;

    fn render(view: &dyn WidgetView, width: u16) -> Vec<String> {
        let forecast = Forecast::default();
        texts(&view.render(width, 10, &WidgetContext::new(&forecast)))
    }

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("one two three", 100), vec!["one two three"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abc…"]);
        assert!(wrap("anything", 0).is_empty());
    }

    #[test]
    fn test_instructions_are_numbered() {
        let lines = render(&InstructionsView, 60);
        assert_eq!(lines.len(), INSTRUCTIONS.len());
        assert_eq!(lines[0], "1. Drag a widget by its header to move it");
        assert!(lines[3].starts_with("4. "));
    }

    #[test]
    fn test_notes_wrap_to_width() {
        let lines = render(&NotesView, 12);
        assert!(lines.iter().all(|l| l.chars().count() <= 12), "{lines:?}");
        assert_eq!(lines.join(" "), FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_todo_marks_done_items() {
        let lines = render(&TodoView, 40);
        assert_eq!(lines[0], "[x] Arrange your widgets");
        assert_eq!(lines[1], "[ ] Review the revenue forecast");
    }
}
