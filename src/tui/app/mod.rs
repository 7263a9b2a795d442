//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, the panic hook, and routes terminal
//! input into the layout engine, the interaction controller and the chart
//! point editor.

use crate::config::{Config, ConfigError};
use crate::geometry::{Point, Rect};
use crate::interaction::{hit_test, HitRegion, InteractionController, Outcome, PointerEvent};
use crate::layout::{Canvas, WidgetKind};
use crate::storage::{KeyValueStore, LayoutStore};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::scale::Scale;
use crate::tui::ui::{content_area, render_dashboard};
use crate::widgets::chart::{Forecast, PlotLayout, MONTHS};
use crate::widgets::ViewRegistry;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::Rect as CellRect;
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::{Duration, Instant};

/// How long a status message stays in the footer.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(2);

/// A chart point being dragged, with the screen rows of its plot captured at
/// press time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PointDrag {
    index: usize,
    plot_top: u16,
    plot: PlotLayout,
}

/// Core application state for the TUI.

pub struct App<S: KeyValueStore> {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Count of ticks processed.
    pub tick_count: u64,
    pub canvas: Canvas,
    pub controller: InteractionController,
    pub store: LayoutStore<S>,
    pub views: ViewRegistry,
    /// Chart values for this session.
    pub forecast: Forecast,
    pub scale: Scale,
    /// Screen area the canvas is drawn into. Updated on every render pass and
    /// used to map mouse cells to canvas points.
    pub canvas_area: CellRect,
    /// Temporary status message shown in the footer, with expiry time.
    pub status_message: Option<(String, Instant)>,
    point_drag: Option<PointDrag>,
    tick_rate: Duration,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(canvas: Canvas, controller: InteractionController, store: LayoutStore<S>) -> Self {
        Self {
            should_quit: false,
            tick_count: 0,
            canvas,
            controller,
            store,
            views: ViewRegistry::new(),
            forecast: Forecast::default(),
            scale: Scale::default(),
            canvas_area: CellRect::default(),
            status_message: None,
            point_drag: None,
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Builds the app from configuration, loading the persisted layout (or
    /// the default seed) from `store`.
    pub fn from_config(config: &Config, store: LayoutStore<S>) -> Result<Self, ConfigError> {
        let canvas = Canvas::with_widgets(store.load_or_seed(), config.canvas.container)
            .with_placement(config.placement())
            .with_sizes(config.widget_sizes());
        let controller = InteractionController::new(config.size_limits());
        let mut app = Self::new(canvas, controller, store);
        app.scale = Scale::new(config.tui.column_width, config.tui.row_height);
        app.tick_rate = config.tui.tick_rate()?;
        Ok(app)
    }

    /// Sets the canvas area from the full terminal area (everything but the
    /// footer line) and pushes the matching container size to the canvas.
    pub fn set_viewport(&mut self, terminal: CellRect) {
        let area = CellRect::new(
            terminal.x,
            terminal.y,
            terminal.width,
            terminal.height.saturating_sub(1),
        );
        self.canvas_area = area;
        self.canvas
            .set_container(self.scale.container(area.width, area.height));
    }

    /// Canvas point for a terminal cell.
    pub fn canvas_point(&self, column: u16, row: u16) -> Point {
        self.scale.to_point(
            column as i32 - self.canvas_area.x as i32,
            row as i32 - self.canvas_area.y as i32,
        )
    }

    /// Index of the chart point being dragged, if any.
    pub fn active_point(&self) -> Option<usize> {
        self.point_drag.map(|drag| drag.index)
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now() + STATUS_MESSAGE_TTL));
    }

    /// Clears the status message if its expiry time has passed.
    pub fn expire_status_message(&mut self) {
        if let Some((_, expiry)) = &self.status_message {
            if Instant::now() >= *expiry {
                self.status_message = None;
            }
        }
    }

    /// Applies a key or mouse action to the canvas, saving after any change.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::Add(kind) => {
                let added = self.canvas.add(kind).map(|w| w.id.clone());
                match added {
                    Some(id) => {
                        self.store.save(self.canvas.widgets());
                        self.set_status(format!("Added {id}"));
                    }
                    None => self.set_status(format!("A {kind} widget is already on the canvas")),
                }
            }
            Action::Remove(id) => {
                if self.canvas.remove(&id).is_some() {
                    self.store.save(self.canvas.widgets());
                    self.set_status(format!("Removed {id}"));
                }
            }
            Action::Reset => {
                self.canvas.reset();
                self.store.save(self.canvas.widgets());
                self.set_status("Layout reset");
            }
        }
    }

    /// Routes a mouse event. Presses on a widget's `[x]` control become
    /// [`Action::Remove`], presses on the chart plot start a point drag, and
    /// everything else goes to the interaction controller.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Action {
        let position = self.canvas_point(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(mouse, position),
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                if self.point_drag.is_some() {
                    self.drag_point(mouse.row);
                } else {
                    self.controller
                        .handle(PointerEvent::Move { position }, &mut self.canvas);
                }
                Action::None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(drag) = self.point_drag.take() {
                    tracing::debug!("point drag on {} ended", MONTHS[drag.index]);
                    return Action::None;
                }
                let outcome = self
                    .controller
                    .handle(PointerEvent::Up { position }, &mut self.canvas);
                if let Outcome::Finished { widget_id, rect } = outcome {
                    self.store.save(self.canvas.widgets());
                    self.set_status(format!("{widget_id} -> {rect}"));
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn press(&mut self, mouse: MouseEvent, position: Point) -> Action {
        let inside = mouse.column >= self.canvas_area.x
            && mouse.column < self.canvas_area.right()
            && mouse.row >= self.canvas_area.y
            && mouse.row < self.canvas_area.bottom();
        if !inside || self.controller.is_active() || self.point_drag.is_some() {
            return Action::None;
        }
        let Some(widget) = self.canvas.widget_at(position) else {
            return Action::None;
        };
        let Some(region) = hit_test(&widget.rect, position, &self.scale.chrome()) else {
            return Action::None;
        };
        if region == HitRegion::Action {
            return Action::Remove(widget.id.clone());
        }
        if region == HitRegion::Body && widget.kind == WidgetKind::Chart {
            let rect = widget.rect;
            self.press_chart(rect, mouse);
            return Action::None;
        }
        let event = PointerEvent::Down {
            widget_id: widget.id.clone(),
            region,
            position,
        };
        self.controller.handle(event, &mut self.canvas);
        Action::None
    }

    /// Starts a point drag when `mouse` lands on a column of the chart drawn
    /// for `rect`. Presses on the description or label rows do nothing.
    fn press_chart(&mut self, rect: Rect, mouse: MouseEvent) {
        let Some((cells, _)) = self.scale.visible_cells(&rect, self.canvas_area) else {
            return;
        };
        let has_description = self
            .views
            .create(WidgetKind::Chart)
            .is_some_and(|view| view.description().is_some());
        let content = content_area(cells, has_description);
        let Some(plot) = PlotLayout::new(content.width, content.height) else {
            return;
        };
        let in_plot = mouse.row >= content.y && mouse.row < content.y + plot.height;
        if !in_plot || mouse.column < content.x {
            return;
        }
        let Some(index) = plot.point_at(mouse.column - content.x) else {
            return;
        };
        tracing::debug!("point drag on {} started", MONTHS[index]);
        self.point_drag = Some(PointDrag {
            index,
            plot_top: content.y,
            plot,
        });
        self.drag_point(mouse.row);
    }

    /// Moves the dragged point to the height of screen `row`.
    fn drag_point(&mut self, row: u16) {
        let Some(drag) = self.point_drag else {
            return;
        };
        let ratio = drag.plot.ratio_at(i32::from(row) - i32::from(drag.plot_top));
        if let Some(value) = self.forecast.set_from_ratio(drag.index, ratio) {
            self.set_status(format!("{} -> ${value}", MONTHS[drag.index]));
        }
    }

    /// Runs the TUI: sets up the terminal, enters the event loop, restores on exit.
    pub async fn run(&mut self) -> io::Result<()> {
        // Restore the terminal before printing panic info.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop().await;

        restore_terminal()?;
        result
    }

    async fn event_loop(&mut self) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let event_handler = EventHandler::new(self.tick_rate);
        let mut reader = EventStream::new();

        tracing::info!("tui started with {} widgets", self.canvas.len());
        loop {
            terminal.draw(|frame| render_dashboard(frame, self))?;

            match event_handler.next(&mut reader).await? {
                Event::Key(key) => {
                    let action = handle_key_event(key);
                    self.apply(action);
                }
                Event::Mouse(mouse) => {
                    let action = self.handle_mouse_event(mouse);
                    self.apply(action);
                }
                Event::Resize(width, height) => {
                    self.set_viewport(CellRect::new(0, 0, width, height));
                }
                Event::Tick => {
                    self.tick_count += 1;
                    self.expire_status_message();
                }
            }

            if self.should_quit {
                tracing::info!("tui exiting");
                return Ok(());
            }
        }
    }
}

/// Enables raw mode, mouse capture and the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
