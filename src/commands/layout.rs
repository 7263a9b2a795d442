//! Headless layout commands.
//!
//! Each command loads the saved layout (or the default seed), applies one
//! canvas operation and saves the result.

use canvas_dashboard::config::Config;
use canvas_dashboard::geometry::Size;
use canvas_dashboard::layout::{Canvas, WidgetKind};
use canvas_dashboard::storage::{FileStore, LayoutStore};
use std::process::ExitCode;

fn open_store(config: &Config) -> LayoutStore<FileStore> {
    LayoutStore::with_key(FileStore::new(config.storage.dir()), &config.storage.key)
}

fn open_canvas(config: &Config, store: &LayoutStore<FileStore>, container: Size) -> Canvas {
    Canvas::with_widgets(store.load_or_seed(), container)
        .with_placement(config.placement())
        .with_sizes(config.widget_sizes())
}

fn save(store: &mut LayoutStore<FileStore>, canvas: &Canvas) -> ExitCode {
    match store.try_save(canvas.widgets()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: failed to save layout: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints one widget per line as `id  kind  x,y WxH`, or the stored JSON.
pub(crate) fn run_list_command(config: &Config, json: bool) -> ExitCode {
    let store = open_store(config);
    let widgets = store.load_or_seed();

    if json {
        match serde_json::to_string_pretty(&widgets) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: failed to encode layout: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    if widgets.is_empty() {
        println!("No widgets");
        return ExitCode::SUCCESS;
    }
    let id_width = widgets.iter().map(|w| w.id.len()).max().unwrap_or(0);
    for w in &widgets {
        println!(
            "{:<id_width$}  {:<12}  {}",
            w.id,
            w.kind.as_str(),
            w.rect,
            id_width = id_width
        );
    }
    ExitCode::SUCCESS
}

pub(crate) fn run_add_command(
    config: &Config,
    kind: WidgetKind,
    container: Option<Size>,
) -> ExitCode {
    let mut store = open_store(config);
    let container = container.unwrap_or(config.canvas.container);
    let mut canvas = open_canvas(config, &store, container);

    let Some(widget) = canvas.add(kind) else {
        println!("A {kind} widget is already on the canvas");
        return ExitCode::SUCCESS;
    };
    println!("Added {} at {}", widget.id, widget.rect);
    save(&mut store, &canvas)
}

pub(crate) fn run_remove_command(config: &Config, id: &str) -> ExitCode {
    let mut store = open_store(config);
    let mut canvas = open_canvas(config, &store, config.canvas.container);

    if canvas.remove(id).is_none() {
        println!("No widget with id '{id}'");
        return ExitCode::SUCCESS;
    }
    println!("Removed {id}");
    save(&mut store, &canvas)
}

pub(crate) fn run_reset_command(config: &Config) -> ExitCode {
    let mut store = open_store(config);
    let mut canvas = open_canvas(config, &store, config.canvas.container);
    canvas.reset();
    println!("Layout reset ({} widgets)", canvas.len());
    save(&mut store, &canvas)
}
