// ABOUTME: Command-line entry point for inspecting and resetting persisted UI state.
// ABOUTME: Wires config, the file-backed preference store, and both state managers.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mux_actions::QuickActionStore;
use mux_core::prefs::shared;
use mux_core::{AppConfig, FileStore, PreferenceStore};
use mux_layout::PanelLayoutModel;

#[derive(Parser, Debug)]
#[command(
    name = "muxdeck-state",
    version,
    about = "Inspect and reset persisted muxdeck panel layout and quick actions"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Print panel ratios and quick actions (default)
    Show,
    /// Reconfigure the grid and print pane rectangles
    Panes {
        /// Column count for each row, top to bottom
        #[arg(required = true)]
        columns: Vec<usize>,
    },
    /// Enable or disable the quick action with this name
    Toggle {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Even out every panel divider
    ResetLayout,
    /// Restore the built-in quick actions
    ResetActions,
}

/// Log filter directives come from `MUXDECK_LOG`, defaulting to `info`
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("MUXDECK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Both state managers sharing one preference store
struct App<S: PreferenceStore + Clone> {
    layout: PanelLayoutModel<S>,
    actions: QuickActionStore<S>,
}

impl<S: PreferenceStore + Clone> App<S> {
    fn new(store: S, config: &AppConfig) -> Self {
        Self {
            layout: PanelLayoutModel::load(store.clone(), &config.layout),
            actions: QuickActionStore::load(store),
        }
    }

    fn run(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Show => self.print_state(out)?,
            Command::Panes { columns } => {
                self.layout.on_grid_reconfigured(columns.len(), &columns);
                for pane in self.layout.pane_rects(&columns) {
                    writeln!(
                        out,
                        "row {} col {}: x={:.3} y={:.3} w={:.3} h={:.3}",
                        pane.row,
                        pane.column,
                        pane.rect.x,
                        pane.rect.y,
                        pane.rect.width,
                        pane.rect.height
                    )?;
                }
            }
            Command::Toggle { name } => {
                let name = name.join(" ");
                let id = self
                    .actions
                    .actions()
                    .iter()
                    .find(|a| a.name.eq_ignore_ascii_case(&name))
                    .map(|a| a.id)
                    .with_context(|| format!("no quick action named {:?}", name))?;
                self.actions.toggle_enabled(id);
                self.print_actions(out)?;
            }
            Command::ResetLayout => {
                self.layout.reset();
                tracing::info!("Panel layout reset");
                self.print_state(out)?;
            }
            Command::ResetActions => {
                self.actions.reset_to_defaults();
                tracing::info!("Quick actions reset");
                self.print_actions(out)?;
            }
        }
        Ok(())
    }

    fn print_state(&self, out: &mut impl Write) -> Result<()> {
        let layout = self.layout.layout();
        writeln!(out, "horizontal split: {:.3}", layout.horizontal_split)?;
        for (row, split) in layout.vertical_splits.iter().enumerate() {
            writeln!(out, "row {} split: {:.3}", row, split)?;
        }
        for (row, splits) in &layout.multi_column_splits {
            let formatted: Vec<_> = splits.iter().map(|s| format!("{:.3}", s)).collect();
            writeln!(out, "row {} dividers: [{}]", row, formatted.join(", "))?;
        }
        self.print_actions(out)
    }

    fn print_actions(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "quick actions:")?;
        for action in self.actions.actions() {
            let mark = if action.is_enabled { 'x' } else { ' ' };
            writeln!(
                out,
                "  {}. [{}] {} ({}, {})",
                action.sort_order,
                mark,
                action.name,
                action.icon,
                action.color().to_hex()
            )?;
        }
        Ok(())
    }

    /// Write anything still waiting on the debounce timer
    fn shutdown(&mut self) {
        if self.layout.flush() {
            tracing::debug!("Flushed pending layout write");
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = AppConfig::load_or_default();
    let store = shared(FileStore::open(&config.storage)?);
    tracing::info!("Using preference store at {}", store.root().display());

    let mut app = App::new(store, &config);
    let stdout = std::io::stdout();
    let result = app.run(cli.command.unwrap_or(Command::Show), &mut stdout.lock());
    app.shutdown();

    result
}
