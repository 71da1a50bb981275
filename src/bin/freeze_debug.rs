// Freeze Debug Binary - drives a grid through a scripted sequence of
// freeze/unfreeze/menu operations and prints the column layout after each.
// Run with: cargo run --bin freeze_debug -- freeze:3 select:0 click:unfreeze_column

use anyhow::{anyhow, bail, Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use std::path::PathBuf;

use column_freeze::config::config::Config;
use column_freeze::grid::Grid;
use column_freeze::logging::{get_log_buffer, init_tracing};
use column_freeze::ui::grid_host::SelectionRange;

enum Command {
    Freeze(usize),
    Unfreeze(usize),
    Select(SelectionRange),
    ClearSelection,
    Click(String),
    Menu,
}

fn parse_command(arg: &str) -> Result<Command> {
    if arg == "menu" {
        return Ok(Command::Menu);
    }

    let (verb, value) = arg
        .split_once(':')
        .ok_or_else(|| anyhow!("Expected <verb>:<value>, got '{}'", arg))?;

    let parse_col = |s: &str| -> Result<usize> {
        s.parse::<usize>()
            .with_context(|| format!("'{}' is not a column index", s))
    };

    match verb {
        "freeze" => Ok(Command::Freeze(parse_col(value)?)),
        "unfreeze" => Ok(Command::Unfreeze(parse_col(value)?)),
        "select" if value == "none" => Ok(Command::ClearSelection),
        "select" => match value.split_once('-') {
            Some((from, to)) => Ok(Command::Select(SelectionRange::columns(
                parse_col(from)?,
                parse_col(to)?,
            ))),
            None => Ok(Command::Select(SelectionRange::column(parse_col(value)?))),
        },
        "click" => Ok(Command::Click(value.to_string())),
        other => bail!("Unknown command '{}'", other),
    }
}

fn print_layout(grid: &Grid) {
    let manager = grid.manager();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Position", "Column", "Physical", "Frozen"]);

    for (visual, &physical) in manager.column_order().visual_order().iter().enumerate() {
        table.add_row(vec![
            Cell::new(visual),
            Cell::new(grid.header_at(visual).unwrap_or("?")),
            Cell::new(physical),
            Cell::new(if manager.is_frozen(visual) { "yes" } else { "" }),
        ]);
    }

    println!("{table}");
    println!(
        "fixed_columns_left = {}, unfreeze placement = {:?}\n",
        manager.fixed_columns_left(),
        manager.placement()
    );
}

fn print_usage() {
    println!("Usage: freeze_debug [--config PATH] [--json] [--log TARGET] COMMAND...");
    println!("       freeze_debug --init-config");
    println!();
    println!("Without --config the file at the default location is used (created on first run).");
    println!("--init-config prints a commented config template. Set RUST_LOG=debug for move details.");
    println!();
    println!("Commands:");
    println!("  freeze:N        freeze the column at visual position N");
    println!("  unfreeze:N      unfreeze the column at visual position N");
    println!("  select:N[-M]    select one column or a column range");
    println!("  select:none     clear the selection");
    println!("  click:KEY       click a context menu item (freeze_column, unfreeze_column)");
    println!("  menu            list visible context menu items");
}

fn main() -> Result<()> {
    init_tracing();

    let mut config_path: Option<PathBuf> = None;
    let mut json = false;
    let mut log_target: Option<String> = None;
    let mut commands = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--config" => {
                let path = args.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                config_path = Some(PathBuf::from(path));
            }
            "--init-config" => {
                print!("{}", Config::create_default_with_comments());
                return Ok(());
            }
            "--log" => {
                log_target = Some(args.next().ok_or_else(|| anyhow!("--log needs a target"))?);
            }
            "--json" => json = true,
            _ => commands.push(parse_command(&arg)?),
        }
    }

    let config = match config_path {
        Some(path) => Config::load_from(&path)?,
        None => {
            let path = Config::get_config_path()?;
            println!("Using config {}", path.display());
            Config::load()?
        }
    };

    let mut grid = Grid::from_config(&config)?;

    println!("=== Freeze Debug ===");
    print_layout(&grid);

    for command in commands {
        match command {
            Command::Freeze(col) => {
                println!("> freeze {}", col);
                let outcome = grid.freeze_column(col)?;
                println!("  {:?}", outcome);
            }
            Command::Unfreeze(col) => {
                println!("> unfreeze {}", col);
                let outcome = grid.unfreeze_column(col)?;
                println!("  {:?}", outcome);
            }
            Command::Select(range) => {
                println!("> select {}..={}", range.from.col, range.to.col);
                grid.select(range);
                continue;
            }
            Command::ClearSelection => {
                println!("> select none");
                grid.clear_selection();
                continue;
            }
            Command::Click(key) => {
                println!("> click {}", key);
                let result = grid.click_menu_item(&key)?;
                println!("  {:?}", result);
            }
            Command::Menu => {
                for entry in grid.visible_menu_items() {
                    println!("  [{}] {}", entry.key, entry.label);
                }
                continue;
            }
        }
        print_layout(&grid);
    }

    if json {
        let snapshot = grid.manager().snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    if let Some(buffer) = get_log_buffer() {
        let entries = match &log_target {
            Some(target) => buffer.for_target(target),
            None => buffer.recent(20),
        };
        println!("Log entries ({}):", log_target.as_deref().unwrap_or("recent"));
        for entry in entries {
            println!("  {}", entry.format_for_display());
        }
    }

    Ok(())
}
