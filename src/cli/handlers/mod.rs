use std::error::Error;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::commands::*;
use crate::cli::menu::{Menu, MenuExit};
use crate::cli::output::*;
use crate::io::{config_io, store_io};
use crate::logging;
use crate::model::config::AppConfig;
use crate::ops::filter::{self, Filter};
use crate::ops::task_ops;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let cwd = std::env::current_dir()?;
    let config = config_io::resolve_config(cli.config.as_deref(), &cwd)?;
    let task_file = task_file_path(cli.file.as_deref(), &config);
    let json = cli.json;

    // The form UI owns the terminal, so it only logs when a log file is set
    let form_ui = matches!(cli.command, None | Some(Commands::Ui));
    if !form_ui || config.log.file.is_some() {
        logging::init(cli.verbose, &config.log)?;
    }
    debug!(file = %task_file.display(), "using task file");

    match cli.command {
        None | Some(Commands::Ui) => crate::tui::run(&task_file, &config),
        Some(Commands::Menu) => cmd_menu(&task_file),
        Some(Commands::List(args)) => cmd_list(&task_file, args, json),
        Some(Commands::Add(args)) => cmd_add(&task_file, args),
        Some(Commands::Done(args)) => cmd_done(&task_file, args),
        Some(Commands::Rm(args)) => cmd_rm(&task_file, args),
        Some(Commands::Categories) => cmd_categories(&task_file, json),
    }
}

/// `--file` beats `[storage] file`, which defaults to tasks.json
pub fn task_file_path(explicit: Option<&Path>, config: &AppConfig) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.storage.file.clone())
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

fn cmd_menu(task_file: &Path) -> Result<(), Box<dyn Error>> {
    let mut store = store_io::load_store(task_file)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    let mut menu = Menu::new(stdin.lock(), stdout.lock(), color);
    match menu.run(&mut store, task_file)? {
        MenuExit::Saved => debug!("menu exited after save"),
        MenuExit::EndOfInput => debug!("menu exited at end of input"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(task_file: &Path, args: ListArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let store = store_io::load_store(task_file)?;
    let filter = Filter::parse(&args.filter);
    let matching: Vec<(usize, &crate::model::Task)> = store
        .tasks()
        .enumerate()
        .filter(|(_, task)| filter.matches(task))
        .collect();

    if json {
        let items: Vec<TaskJson> = matching
            .iter()
            .map(|(i, task)| task_to_json(*i, task))
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if matching.is_empty() {
        println!("(no tasks)");
    } else {
        for (i, task) in matching {
            println!("{}", format_task_text(i, task));
        }
    }
    Ok(())
}

fn cmd_categories(task_file: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let store = store_io::load_store(task_file)?;
    let categories = filter::categories(&store);
    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else {
        for category in categories {
            println!("{category}");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands (each saves immediately)
// ---------------------------------------------------------------------------

fn cmd_add(task_file: &Path, args: AddArgs) -> Result<(), Box<dyn Error>> {
    let mut store = store_io::load_store(task_file)?;
    task_ops::add_task(&mut store, &args.title, &args.description, &args.category)?;
    store_io::save_store(task_file, &store)?;
    println!("added {}: {}", store.len(), args.title);
    Ok(())
}

fn cmd_done(task_file: &Path, args: PositionArgs) -> Result<(), Box<dyn Error>> {
    let mut store = store_io::load_store(task_file)?;
    let index = task_ops::parse_position(&args.number, store.len())?;
    let title = task_ops::mark_completed_at(&mut store, index)?.title.clone();
    store_io::save_store(task_file, &store)?;
    println!("completed {}: {}", index + 1, title);
    Ok(())
}

fn cmd_rm(task_file: &Path, args: PositionArgs) -> Result<(), Box<dyn Error>> {
    let mut store = store_io::load_store(task_file)?;
    let index = task_ops::parse_position(&args.number, store.len())?;
    let task = task_ops::delete_task_at(&mut store, index)?;
    store_io::save_store(task_file, &store)?;
    println!("deleted {}: {}", index + 1, task.title);
    Ok(())
}
