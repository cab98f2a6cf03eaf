mod app;
mod config;
mod domain;
mod error;
mod input;
mod logging;
mod persistence;
mod report;
mod schedule;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::{load_config, AppConfig};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{format_minutes, format_seconds};
use persistence::{config_file, ensure_data_dir, init_local_data_dir, tasks_file, JsonFileStorage};
use ratatui::{backend::CrosstermBackend, Terminal};
use schedule::Scheduler;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "weekplan")]
#[command(about = "A terminal weekly planner with conflict-aware scheduling and time tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .weekplan directory in the current directory
    Init,
    /// Print tasks, optionally filtered by a keyword in title or description
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Print the daily summary and weekly overview
    Summary,
    /// Write a markdown report of the week
    Report {
        /// Output file path. Defaults to <data dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Resolve the data directory, load config, start logging
fn bootstrap() -> Result<(PathBuf, AppConfig)> {
    let data_dir = ensure_data_dir()?;
    let config = load_config(config_file(&data_dir))?;

    if let Err(e) = logging::init_logging(&config.effective_log_level(), &data_dir) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    Ok((data_dir, config))
}

fn open_scheduler(data_dir: &std::path::Path, config: &AppConfig) -> Result<Scheduler> {
    let storage = JsonFileStorage::new(tasks_file(data_dir));
    Scheduler::load(Box::new(storage), config.tick_interval())
        .context("Failed to load tasks")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_data_dir()?;
            config::save_config(config_file(&data_dir), &AppConfig::default())?;
            println!("Initialized weekplan directory: {}", data_dir.display());
            println!();
            println!("weekplan will now use this local directory for task storage.");
            println!("Run 'weekplan' to start planning.");
            Ok(())
        }
        Some(Commands::List { search }) => {
            let (data_dir, config) = bootstrap()?;
            let scheduler = open_scheduler(&data_dir, &config)?;
            let tasks = scheduler.search(search.as_deref().unwrap_or(""));

            if tasks.is_empty() {
                println!("No tasks.");
            }
            for task in tasks {
                println!(
                    "{:<10} {}  {} [{}] {} est, {} actual",
                    task.day,
                    task.start_time,
                    task.title,
                    task.priority,
                    format_minutes(task.duration as u64),
                    format_seconds(task.actual_seconds())
                );
                if !task.description.is_empty() {
                    println!("{:<16} {}", "", task.description);
                }
            }
            Ok(())
        }
        Some(Commands::Summary) => {
            let (data_dir, config) = bootstrap()?;
            let scheduler = open_scheduler(&data_dir, &config)?;

            println!("Daily Summary");
            for day in scheduler.daily_summary() {
                println!(
                    "  {:<10} estimated {:>7}  actual {}",
                    day.day,
                    format_minutes(day.estimated_minutes),
                    format_seconds(day.actual_seconds)
                );
                for title in day.titles {
                    println!("      - {}", title);
                }
            }
            println!();
            println!("Weekly Overview");
            for day in scheduler.weekly_overview() {
                println!(
                    "  {:<10} {:>2} tasks  estimated {:>7}  actual {}",
                    day.day,
                    day.task_count,
                    format_minutes(day.estimated_minutes),
                    format_seconds(day.actual_seconds)
                );
            }
            let totals = scheduler.totals();
            println!();
            println!(
                "Total: {} tasks  estimated {}  actual {}",
                totals.task_count,
                format_minutes(totals.estimated_minutes),
                format_seconds(totals.actual_seconds)
            );
            Ok(())
        }
        Some(Commands::Report { output }) => {
            let (data_dir, config) = bootstrap()?;
            let scheduler = open_scheduler(&data_dir, &config)?;

            let output_path = output.map(PathBuf::from);
            let report_path = report::generate_report(scheduler.tasks(), &data_dir, output_path)?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    let (data_dir, config) = bootstrap()?;
    eprintln!("Using weekplan directory: {}", data_dir.display());

    let scheduler = open_scheduler(&data_dir, &config)?;
    let mut app = AppState::new(scheduler, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Time accumulated since the last explicit save is kept on exit
    if let Err(e) = app.save() {
        eprintln!("Error saving tasks: {}", e);
    }

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_rate = ticker::poll_duration(app.config.ui_poll_ms);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}
