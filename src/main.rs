mod input;
mod ui;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use directories::ProjectDirs;
use input::{map_key, KeyAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use skirmish::build_info;
use skirmish::character::CharacterRecord;
use skirmish::combat::{CombatSession, CombatStatus};
use skirmish::core::constants::FRAME_INTERVAL_MS;
use skirmish::enemies::{EnemyInstance, EnemyScaler};
use skirmish::spells::aspect::Aspect;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use ui::combat_effects::TerminalEffects;

#[derive(Debug, Default)]
struct CliArgs {
    level: Option<u32>,
    multiplier: Option<f64>,
    boss: bool,
    enemy: Option<String>,
    character: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'skirmish --help' for usage.");
            std::process::exit(1);
        }
    };

    let _log_guard = setup_logging();

    let (mut player, save_path) = load_character(cli.character.as_ref())?;
    let enemy = spawn_enemy(&cli);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_combat(&mut terminal, &mut player, enemy);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let outcome = result?;
    if let Some(path) = save_path {
        player
            .save(&path)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        info!(path = %path.display(), "character saved");
    }

    match outcome {
        Some(CombatStatus::Victory) => println!("Victory!"),
        Some(CombatStatus::Defeat) => println!("You were defeated."),
        Some(CombatStatus::Escaped) => println!("You escaped."),
        _ => println!("Combat abandoned."),
    }
    Ok(())
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--level" | "-l" => cli.level = Some(parse_value(args, &mut i)?),
            "--multiplier" | "-m" => cli.multiplier = Some(parse_value(args, &mut i)?),
            "--boss" => cli.boss = true,
            "--enemy" | "-e" => cli.enemy = Some(parse_value(args, &mut i)?),
            "--character" | "-c" => {
                let path: String = parse_value(args, &mut i)?;
                cli.character = Some(PathBuf::from(path));
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(cli)
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &args[*i];
    *i += 1;
    let raw = args
        .get(*i)
        .ok_or_else(|| format!("{} requires a value", flag))?;
    raw.parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, raw))
}

fn print_help() {
    println!("Skirmish - Turn-Based Terminal Combat\n");
    println!("Usage: skirmish [OPTIONS]\n");
    println!("Options:");
    println!("  -l, --level N         Difficulty level, 1-25 (default: character level)");
    println!("  -m, --multiplier X    Enemy HP multiplier, 0.1-3.0 (default: 1.0)");
    println!("      --boss            Fight the theme's boss");
    println!("  -e, --enemy NAME      Fight a specific enemy (partial names match)");
    println!("  -c, --character FILE  Character file to load and save back");
    println!("  -v, --version         Show version information");
    println!("  -h, --help            Show this help message");
    println!("\nKeys: arrows/jk move, Enter confirms, Esc goes back, q quits.");
}

/// Logs go to a file in the data directory; stdout belongs to the TUI.
/// Returns `None` when no log directory is available.
fn setup_logging() -> Option<WorkerGuard> {
    let log_dir = ProjectDirs::from("", "", "skirmish")?.data_dir().join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "skirmish.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skirmish=info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();
    Some(guard)
}

/// Loads the character from `--character`, then the default location, and
/// falls back to a fresh adventurer. Returns where to save it afterwards.
fn load_character(
    explicit: Option<&PathBuf>,
) -> io::Result<(CharacterRecord, Option<PathBuf>)> {
    let to_io = |e| io::Error::new(io::ErrorKind::InvalidData, e);

    if let Some(path) = explicit {
        let record = CharacterRecord::load(path).map_err(to_io)?;
        return Ok((record, Some(path.clone())));
    }

    if let Some(path) = CharacterRecord::default_path() {
        if path.exists() {
            match CharacterRecord::load(&path) {
                Ok(record) => return Ok((record, Some(path))),
                Err(e) => warn!(error = %e, "default character unreadable, using a new one"),
            }
        }
    }

    let mut record = CharacterRecord::new("Adventurer", Aspect::default());
    record.add_item("Health Potion", 2);
    record.add_item("Mana Potion", 1);
    Ok((record, None))
}

fn spawn_enemy(cli: &CliArgs) -> EnemyInstance {
    let mut rng = rand::thread_rng();
    let mut scaler = EnemyScaler::new();
    if let Some(level) = cli.level {
        scaler.set_difficulty_level(level);
    }
    if let Some(multiplier) = cli.multiplier {
        scaler.set_difficulty_multiplier(multiplier);
    }

    match (&cli.enemy, cli.boss) {
        (Some(name), _) => scaler.create_specific_enemy(name, cli.level, &mut rng),
        (None, true) => scaler.create_scaled_boss(&mut rng),
        (None, false) => scaler.create_scaled_enemy(&mut rng),
    }
}

/// Runs one fight until the player quits after it ends (or mid-fight).
fn run_combat(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    player: &mut CharacterRecord,
    enemy: EnemyInstance,
) -> io::Result<Option<CombatStatus>> {
    let mut session = CombatSession::new(TerminalEffects::new(), rand::thread_rng());
    session.start_combat(enemy);

    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            ui::draw_combat_scene(frame, area, &session, &*player);
        })?;

        if session.bus_mut().take_bell() {
            let mut out = io::stdout();
            out.write_all(b"\x07")?;
            out.flush()?;
        }

        let timeout = frame_interval.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match map_key(key) {
                    KeyAction::Quit => return Ok(session.outcome()),
                    KeyAction::Combat(input) => {
                        session.handle_input(player, input);
                    }
                    KeyAction::Ignore => {}
                }
            }
        }

        if last_frame.elapsed() >= frame_interval {
            session.update(player);
            last_frame = Instant::now();
        }
    }
}
