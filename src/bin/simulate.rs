//! Combat balance simulator CLI.
//!
//! Plays seeded auto-battles and prints aggregate results.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                        # 1000 level-1 fights
//!   cargo run --bin simulate -- --level 8 --boss    # Ice bosses
//!   cargo run --bin simulate -- --seed 7 --quiet    # Reproducible one-liner

use skirmish::simulator::{run_simulation, SimConfig};
use skirmish::spells::aspect::Element;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, quiet) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'simulate --help' for usage.");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if !quiet {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              SKIRMISH BALANCE SIMULATOR                       ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Seed:           {}", config.seed);
        println!("  Level:          {}", config.effective_level());
        println!("  Multiplier:     {:.2}", config.multiplier);
        println!("  Boss fights:    {}", config.boss);
        println!("  Aspect:         {}", config.element.display_name());
        println!();
    }

    let report = run_simulation(&config);

    if quiet {
        println!("{}", report.summary_line());
    } else {
        report.print();
    }
}

fn parse_args(args: &[String]) -> Result<(SimConfig, bool), String> {
    let mut config = SimConfig::default();
    let mut quiet = false;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--runs" | "-n" => config.num_runs = parse_value(args, &mut i)?,
            "--seed" => config.seed = parse_value(args, &mut i)?,
            "--level" | "-l" => config.level = parse_value(args, &mut i)?,
            "--multiplier" | "-m" => config.multiplier = parse_value(args, &mut i)?,
            "--potions" => config.health_potions = parse_value(args, &mut i)?,
            "--aspect" => {
                let family: String = parse_value(args, &mut i)?;
                config.element = Element::from_family(&family)
                    .ok_or_else(|| format!("Unknown aspect family: {}", family))?;
            }
            "--boss" => config.boss = true,
            "--quiet" | "-q" => quiet = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok((config, quiet))
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
    println!("Skirmish Balance Simulator\n");
    println!("Usage: simulate [OPTIONS]\n");
    println!("Options:");
    println!("  -n, --runs N          Number of fights (default: 1000)");
    println!("      --seed N          Base RNG seed (default: 42)");
    println!("  -l, --level N         Difficulty and character level, 1-25 (default: 1)");
    println!("  -m, --multiplier X    Enemy HP multiplier, 0.1-3.0 (default: 1.0)");
    println!("      --boss            Fight bosses");
    println!("      --aspect NAME     Character aspect family (default: fire)");
    println!("      --potions N       Health potions per fight (default: 2)");
    println!("  -q, --quiet           Only print a one-line summary");
    println!("  -h, --help            Show this help");
}
