use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use colored::*;
use once_cell::sync::Lazy;
use stepku::{replay::{CancelToken, Playback}, solve, Grid, SolveOutcome};
use std::{fs, path::PathBuf, time::Duration};

// Built-in demo puzzle: 20 givens, enough backtracking for a lively animation.
static DEMO_PUZZLE: Lazy<Grid> = Lazy::new(|| {
    Grid::from_compact(concat!(
        "...1.2...",
        ".6.....7.",
        "..8...9..",
        "4.......3",
        ".5...7...",
        "2...8...1",
        "..9...8.5",
        ".7.....6.",
        "...3.4...",
    ))
    .expect("demo puzzle is well-formed")
});

#[derive(Parser, Debug)]
#[command(name = "stepku", version, about = "Sudoku solver with recorded steps and animated replay")]
struct Cli {
    /// Path to a puzzle file (81 chars with 0 or . for blanks). If omitted, reads from stdin.
    #[arg(short, long, conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Solve the built-in demo puzzle instead of reading input
    #[arg(long)]
    demo: bool,

    /// Animate the recorded search steps in the terminal
    #[arg(short, long)]
    animate: bool,

    /// Delay between rendered animation frames, in milliseconds
    #[arg(long, default_value_t = 40)]
    frame_delay_ms: u64,

    /// Ceiling on total animation time, in milliseconds
    #[arg(long, default_value_t = 10_000)]
    max_duration_ms: u64,

    /// Colored status output
    #[arg(long)]
    color: bool,

    /// Write the recorded step sequence to a JSON file
    #[cfg(feature = "serde")]
    #[arg(long)]
    steps_out: Option<PathBuf>,
}

fn read_puzzle(input: &Option<PathBuf>) -> Result<String> {
    let s = match input {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        None => {
            use std::io::{self, Read};
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let filtered: String = s.chars().filter(|ch| matches!(ch, '0'..='9'|'.')).collect();
    if filtered.len() < 81 { bail!("expected at least 81 digits/dots in input (have {})", filtered.len()) }
    Ok(filtered.chars().take(81).collect())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let grid = if cli.demo {
        DEMO_PUZZLE.clone()
    } else {
        Grid::from_compact(&read_puzzle(&cli.input)?).context("parse puzzle")?
    };

    let solution = match solve(&grid)? {
        SolveOutcome::Solved(s) => s,
        SolveOutcome::Invalid { reason } => {
            let msg = format!("Cannot solve: {reason}. Duplicates found in rows, columns, or boxes.");
            if cli.color { eprintln!("{}", msg.red().bold()); } else { eprintln!("{msg}"); }
            std::process::exit(1);
        }
    };

    if cli.animate {
        let playback = Playback::with_timing(
            Duration::from_millis(cli.frame_delay_ms),
            Duration::from_millis(cli.max_duration_ms),
        );
        let cancel = CancelToken::new();
        playback.replay(&grid, &solution.steps, &cancel, |frame| {
            // Cursor home + clear, then redraw in place
            print!("\x1b[H\x1b[2J{}", frame.to_pretty_string());
        });
    } else {
        println!("{}", solution.grid.to_pretty_string());
    }

    #[cfg(feature = "serde")]
    if let Some(path) = &cli.steps_out {
        let json = serde_json::to_string_pretty(&solution.steps)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
    let summary = format!(
        "[{ts}] solved in {}ms and {} steps",
        solution.elapsed.as_millis(),
        solution.step_count(),
    );
    if cli.color {
        println!("{} {}", "➤".blue().bold(), summary.bold());
    } else {
        println!("➤ {summary}");
    }
    Ok(())
}
