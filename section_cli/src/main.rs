//! # Biax CLI
//!
//! Command-line front end for section_core: runs single neutral-axis samples
//! and full capacity sweeps from an analysis file, and exports the results.
//!
//! ## Usage
//!
//! ```text
//! biax template --output column.json
//! biax validate column.json
//! biax sample column.json --angle 90 --intercept 0
//! biax sweep column.json --output surface.json --tsv surface.tsv
//! ```
//!
//! Logging goes to stderr through env_logger. `RUST_LOG` overrides the level;
//! `-v` raises the default to debug, `-vv` to trace.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

mod commands;
mod export;

#[derive(Parser)]
#[command(name = "biax")]
#[command(version, about = "Biax - biaxial capacity surfaces for reinforced concrete sections")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one neutral axis.
    Sample {
        /// Path to analysis file (JSON).
        path: String,

        /// Neutral-axis angle in degrees.
        #[arg(short, long, allow_negative_numbers = true)]
        angle: f64,

        /// Neutral-axis intercept (y crossing, or x crossing for a vertical axis).
        #[arg(short, long, allow_negative_numbers = true)]
        intercept: f64,

        /// Print the full result as JSON instead of a report.
        #[arg(long)]
        json: bool,
    },

    /// Sweep the analysis grid and report the capacity surface.
    Sweep {
        /// Path to analysis file (JSON).
        path: String,

        /// Write the surface as JSON.
        #[arg(short, long)]
        output: Option<String>,

        /// Write one tab-separated row per capacity point.
        #[arg(long)]
        tsv: Option<String>,

        /// Evaluate grid cells on one thread.
        #[arg(long)]
        sequential: bool,
    },

    /// Check an analysis file without running it.
    Validate {
        /// Path to analysis file (JSON).
        path: String,
    },

    /// Write a starter analysis file.
    Template {
        /// Material preset for the template.
        #[arg(short, long, value_enum, default_value_t = Preset::Aci)]
        preset: Preset,

        /// Output path; prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Template presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// 16 in square column, ACI 318, ksi
    Aci,
    /// 400 mm square column, EN 1992-1-1, MPa
    Eurocode,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Sample { path, angle, intercept, json } => commands::sample(&path, angle, intercept, json),
        Commands::Sweep { path, output, tsv, sequential } => {
            commands::sweep(&path, output.as_deref(), tsv.as_deref(), sequential)
        }
        Commands::Validate { path } => commands::validate(&path),
        Commands::Template { preset, output } => commands::template(preset, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
