//! ksatbench CLI — validate evaluation records, print summaries and
//! leaderboards, and export the web data bundle.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use ksatbench_core::model::Subject;

mod commands;

#[derive(Parser)]
#[command(name = "ksatbench", version, about = "KSAT AI benchmark leaderboard builder")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the results directory
    #[arg(long, global = true)]
    pub results_dir: Option<PathBuf>,

    /// Override the exams directory
    #[arg(long, global = true)]
    pub exams_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every exam and result file, reporting rejected records and
    /// audit findings
    Validate,

    /// Print per-exam result tables
    Summary {
        /// Only this exam
        #[arg(long)]
        exam: Option<String>,
    },

    /// Print the overall or a per-subject leaderboard
    Leaderboard {
        /// Subject: korean, math, english
        #[arg(long)]
        subject: Option<Subject>,

        /// Output format: text, markdown, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show one model's results across exams and subjects
    Model {
        /// Model name as it appears in result files
        name: String,
    },

    /// Write the evaluation data bundle for the web front end
    Export {
        /// Output path (default from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Fail if any record was rejected
        #[arg(long)]
        strict: bool,
    },

    /// Create a starter ksatbench.toml and data directories
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ksatbench=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate => commands::validate::execute(&cli.global),
        Commands::Summary { exam } => commands::summary::execute(&cli.global, exam),
        Commands::Leaderboard { subject, format } => {
            commands::leaderboard::execute(&cli.global, subject, format)
        }
        Commands::Model { name } => commands::model::execute(&cli.global, &name),
        Commands::Export { output, strict } => {
            commands::export::execute(&cli.global, output, strict)
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
