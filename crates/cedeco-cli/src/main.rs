mod commands;
mod output;
mod telemetry;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cedeco",
    version,
    about = "Survey reporting for community kitchens evaluated as CEDECO candidates"
)]
struct Cli {
    /// Log level for diagnostics on stderr (overridden by CEDECO_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build report views from a survey export (CSV, JSON or XLSX)
    Report {
        /// Path to the survey export
        input_file: PathBuf,

        /// View(s) to render (default: all). Run `cedeco report --help` for names
        #[arg(short, long = "view", value_name = "NAME")]
        view: Vec<String>,

        /// Custom JSON rule table(s), replacing built-ins with the same key
        #[arg(short, long = "rules", value_name = "FILE")]
        rules: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Fail instead of falling back to the sample dataset
        #[arg(long)]
        strict: bool,

        /// Worksheet to read from XLSX workbooks
        #[arg(long, value_name = "NAME")]
        sheet: Option<String>,

        /// How many entries "most common" highlights list
        #[arg(long, value_name = "N", default_value_t = 3)]
        top: usize,
    },
    /// Score each site's potential to become a CEDECO
    Score {
        /// Path to the survey export
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Fail instead of falling back to the sample dataset
        #[arg(long)]
        strict: bool,

        /// Worksheet to read from XLSX workbooks
        #[arg(long, value_name = "NAME")]
        sheet: Option<String>,
    },
    /// Manage and inspect rule tables
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
    /// Print the bundled sample dataset
    Sample {
        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List built-in rule tables
    List,
    /// Explain a rule table in plain language
    Explain {
        /// Table key (e.g., "etnia")
        key: String,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom rule file
    Validate {
        /// Path to JSON rule file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Report {
            input_file,
            view,
            rules,
            output,
            strict,
            sheet,
            top,
        } => commands::report::run(commands::report::ReportArgs {
            input_file,
            views: view,
            rule_files: rules,
            output_format: output,
            strict,
            sheet,
            top_n: top,
        }),
        Commands::Score {
            input_file,
            output,
            strict,
            sheet,
        } => commands::score::run(input_file, &output, strict, sheet.as_deref()),
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Explain { key } => commands::rules::explain(&key),
            RulesAction::Schema => commands::rules::schema(),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
        Commands::Sample { output } => commands::sample::run(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
