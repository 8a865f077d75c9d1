//! CLI for randsource — inspect the compiled entropy source and draw bytes.

mod commands;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "randsource")]
#[command(about = "randsource — OS entropy device or fallback PRNG, fixed at build time")]
#[command(version = randsource_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Explicit strategy override. Without one, the build-time selection is used.
#[derive(Args, Debug, Clone, Default)]
pub struct StrategyArgs {
    /// Read from this entropy device instead of the compiled one
    #[arg(long, conflicts_with = "fallback")]
    device: Option<String>,

    /// Use the non-cryptographic fallback PRNG (testing only)
    #[arg(long)]
    fallback: bool,

    /// Seed for --fallback, for reproducible output
    #[arg(long, requires = "fallback")]
    seed: Option<u64>,

    /// Maximum read calls per request before giving up
    #[arg(long)]
    max_attempts: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the compiled entropy configuration
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize, read N bytes, shut down, and print the bytes
    Bytes {
        /// Number of bytes to read
        #[arg(long, default_value = "32")]
        count: u32,

        /// Output format
        #[arg(long, default_value = "hex", value_parser = ["hex", "raw"])]
        format: String,

        #[command(flatten)]
        strategy: StrategyArgs,
    },

    /// Run the full lifecycle and report each step
    Check {
        /// Number of bytes to read
        #[arg(long, default_value = "32")]
        count: u32,

        #[command(flatten)]
        strategy: StrategyArgs,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Info { json } => commands::info::run(json),
        Commands::Bytes {
            count,
            format,
            strategy,
        } => commands::bytes::run(count, &format, &strategy),
        Commands::Check { count, strategy } => commands::check::run(count, &strategy),
    };

    std::process::exit(code);
}
