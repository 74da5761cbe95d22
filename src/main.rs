use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use signal_battery::{catalog::Catalog, config::Config, generator::BatteryGenerator};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "signal_battery")]
#[command(author = "Ian Lintner")]
#[command(version = "0.1.0")]
#[command(about = "Generate test WAV files for FFT pipeline debugging", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the full battery of test files (the default)
    Generate {
        /// Directory to write the WAV files to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Seed for the noise source (omit for a different noise every run)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<String>,
    },

    /// List the signals in the battery
    List,

    /// Generate default configuration file
    GenerateConfig {
        /// Output file path
        #[arg(default_value = "config.json")]
        output: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Generate {
        output_dir: None,
        seed: None,
        verbose: false,
        config: None,
    });

    match command {
        Commands::Generate {
            output_dir,
            seed,
            verbose,
            config: config_file,
        } => {
            // Initialize logger
            let level = if verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            };
            env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .target(env_logger::Target::Stdout)
                .format_target(false)
                .init();

            // Load or create config
            let mut config = if let Some(path) = config_file {
                Config::from_file(&path)?
            } else {
                Config::default()
            };

            // Override with CLI arguments
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if seed.is_some() {
                config.seed = seed;
            }

            if let Some(seed) = config.seed {
                info!("Noise seed: {}", seed);
            }

            let mut generator = BatteryGenerator::new(config)?;
            generator.run()?;

            Ok(())
        }

        Commands::List => {
            let catalog = Catalog::standard();
            println!("Test signals ({} files):", catalog.len());
            for (i, entry) in catalog.entries().iter().enumerate() {
                println!(
                    "  {:>2}: {:<36} [{}] {}",
                    i + 1,
                    entry.filename,
                    entry.group,
                    entry.spec
                );
            }
            Ok(())
        }

        Commands::GenerateConfig { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Configuration file generated: {}", output);
            Ok(())
        }
    }
}
