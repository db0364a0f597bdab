use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::reporting::{LeadRecord, ReportFormat};

use super::app::{App, RunOverrides};

/// Environment variable consulted for the API key when none is configured
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Parser, Debug)]
#[command(name = "leadsmith", version)]
#[command(about = "Research companies and draft personalized cold-outreach emails")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, short, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(long, short, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Research companies and generate pitches
    Run {
        #[arg(help = "Company names, domains or URLs")]
        tokens: Vec<String>,

        #[arg(short, long, help = "File with one company name, domain or URL per line")]
        file: Option<PathBuf>,

        #[arg(short, long, help = "Output directory for reports")]
        output: Option<PathBuf>,

        #[arg(long = "format", help = "Report format (csv, json, md); repeatable")]
        formats: Vec<ReportFormat>,

        #[arg(long, help = "Report title")]
        title: Option<String>,

        #[arg(short = 'j', long, help = "Maximum companies processed at once")]
        concurrent: Option<usize>,

        #[arg(long, help = "Skip website fetching and write pitches from company names only")]
        no_fetch: bool,

        #[arg(long, help = "Gemini API key; overrides the config file (falls back to GEMINI_API_KEY)")]
        api_key: Option<String>,

        #[arg(long, help = "Print every generated pitch")]
        show_pitches: bool,
    },

    /// Write the default configuration file
    Init {
        #[arg(short, long, help = "Force overwrite existing configuration")]
        force: bool,
    },

    /// Print the effective configuration, with secrets masked
    ShowConfig,
}

pub async fn execute_command(args: &Args) -> Result<()> {
    match &args.command {
        Commands::Init { force } => handle_init_command(args.config.clone(), *force),
        Commands::ShowConfig => {
            let config = Config::load(args.config.as_deref())?;
            handle_show_config_command(&config)
        }
        Commands::Run {
            tokens,
            file,
            output,
            formats,
            title,
            concurrent,
            no_fetch,
            api_key,
            show_pitches,
        } => {
            let overrides = RunOverrides {
                output_dir: output.clone(),
                formats: formats.clone(),
                title: title.clone(),
                max_concurrent: *concurrent,
                no_fetch: *no_fetch,
                api_key: api_key.clone(),
                env_api_key: std::env::var(API_KEY_ENV).ok(),
            };

            let app = App::load(args.config.as_deref(), overrides)?;
            handle_run_command(&app, tokens, file.as_ref(), *show_pitches).await
        }
    }
}

fn handle_init_command(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = Config::init(path.as_deref(), force)?;
    println!("Configuration initialized at {}", path.display());
    Ok(())
}

fn handle_show_config_command(config: &Config) -> Result<()> {
    print!("{}", config.redacted().to_toml()?);
    Ok(())
}

async fn handle_run_command(
    app: &App,
    tokens: &[String],
    file: Option<&PathBuf>,
    show_pitches: bool,
) -> Result<()> {
    let tokens = crate::input::collect_tokens(tokens, file.map(|p| p.as_path()))?;
    info!("Loaded {} tokens", tokens.len());

    let outcome = app.run_batch(tokens).await?;

    println!();
    for (index, record) in outcome.report.records.iter().enumerate() {
        print_record(index, record, show_pitches);
    }

    let summary = &outcome.report.summary;
    println!(
        "\n{} leads: {} researched, {} inferred, {} failed, {} contacts found ({}s)",
        summary.total,
        summary.succeeded,
        summary.inferred,
        summary.failed,
        summary.contacts_found,
        summary.duration_seconds
    );

    for path in &outcome.report_paths {
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn print_record(index: usize, record: &LeadRecord, show_pitch: bool) {
    println!(
        "{:>3}. {:<24} {:<20} {:<32} {}",
        index + 1,
        record.name,
        record.status,
        record.contact_or_sentinel(),
        record.website
    );

    if show_pitch {
        for line in record.pitch.lines() {
            println!("       {}", line);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_command() {
        let args = Args::try_parse_from([
            "leadsmith", "--verbose", "run", "Globex", "https://example.com",
            "--format", "csv", "--format", "md", "-j", "2", "--no-fetch",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.command {
            Commands::Run { tokens, formats, concurrent, no_fetch, .. } => {
                assert_eq!(tokens, vec!["Globex", "https://example.com"]);
                assert_eq!(formats, vec![ReportFormat::Csv, ReportFormat::Markdown]);
                assert_eq!(concurrent, Some(2));
                assert!(no_fetch);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["leadsmith", "run", "Globex", "--format", "pdf"]).is_err());
    }

    #[test]
    fn test_parse_init_with_global_config() {
        let args = Args::try_parse_from(["leadsmith", "init", "--force", "--config", "/tmp/leadsmith.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/leadsmith.toml")));
        assert!(matches!(args.command, Commands::Init { force: true }));
    }
}
