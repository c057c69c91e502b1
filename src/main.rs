#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use breedlens_lib::commands::{self, ParamOverrides};
use breedlens_lib::presentation::{render::PHOTO_TIP, Notice};
use breedlens_lib::{AppController, Language};

/// Identify animal breeds from photos with a remote inference service.
#[derive(Parser, Debug)]
#[command(name = "breedlens", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Backend base URL for this run (not persisted)
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Suggest a breed for a jpg/jpeg/png photo
    Identify {
        image: PathBuf,
        /// Confidence threshold (0.0-1.0)
        #[arg(long)]
        threshold: Option<f64>,
        /// Number of ranked predictions (1-5)
        #[arg(long)]
        topk: Option<u8>,
        /// Response language: en or hi
        #[arg(long)]
        lang: Option<Language>,
    },
    /// List the breeds the service recognizes
    Breeds,
    /// Print the current settings
    Config,
    /// Print settings and log locations
    Paths,
}

fn print_lines(lines: &[Notice]) {
    for line in lines {
        println!("{}", line);
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let controller = AppController::new().context("failed to initialize BreedLens")?;
    if let Some(url) = cli.api_url {
        controller.set_api_url(url);
    }

    match cli.command {
        Command::Identify {
            image,
            threshold,
            topk,
            lang,
        } => {
            let overrides = ParamOverrides {
                threshold,
                top_k: topk,
                language: lang,
            };
            let outcome = commands::identify_breed(&controller, &image, overrides)
                .await
                .map_err(|e| anyhow!(e))?;
            print_lines(&outcome.lines);
            println!("\n{}", PHOTO_TIP);
            Ok(!outcome.result.state().is_failure())
        }
        Command::Breeds => {
            let listing = commands::list_breeds(&controller).await;
            print_lines(&listing.lines);
            Ok(listing.result.error().is_none())
        }
        Command::Config => {
            let config = commands::get_config(&controller);
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(true)
        }
        Command::Paths => {
            let paths = commands::get_paths(&controller);
            println!("config: {}", paths.config_path);
            println!("data:   {}", paths.data_dir);
            println!("logs:   {}", paths.logs_dir);
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_flags() {
        let cli = Cli::try_parse_from([
            "breedlens",
            "identify",
            "cow.jpg",
            "--threshold",
            "0.75",
            "--topk",
            "5",
            "--lang",
            "hi",
            "--api-url",
            "http://10.0.0.5:8000",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.5:8000"));
        match cli.command {
            Command::Identify {
                image,
                threshold,
                topk,
                lang,
            } => {
                assert_eq!(image, PathBuf::from("cow.jpg"));
                assert_eq!(threshold, Some(0.75));
                assert_eq!(topk, Some(5));
                assert_eq!(lang, Some(Language::Hindi));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_identify_defaults_leave_overrides_empty() {
        let cli = Cli::try_parse_from(["breedlens", "identify", "cow.png"]).unwrap();
        match cli.command {
            Command::Identify {
                threshold,
                topk,
                lang,
                ..
            } => {
                assert!(threshold.is_none());
                assert!(topk.is_none());
                assert!(lang.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Cli::try_parse_from(["breedlens", "identify", "cow.jpg", "--lang", "fr"]).is_err());
        assert!(Cli::try_parse_from(["breedlens", "identify"]).is_err());
        assert!(Cli::try_parse_from(["breedlens", "identify", "a.jpg", "--topk", "x"]).is_err());
        assert!(Cli::try_parse_from(["breedlens", "breeds", "--api-url", "http://h"]).is_ok());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
