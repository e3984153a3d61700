use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::{forecast, init, pull, push, serve};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "rentcast")]
#[command(about = "Rental expense forecaster with CLI tools and web server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,

        /// Plan snapshot file loaded at startup
        ///
        /// When the file does not exist the server starts from the default
        /// plan.
        #[arg(short, long, env = "PLAN_PATH", default_value = "rental_forecast_config.json")]
        plan_path: PathBuf,

        /// OAuth bearer token for the cloud snapshot store
        ///
        /// Without it the session save/load endpoints report
        /// NOT_AUTHENTICATED; everything else works.
        #[arg(long, env = "GOOGLE_ACCESS_TOKEN")]
        access_token: Option<String>,

        /// Alternate cloud store host (tests, proxies)
        #[arg(long, env = "DRIVE_BASE_URL")]
        drive_base_url: Option<String>,
    },
    /// Write a default plan snapshot file
    Init {
        /// Where to write the snapshot
        #[arg(short, long, default_value = "rental_forecast_config.json")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the month-by-month forecast for a plan file
    Forecast {
        /// Plan snapshot file to project
        #[arg(short, long, env = "PLAN_PATH", default_value = "rental_forecast_config.json")]
        plan_path: PathBuf,
    },
    /// Upload a local plan snapshot to the cloud store
    Push {
        /// Plan snapshot file to upload
        #[arg(short, long, env = "PLAN_PATH", default_value = "rental_forecast_config.json")]
        plan_path: PathBuf,

        /// OAuth bearer token for the cloud snapshot store
        #[arg(long, env = "GOOGLE_ACCESS_TOKEN")]
        access_token: Option<String>,

        /// Alternate cloud store host (tests, proxies)
        #[arg(long, env = "DRIVE_BASE_URL")]
        drive_base_url: Option<String>,
    },
    /// Download the cloud snapshot into a local plan file
    Pull {
        /// Where to write the downloaded snapshot
        #[arg(short, long, env = "PLAN_PATH", default_value = "rental_forecast_config.json")]
        plan_path: PathBuf,

        /// OAuth bearer token for the cloud snapshot store
        #[arg(long, env = "GOOGLE_ACCESS_TOKEN")]
        access_token: Option<String>,

        /// Alternate cloud store host (tests, proxies)
        #[arg(long, env = "DRIVE_BASE_URL")]
        drive_base_url: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                bind_address,
                plan_path,
                access_token,
                drive_base_url,
            } => {
                let settings = Settings {
                    bind_address,
                    plan_path,
                    access_token,
                    drive_base_url,
                };
                serve(settings).await?;
            }
            Commands::Init { path, force } => {
                init(&path, force).await?;
            }
            Commands::Forecast { plan_path } => {
                forecast(&plan_path).await?;
            }
            Commands::Push {
                plan_path,
                access_token,
                drive_base_url,
            } => {
                push(&plan_path, access_token, drive_base_url).await?;
            }
            Commands::Pull {
                plan_path,
                access_token,
                drive_base_url,
            } => {
                pull(&plan_path, access_token, drive_base_url).await?;
            }
        }
        Ok(())
    }
}
