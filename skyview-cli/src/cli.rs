use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use skyview_core::{Config, Session, WeatherSource, WeatherView, source_from_config};
use tracing::debug;

use crate::render::render_session;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyview", version, about = "Current weather and air quality from weatherapi.com")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherapi.com API key.
    Configure,

    /// Show current weather for a location.
    Show {
        /// City, postcode, "lat,lon", IP address, ...
        location: String,

        /// Also print the raw air-quality object.
        #[arg(long)]
        raw: bool,

        /// Print the view as JSON instead of text.
        #[arg(long, conflicts_with = "raw")]
        json: bool,
    },

    /// Prompt for locations until Esc or Ctrl-C.
    Interactive {
        /// Also print the raw air-quality object.
        #[arg(long)]
        raw: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, raw, json } => {
                let (config, source) = load_source();
                show(source.as_ref(), &location, raw || config.show_raw_air_quality, json).await
            }
            Command::Interactive { raw } => {
                let (config, source) = load_source();
                interactive(source.as_ref(), raw || config.show_raw_air_quality).await
            }
        }
    }
}

fn load_source() -> (Config, Box<dyn WeatherSource>) {
    let config = Config::load();
    debug!(
        base_url = config.base_url(),
        has_api_key = config.api_key().is_some(),
        "configuration loaded"
    );
    let source = source_from_config(&config);
    (config, source)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let api_key = Password::new("weatherapi.com API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(
    source: &dyn WeatherSource,
    location: &str,
    raw: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = Session::new();
    session.set_input(location);

    if session.can_submit() {
        eprintln!("Loading...");
    }
    session.submit(source).await;

    if json {
        let value = match (session.snapshot(), session.error()) {
            (Some(snapshot), _) => serde_json::to_value(WeatherView::from_snapshot(snapshot))?,
            (None, Some(message)) => serde_json::json!({ "error": message }),
            (None, None) => serde_json::json!({ "error": "Enter a location to get the weather." }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", render_session(&session, raw));
    }

    Ok(())
}

async fn interactive(source: &dyn WeatherSource, raw: bool) -> anyhow::Result<()> {
    let mut session = Session::new();

    loop {
        let input = match Text::new("Location:").with_help_message("Esc to quit").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read location"),
        };

        session.set_input(input);
        if !session.can_submit() {
            println!("Enter a location to get the weather.");
            continue;
        }

        eprintln!("Loading...");
        session.submit(source).await;
        print!("{}", render_session(&session, raw));
    }

    Ok(())
}
