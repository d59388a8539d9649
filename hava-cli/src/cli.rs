use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use hava_core::{
    Config, ErrorPolicy, Forecast, ForecastRequest, IZMIR_KONAK, Template, fetch_forecast,
    provider::provider_from_config, render::DashboardView, write_document,
};
use inquire::{Select, Text};
use std::io::{self, Write};

/// Top-level CLI struct. With no subcommand the e-ink page is generated.
#[derive(Debug, Parser)]
#[command(name = "hava", version, about = "Weather page for an e-ink display")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the forecast and write the e-ink page (default).
    Generate,

    /// Print the current reading as the interactive dashboard sees it.
    Show {
        /// Print the view-model as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the dashboard as a standalone HTML page.
    Export,

    /// Interactively choose output path and error policies.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Generate) {
            Command::Generate => generate(&load_config()).await,
            Command::Show { json } => {
                let view = dashboard(&load_config()).await?;
                if json {
                    let out = serde_json::to_string_pretty(&view)
                        .context("Failed to serialize dashboard view")?;
                    println!("{out}");
                } else {
                    println!("{view}");
                }
                Ok(())
            }
            Command::Export => {
                let view = dashboard(&load_config()).await?;
                write_export(&mut io::stdout().lock(), &view)
            }
            Command::Configure => configure(Config::load()?),
        }
    }
}

/// Fetching commands run on defaults when the config file is unusable.
fn load_config() -> Config {
    config_or_default(Config::load())
}

fn config_or_default(loaded: anyhow::Result<Config>) -> Config {
    loaded.unwrap_or_else(|err| {
        tracing::warn!(error = %format!("{err:#}"), "Ignoring unusable config, using defaults");
        Config::default()
    })
}

/// The page goes out exactly as rendered, without a trailing newline.
fn write_export(out: &mut impl Write, view: &DashboardView) -> anyhow::Result<()> {
    out.write_all(view.to_html().as_bytes())
        .context("Failed to write exported page")?;
    out.flush().context("Failed to flush exported page")
}

async fn generate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Fetching weather data...");

    let provider = provider_from_config(config);
    let request = ForecastRequest::with_hourly(IZMIR_KONAK);
    let forecast = fetch_forecast(provider.as_ref(), &request, config.policy.generate).await?;

    log_forecast(&forecast);

    let today = Local::now().date_naive();
    let html = Template::Eink.render(today, &forecast.current, &IZMIR_KONAK);

    let path = config.output_path();
    write_document(path, &html)?;
    tracing::info!("Generated {}", path.display());

    Ok(())
}

fn log_forecast(forecast: &Forecast) {
    let current = &forecast.current;
    tracing::info!("Current: {}°C, {}", current.temperature_c, current.condition);

    if !forecast.hourly.is_empty() {
        let hours = forecast
            .hourly
            .iter()
            .map(|h| format!("{}: {}°", h.hour, h.temperature_c))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!("Hourly forecast: {hours}");
    }
}

async fn dashboard(config: &Config) -> anyhow::Result<DashboardView> {
    let provider = provider_from_config(config);
    let request = ForecastRequest::current(IZMIR_KONAK);
    let forecast = fetch_forecast(provider.as_ref(), &request, config.policy.show).await?;

    let today = Local::now().date_naive();
    Ok(DashboardView::new(today, &forecast.current, &IZMIR_KONAK))
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let current_output = config.output_path().display().to_string();
    let output = Text::new("Output path for the e-ink page:")
        .with_default(&current_output)
        .prompt()
        .context("Failed to read output path")?;
    config.output_path = Some(output.trim().into());

    config.policy.generate = select_policy("When `generate` cannot fetch:", config.policy.generate)?;
    config.policy.show = select_policy("When `show`/`export` cannot fetch:", config.policy.show)?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn select_policy(message: &str, current: ErrorPolicy) -> anyhow::Result<ErrorPolicy> {
    let options = ErrorPolicy::all().to_vec();
    let cursor = options.iter().position(|p| *p == current).unwrap_or(0);

    Select::new(message, options)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read error policy")
}
