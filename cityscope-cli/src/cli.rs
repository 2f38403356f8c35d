use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use cityscope_core::{
    CityLoader, Config, DirectoryClient, ForecastClient, ForecastSession, SessionStatus,
    SortColumn,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityscope", version, about = "City directory and forecast browser")]
pub struct Cli {
    /// Log fetch events to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key used by `forecast`.
    Configure,

    /// Browse the city directory as an incrementally loaded table.
    Cities {
        /// Sort column: "name" or "country".
        #[arg(long, default_value = "name")]
        sort: String,

        /// Sort descending instead of ascending.
        #[arg(long)]
        desc: bool,

        /// Case-insensitive substring filter on city or country name.
        #[arg(long)]
        search: Option<String>,

        /// Pages to load up front.
        #[arg(long, default_value_t = 1)]
        pages: usize,

        /// Print one table and exit instead of prompting for more pages.
        #[arg(long)]
        no_interactive: bool,
    },

    /// Print autosuggest candidates for a city-name prefix.
    Suggest {
        /// City-name prefix, matched case-insensitively.
        prefix: String,

        /// Pages to load before matching.
        #[arg(long, default_value_t = 5)]
        pages: usize,
    },

    /// Show up to five daily forecast snapshots for a city or country.
    Forecast {
        /// City or country name, as shown in the directory.
        location: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Cities { sort, desc, search, pages, no_interactive } => {
                cities(sort, desc, search, pages, no_interactive).await
            }
            Command::Suggest { prefix, pages } => suggest(prefix, pages).await,
            Command::Forecast { location } => forecast(location).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("OpenWeather API key:")
        .with_help_message("Used by `cityscope forecast`; stored in the local config file")
        .prompt()
        .context("Failed to read API key")?;

    config.set_forecast_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn cities(
    sort: String,
    desc: bool,
    search: Option<String>,
    pages: usize,
    no_interactive: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let column = SortColumn::try_from(sort.as_str())?;

    let mut loader =
        CityLoader::open(Box::new(DirectoryClient::new(config.directory_url()))).await;

    loader.set_sort(column);
    if desc {
        // A second activation of the same column flips ascending to descending.
        loader.set_sort(column);
    }
    if let Some(query) = search {
        loader.set_search_query(query);
    }

    for _ in 1..pages {
        loader.trigger_on_visibility(true).await;
    }
    debug!("loaded {} directory records", loader.cities().len());

    output::render_city_table(&loader.derived_view());

    while !no_interactive && loader.has_more() {
        let load_more = inquire::Confirm::new("Load more?")
            .with_default(true)
            .prompt()
            .context("Failed to read answer")?;

        if !load_more {
            return Ok(());
        }

        loader.trigger_on_visibility(true).await;
        output::render_city_table(&loader.derived_view());
    }

    if !loader.has_more() {
        println!("No more data");
    }

    Ok(())
}

async fn suggest(prefix: String, pages: usize) -> anyhow::Result<()> {
    let config = Config::load()?;

    let mut loader =
        CityLoader::open(Box::new(DirectoryClient::new(config.directory_url()))).await;

    for _ in 1..pages {
        loader.trigger_on_visibility(true).await;
    }

    let candidates = loader.autosuggest_candidates(&prefix);
    if candidates.is_empty() {
        println!("No matching cities in the first {} records", loader.cities().len());
        return Ok(());
    }

    for city in candidates {
        println!("{} ({})", city.name, city.cou_name_en);
    }

    Ok(())
}

async fn forecast(location: String) -> anyhow::Result<()> {
    let config = Config::load()?;
    let api_key = config.require_forecast_api_key()?;

    let client = ForecastClient::new(config.forecast_url(), api_key);
    let mut session = ForecastSession::new(Box::new(client));
    session.start(&location).await;

    match session.status() {
        SessionStatus::Error => {
            let message = session.error_message().unwrap_or("Error fetching weather data.");
            anyhow::bail!("{message}")
        }
        SessionStatus::Ready if session.snapshots().is_empty() => {
            println!("No weather data available.");
            Ok(())
        }
        SessionStatus::Ready => {
            output::render_forecast(&location, &session.snapshots());
            Ok(())
        }
        // start() only leaves idle for a blank location
        SessionStatus::Idle | SessionStatus::Loading => anyhow::bail!("No location given."),
    }
}
