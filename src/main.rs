mod view;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use statecast_core::{AppError, Config};
use statecast_weather::{
    catalog, AppState, CachedSource, Event, FetchBatchError, FetchStatus, ForecastFetcher,
    ForecastProvider, ForecastSource, Region, RegionDataset, WeatherError,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::view::{View, ViewOptions};

/// Weather overview for Indian states, searchable by name.
#[derive(Debug, Parser)]
#[command(name = "statecast", version, about)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial search text
    #[arg(long, default_value = "")]
    query: String,

    /// Fetch, print once and exit
    #[arg(long)]
    once: bool,
}

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Query(String),
    Refresh,
    Reload,
    Quit,
}

fn parse_input(line: &str) -> Input {
    let line = line.strip_suffix('\r').unwrap_or(line);
    match line.trim() {
        ":refresh" => Input::Refresh,
        ":reload" => Input::Reload,
        ":quit" | ":q" => Input::Quit,
        _ => Input::Query(line.to_string()),
    }
}

/// The HTTP provider, optionally behind the in-memory cache.
enum Source {
    Direct(ForecastProvider),
    Cached(CachedSource<ForecastProvider>),
}

impl Source {
    fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let provider = ForecastProvider::from_config(&config.weather)?;
        if config.cache.enabled {
            let ttl = Duration::from_secs(u64::from(config.cache.ttl_minutes) * 60);
            tracing::info!("Forecast cache enabled (ttl {:?})", ttl);
            Ok(Self::Cached(CachedSource::new(provider, ttl)))
        } else {
            Ok(Self::Direct(provider))
        }
    }
}

impl ForecastSource for Source {
    async fn fetch(&self, region: &Region) -> Result<RegionDataset, WeatherError> {
        match self {
            Self::Direct(provider) => provider.fetch(region).await,
            Self::Cached(cached) => cached.fetch(region).await,
        }
    }

    fn past_days(&self) -> u32 {
        match self {
            Self::Direct(provider) => provider.past_days(),
            Self::Cached(cached) => cached.past_days(),
        }
    }
}

type FetchResult = Result<Vec<RegionDataset>, FetchBatchError>;

/// Run one fetch cycle in the background; the result arrives on `tx`.
fn spawn_fetch(fetcher: &ForecastFetcher<Source>, regions: &[Region], tx: mpsc::Sender<FetchResult>) {
    let fetcher = fetcher.clone();
    let regions = regions.to_vec();
    tokio::spawn(async move {
        let result = fetcher.fetch_all(&regions).await;
        if tx.send(result).await.is_err() {
            tracing::debug!("Fetch finished after the view closed");
        }
    });
}

fn print_frame(state: &AppState, options: ViewOptions) {
    let view = View {
        state,
        options,
        now: chrono::Local::now().naive_local(),
    };
    println!("{}", view);
    if !matches!(state.status(), FetchStatus::Loading) {
        println!("Type to search, :refresh to reset, :reload to fetch again, :quit to exit");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("statecast: {}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let regions = catalog::regions();
    let (config, validation) = Config::load_validated(cli.config.as_deref(), &catalog::names())?;
    statecast_core::init(&config.logging.level)?;
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let fetcher = ForecastFetcher::new(Source::from_config(&config)?);
    let options = ViewOptions {
        hourly_window: config.weather.hourly_window,
        past_days: config.weather.past_days,
    };

    let mut state = AppState::new(config.weather.default_region.clone());
    if !cli.query.is_empty() {
        state = state.apply(Event::QueryChanged(cli.query));
    }

    if cli.once {
        let result = fetcher.fetch_all(&regions).await;
        state = state.apply(Event::FetchCompleted(result));
        print_frame(&state, options);
        return Ok(match state.status() {
            FetchStatus::Failed(_) => ExitCode::FAILURE,
            _ => ExitCode::SUCCESS,
        });
    }

    let (tx, mut rx) = mpsc::channel(1);
    state = state.apply(Event::FetchStarted);
    spawn_fetch(&fetcher, &regions, tx.clone());
    print_frame(&state, options);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(result) = rx.recv() => {
                state = state.apply(Event::FetchCompleted(result));
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                state = match parse_input(&line) {
                    Input::Quit => break,
                    Input::Refresh => state.apply(Event::Refresh),
                    Input::Reload if matches!(state.status(), FetchStatus::Loading) => {
                        tracing::info!("Fetch already in progress");
                        state
                    }
                    Input::Reload => {
                        spawn_fetch(&fetcher, &regions, tx.clone());
                        state.apply(Event::FetchStarted)
                    }
                    Input::Query(query) => state.apply(Event::QueryChanged(query)),
                };
            }
        }
        print_frame(&state, options);
    }

    tracing::info!("Exiting");
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_input(":refresh"), Input::Refresh);
        assert_eq!(parse_input("  :reload "), Input::Reload);
        assert_eq!(parse_input(":quit"), Input::Quit);
        assert_eq!(parse_input(":q\r"), Input::Quit);
    }

    #[test]
    fn test_parse_query_is_verbatim() {
        assert_eq!(parse_input("Pradesh"), Input::Query("Pradesh".into()));
        assert_eq!(parse_input(" goa"), Input::Query(" goa".into()));
        assert_eq!(parse_input("kerala\r"), Input::Query("kerala".into()));
        assert_eq!(parse_input(""), Input::Query(String::new()));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["statecast", "--once", "--query", "Kerala"]);
        assert!(cli.once);
        assert_eq!(cli.query, "Kerala");
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_source_respects_cache_setting() {
        let mut config = Config::default();
        assert!(matches!(Source::from_config(&config).unwrap(), Source::Direct(_)));

        config.cache.enabled = true;
        let source = Source::from_config(&config).unwrap();
        assert!(matches!(source, Source::Cached(_)));
        assert_eq!(source.past_days(), 10);
    }
}
