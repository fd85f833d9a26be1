mod report;

use chrono::NaiveTime;
use clap::{Parser, Subcommand, ValueEnum};
use shuttle_scraper::{DayType, ShuttleClient, ShuttleScraper};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shuttle-cli")]
#[command(about = "Scrape the CMU shuttle schedule page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape once and print what was found
    Scrape {
        /// Page to scrape instead of the configured schedule URL
        #[arg(long)]
        url: Option<String>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scrape once and print the next departure from a stop
    Next {
        /// Stop name, matched case-insensitively against table columns
        #[arg(long)]
        stop: String,
        /// Time of day as HH:MM or "7:30 PM" (defaults to now)
        #[arg(long, value_parser = parse_time_arg)]
        at: Option<NaiveTime>,
        /// Day type to look up (defaults to today's)
        #[arg(long, value_enum)]
        day: Option<DayArg>,
        /// Page to scrape instead of the configured schedule URL
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DayArg {
    Weekday,
    Weekend,
}

impl From<DayArg> for DayType {
    fn from(day: DayArg) -> Self {
        match day {
            DayArg::Weekday => DayType::Weekday,
            DayArg::Weekend => DayType::Weekend,
        }
    }
}

fn parse_time_arg(raw: &str) -> Result<NaiveTime, String> {
    shuttle_scraper::parse_clock_time(raw)
        .ok_or_else(|| format!("\"{raw}\" is not a time like 14:30 or 2:30 PM"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = shuttle_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, url = %config.schedule_url, "configuration loaded");

    let (url_override, run): (Option<String>, Run) = match cli.command {
        Commands::Scrape { url, json } => (url, Run::Scrape { json }),
        Commands::Next { stop, at, day, url } => (url, Run::Next { stop, at, day }),
    };

    let scraper = match url_override {
        Some(url) => {
            let client = ShuttleClient::new(config.request_timeout_secs, &config.user_agent)?;
            ShuttleScraper::new(client, url)
        }
        None => ShuttleScraper::from_config(&config)?,
    };
    let result = scraper.get_all_shuttle_data().await;

    if !result.success {
        anyhow::bail!(
            "scrape of {} failed: {}",
            result.url,
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    match run {
        Run::Scrape { json: true } => println!("{}", serde_json::to_string_pretty(&result)?),
        Run::Scrape { json: false } => print!("{}", report::render_summary(&result)),
        Run::Next { stop, at, day } => {
            let now = at.unwrap_or_else(|| chrono::Local::now().time());
            let day = day.map_or_else(DayType::today, DayType::from);
            print!("{}", report::render_departures(&result, &stop, day, now));
        }
    }

    Ok(())
}

/// What to do with the scrape once it succeeds.
enum Run {
    Scrape {
        json: bool,
    },
    Next {
        stop: String,
        at: Option<NaiveTime>,
        day: Option<DayArg>,
    },
}
