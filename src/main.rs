//! Covid Board CLI
//!
//! Command-line interface for the dashboard:
//! - Serve the dashboard over HTTP
//! - Print the world summary and country ranking
//! - Print a country drill-down
//! - Look up placeholder users and address-book contacts

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use covid_board::address_book::{AddressBook, Contact, PhoneType};
use covid_board::api::{serve, AppState};
use covid_board::chart::SvgChartRenderer;
use covid_board::config::{generate_default_config, Config};
use covid_board::covid::{CountryDailyRecord, CovidApi, CovidClient, CovidStatus};
use covid_board::dashboard::{
    build_layout, chart_series, current_total, rank_by_confirmed, sort_by_date_desc,
    world_totals, Dashboard,
};
use covid_board::dom::Document;
use covid_board::format::{format_count, Locale};
use covid_board::users::PlaceholderClient;

#[derive(Parser)]
#[command(name = "covid-board")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "COVID-19 statistics dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard over HTTP
    Serve,

    /// Print world totals and the country ranking
    Summary {
        /// Only show the first N countries
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Print deaths and recovered history plus the chart series for a country
    Country {
        /// Country slug (e.g., south-korea)
        slug: String,
    },

    /// Fetch a user from the placeholder API
    User {
        #[arg(default_value = "1")]
        id: u64,
    },

    /// Search an address book JSON file
    Contacts {
        /// Path to the address book
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Phone number (requires --kind)
        #[arg(long, requires = "kind")]
        phone: Option<u64>,
        /// Phone type (home, office, studio)
        #[arg(long)]
        kind: Option<PhoneType>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    covid_board::logging::init(&config.logging);

    match cli.command {
        Commands::Serve => run_server(config).await?,

        Commands::Summary { top } => {
            let client = CovidClient::new(config.covid_api.client_config())?;
            let summary = client.fetch_summary().await?;
            let world = world_totals(&summary.countries);
            let locale = config.dashboard.locale;

            println!("Last updated: {}", locale.timestamp(&summary.date));
            println!();
            println!("Confirmed: {:>15}", format_count(world.confirmed));
            println!("Deaths:    {:>15}", format_count(world.deaths));
            println!("Recovered: {:>15}", format_count(world.recovered));
            println!();

            let ranked = rank_by_confirmed(summary.countries);
            let limit = top.unwrap_or(ranked.len());
            println!("{:>4}  {:<32} {:>15}", "#", "Country", "Confirmed");
            println!("{}", "-".repeat(53));
            for (i, country) in ranked.iter().take(limit).enumerate() {
                println!(
                    "{:>4}  {:<32} {:>15}",
                    i + 1,
                    country.country,
                    format_count(country.total_confirmed)
                );
            }
        }

        Commands::Country { slug } => {
            let client = CovidClient::new(config.covid_api.client_config())?;
            let (deaths, recovered, confirmed) = tokio::try_join!(
                client.fetch_country_status(&slug, CovidStatus::Deaths),
                client.fetch_country_status(&slug, CovidStatus::Recovered),
                client.fetch_country_status(&slug, CovidStatus::Confirmed),
            )
            .with_context(|| format!("Failed to load country detail for {}", slug))?;

            let locale = config.dashboard.locale;
            let deaths = sort_by_date_desc(deaths);
            let recovered = sort_by_date_desc(recovered);

            println!(
                "Deaths: {}    Recovered: {}",
                format_count(current_total(&deaths, |r| r.deaths)),
                format_count(current_total(&recovered, |r| r.recovered))
            );
            println!();
            print!("{}", series_table("Deaths", &deaths, |r| r.deaths, locale));
            println!();
            print!("{}", series_table("Recovered", &recovered, |r| r.recovered, locale));

            let chart = chart_series(
                &confirmed,
                config.dashboard.chart_window,
                locale,
                &config.dashboard.chart_title,
            );
            println!();
            println!("{}", chart.title);
            for (label, value) in chart.labels.iter().zip(&chart.values) {
                println!("  {:<8} {:>12}", label, value);
            }
        }

        Commands::User { id } => {
            let client = PlaceholderClient::new(
                config
                    .placeholder
                    .client_config(config.covid_api.request_timeout_secs),
            )?;
            let user = client.fetch_user(id).await?;
            println!("Name:    {}", user.name);
            println!("Email:   {}", user.email);
            println!("Address: {}", user.address.street);
        }

        Commands::Contacts {
            path,
            name,
            address,
            phone,
            kind,
        } => {
            let book = AddressBook::load(&path)?;
            let found: Vec<&Contact> = match (name, address, phone, kind) {
                (Some(name), _, _, _) => book.find_by_name(&name),
                (_, Some(address), _, _) => book.find_by_address(&address),
                (_, _, Some(phone), Some(kind)) => book.find_by_phone(phone, kind),
                _ => book.contacts().iter().collect(),
            };

            if found.is_empty() {
                println!("No contacts found");
            }
            for contact in found {
                println!("{} ({})", contact.name, contact.address);
                for (kind, number) in &contact.phones {
                    println!("  {:<8} {}", kind, number.num);
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// A series as a date/count table, one row per record
fn series_table(
    title: &str,
    records: &[CountryDailyRecord],
    field: fn(&CountryDailyRecord) -> u64,
    locale: Locale,
) -> String {
    let mut out = format!("{:<14} {:>12}\n{}\n", "Date", title, "-".repeat(27));
    for record in records {
        out.push_str(&format!(
            "{:<14} {:>12}\n",
            locale.list_date(&record.date),
            format_count(field(record))
        ));
    }
    out
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Covid Board v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Statistics API: {}", config.covid_api.base_url);

    let api = Arc::new(CovidClient::new(config.covid_api.client_config())?);

    let mut page = Document::new();
    let body = page.body();
    build_layout(&mut page, body);

    let dashboard = Arc::new(Dashboard::new(
        api,
        page,
        SvgChartRenderer::new(config.dashboard.chart_style()),
        config.dashboard.settings(),
    )?);

    // The page is still served if the first load fails; it can be retried
    // through the refresh endpoint.
    if let Err(e) = dashboard.summary().load_summary().await {
        tracing::warn!("Initial summary load failed: {}", e);
    }

    serve(AppState::new(dashboard), &config.server).await?;
    Ok(())
}
