//! Dear Days conversion service entry point.

use clap::{Parser, Subcommand};
use deardays::{create_rest_router, CalendarConverter, CalendarType, Config, OpenApiClient, RestApiConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

/// Dear Days: lunar-solar calendar conversion service
#[derive(Parser, Debug)]
#[command(name = "deardays")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a solar date (YYYY-MM-DD) to its lunar representation
    SolarToLunar {
        /// Solar date, e.g. 1988-09-25
        date: String,
    },
    /// Convert a lunar date (YYYY-MM-DD) to its solar representation
    LunarToSolar {
        /// Lunar date, e.g. 1988-08-15
        date: String,
        /// Use the leap-month interpretation
        #[arg(short, long)]
        leap_month: bool,
    },
    /// List the solar candidates for a lunar date (leap and regular)
    Candidates {
        /// Lunar date, e.g. 1988-08-15
        date: String,
    },
    /// Resolve an event date into its dual-calendar representation
    Resolve {
        /// Calendar type the date was entered in (solar or lunar)
        #[arg(value_enum)]
        calendar_type: CalendarKind,
        /// The date, YYYY-MM-DD
        date: String,
        /// Explicit leap-month preference (lunar only)
        #[arg(short, long)]
        leap_month: Option<bool>,
    },
    /// Solar occurrences of a fixed lunar month/day across a year range
    Recurrence {
        /// Lunar month (1-12)
        lunar_month: u32,
        /// Lunar day (1-31)
        lunar_day: u32,
        /// First year of the range (default: current year)
        #[arg(long)]
        from: Option<i32>,
        /// Last year of the range (default: from + 9)
        #[arg(long)]
        to: Option<i32>,
    },
    /// Run the REST API server
    Serve {
        /// HTTP port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Emit logs as JSON
        #[arg(long)]
        json_logs: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum CalendarKind {
    Solar,
    Lunar,
}

impl From<CalendarKind> for CalendarType {
    fn from(kind: CalendarKind) -> Self {
        match kind {
            CalendarKind::Solar => CalendarType::Solar,
            CalendarKind::Lunar => CalendarType::Lunar,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let is_serve = matches!(args.command, Some(Command::Serve { .. }) | None);

    if !is_serve {
        // Minimal logging for one-shot CLI commands
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::stderr)
            .init();
    }

    let load_config = |path: &Option<String>| -> anyhow::Result<Config> {
        Ok(match path {
            Some(p) => Config::from_file(p)?,
            None => Config::load()?,
        })
    };

    match args.command {
        Some(Command::SolarToLunar { date }) => {
            cli::run_solar_to_lunar(load_config(&args.config)?, date, args.json).await
        }
        Some(Command::LunarToSolar { date, leap_month }) => {
            cli::run_lunar_to_solar(load_config(&args.config)?, date, leap_month, args.json).await
        }
        Some(Command::Candidates { date }) => {
            cli::run_candidates(load_config(&args.config)?, date, args.json).await
        }
        Some(Command::Resolve {
            calendar_type,
            date,
            leap_month,
        }) => {
            let calendar_type: CalendarType = calendar_type.into();
            let (solar_date, lunar_date) = match calendar_type {
                CalendarType::Solar => (Some(date), None),
                CalendarType::Lunar => (None, Some(date)),
            };
            cli::run_resolve(
                load_config(&args.config)?,
                calendar_type,
                solar_date,
                lunar_date,
                leap_month,
                args.json,
            )
            .await
        }
        Some(Command::Recurrence {
            lunar_month,
            lunar_day,
            from,
            to,
        }) => {
            use chrono::Datelike;
            let from_year = from.unwrap_or_else(|| chrono::Utc::now().year());
            let to_year = to.unwrap_or(from_year + 9);
            cli::run_recurrence(
                load_config(&args.config)?,
                lunar_month,
                lunar_day,
                from_year,
                to_year,
                args.json,
            )
            .await
        }
        Some(Command::Serve { port, json_logs }) => {
            run_server(&args.config, port, json_logs).await
        }
        None => run_server(&args.config, None, false).await,
    }
}

/// Run the REST API server.
async fn run_server(
    config_path: &Option<String>,
    port: Option<u16>,
    json_logs: bool,
) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Dear Days conversion service v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    if let Some(p) = port {
        config.server.http_port = p;
    }

    tracing::info!(
        http_port = config.server.http_port,
        base_url = %config.lunar_api.base_url,
        "Configuration loaded"
    );

    let client = OpenApiClient::from_config(&config.lunar_api)?;
    let converter = CalendarConverter::new(Arc::new(client));

    let rest_config = RestApiConfig {
        enable_cors: config.server.enable_cors,
        cors_origins: config.server.cors_origins.clone(),
        ..Default::default()
    };
    let router = create_rest_router(converter, &rest_config);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.server.http_port));
    tracing::info!("REST API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
