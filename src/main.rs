use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use krishi_sahayak::{
    classifier::{SeededRandom, SoilClassifier},
    config::Config,
    db,
    routes::router,
    seed::seed_demo_users,
    services::{OpenAiAssistant, OpenWeatherClient},
    state::AppState,
    store::{MemoryStore, PgStore, Store},
};

#[derive(Debug, Parser)]
#[command(version, about = "Krishi Sahayak farming assistant API")]
struct Cli {
    /// Insert the demo farmer accounts before serving.
    #[arg(long)]
    seed: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let result = if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).compact().try_init()
    };
    if let Err(e) = result {
        eprintln!("tracing init failed: {e}");
    }
}

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url)
                .await
                .context("connecting to Postgres")?;
            db::migrate(&pool).await.context("running migrations")?;
            Ok(Arc::new(PgStore::new(pool)))
        }
        None => {
            warn!("DATABASE_URL not set; data lives in memory and is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let config = Config::from_env()?;
    let store = build_store(&config).await?;

    if cli.seed {
        let created = seed_demo_users(store.as_ref(), config.bcrypt_cost).await?;
        info!(created, "demo users seeded");
    }

    let classifier = match config.soil_seed {
        Some(seed) => SoilClassifier::new(SeededRandom::new(seed)),
        None => SoilClassifier::default(),
    };
    if config.weather.api_key.is_none() {
        warn!("OPENWEATHER_API_KEY not set; /weather will fail");
    }
    if config.assistant.api_key.is_none() {
        warn!("OPENAI_API_KEY not set; /voice-assistant will fail");
    }

    let state = AppState {
        store,
        classifier: Arc::new(classifier),
        weather: Arc::new(OpenWeatherClient::new(&config.weather)?),
        assistant: Arc::new(OpenAiAssistant::new(&config.assistant)),
        config: Arc::new(config.clone()),
    };

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
