//! Default seed script - generates a full workspace dataset and writes it
//! to a SQLite database.
//!
//! Run with:
//! ```
//! cargo run --bin seed
//! ```
//!
//! Environment:
//! - `WORKSIM_CONFIG`: path to a JSON config file (defaults used otherwise)
//! - `WORKSIM_SEED`: RNG seed (default 12345)
//! - `DATABASE_PATH`: output SQLite file (default `output/worksim.sqlite`)
//! - `OPENAI_API_KEY`: enables generated text instead of template fallbacks

use std::path::PathBuf;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::EnvFilter;
use worksim::config::SimConfig;
use worksim::db::Seeder;
use worksim::pipeline::generate_dataset;
use worksim::text::{OpenAiText, TextProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("WORKSIM_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading config from {path}");
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str::<SimConfig>(&raw)?
        }
        Err(_) => SimConfig::default(),
    };
    config.validate()?;

    let seed = match std::env::var("WORKSIM_SEED") {
        Ok(value) => value.parse::<u64>()?,
        Err(_) => 12345, // Reproducible data
    };

    let provider: Option<Arc<OpenAiText>> = match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => {
            tracing::info!("Using OpenAI text generation");
            Some(Arc::new(OpenAiText::new(key)))
        }
        _ => {
            tracing::info!("No OPENAI_API_KEY set, using template text");
            None
        }
    };

    let batch_size = config.batch_size;

    // Text generation uses a blocking HTTP client, so run the whole
    // generation pass off the async runtime.
    let gen_provider = provider.clone();
    let dataset = tokio::task::spawn_blocking(move || {
        let mut rng = StdRng::seed_from_u64(seed);
        let text = gen_provider.as_deref().map(|p| p as &dyn TextProvider);
        generate_dataset(&config, text, &mut rng)
    })
    .await??;

    let db_path = std::env::var("DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("output/worksim.sqlite"));
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Connected to database at {}", db_path.display());

    let seeder = Seeder::new(pool).with_batch_size(batch_size);
    seeder.initialize_schema().await?;
    seeder.seed_all(&dataset).await?;

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!("  Organization: {}", dataset.organization.name);
    tracing::info!("  Teams: {}", dataset.teams.len());
    tracing::info!("  Users: {}", dataset.users.len());
    tracing::info!("  Memberships: {}", dataset.memberships.len());
    tracing::info!("  Projects: {}", dataset.projects.len());
    tracing::info!("  Sections: {}", dataset.sections.len());
    tracing::info!("  Tasks: {}", dataset.tasks.len());
    tracing::info!("  Comments: {}", dataset.comments.len());

    if let Some(provider) = provider {
        let degraded = provider.degraded_calls();
        if degraded > 0 {
            tracing::warn!("{degraded} text calls fell back to templates");
        }
    }

    Ok(())
}
