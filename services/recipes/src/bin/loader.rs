//! Dictionary loader: seeds ingredients and tags from JSON files.
//!
//! ```bash
//! loader --database-url postgres://... ingredients data/ingredients.json
//! loader tags data/tags.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use sea_orm::Database;
use serde::de::DeserializeOwned;

use foodgram_core::tracing::init_tracing;

use foodgram_recipes::infra::db::{DbIngredientRepository, DbTagRepository};
use foodgram_recipes::usecase::ImportReport;
use foodgram_recipes::usecase::ingredient::{ImportIngredientsUseCase, IngredientRecord};
use foodgram_recipes::usecase::tag::{ImportTagsUseCase, TagRecord};

#[derive(Parser)]
#[command(about = "Import ingredient and tag dictionaries")]
struct Args {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import `[{"name", "measurement_unit"}]`
    Ingredients { file: PathBuf },
    /// Import `[{"name", "slug"}]`
    Tags { file: PathBuf },
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("warn,foodgram_recipes=info");
    let args = Args::parse();

    let db = Database::connect(&args.database_url)
        .await
        .context("failed to connect to database")?;

    let (what, report): (&str, ImportReport) = match &args.command {
        Command::Ingredients { file } => {
            let records: Vec<IngredientRecord> = read_records(file)?;
            let usecase = ImportIngredientsUseCase {
                repo: DbIngredientRepository { db },
            };
            ("ingredients", usecase.execute(&records).await?)
        }
        Command::Tags { file } => {
            let records: Vec<TagRecord> = read_records(file)?;
            let usecase = ImportTagsUseCase {
                repo: DbTagRepository { db },
            };
            ("tags", usecase.execute(&records).await?)
        }
    };

    println!(
        "{what}: {} added, {} already present",
        report.added, report.existing
    );
    Ok(())
}
