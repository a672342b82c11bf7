//! Goal memory commands.

use clap::Subcommand;
#[cfg(feature = "fastembed")]
use minddoer_core::memory::FastEmbedder;
#[cfg(not(feature = "fastembed"))]
use minddoer_core::memory::HashingEmbedder;
use minddoer_core::memory::{self, Embedder, GoalDocument, GoalIndex, IndexHandle};
use minddoer_core::{Config, MemoryError, ValidationError};
use tracing::info;

#[derive(Subcommand)]
pub enum GoalsAction {
    /// Write the starter goals (career, health, relationship) to a new index
    Seed {
        /// Replace an existing index
        #[arg(long)]
        force: bool,
    },
    /// Add a goal to the index
    Add {
        /// Goal statement
        content: String,
        /// Category metadata (e.g. career, health)
        #[arg(long)]
        category: Option<String>,
        /// Importance metadata (e.g. high, medium)
        #[arg(long)]
        importance: Option<String>,
    },
    /// List stored goals
    List {
        #[arg(long)]
        json: bool,
    },
    /// Find the goals most similar to a text
    Query {
        text: String,
        /// Number of matches (default: goals.top_k from config)
        #[arg(short, long)]
        k: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: GoalsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let handle = IndexHandle::in_dir(memory::default_index_dir()?);
    let top_k = config.goals.top_k;
    run_with(action, &handle, embedder(&config)?, top_k)
}

/// Sentence embeddings when built with the `fastembed` feature.
#[cfg(feature = "fastembed")]
fn embedder(_config: &Config) -> Result<FastEmbedder, Box<dyn std::error::Error>> {
    Ok(FastEmbedder::new(memory::default_model_cache_dir()?)?)
}

#[cfg(not(feature = "fastembed"))]
fn embedder(config: &Config) -> Result<HashingEmbedder, Box<dyn std::error::Error>> {
    Ok(HashingEmbedder::new(config.goals.dimension))
}

fn run_with<E: Embedder>(
    action: GoalsAction,
    handle: &IndexHandle,
    embedder: E,
    top_k: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        GoalsAction::Seed { force } => {
            if handle.exists() {
                if !force {
                    return Err(format!(
                        "goal index already exists at {} (use --force to replace it)",
                        handle.dir().display()
                    )
                    .into());
                }
                info!(path = %handle.dir().display(), "replacing goal index");
            }
            let index = GoalIndex::from_documents(memory::seed_goals(), embedder)?;
            index.save(handle.dir())?;
            println!("Seeded {} goals", index.len());
        }
        GoalsAction::Add {
            content,
            category,
            importance,
        } => {
            if content.trim().is_empty() {
                return Err(ValidationError::Empty("goal".to_string()).into());
            }
            let mut document = GoalDocument::new(content);
            if let Some(category) = category {
                document = document.with_metadata("category", category);
            }
            if let Some(importance) = importance {
                document = document.with_metadata("importance", importance);
            }

            let mut index = open_or_create(handle, embedder)?;
            index.add(document)?;
            index.save(handle.dir())?;
            println!("Goal added ({} total)", index.len());
        }
        GoalsAction::List { json } => {
            let index = open_or_create(handle, embedder)?;
            if json {
                let documents: Vec<_> = index.documents().collect();
                println!("{}", serde_json::to_string_pretty(&documents)?);
            } else {
                for (i, document) in index.documents().enumerate() {
                    println!("{}. {}{}", i + 1, document.content, format_metadata(document));
                }
            }
        }
        GoalsAction::Query { text, k, json } => {
            let index = open_or_create(handle, embedder)?;
            let results = index.query(&text, k.unwrap_or(top_k))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("No goals stored.");
            } else {
                for result in &results {
                    println!(
                        "{:.3}  {}{}",
                        result.score,
                        result.document.content,
                        format_metadata(&result.document)
                    );
                }
            }
        }
    }
    Ok(())
}

/// Load the index, or start one holding only the placeholder goal.
fn open_or_create<E: Embedder>(
    handle: &IndexHandle,
    embedder: E,
) -> Result<GoalIndex<E>, MemoryError> {
    if !handle.exists() {
        info!("created new goal memory");
        let index = GoalIndex::from_texts([memory::PLACEHOLDER_GOAL], embedder)?;
        index.save(handle.dir())?;
        return Ok(index);
    }
    GoalIndex::load(handle, embedder)
}

fn format_metadata(document: &GoalDocument) -> String {
    if document.metadata.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = document
        .metadata
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    format!(" [{}]", pairs.join(", "))
}
