//! Goal memory: a small similarity index over goal statements.
//!
//! Nothing here is initialized implicitly. Callers construct an
//! [`Embedder`], build or [`GoalIndex::load`] an index with it, and decide
//! where it is persisted.

mod embedder;
mod index;
#[cfg(feature = "fastembed")]
mod semantic;

pub use embedder::{cosine_similarity, Embedder, HashingEmbedder};
#[cfg(feature = "fastembed")]
pub use semantic::FastEmbedder;
pub use index::{GoalDocument, GoalIndex, IndexHandle, ScoredGoal};

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::storage::data_dir;

/// Directory name of the index inside the data directory.
pub const INDEX_DIR: &str = "goal_memory_index";

/// Placeholder document for a brand-new index.
pub const PLACEHOLDER_GOAL: &str = "Personal goals and habits";

/// Default index location: `<data_dir>/goal_memory_index`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn default_index_dir() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join(INDEX_DIR))
}

/// Model cache for [`FastEmbedder`]: `<data_dir>/cache/fastembed`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
#[cfg(feature = "fastembed")]
pub fn default_model_cache_dir() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("cache").join("fastembed"))
}

/// Starter goals covering career, health and relationships.
pub fn seed_goals() -> Vec<GoalDocument> {
    vec![
        GoalDocument::new(
            "Become an expert in building AI agents using LangChain and LangGraph.",
        )
        .with_metadata("category", "career")
        .with_metadata("importance", "high"),
        GoalDocument::new("Maintain hair and skin health by following a weekly self-care routine.")
            .with_metadata("category", "health")
            .with_metadata("importance", "medium"),
        GoalDocument::new(
            "Improve relationship communication skills with thoughtful WhatsApp responses.",
        )
        .with_metadata("category", "relationship")
        .with_metadata("importance", "high"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_goals_cover_three_categories() {
        let goals = seed_goals();
        let categories: Vec<_> = goals
            .iter()
            .filter_map(|g| g.metadata.get("category").map(String::as_str))
            .collect();
        assert_eq!(categories, vec!["career", "health", "relationship"]);
    }

    #[test]
    fn career_query_finds_career_goal() {
        let index = GoalIndex::from_documents(seed_goals(), HashingEmbedder::default()).unwrap();
        let results = index.query("What are my career goals?", 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.metadata["category"], "career");
    }
}
