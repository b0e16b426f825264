use serde::{Deserialize, Serialize};

use crate::ranking::categorizer::Category;

/// Score of one resume against the job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub document_id: String,
    /// Similarity percentage in 0.0..=100.0, rounded to two decimals.
    pub score: f64,
    pub category: Category,
    /// Job keywords present in the resume, sorted.
    pub matched_keywords: Vec<String>,
    /// Job keywords absent from the resume, sorted.
    pub missing_keywords: Vec<String>,
}

/// Score entries ordered by descending score. Equal scores keep input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedResult {
    entries: Vec<ScoreEntry>,
}

impl RankedResult {
    /// Stable-sorts `entries` by descending score.
    pub fn from_entries(mut entries: Vec<ScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        RankedResult { entries }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `(filename, score)` pair used by the categorical view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub filename: String,
    pub score: f64,
}

/// Ranked entries split by category, each bucket in ranked order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBuckets {
    pub high: Vec<CategoryRow>,
    pub medium: Vec<CategoryRow>,
    pub low: Vec<CategoryRow>,
}

/// One leaderboard line. `rank` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub filename: String,
    pub score: f64,
}
