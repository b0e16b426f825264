//! Ranking engine — scores every resume against one job description and
//! orders the results.
//!
//! The job description is normalized once per call. Each resume is scored
//! independently, so a single unreadable or empty resume cannot affect the
//! others.

use std::sync::Arc;

use tracing::{debug, info};

use crate::models::document::Document;
use crate::models::ranking::{CategoryBuckets, CategoryRow, LeaderboardRow, RankedResult, ScoreEntry};
use crate::ranking::categorizer::{categorize, Category};
use crate::ranking::similarity::{PairScorer, TfIdfCosineScorer};

/// Document id used for the job description.
pub const JOB_DOCUMENT_ID: &str = "job_description";

/// One already-extracted resume. Duplicated filenames are kept as distinct entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeInput {
    pub filename: String,
    pub text: String,
}

impl ResumeInput {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        ResumeInput {
            filename: filename.into(),
            text: text.into(),
        }
    }
}

#[derive(Clone)]
pub struct RankingEngine {
    scorer: Arc<dyn PairScorer>,
}

impl Default for RankingEngine {
    fn default() -> Self {
        RankingEngine::new(Arc::new(TfIdfCosineScorer))
    }
}

impl RankingEngine {
    pub fn new(scorer: Arc<dyn PairScorer>) -> Self {
        RankingEngine { scorer }
    }

    pub fn backend(&self) -> &'static str {
        self.scorer.backend()
    }

    /// Scores `resumes` in input order, then stable-sorts by descending score.
    pub fn rank(&self, job_text: &str, resumes: &[ResumeInput]) -> RankedResult {
        let job = Document::new(JOB_DOCUMENT_ID, job_text);
        debug!("Job description normalized to {} keywords", job.keywords.len());

        let entries: Vec<ScoreEntry> = resumes
            .iter()
            .map(|resume| {
                let doc = Document::new(resume.filename.as_str(), resume.text.as_str());
                self.score_document(&job, &doc)
            })
            .collect();

        let result = RankedResult::from_entries(entries);
        info!(
            "Ranked {} resumes with {} backend",
            result.len(),
            self.scorer.backend()
        );
        result
    }

    fn score_document(&self, job: &Document, resume: &Document) -> ScoreEntry {
        let score = self.scorer.score(job, resume);
        let category = categorize(score);

        let (matched, missing): (Vec<&String>, Vec<&String>) = job
            .keywords
            .iter()
            .partition(|kw| resume.keywords.contains(kw.as_str()));

        debug!(
            "{}: score={score:.2} category={} matched={}",
            resume.id,
            category.label(),
            matched.len()
        );

        ScoreEntry {
            document_id: resume.id.clone(),
            score,
            category,
            matched_keywords: matched.into_iter().cloned().collect(),
            missing_keywords: missing.into_iter().cloned().collect(),
        }
    }
}

/// The first `min(n, len)` entries of `result`. Any `n` is accepted.
pub fn top_n(result: &RankedResult, n: usize) -> &[ScoreEntry] {
    let entries = result.entries();
    &entries[..n.min(entries.len())]
}

/// Splits `result` into HIGH / MEDIUM / LOW buckets, preserving ranked order.
pub fn partition(result: &RankedResult) -> CategoryBuckets {
    let mut buckets = CategoryBuckets::default();
    for entry in result.entries() {
        let row = CategoryRow {
            filename: entry.document_id.clone(),
            score: entry.score,
        };
        match entry.category {
            Category::High => buckets.high.push(row),
            Category::Medium => buckets.medium.push(row),
            Category::Low => buckets.low.push(row),
        }
    }
    buckets
}

/// Top-`n` view with 1-based rank positions.
pub fn leaderboard(result: &RankedResult, n: usize) -> Vec<LeaderboardRow> {
    top_n(result, n)
        .iter()
        .enumerate()
        .map(|(i, entry)| LeaderboardRow {
            rank: i + 1,
            filename: entry.document_id.clone(),
            score: entry.score,
        })
        .collect()
}
