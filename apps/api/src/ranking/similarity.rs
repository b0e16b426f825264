//! Similarity scoring — cosine over the pairwise TF-IDF space, scaled to 0–100.
//!
//! `RankingEngine` holds an `Arc<dyn PairScorer>` so the scoring backend can be
//! swapped without touching the engine or handlers.

use crate::models::document::Document;
use crate::ranking::vectorizer::build_vectors;

/// Scores one resume against the job description. Implementations must be
/// pure: the same pair always yields the same score in `[0, 100]`.
pub trait PairScorer: Send + Sync {
    fn score(&self, job: &Document, resume: &Document) -> f64;

    /// Short label surfaced in logs.
    fn backend(&self) -> &'static str;
}

/// Default scorer: per-pair TF-IDF vectors compared by cosine similarity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TfIdfCosineScorer;

impl PairScorer for TfIdfCosineScorer {
    fn score(&self, job: &Document, resume: &Document) -> f64 {
        let pair = build_vectors(&job.keywords, &resume.keywords);
        if pair.is_empty() {
            return 0.0;
        }
        score(&pair.job, &pair.resume)
    }

    fn backend(&self) -> &'static str {
        "tfidf-cosine"
    }
}

/// Cosine similarity. Zero norm on either side (or mismatched lengths) gives 0.0.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Cosine similarity as a percentage rounded to two decimals, clamped to [0, 100].
pub fn score(job_vector: &[f64], resume_vector: &[f64]) -> f64 {
    let percent = cosine(job_vector, resume_vector) * 100.0;
    round2(percent).clamp(0.0, 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_score_100() {
        let v = [0.3, 0.5, 0.8];
        assert_eq!(score(&v, &v), 100.0);
    }

    #[test]
    fn test_orthogonal_vectors_score_0() {
        assert_eq!(score(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_zero_vector_scores_0() {
        assert_eq!(score(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
        assert_eq!(score(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(score(&[], &[]), 0.0);
    }

    #[test]
    fn test_score_rounds_to_two_decimals() {
        // cos = 1 / sqrt(2) = 0.70710678...
        assert_eq!(score(&[1.0, 0.0], &[1.0, 1.0]), 70.71);
    }

    #[test]
    fn test_mismatched_lengths_score_0() {
        assert_eq!(cosine(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_self_similarity_of_document_is_100() {
        let doc = Document::new("jd", "Senior Rust engineer building distributed systems");
        assert_eq!(TfIdfCosineScorer.score(&doc, &doc), 100.0);
    }

    #[test]
    fn test_self_similarity_of_empty_document_is_0() {
        let doc = Document::new("jd", "the and of");
        assert_eq!(TfIdfCosineScorer.score(&doc, &doc), 0.0);
    }

    #[test]
    fn test_scorer_backend_label() {
        assert_eq!(TfIdfCosineScorer.backend(), "tfidf-cosine");
    }
}
