//! Two-document TF-IDF space built fresh for every (job, resume) pair.
//!
//! Each keyword set is a document in which every term occurs once. Terms
//! shorter than two characters are not indexed. IDF is smoothed over the
//! pair: `idf = ln((1 + N) / (1 + df)) + 1` with `N = 2`. Vectors are
//! L2-normalized.

use std::collections::BTreeSet;

const CORPUS_SIZE: f64 = 2.0;
const MIN_TERM_CHARS: usize = 2;

/// Job and resume vectors over a shared, sorted vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorPair {
    pub vocabulary: Vec<String>,
    pub job: Vec<f64>,
    pub resume: Vec<f64>,
}

impl VectorPair {
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

fn is_indexed(term: &str) -> bool {
    term.chars().count() >= MIN_TERM_CHARS
}

fn smoothed_idf(doc_freq: usize) -> f64 {
    ((1.0 + CORPUS_SIZE) / (1.0 + doc_freq as f64)).ln() + 1.0
}

fn l2_normalize(vector: &mut [f64]) {
    let norm = vector.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|w| *w /= norm);
    }
}

/// Builds the shared vector space for one job/resume comparison.
/// Both keyword sets empty (or containing only unindexed terms) yields an empty pair.
pub fn build_vectors(job_keywords: &BTreeSet<String>, resume_keywords: &BTreeSet<String>) -> VectorPair {
    let job_terms: BTreeSet<&str> = job_keywords
        .iter()
        .map(String::as_str)
        .filter(|t| is_indexed(t))
        .collect();
    let resume_terms: BTreeSet<&str> = resume_keywords
        .iter()
        .map(String::as_str)
        .filter(|t| is_indexed(t))
        .collect();

    let vocabulary: Vec<&str> = job_terms.union(&resume_terms).copied().collect();

    let mut job = Vec::with_capacity(vocabulary.len());
    let mut resume = Vec::with_capacity(vocabulary.len());

    for term in &vocabulary {
        let in_job = job_terms.contains(term);
        let in_resume = resume_terms.contains(term);
        let idf = smoothed_idf(usize::from(in_job) + usize::from(in_resume));

        job.push(if in_job { idf } else { 0.0 });
        resume.push(if in_resume { idf } else { 0.0 });
    }

    l2_normalize(&mut job);
    l2_normalize(&mut resume);

    VectorPair {
        vocabulary: vocabulary.into_iter().map(str::to_string).collect(),
        job,
        resume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_vocabulary_is_sorted_union() {
        let pair = build_vectors(&set(&["rust", "async"]), &set(&["tokio", "rust"]));
        assert_eq!(pair.vocabulary, vec!["async", "rust", "tokio"]);
        assert_eq!(pair.job.len(), 3);
        assert_eq!(pair.resume.len(), 3);
    }

    #[test]
    fn test_idf_values() {
        assert!((smoothed_idf(2) - 1.0).abs() < 1e-12);
        assert!((smoothed_idf(1) - (1.5_f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_shared_terms_weigh_less_than_unique_terms() {
        let pair = build_vectors(&set(&["rust", "async"]), &set(&["rust", "tokio"]));
        // vocabulary: async, rust, tokio
        assert!(pair.job[0] > pair.job[1]);
        assert_eq!(pair.job[2], 0.0);
        assert_eq!(pair.resume[0], 0.0);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let pair = build_vectors(&set(&["rust", "async", "axum"]), &set(&["rust"]));
        let job_norm: f64 = pair.job.iter().map(|w| w * w).sum::<f64>().sqrt();
        let resume_norm: f64 = pair.resume.iter().map(|w| w * w).sum::<f64>().sqrt();
        assert!((job_norm - 1.0).abs() < 1e-9);
        assert!((resume_norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_character_terms_are_not_indexed() {
        let pair = build_vectors(&set(&["c", "r"]), &set(&["c"]));
        assert!(pair.is_empty());
    }

    #[test]
    fn test_both_empty_yields_empty_pair() {
        let pair = build_vectors(&BTreeSet::new(), &BTreeSet::new());
        assert!(pair.is_empty());
        assert!(pair.job.is_empty());
        assert!(pair.resume.is_empty());
    }

    #[test]
    fn test_one_side_empty_yields_zero_vector() {
        let pair = build_vectors(&BTreeSet::new(), &set(&["designer"]));
        assert_eq!(pair.job, vec![0.0]);
        assert!((pair.resume[0] - 1.0).abs() < 1e-12);
    }
}
