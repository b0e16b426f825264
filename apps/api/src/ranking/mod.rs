// Resume ranking pipeline.
// normalize → per-pair TF-IDF → cosine score → category → stable sort.
// Handlers are thin; all scoring goes through engine::RankingEngine.

pub mod categorizer;
pub mod engine;
pub mod handlers;
pub mod normalizer;
pub mod similarity;
mod stopwords;
pub mod vectorizer;
