//! Text normalizer — turns raw text into a deduplicated keyword set.
//!
//! The stopword list is a process-wide, read-only `KeywordModel`. Call
//! `init_model` once at startup so a bad override file fails before the
//! server accepts traffic; callers that never initialize (tests, tools) get
//! the embedded English list on first use.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::{info, warn};

use crate::ranking::stopwords;

static MODEL: OnceLock<KeywordModel> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read stopword file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Stopword file {path} is not a JSON array of strings: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Stopword file {path} contains no words")]
    Empty { path: PathBuf },

    #[error("Keyword model already initialized from {active}; cannot switch to {requested}")]
    AlreadyInitialized { active: String, requested: String },
}

/// Read-only stopword model shared by every normalization call.
#[derive(Debug, Clone)]
pub struct KeywordModel {
    stop_words: HashSet<String>,
    source: String,
}

impl KeywordModel {
    /// The compiled-in English list.
    pub fn english() -> Self {
        KeywordModel {
            stop_words: stopwords::ENGLISH.iter().map(|w| w.to_string()).collect(),
            source: "embedded:en".to_string(),
        }
    }

    /// Loads a stopword list from a JSON array of strings. Words are lowercased.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let words: Vec<String> = serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let stop_words: HashSet<String> = words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        if stop_words.is_empty() {
            return Err(ModelError::Empty {
                path: path.to_path_buf(),
            });
        }

        Ok(KeywordModel {
            stop_words,
            source: path.display().to_string(),
        })
    }

    #[inline]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Keyword set for `text` under this model.
    pub fn normalize(&self, text: &str) -> BTreeSet<String> {
        tokenize(text)
            .into_iter()
            .filter(|t| is_alphabetic(t) && !self.is_stop_word(t))
            .collect()
    }
}

/// Installs the process-wide model. Must run before the first `normalize` call.
/// Fails if a different model is already active.
pub fn init_model(path: Option<&Path>) -> Result<&'static KeywordModel, ModelError> {
    let loaded = match path {
        Some(p) => KeywordModel::from_file(p)?,
        None => KeywordModel::english(),
    };

    if let Err(rejected) = MODEL.set(loaded) {
        let active = model();
        if active.source() != rejected.source() {
            return Err(ModelError::AlreadyInitialized {
                active: active.source().to_string(),
                requested: rejected.source().to_string(),
            });
        }
        warn!("Keyword model was already initialized from {}", active.source());
    }
    let model = model();
    info!(
        "Keyword model ready ({} stopwords from {})",
        model.len(),
        model.source()
    );
    Ok(model)
}

/// The process-wide model, falling back to the embedded English list.
pub fn model() -> &'static KeywordModel {
    MODEL.get_or_init(KeywordModel::english)
}

/// Lowercases `text` and returns its keyword set: alphabetic, non-stopword tokens.
pub fn normalize(text: &str) -> BTreeSet<String> {
    model().normalize(text)
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

/// True for whitespace-delimited tokens that stay whole: emails, URLs and
/// dotted names such as "node.js" or "e.g". A '.' between a lowercase and an
/// uppercase letter is a missing sentence space and does not count.
fn is_atomic(core: &str) -> bool {
    if core.contains('@') || core.contains("://") {
        return true;
    }

    let chars: Vec<char> = core.chars().collect();
    chars.windows(3).any(|w| {
        w[1] == '.'
            && w[0].is_alphanumeric()
            && w[2].is_alphanumeric()
            && !(w[0].is_lowercase() && w[2].is_uppercase())
    })
}

/// Splits text into lowercased word tokens. Chunks are whitespace-delimited
/// with surrounding punctuation stripped. Emails, URLs and dotted names are
/// kept whole; everything else splits on inner punctuation. Clitics are split
/// off at the apostrophe: "don't" -> ["do", "n't"], "engineer's" -> ["engineer", "'s"].
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for chunk in text.split_whitespace() {
        let core = chunk.trim_matches(|c: char| !c.is_alphanumeric());
        if core.is_empty() {
            continue;
        }
        if is_atomic(core) {
            tokens.push(core.to_lowercase());
            continue;
        }

        let lowered = core.to_lowercase();
        for word in lowered.split(|c: char| !(c.is_alphanumeric() || is_apostrophe(c))) {
            let word = word.trim_matches(is_apostrophe);
            if word.is_empty() {
                continue;
            }
            split_clitic(word, &mut tokens);
        }
    }

    tokens
}

fn split_clitic(word: &str, tokens: &mut Vec<String>) {
    let Some(idx) = word.find(is_apostrophe) else {
        tokens.push(word.to_string());
        return;
    };

    let (stem, suffix) = word.split_at(idx);
    let suffix_body: String = suffix.chars().skip(1).collect();

    if suffix_body == "t" && stem.len() > 1 && stem.ends_with('n') {
        tokens.push(stem[..stem.len() - 1].to_string());
        tokens.push("n't".to_string());
    } else {
        tokens.push(stem.to_string());
        tokens.push(format!("'{suffix_body}"));
    }
}
