use std::collections::BTreeSet;

use serde::Serialize;

use crate::ranking::normalizer::normalize;

/// A normalized document. Built once per invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: String,
    #[serde(skip)]
    pub raw_text: String,
    pub keywords: BTreeSet<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let keywords = normalize(&raw_text);
        Document {
            id: id.into(),
            raw_text,
            keywords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_text() {
        let doc = Document::new("a.pdf", "Python and Rust");
        assert_eq!(doc.id, "a.pdf");
        assert_eq!(doc.raw_text, "Python and Rust");
        assert!(doc.keywords.contains("python"));
        assert!(doc.keywords.contains("rust"));
        assert!(!doc.keywords.contains("and"));
    }

    #[test]
    fn test_empty_text_is_empty_document() {
        assert!(Document::new("job_description", "").keywords.is_empty());
    }
}
