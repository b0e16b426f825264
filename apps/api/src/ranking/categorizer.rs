use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) for `Category::High`.
pub const HIGH_MIN: f64 = 70.0;
/// Lower bound (inclusive) for `Category::Medium`.
pub const MEDIUM_MIN: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    High,
    Medium,
    Low,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::High => "High",
            Category::Medium => "Medium",
            Category::Low => "Low",
        }
    }
}

/// HIGH if score ≥ 70, MEDIUM if 40 ≤ score < 70, LOW otherwise.
pub fn categorize(score: f64) -> Category {
    if score >= HIGH_MIN {
        Category::High
    } else if score >= MEDIUM_MIN {
        Category::Medium
    } else {
        Category::Low
    }
}
