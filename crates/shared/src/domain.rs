use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// User-entered text, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InputText(String);

impl InputText {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Display bucket for a label returned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PredictionCategory {
    HighInfo,
    LowInfo,
    MediumInfo,
}

impl PredictionCategory {
    /// Buckets a label by case-insensitive keyword match.
    ///
    /// "not informative" is checked before "informative" so a negated label
    /// never lands in the high bucket.
    pub fn classify(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("not informative") {
            Self::LowInfo
        } else if lower.contains("high") || lower.contains("informative") {
            Self::HighInfo
        } else if lower.contains("low") {
            Self::LowInfo
        } else {
            Self::MediumInfo
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::HighInfo => "high-info",
            Self::LowInfo => "low-info",
            Self::MediumInfo => "medium-info",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::HighInfo => "✅",
            Self::LowInfo => "ℹ️",
            Self::MediumInfo => "📊",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::HighInfo => {
                "This tweet is informative: it contains valuable information about typhoons/floods."
            }
            Self::LowInfo => "This tweet has limited informational value about typhoons/floods.",
            Self::MediumInfo => "Classification complete.",
        }
    }
}

impl fmt::Display for PredictionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// A label from the backend together with its display bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    label: String,
    category: PredictionCategory,
}

impl PredictionResult {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let category = PredictionCategory::classify(&label);
        Self { label, category }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn category(&self) -> PredictionCategory {
        self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_text_is_trimmed() {
        let input = InputText::parse("  flood warning in Cebu \n").expect("valid");
        assert_eq!(input.as_str(), "flood warning in Cebu");
    }

    #[test]
    fn whitespace_only_input_is_rejected() {
        assert_eq!(InputText::parse(""), Err(ValidationError::EmptyInput));
        assert_eq!(InputText::parse(" \t\r\n "), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn high_and_informative_labels_map_to_high_info() {
        assert_eq!(PredictionCategory::classify("High"), PredictionCategory::HighInfo);
        assert_eq!(
            PredictionCategory::classify("Informative"),
            PredictionCategory::HighInfo
        );
        assert_eq!(
            PredictionCategory::classify("HIGHLY RELEVANT"),
            PredictionCategory::HighInfo
        );
    }

    #[test]
    fn negated_and_low_labels_map_to_low_info() {
        assert_eq!(
            PredictionCategory::classify("Not Informative"),
            PredictionCategory::LowInfo
        );
        assert_eq!(PredictionCategory::classify("low"), PredictionCategory::LowInfo);
    }

    #[test]
    fn unmatched_labels_default_to_medium_info() {
        assert_eq!(
            PredictionCategory::classify("Medium"),
            PredictionCategory::MediumInfo
        );
        assert_eq!(
            PredictionCategory::classify("Disaster-Related"),
            PredictionCategory::MediumInfo
        );
        assert_eq!(PredictionCategory::classify(""), PredictionCategory::MediumInfo);
    }

    #[test]
    fn high_description_mentions_informativeness() {
        let result = PredictionResult::new("High");
        assert_eq!(result.category().css_class(), "high-info");
        assert!(result.category().description().contains("informative"));
    }

    #[test]
    fn category_serializes_as_css_class() {
        let json = serde_json::to_string(&PredictionCategory::MediumInfo).expect("json");
        assert_eq!(json, "\"medium-info\"");
    }
}
