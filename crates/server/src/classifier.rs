use std::path::Path;

use crate::{
    cleaning::clean_tweet_text,
    model::{LabelModel, LabelModelError, LexiconModel, UNCERTAIN_LABEL},
};

pub const DISASTER_RELATED_LABEL: &str = "Disaster-Related";
pub const NOT_DISASTER_RELATED_LABEL: &str = "Not Disaster-Related";

const DISASTER_KEYWORDS: &[&str] = &[
    "typhoon",
    "flood",
    "flooding",
    "storm",
    "tsunami",
    "earthquake",
    "disaster",
    "evacuation",
    "emergency",
    "warning",
    "alert",
    "rescue",
    "landslide",
    "heavy rain",
    "rainfall",
    "tornado",
    "hurricane",
    "damage",
    "casualties",
    "victim",
    "injured",
    "missing person",
    "relief",
    "shelter",
    "ndrrmc",
    "pagasa",
    "red cross",
];

const ACTION_KEYWORDS: &[&str] = &[
    "prepare",
    "ready",
    "stay safe",
    "take care",
    "be careful",
    "update",
    "news",
    "report",
    "situation",
    "status",
];

const NON_DISASTER_KEYWORDS: &[&str] = &[
    "happy",
    "birthday",
    "food",
    "pizza",
    "coffee",
    "lunch",
    "dinner",
    "movie",
    "music",
    "party",
    "celebrate",
    "love",
    "cute",
    "funny",
    "lol",
    "haha",
    "weekend",
    "selfie",
    "shopping",
    "travel",
    "netflix",
    "gaming",
    "workout",
    "fitness",
    "fashion",
];

const MIN_WORDS_FOR_MODEL: usize = 3;

fn count_hits(text_lower: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| text_lower.contains(*keyword))
        .count()
}

/// Keyword rules that take precedence over the model label.
///
/// Matching is by substring on the lowercased raw tweet. `None` means the
/// model label stands.
pub fn keyword_override(text_lower: &str) -> Option<&'static str> {
    let disaster = count_hits(text_lower, DISASTER_KEYWORDS);
    let action = count_hits(text_lower, ACTION_KEYWORDS);
    let non_disaster = count_hits(text_lower, NON_DISASTER_KEYWORDS);

    if disaster > 0 {
        Some(DISASTER_RELATED_LABEL)
    } else if non_disaster > 0 {
        Some(NOT_DISASTER_RELATED_LABEL)
    } else if action > 0 || text_lower.split_whitespace().count() < MIN_WORDS_FOR_MODEL {
        Some(UNCERTAIN_LABEL)
    } else {
        None
    }
}

pub struct TweetClassifier {
    model: Box<dyn LabelModel>,
}

impl TweetClassifier {
    pub fn new(model: Box<dyn LabelModel>) -> Self {
        Self { model }
    }

    /// Loads the lexicon named by `model_path`, or the built-in one.
    pub fn load(model_path: Option<&Path>) -> Result<Self, LabelModelError> {
        let model = match model_path {
            Some(path) => LexiconModel::load(path)?,
            None => LexiconModel::builtin(),
        };
        Ok(Self::new(Box::new(model)))
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn predict(&self, tweet: &str) -> Result<String, LabelModelError> {
        let cleaned = clean_tweet_text(tweet);
        let model_label = self.model.predict(&cleaned)?;
        let label = keyword_override(&tweet.to_lowercase())
            .map(str::to_string)
            .unwrap_or(model_label);
        tracing::debug!(%cleaned, %label, "tweet classified");
        Ok(label)
    }
}
