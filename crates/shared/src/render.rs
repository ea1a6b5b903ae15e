//! Result rendering. Every string that came from the user or the backend is
//! escaped before it is placed into markup.

use std::fmt::Write as _;

use crate::domain::{InputText, PredictionCategory, PredictionResult};

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Everything needed to draw one classification outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    original_tweet: String,
    prediction: PredictionResult,
}

impl ResultCard {
    pub fn new(original_tweet: &InputText, prediction: impl Into<String>) -> Self {
        Self {
            original_tweet: original_tweet.as_str().to_string(),
            prediction: PredictionResult::new(prediction),
        }
    }

    pub fn original_tweet(&self) -> &str {
        &self.original_tweet
    }

    pub fn prediction(&self) -> &str {
        self.prediction.label()
    }

    pub fn category(&self) -> PredictionCategory {
        self.prediction.category()
    }

    pub fn description(&self) -> &'static str {
        self.category().description()
    }

    pub fn to_html(&self) -> String {
        let category = self.category();
        let mut html = String::new();
        html.push_str("<div class=\"result-card\">\n");
        html.push_str("  <div class=\"result-label\">\n");
        html.push_str("    <strong>Original Tweet:</strong>\n");
        let _ = writeln!(
            html,
            "    <p class=\"tweet-text\">{}</p>",
            escape_html(&self.original_tweet)
        );
        html.push_str("  </div>\n");
        let _ = writeln!(
            html,
            "  <div class=\"prediction-box {}\">",
            category.css_class()
        );
        html.push_str("    <div class=\"prediction-label\">Informativeness Level</div>\n");
        let _ = writeln!(
            html,
            "    <div class=\"prediction-value\">{}</div>",
            escape_html(self.prediction.label())
        );
        html.push_str("  </div>\n");
        let _ = writeln!(
            html,
            "  <div class=\"prediction-description\"><p>{} {}</p></div>",
            category.icon(),
            category.description()
        );
        html.push_str("</div>\n");
        html
    }

    pub fn to_plain_text(&self) -> String {
        let category = self.category();
        format!(
            "Original Tweet: {}\nInformativeness Level: {} [{}]\n{} {}",
            self.original_tweet,
            self.prediction.label(),
            category.css_class(),
            category.icon(),
            category.description()
        )
    }
}

pub fn error_html(message: &str) -> String {
    format!(
        "<div class=\"error-section\"><p class=\"error-message\">{}</p></div>\n",
        escape_html(message)
    )
}
