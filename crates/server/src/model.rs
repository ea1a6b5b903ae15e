use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

pub const UNCERTAIN_LABEL: &str = "Uncertain / Needs Review";

#[derive(Debug, Error)]
pub enum LabelModelError {
    #[error("failed to read model file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid model file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("model file '{path}' has an empty default_label")]
    MissingDefaultLabel { path: PathBuf },
    #[error("model inference failed: {0}")]
    Inference(String),
}

/// A trained text model: cleaned tweet text in, label out.
pub trait LabelModel: Send + Sync {
    fn name(&self) -> &str;
    fn predict(&self, cleaned_text: &str) -> Result<String, LabelModelError>;
}

/// Keyword lexicon model. Each label owns a keyword list; the label with the
/// most whole-word hits wins and ties fall back to `default_label`.
///
/// File format:
///
/// ```toml
/// default_label = "Uncertain / Needs Review"
///
/// [labels]
/// "Disaster-Related" = ["signal no", "evacuate", "baha"]
/// "Not Disaster-Related" = ["concert", "sale"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LexiconModel {
    #[serde(skip)]
    name: String,
    default_label: String,
    #[serde(default)]
    labels: BTreeMap<String, Vec<String>>,
}

impl LexiconModel {
    pub fn builtin() -> Self {
        Self {
            name: "builtin-lexicon".to_string(),
            default_label: UNCERTAIN_LABEL.to_string(),
            labels: BTreeMap::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, LabelModelError> {
        let raw = fs::read_to_string(path).map_err(|source| LabelModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut model: Self = toml::from_str(&raw).map_err(|source| LabelModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if model.default_label.trim().is_empty() {
            return Err(LabelModelError::MissingDefaultLabel {
                path: path.to_path_buf(),
            });
        }
        for keywords in model.labels.values_mut() {
            for keyword in keywords.iter_mut() {
                *keyword = keyword.trim().to_lowercase();
            }
            keywords.retain(|keyword| !keyword.is_empty());
        }
        model.name = path.display().to_string();
        Ok(model)
    }

    #[cfg(test)]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }
}

impl LabelModel for LexiconModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, cleaned_text: &str) -> Result<String, LabelModelError> {
        let padded = format!(" {cleaned_text} ");
        let mut best: Option<(&str, usize)> = None;
        let mut tied = false;

        for (label, keywords) in &self.labels {
            let hits = keywords
                .iter()
                .filter(|keyword| padded.contains(&format!(" {keyword} ")))
                .count();
            if hits == 0 {
                continue;
            }
            match best {
                Some((_, top)) if hits < top => {}
                Some((_, top)) if hits == top => tied = true,
                _ => {
                    best = Some((label, hits));
                    tied = false;
                }
            }
        }

        Ok(match best {
            Some((label, _)) if !tied => label.to_string(),
            _ => self.default_label.clone(),
        })
    }
}
