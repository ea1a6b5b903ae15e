//! Tweet text normalization applied before the label model sees the text.

use std::sync::OnceLock;

use regex::Regex;

struct Patterns {
    urls: Regex,
    mentions: Regex,
    hashtags: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        urls: Regex::new(r"http\S+|www\S+|https\S+").expect("url regex must compile"),
        mentions: Regex::new(r"@\w+").expect("mention regex must compile"),
        hashtags: Regex::new(r"#\w+").expect("hashtag regex must compile"),
    })
}

/// Strips URLs, mentions, hashtags and ASCII punctuation, lowercases, and
/// collapses whitespace. Steps run in that order.
pub fn clean_tweet_text(text: &str) -> String {
    let patterns = patterns();
    let text = patterns.urls.replace_all(text, "");
    let text = patterns.mentions.replace_all(&text, "");
    let text = patterns.hashtags.replace_all(&text, "");
    let text: String = text
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .to_lowercase();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::clean_tweet_text;

    #[test]
    fn removes_urls_mentions_and_hashtags() {
        assert_eq!(
            clean_tweet_text("@pagasa Typhoon update https://t.co/abc #WalangPasok stay safe"),
            "typhoon update stay safe"
        );
        assert_eq!(clean_tweet_text("see www.example.com now"), "see now");
    }

    #[test]
    fn strips_punctuation_and_collapses_whitespace() {
        assert_eq!(
            clean_tweet_text("  FLOOD!!!   warning,\n\tnorthern   provinces... "),
            "flood warning northern provinces"
        );
    }

    #[test]
    fn url_removal_runs_before_mentions() {
        assert_eq!(clean_tweet_text("@http://x.ph/y ok"), "ok");
    }

    #[test]
    fn text_of_only_noise_cleans_to_empty() {
        assert_eq!(clean_tweet_text("@user #tag http://a.b !!!"), "");
    }
}
