use once_cell::sync::Lazy;
use regex::Regex;

static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$[0-9][0-9,]*(\.[0-9]+)?|\b[0-9]+ (?i:dollars)\b|\b[0-9]+ (?i:usd)\b")
        .expect("money pattern is valid")
});

/// Search phrase of one session, matched literally and case-insensitively.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    phrase: String,
    needle: String,
}

impl PhraseMatcher {
    pub fn new(phrase: &str) -> Self {
        PhraseMatcher {
            phrase: phrase.to_string(),
            needle: phrase.to_lowercase(),
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Non-overlapping occurrences, scanned left to right.
    pub fn count_in(&self, text: &str) -> usize {
        if self.needle.is_empty() {
            return 0;
        }
        text.to_lowercase().match_indices(&self.needle).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedFields {
    pub search_phrase_count: usize,
    pub contains_money: bool,
}

impl DerivedFields {
    pub fn compute(title: &str, description: &str, phrase: &PhraseMatcher) -> Self {
        let text = combined_text(title, description);

        DerivedFields {
            search_phrase_count: phrase.count_in(&text),
            contains_money: contains_money(&text),
        }
    }
}

pub fn combined_text(title: &str, description: &str) -> String {
    match description.is_empty() {
        true => title.to_string(),
        false => format!("{} {}", title, description),
    }
}

pub fn contains_money(text: &str) -> bool {
    MONEY_PATTERN.is_match(text)
}
