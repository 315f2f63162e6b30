// src/ingest/keywords.rs
//! Topical relevance gate: plain case-insensitive substring containment.
//! No tokenization or word boundaries, so "etf" also hits inside longer words.

#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    keywords: Vec<String>, // lowercased, non-empty, unique
}

impl KeywordMatcher {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for kw in keywords {
            let kw = kw.as_ref().to_lowercase();
            if !kw.is_empty() && !out.contains(&kw) {
                out.push(kw);
            }
        }
        Self { keywords: out }
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// First configured keyword found in `title + " " + summary`, if any.
    pub fn first_match(&self, title: &str, summary: &str) -> Option<&str> {
        let text = format!("{title} {summary}").to_lowercase();
        self.keywords
            .iter()
            .find(|kw| text.contains(kw.as_str()))
            .map(String::as_str)
    }

    pub fn matches(&self, title: &str, summary: &str) -> bool {
        self.first_match(title, summary).is_some()
    }
}
