use once_cell::sync::Lazy;
use regex::Regex;

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s<>"{}|\\^`\[\]]+"#).expect("valid url regex")
});

#[derive(Debug, Clone, Default)]
pub struct Item {
    pub id: String,
    pub raw_text: String,
    pub thread_text: String,
}

impl Item {
    pub fn new(id: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw_text: raw_text.into(),
            thread_text: String::new(),
        }
    }

    #[cfg(test)]
    pub fn with_thread(mut self, thread_text: impl Into<String>) -> Self {
        self.thread_text = thread_text.into();
        self
    }

    pub fn headline(&self) -> &str {
        self.raw_text.lines().next().map(str::trim).unwrap_or("")
    }

    pub fn combined_text(&self) -> String {
        format!("{}\n{}", self.raw_text, self.thread_text)
    }

    pub fn urls(&self) -> Vec<String> {
        extract_urls(&self.combined_text())
    }
}

pub fn extract_urls(text: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for found in URL_REGEX.find_iter(text) {
        let url = found.as_str();
        if !urls.iter().any(|existing| existing == url) {
            urls.push(url.to_string());
        }
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_urls_dedupes_in_order() {
        let text = "see https://a.example/x and http://b.example\nagain https://a.example/x";
        assert_eq!(
            extract_urls(text),
            vec!["https://a.example/x".to_string(), "http://b.example".to_string()]
        );
    }

    #[test]
    fn extract_urls_stops_at_brackets_and_quotes() {
        let text = r#"<https://a.example/path>"https://b.example/q"[https://c.example]"#;
        assert_eq!(
            extract_urls(text),
            vec![
                "https://a.example/path".to_string(),
                "https://b.example/q".to_string(),
                "https://c.example".to_string(),
            ]
        );
    }

    #[test]
    fn headline_is_first_trimmed_line() {
        let item = Item::new("1", "  first line \nsecond");
        assert_eq!(item.headline(), "first line");
        assert_eq!(Item::default().headline(), "");
    }
}
