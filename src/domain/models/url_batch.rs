/// An ordered batch of candidate URLs pasted by the user.
///
/// Any non-empty trimmed line is accepted as a candidate; order is
/// preserved and duplicates are kept. Validation beyond that is out of
/// scope — the fetch layer reports unusable URLs as failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBatch {
    urls: Vec<String>,
}

impl UrlBatch {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }

    /// Split free text into one URL per line, trimming each line and
    /// discarding empty ones.
    pub fn parse(text: &str) -> Self {
        let urls = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self { urls }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_drops_empty_lines() {
        let batch = UrlBatch::parse("  http://a.example/  \n\n\thttp://b.example/\n   \n");
        assert_eq!(batch.urls(), &["http://a.example/", "http://b.example/"]);
    }

    #[test]
    fn test_parse_preserves_order_and_duplicates() {
        let batch = UrlBatch::parse("http://b.example/\nhttp://a.example/\nhttp://b.example/");
        assert_eq!(
            batch.urls(),
            &["http://b.example/", "http://a.example/", "http://b.example/"]
        );
    }

    #[test]
    fn test_parse_blank_text_is_empty() {
        assert!(UrlBatch::parse("   \n \n").is_empty());
    }
}
