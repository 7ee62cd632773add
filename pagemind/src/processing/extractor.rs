use scraper::{Html, Selector};
use url::Url;

use crate::config::ScrapeConfig;
use crate::error::Result;

/// Tags whose text content never survives extraction.
const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

#[derive(Debug, Clone)]
pub struct ExtractedPage {
    pub text: String,
    pub title: Option<String>,
}

/// Fetches a page and reduces its markup to plain text.
#[derive(Clone)]
pub struct PageExtractor {
    http: reqwest::Client,
}

impl PageExtractor {
    pub fn new(config: &ScrapeConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_secs))
                .user_agent(config.user_agent.clone())
                .build()
                .unwrap_or_default(),
        }
    }

    /// GET the URL and extract its text. Non-2xx statuses are errors.
    pub async fn fetch(&self, url_str: &str) -> Result<ExtractedPage> {
        let url = Url::parse(url_str)?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok(Self::extract(&html))
    }

    pub fn extract(html: &str) -> ExtractedPage {
        let document = Html::parse_document(html);

        ExtractedPage {
            title: Self::extract_title(&document),
            text: Self::extract_text(&document),
        }
    }

    fn extract_title(document: &Html) -> Option<String> {
        let title_selector = Selector::parse("title").ok()?;
        document
            .select(&title_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Collect every visible text node, one space between nodes, runs of
    /// whitespace collapsed.
    fn extract_text(document: &Html) -> String {
        let mut text = String::new();

        for node in document.root_element().descendants() {
            let Some(text_node) = node.value().as_text() else {
                continue;
            };

            let skipped = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| SKIPPED_TAGS.contains(&el.name()))
            });
            if skipped {
                continue;
            }

            for word in text_node.split_whitespace() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(word);
            }
        }

        text
    }
}
