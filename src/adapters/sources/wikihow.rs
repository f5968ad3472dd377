use crate::adapters::text::{fill_template, pluralize, title_case};
use crate::core::weighted::weighted_choice;
use crate::core::{ContentSource, LocationLookup, SlideContent};
use crate::utils::error::{Result, TalkError};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use regex::Regex;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub const DEFAULT_ENDPOINT: &str = "https://en.wikihow.com";

const DEFAULT_LOCATION: &str = "Here";
const DEFAULT_STEP: &str = "Do Whatever You Like";

/// Bold life-lesson statement built from WikiHow "How to ..." search results.
pub struct WikihowSource {
    client: Client,
    endpoint: String,
    templates: Vec<String>,
    locations: Option<Arc<dyn LocationLookup>>,
}

impl WikihowSource {
    pub fn new(client: Client, endpoint: impl Into<String>, templates: Vec<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            templates,
            locations: None,
        }
    }

    /// Fills `{location}` from `lookup` instead of the fixed default.
    pub fn with_locations(mut self, lookup: Arc<dyn LocationLookup>) -> Self {
        self.locations = Some(lookup);
        self
    }

    /// Search result page, or `None` when WikiHow answers with an error status.
    async fn search(&self, words: &str) -> Result<Option<String>> {
        let url = format!("{}/wikiHowTo", self.endpoint.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[("search", words)])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("WikiHow search for '{}' returned {}", words, response.status());
            return Ok(None);
        }
        Ok(Some(response.text().await?))
    }

    async fn related_actions(&self, seed: &str) -> Result<Vec<String>> {
        let page = match self.search(seed).await? {
            Some(page) => Some(page),
            None => self.search(&pluralize(seed)).await?,
        };
        Ok(page.map(|html| parse_actions(&html)).unwrap_or_default())
    }

    async fn location_for(&self, seed: &str, rng: &mut StdRng) -> Result<String> {
        let Some(lookup) = &self.locations else {
            return Ok(DEFAULT_LOCATION.to_string());
        };

        let locations = lookup.related_locations(seed).await?;
        match weighted_choice(locations, rng) {
            Ok(location) => Ok(location),
            Err(TalkError::EmptyInput) | Err(TalkError::ZeroTotalWeight) => {
                Ok(DEFAULT_LOCATION.to_string())
            }
            Err(e) => Err(e),
        }
    }
}

/// Extracts the actions from `<a class="result_link">How to ...</a>` entries.
pub fn parse_actions(html: &str) -> Vec<String> {
    static RESULT_LINK: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();
    let link = RESULT_LINK.get_or_init(|| {
        Regex::new(r#"(?s)<a\s[^>]*class="[^"]*\bresult_link\b[^"]*"[^>]*>(.*?)</a>"#).unwrap()
    });
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]+>").unwrap());

    link.captures_iter(html)
        .map(|caps| {
            let text = tag.replace_all(&caps[1], " ");
            decode_entities(&text.split_whitespace().collect::<Vec<_>>().join(" "))
        })
        .map(|title| title_to_action(&title))
        .filter(|action| !action.is_empty())
        .collect()
}

/// "How to Feed a Cat" -> "Feed a Cat"
fn title_to_action(title: &str) -> String {
    match title.find("to ") {
        Some(position) => title[position + 3..].trim().to_string(),
        None => title.trim().to_string(),
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[async_trait]
impl ContentSource for WikihowSource {
    fn name(&self) -> &str {
        "Wikihow bold statement"
    }

    async fn produce(&self, seed: &str, rng: &mut StdRng) -> Result<Option<SlideContent>> {
        let actions = self.related_actions(seed).await?;
        let picked = actions
            .choose(rng)
            .cloned()
            .zip(self.templates.choose(rng).cloned());
        let Some((action, template)) = picked else {
            tracing::debug!("No WikiHow statement for '{}'", seed);
            return Ok(None);
        };

        let location = self.location_for(seed, rng).await?;
        let action = title_case(&action);

        let mut values = HashMap::new();
        values.insert("action", action.clone());
        values.insert("action_infinitive", action);
        values.insert("step", DEFAULT_STEP.to_string());
        values.insert("topic", seed.to_string());
        values.insert("location", location);

        Ok(Some(SlideContent::Statement {
            text: fill_template(&template, &values),
        }))
    }
}
