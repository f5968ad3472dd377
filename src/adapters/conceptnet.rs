use crate::core::{LexicalRelations, LocationLookup};
use crate::utils::error::{Result, TalkError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeSet;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://api.conceptnet.io";

#[derive(Debug, Deserialize)]
struct EdgeList {
    #[serde(default)]
    edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
struct Edge {
    rel: Relation,
    start: Node,
    end: Node,
    #[serde(default)]
    weight: f64,
}

#[derive(Debug, Deserialize)]
struct Relation {
    label: String,
}

#[derive(Debug, Deserialize)]
struct Node {
    label: String,
    #[serde(default)]
    language: Option<String>,
}

impl Node {
    fn is_english(&self) -> bool {
        self.language.as_deref().map_or(true, |lang| lang == "en")
    }
}

/// Client for the ConceptNet 5 REST API.
#[derive(Debug, Clone)]
pub struct ConceptNet {
    client: Client,
    endpoint: String,
    limit: usize,
}

impl ConceptNet {
    pub fn new(client: Client, endpoint: impl Into<String>, limit: usize) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            limit,
        }
    }

    fn concept_url(&self, word: &str, relation: &str, limit: usize) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| TalkError::ConfigError {
            message: format!("invalid ConceptNet endpoint '{}': {}", self.endpoint, e),
        })?;

        let concept = word.trim().to_lowercase().replace(' ', "_");
        url.path_segments_mut()
            .map_err(|_| TalkError::ConfigError {
                message: format!("ConceptNet endpoint '{}' cannot be a base URL", self.endpoint),
            })?
            .pop_if_empty()
            .extend(["c", "en", concept.as_str()]);
        // ConceptNet expects the relation path unescaped
        url.set_query(Some(&format!("rel=/r/{}&limit={}", relation, limit)));

        Ok(url)
    }

    async fn edges(&self, word: &str, relation: &str, limit: usize) -> Result<Vec<Edge>> {
        let url = self.concept_url(word, relation, limit)?;
        tracing::debug!("Querying ConceptNet: {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(TalkError::CollaboratorError {
                collaborator: "ConceptNet".to_string(),
                message: format!("unexpected status {} for '{}'", response.status(), word),
            });
        }

        let edges: EdgeList = response.json().await?;
        Ok(edges
            .edges
            .into_iter()
            .filter(|edge| edge.rel.label == relation)
            .collect())
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace('_', " ")
}

#[async_trait]
impl LexicalRelations for ConceptNet {
    async fn synonyms(&self, word: &str) -> Result<BTreeSet<String>> {
        let word_label = normalize_label(word);
        let mut synonyms = BTreeSet::new();

        for edge in self.edges(word, "Synonym", self.limit).await? {
            for node in [&edge.start, &edge.end] {
                let label = normalize_label(&node.label);
                if node.is_english() && !label.is_empty() && label != word_label {
                    synonyms.insert(label);
                }
            }
        }
        synonyms.insert(word.to_string());

        tracing::debug!("{} synonyms for '{}'", synonyms.len(), word);
        Ok(synonyms)
    }
}

#[async_trait]
impl LocationLookup for ConceptNet {
    async fn related_locations(&self, word: &str) -> Result<Vec<(f64, String)>> {
        let locations = self
            .edges(word, "AtLocation", self.limit.min(100))
            .await?
            .into_iter()
            .map(|edge| (edge.weight, edge.end.label))
            .collect();
        Ok(locations)
    }
}
