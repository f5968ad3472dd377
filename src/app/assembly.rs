use crate::adapters::sources::{
    GiphySource, InspirobotSource, LocalImageSource, TitleSource, WikihowSource,
};
use crate::adapters::text::{template_lines, DEFAULT_BOLD_STATEMENTS, DEFAULT_TITLES};
use crate::adapters::{ConceptNet, JsonSink, LocalStorage, StaticLexicon};
use crate::config::{GeneratorKind, LexiconKind, TalkConfig};
use crate::core::generator::SlideGenerator;
use crate::core::schema::PresentationSchema;
use crate::core::{ConfigProvider, ContentSource, LexicalRelations};
use crate::utils::error::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

pub fn http_client(config: &TalkConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.http.timeout_seconds))
        .user_agent(config.http.user_agent.clone())
        .build()?;
    Ok(client)
}

pub fn build_lexicon(config: &TalkConfig, client: &Client) -> Arc<dyn LexicalRelations> {
    match config.lexicon.kind {
        LexiconKind::Conceptnet => Arc::new(ConceptNet::new(
            client.clone(),
            config.lexicon.endpoint.clone(),
            config.lexicon.limit,
        )),
        LexiconKind::Static => Arc::new(StaticLexicon::new(config.lexicon.entries.clone())),
    }
}

/// Lines of the template file at `path`, or `defaults` when no file is configured.
pub async fn load_templates(path: Option<&str>, defaults: &[&str]) -> Result<Vec<String>> {
    match path {
        Some(path) => {
            let content = tokio::fs::read_to_string(path).await?;
            let templates = template_lines(&content);
            tracing::debug!("Loaded {} templates from {}", templates.len(), path);
            Ok(templates)
        }
        None => Ok(defaults.iter().map(|t| t.to_string()).collect()),
    }
}

/// Builds the configured generators in order. Giphy is skipped without an API key.
pub async fn build_generators(config: &TalkConfig, client: &Client) -> Result<Vec<SlideGenerator>> {
    let downloads = LocalStorage::new(config.downloads_path().to_string());
    let mut generators = Vec::new();

    for entry in config.enabled_generators() {
        let source: Arc<dyn ContentSource> = match entry.kind {
            GeneratorKind::Title => {
                let templates =
                    load_templates(config.templates.titles.as_deref(), DEFAULT_TITLES).await?;
                Arc::new(TitleSource::new(templates))
            }
            GeneratorKind::Giphy => {
                if config.sources.giphy.api_key.is_empty() {
                    tracing::warn!("No Giphy API key configured (GIPHY_API_KEY), skipping Giphy");
                    continue;
                }
                Arc::new(GiphySource::new(
                    client.clone(),
                    config.sources.giphy.endpoint.clone(),
                    config.sources.giphy.api_key.clone(),
                    downloads.clone(),
                ))
            }
            GeneratorKind::Inspirobot => Arc::new(InspirobotSource::new(
                client.clone(),
                config.sources.inspirobot.endpoint.clone(),
                downloads.clone(),
            )),
            GeneratorKind::Wikihow => {
                let templates = load_templates(
                    config.templates.bold_statements.as_deref(),
                    DEFAULT_BOLD_STATEMENTS,
                )
                .await?;
                let source = WikihowSource::new(
                    client.clone(),
                    config.sources.wikihow.endpoint.clone(),
                    templates,
                );
                if config.sources.wikihow.related_locations {
                    Arc::new(source.with_locations(Arc::new(ConceptNet::new(
                        client.clone(),
                        config.lexicon.endpoint.clone(),
                        config.lexicon.limit,
                    ))))
                } else {
                    Arc::new(source)
                }
            }
            GeneratorKind::LocalImages => Arc::new(LocalImageSource::new(
                downloads.clone(),
                config.num_images(),
            )),
        };

        let mut generator = SlideGenerator::new(source).with_policy(entry.weight);
        if let Some(name) = &entry.name {
            generator = generator.with_name(name.clone());
        }
        tracing::debug!("Configured {} with {:?}", generator, entry.weight);
        generators.push(generator);
    }

    Ok(generators)
}

pub async fn build_schema(config: &TalkConfig) -> Result<PresentationSchema> {
    let client = http_client(config)?;
    let generators = build_generators(config, &client).await?;
    PresentationSchema::new(build_lexicon(config, &client), generators)
}

pub fn build_sink(config: &TalkConfig) -> JsonSink<LocalStorage> {
    JsonSink::new(LocalStorage::new(config.output_path().to_string()))
}
