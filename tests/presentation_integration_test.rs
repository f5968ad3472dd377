use httpmock::prelude::*;
use talk_generator::app::assembly;
use talk_generator::utils::validation::Validate;
use talk_generator::{TalkConfig, TalkEngine, TalkError};
use tempfile::TempDir;

const SEARCH_PAGE: &str = r#"
<html><body>
  <a class="result_link" href="/Pet-a-Cat"><div class="result_title">How to Pet a Cat</div></a>
  <a class="result_link" href="/Groom-a-Cat"><div class="result_title">How to Groom a Cat</div></a>
</body></html>
"#;

fn config_for(server: &MockServer, output: &TempDir, downloads: &TempDir, generators: &str) -> TalkConfig {
    let toml_content = format!(
        r#"
[presentation]
topic = "cat"
num_slides = 4
seed = 7

[output]
path = "{output}"
downloads_path = "{downloads}"

[lexicon]
kind = "static"

[lexicon.entries]
cat = ["kitty", "puss"]

[sources.wikihow]
endpoint = "{endpoint}"

[sources.inspirobot]
endpoint = "{endpoint}"

{generators}
"#,
        output = output.path().display(),
        downloads = downloads.path().display(),
        endpoint = server.base_url(),
        generators = generators,
    );

    let config = TalkConfig::from_toml_str(&toml_content).unwrap();
    config.validate().unwrap();
    config
}

#[tokio::test]
async fn test_end_to_end_talk_with_title_and_statements() {
    let output = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    let search_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/wikiHowTo");
            then.status(200).body(SEARCH_PAGE);
        })
        .await;

    let config = config_for(
        &server,
        &output,
        &downloads,
        r#"
[[generators]]
kind = "title"
weight = { policy = "first_slide", weight = 100000.0 }

[[generators]]
kind = "wikihow"
weight = { policy = "after_first", weight = 1.0 }
"#,
    );

    let schema = assembly::build_schema(&config).await.unwrap();
    let sink = assembly::build_sink(&config);
    let engine = TalkEngine::new(schema, sink, config);

    let location = engine.run().await.unwrap();

    // Slides 2..4 each search once
    search_mock.assert_hits_async(3).await;

    let expected = output.path().join("cat.json");
    assert_eq!(location, expected.display().to_string());

    let saved: serde_json::Value = serde_json::from_slice(&std::fs::read(&expected).unwrap()).unwrap();
    let slides = saved["slides"].as_array().unwrap();
    assert_eq!(slides.len(), 4);

    assert_eq!(slides[0]["content"]["kind"], "title");
    assert_eq!(slides[0]["provenance"]["generator"], "Title slide");
    for (index, slide) in slides.iter().enumerate() {
        assert_eq!(slide["index"], index);
        let seed = slide["provenance"]["seed"].as_str().unwrap();
        assert!(["cat", "kitty", "puss"].contains(&seed), "unexpected seed {}", seed);
    }
    for slide in &slides[1..] {
        assert_eq!(slide["content"]["kind"], "statement");
        assert_eq!(slide["provenance"]["generator"], "Wikihow bold statement");
    }
}

#[tokio::test]
async fn test_missing_posters_fall_back_to_cached_images() {
    let output = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    let poster_mock = server
        .mock_async(|when, then| {
            when.method(GET).path_contains("xjU.jpg");
            then.status(404);
        })
        .await;

    for seed in ["cat", "kitty", "puss"] {
        let dir = downloads.path().join(seed);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("photo.jpg"), b"jpg").unwrap();
    }

    let config = config_for(
        &server,
        &output,
        &downloads,
        r#"
[[generators]]
kind = "inspirobot"
weight = { policy = "constant", weight = 1000000.0 }

[[generators]]
kind = "local_images"
weight = { policy = "constant", weight = 0.000001 }
"#,
    );

    let schema = assembly::build_schema(&config).await.unwrap();
    let engine = TalkEngine::new(schema, assembly::build_sink(&config), config);

    let presentation = engine.build().await.unwrap();

    assert_eq!(presentation.len(), 4);
    for slide in &presentation.slides {
        assert_eq!(slide.provenance.generator, "Local images");
        assert_eq!(slide.provenance.rejected, vec!["Inspirobot".to_string()]);
    }
    poster_mock.assert_hits_async(4).await;
}

#[tokio::test]
async fn test_exhausted_generators_abort_without_output() {
    let output = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/wikiHowTo");
            then.status(200).body("<html><body>No results</body></html>");
        })
        .await;

    let config = config_for(
        &server,
        &output,
        &downloads,
        r#"
[[generators]]
kind = "wikihow"

[[generators]]
kind = "local_images"
"#,
    );

    let schema = assembly::build_schema(&config).await.unwrap();
    let engine = TalkEngine::new(schema, assembly::build_sink(&config), config);

    let result = engine.run().await;

    match result {
        Err(TalkError::NoEligibleGenerator {
            slide_index,
            mut excluded,
            ..
        }) => {
            assert_eq!(slide_index, 0);
            excluded.sort();
            assert_eq!(excluded, vec!["Local images", "Wikihow bold statement"]);
        }
        other => panic!("expected NoEligibleGenerator, got {:?}", other),
    }
    assert!(!output.path().join("cat.json").exists());
}

#[tokio::test]
async fn test_sample_config_loads_with_templates() {
    let config = TalkConfig::from_file("config/talk.toml").unwrap();
    config.validate().unwrap();

    assert_eq!(config.presentation.num_slides, 6);
    assert!(config.sources.wikihow.related_locations);
    assert_eq!(config.generators.0.len(), 5);
    assert_eq!(config.generators.0[4].name.as_deref(), Some("Cached photos"));

    let titles = assembly::load_templates(config.templates.titles.as_deref(), &[])
        .await
        .unwrap();
    assert!(titles.iter().all(|title| title.contains("{}")));
}
