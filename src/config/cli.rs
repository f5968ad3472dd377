use crate::config::toml_config::TalkConfig;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "talk-generator")]
#[command(about = "Generates a random slideshow talk about a topic")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Topic of the presentation
    #[arg(long)]
    pub topic: Option<String>,

    /// Number of slides to create
    #[arg(long)]
    pub num_slides: Option<usize>,

    /// Number of cached images considered per seed
    #[arg(long)]
    pub num_images: Option<usize>,

    /// Fixed random seed for reproducible talks
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long)]
    pub downloads_path: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Loads the file configuration (or the defaults) and applies the command-line overrides.
    pub fn resolve(&self) -> Result<TalkConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                TalkConfig::from_file(path)?
            }
            None => TalkConfig::default(),
        };

        // 應用命令列覆蓋設定
        if let Some(topic) = &self.topic {
            config.presentation.topic = topic.clone();
        }
        if let Some(num_slides) = self.num_slides {
            config.presentation.num_slides = num_slides;
        }
        if let Some(num_images) = self.num_images {
            config.presentation.num_images = num_images;
        }
        if let Some(seed) = self.seed {
            config.presentation.seed = Some(seed);
        }
        if let Some(output_path) = &self.output_path {
            config.output.path = output_path.clone();
        }
        if let Some(downloads_path) = &self.downloads_path {
            config.output.downloads_path = downloads_path.clone();
        }

        Ok(config)
    }
}
