use crate::adapters::{conceptnet, sources};
use crate::core::generator::WeightPolicy;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TalkError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_template_file,
    validate_url, validate_weight, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TalkConfig {
    pub presentation: PresentationConfig,
    pub output: OutputConfig,
    pub http: HttpConfig,
    pub lexicon: LexiconConfig,
    pub templates: TemplatesConfig,
    pub sources: SourcesConfig,
    pub generators: GeneratorList,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub topic: String,
    pub num_slides: usize,
    pub num_images: usize,
    pub seed: Option<u64>,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            topic: "bagels".to_string(),
            num_slides: 3,
            num_images: 1,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub downloads_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "./output".to_string(),
            downloads_path: "./downloads".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: format!("talk-generator/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LexiconKind {
    Conceptnet,
    Static,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub kind: LexiconKind,
    pub endpoint: String,
    pub limit: usize,
    /// Word → related words, used when `kind = "static"`.
    pub entries: HashMap<String, Vec<String>>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            kind: LexiconKind::Conceptnet,
            endpoint: conceptnet::DEFAULT_ENDPOINT.to_string(),
            limit: 200,
            entries: HashMap::new(),
        }
    }
}

/// Paths to line-per-template files; the built-in templates are used when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    pub titles: Option<String>,
    pub bold_statements: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub giphy: GiphyConfig,
    pub inspirobot: EndpointConfig,
    pub wikihow: WikihowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GiphyConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl Default for GiphyConfig {
    fn default() -> Self {
        Self {
            endpoint: sources::giphy::DEFAULT_ENDPOINT.to_string(),
            api_key: std::env::var("GIPHY_API_KEY").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub endpoint: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            endpoint: sources::inspirobot::DEFAULT_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikihowConfig {
    pub endpoint: String,
    /// Fill `{location}` with a ConceptNet AtLocation relation of the seed.
    pub related_locations: bool,
}

impl Default for WikihowConfig {
    fn default() -> Self {
        Self {
            endpoint: sources::wikihow::DEFAULT_ENDPOINT.to_string(),
            related_locations: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    Title,
    Giphy,
    Inspirobot,
    Wikihow,
    LocalImages,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub kind: GeneratorKind,
    pub name: Option<String>,
    #[serde(default)]
    pub weight: WeightPolicy,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl GeneratorConfig {
    pub fn new(kind: GeneratorKind, weight: WeightPolicy) -> Self {
        Self {
            kind,
            name: None,
            weight,
            enabled: true,
        }
    }
}

/// The `[[generators]]` tables; without any, the stock line-up is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratorList(pub Vec<GeneratorConfig>);

impl Default for GeneratorList {
    fn default() -> Self {
        let constant = WeightPolicy::Constant { weight: 1.0 };
        Self(vec![
            GeneratorConfig::new(
                GeneratorKind::Title,
                WeightPolicy::FirstSlide { weight: 100000.0 },
            ),
            GeneratorConfig::new(GeneratorKind::Giphy, constant),
            GeneratorConfig::new(GeneratorKind::Inspirobot, constant),
            GeneratorConfig::new(GeneratorKind::Wikihow, constant),
            GeneratorConfig::new(GeneratorKind::LocalImages, constant),
        ])
    }
}

impl TalkConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TalkError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TalkError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GIPHY_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TalkError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn enabled_generators(&self) -> impl Iterator<Item = &GeneratorConfig> {
        self.generators.0.iter().filter(|generator| generator.enabled)
    }

    fn uses(&self, kind: GeneratorKind) -> bool {
        self.enabled_generators().any(|generator| generator.kind == kind)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("presentation.topic", &self.presentation.topic)?;
        validate_positive_number("presentation.num_slides", self.presentation.num_slides, 1)?;

        validate_path("output.path", &self.output.path)?;
        validate_path("output.downloads_path", &self.output.downloads_path)?;

        if self.lexicon.kind == LexiconKind::Conceptnet || self.sources.wikihow.related_locations {
            validate_url("lexicon.endpoint", &self.lexicon.endpoint)?;
        }

        for (field, path) in [
            ("templates.titles", &self.templates.titles),
            ("templates.bold_statements", &self.templates.bold_statements),
        ] {
            if let Some(path) = path {
                validate_template_file(field, path)?;
            }
        }

        if self.uses(GeneratorKind::Giphy) {
            validate_url("sources.giphy.endpoint", &self.sources.giphy.endpoint)?;
        }
        if self.uses(GeneratorKind::Inspirobot) {
            validate_url("sources.inspirobot.endpoint", &self.sources.inspirobot.endpoint)?;
        }
        if self.uses(GeneratorKind::Wikihow) {
            validate_url("sources.wikihow.endpoint", &self.sources.wikihow.endpoint)?;
        }

        if self.enabled_generators().next().is_none() {
            return Err(TalkError::MissingConfigError {
                field: "generators".to_string(),
            });
        }
        for (index, generator) in self.generators.0.iter().enumerate() {
            validate_weight(&format!("generators[{}].weight", index), generator.weight.weight())?;
        }
        let total: f64 = self
            .enabled_generators()
            .map(|generator| generator.weight.weight())
            .sum();
        validate_weight("generators (total weight)", total)?;

        Ok(())
    }
}

impl ConfigProvider for TalkConfig {
    fn topic(&self) -> &str {
        &self.presentation.topic
    }

    fn num_slides(&self) -> usize {
        self.presentation.num_slides
    }

    fn num_images(&self) -> usize {
        self.presentation.num_images
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn downloads_path(&self) -> &str {
        &self.output.downloads_path
    }

    fn rng_seed(&self) -> Option<u64> {
        self.presentation.seed
    }
}

impl Validate for TalkConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
