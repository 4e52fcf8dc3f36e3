use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub extraction: ExtractionConfig,
    pub feedback: FeedbackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Look for the payload inside Markdown code fences.
    pub strip_code_fences: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            strip_code_fences: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub max_issues: usize,
    /// Name the categories a misfiled subcategory belongs to.
    pub suggest_categories: bool,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            max_issues: 20,
            suggest_categories: true,
        }
    }
}

/// Loads settings from `path` (or the optional `config/schema` file), then
/// `ORGANIZER_SCHEMA__*` environment overrides.
pub fn load(path: Option<&str>) -> anyhow::Result<SchemaConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/schema").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("ORGANIZER_SCHEMA")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
