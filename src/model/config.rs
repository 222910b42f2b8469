use serde::{Deserialize, Serialize};

/// Configuration from taxon.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub names: NamesConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamesConfig {
    /// Locale used for display and duplicate-name checks
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for NamesConfig {
    fn default() -> Self {
        NamesConfig {
            locale: default_locale(),
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacementConfig {
    #[serde(default)]
    pub ambiguous_parent: AmbiguousParent,
}

/// What to do when no parent can be inferred for a category deeper than level 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguousParent {
    /// Place the category at root
    #[default]
    Root,
    /// Reject the move
    Reject,
}
