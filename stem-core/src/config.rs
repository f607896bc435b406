//! # Configuração do Estágio
//!
//! Três parâmetros, todos obrigatórios:
//!
//! | Parâmetro  | Tipo                 | Efeito                                              |
//! |------------|----------------------|-----------------------------------------------------|
//! | `Language` | string               | escolhe o stemmer e o locale das minúsculas         |
//! | `Feature`  | `Tipo:Atributo`      | tipo dos spans e atributo que recebe o radical      |
//! | `Update`   | bool                 | `true` atualiza o span; `false` cria um span novo   |
//!
//! ```rust
//! use stem_core::config::StemmerConfig;
//!
//! let config = StemmerConfig::from_json(
//!     r#"{ "Language": "English", "Feature": "Token:stem", "Update": false }"#,
//! ).unwrap();
//! assert_eq!(config.feature_path().unwrap().type_name(), "Token");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const PARAM_LANGUAGE: &str = "Language";
pub const PARAM_FEATURE: &str = "Feature";
pub const PARAM_UPDATE: &str = "Update";

/// Separador entre tipo e atributo em `Feature`.
pub const FEATURE_SEPARATOR: char = ':';

/// Parâmetros do estágio de stemming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StemmerConfig {
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "Update")]
    pub update: bool,
}

/// Forma crua, para reportar qual parâmetro obrigatório faltou.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(rename = "Language")]
    language: Option<String>,
    #[serde(rename = "Feature")]
    feature: Option<String>,
    #[serde(rename = "Update")]
    update: Option<bool>,
}

impl StemmerConfig {
    pub fn new(language: impl Into<String>, feature: impl Into<String>, update: bool) -> Self {
        Self {
            language: language.into(),
            feature: feature.into(),
            update,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        raw.validate()
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_value(value)?;
        raw.validate()
    }

    /// Interpreta o parâmetro `Feature`.
    pub fn feature_path(&self) -> Result<FeaturePath, ConfigError> {
        FeaturePath::parse(&self.feature)
    }
}

impl RawConfig {
    fn validate(self) -> Result<StemmerConfig, ConfigError> {
        Ok(StemmerConfig {
            language: self.language.ok_or(ConfigError::MissingParameter(PARAM_LANGUAGE))?,
            feature: self.feature.ok_or(ConfigError::MissingParameter(PARAM_FEATURE))?,
            update: self.update.ok_or(ConfigError::MissingParameter(PARAM_UPDATE))?,
        })
    }
}

/// Alvo do stemming: `Tipo:Atributo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturePath {
    type_name: String,
    feature_name: String,
}

impl FeaturePath {
    /// Exige exatamente um separador e dois componentes não vazios.
    pub fn parse(descriptor: &str) -> Result<Self, ConfigError> {
        let mut parts = descriptor.split(FEATURE_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(type_name), Some(feature_name), None)
                if !type_name.is_empty() && !feature_name.is_empty() =>
            {
                Ok(Self {
                    type_name: type_name.to_string(),
                    feature_name: feature_name.to_string(),
                })
            }
            _ => Err(ConfigError::MalformedFeature(descriptor.to_string())),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn feature_name(&self) -> &str {
        &self.feature_name
    }
}
