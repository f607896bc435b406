//! # Erros do Estágio de Stemming
//!
//! A taxonomia segue o ciclo de vida do estágio:
//!
//! | Erro               | Quando                        | Fatal? |
//! |--------------------|-------------------------------|--------|
//! | [`ConfigError`]    | construção do estágio         | sim    |
//! | [`ResolutionError`]| início de cada `process`      | sim    |
//! | [`DocumentError`]  | escrita no span store         | sim    |
//! | [`TypeSystemError`]| montagem do sistema de tipos  | sim    |
//!
//! A troca silenciosa para o Porter (idioma sem stemmer dedicado) e o span sem
//! texto coberto **não** são erros: são absorvidos localmente.

use thiserror::Error;

use crate::document::AnnotationId;
use crate::type_system::ValueKind;

/// Falhas de configuração, detectadas antes de qualquer documento ser processado.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing mandatory parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Malformed feature path {0:?}: expected exactly one `Type:Attribute` pair")]
    MalformedFeature(String),

    #[error("Unresolvable locale: {0:?}")]
    UnresolvableLocale(String),

    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Erros ao declarar tipos e features.
#[derive(Debug, Error, PartialEq)]
pub enum TypeSystemError {
    #[error("Type already declared: {0}")]
    DuplicateType(String),

    #[error("Unknown parent type: {0}")]
    UnknownParent(String),

    #[error("Feature {feature} already declared on {type_name}")]
    DuplicateFeature { type_name: String, feature: String },
}

/// Erros reportados pelo span store.
#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("Unknown annotation: {0:?}")]
    UnknownAnnotation(AnnotationId),

    #[error("Invalid offsets: begin {begin} > end {end}")]
    InvalidOffsets { begin: usize, end: usize },

    #[error("Feature {feature} is declared on {domain} and cannot be set on {type_name}")]
    DomainMismatch {
        feature: String,
        domain: String,
        type_name: String,
    },

    #[error("Feature {feature} holds {expected:?} values, got {found:?}")]
    KindMismatch {
        feature: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Tipo ou feature do alvo inexistente no sistema de tipos do documento.
#[derive(Debug, Error, PartialEq)]
pub enum ResolutionError {
    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Unknown feature {feature} on type {type_name}")]
    UnknownFeature { type_name: String, feature: String },
}

/// Falha no processamento de um documento, propagada ao host.
#[derive(Debug, Error, PartialEq)]
pub enum ProcessError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}
