//! # stem-core — Estágio de Stemming para Pipelines de Anotação
//!
//! Este crate implementa um estágio de pipeline que recebe um documento já segmentado em
//! spans tipados (anotações) e grava o **radical** (stem) do texto de cada span.
//!
//! ## Arquitetura do Estágio
//!
//! 1.  **Configuração** ([`config`]): idioma, alvo `Tipo:Atributo` e modo update/create.
//! 2.  **Locale** ([`locale`]): resolve o idioma e define a conversão para minúsculas.
//! 3.  **Seleção do Algoritmo** ([`stemmer`]): Snowball dedicado ao idioma ou, na falta
//!     dele, o Porter clássico ([`porter`]).
//! 4.  **Processamento** ([`span_stemmer`]): percorre os spans do tipo alvo e grava o radical
//!     no próprio span (**update**) ou em um span novo com os mesmos offsets (**create**).
//!
//! O host (sistema de tipos e span store) é modelado em memória por [`type_system`] e
//! [`document`].
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use std::sync::Arc;
//! use stem_core::{Document, SpanStemmer, StemmerConfig};
//! use stem_core::type_system::{TypeSystemBuilder, ValueKind, ANNOTATION_TYPE};
//!
//! // 1. Sistema de tipos: Token com o atributo `stem`
//! let mut builder = TypeSystemBuilder::new();
//! let token = builder.add_type("Token", ANNOTATION_TYPE).unwrap();
//! let stem = builder.add_feature(token, "stem", ValueKind::String).unwrap();
//! let ts = Arc::new(builder.build());
//!
//! // 2. Documento com um span por palavra
//! let mut doc = Document::new(ts, "Cats");
//! let id = doc.annotate(token, 0, 4).unwrap();
//!
//! // 3. Estágio em modo update
//! let stemmer = SpanStemmer::new(StemmerConfig::new("English", "Token:stem", true)).unwrap();
//! stemmer.process(&mut doc).unwrap();
//!
//! assert_eq!(doc.string_value(id, stem), Some("cat"));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod locale;
pub mod porter;
pub mod span_stemmer;
pub mod stemmer;
pub mod type_system;

pub use config::{FeaturePath, StemmerConfig};
pub use document::{AnnotationId, Document, FeatureValue};
pub use error::{ConfigError, DocumentError, ProcessError, ResolutionError, TypeSystemError};
pub use locale::Locale;
pub use span_stemmer::{AnalysisEngine, SpanStemmer, StemmingReport};
pub use stemmer::{StemmerSelector, StemmingAlgorithm};
