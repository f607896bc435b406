//! # Estágio de Stemming sobre Spans
//!
//! Para cada span do tipo configurado, calcula o radical do texto coberto e o grava
//! em um atributo.
//!
//! ## Fluxo por documento
//!
//! 1. Resolve o tipo do alvo (`Token` em `"Token:stem"`) no sistema de tipos do documento.
//! 2. Resolve o atributo (`stem`):
//!    - **Update**: procurado no próprio tipo iterado. O componente de tipo do descritor é
//!      reaproveitado como tipo de iteração.
//!    - **Create**: procurado no tipo nomeado pelo descritor; o **domínio** do atributo
//!      (tipo que o declara) define o tipo do span criado.
//! 3. Percorre os spans em ordem de posição. Para cada um:
//!    `texto coberto → stem → minúsculas (locale) → grava`.
//!    Spans sem texto coberto são pulados.
//!
//! ## Concorrência
//!
//! O algoritmo é uma função pura e o estágio não guarda estado entre documentos, então
//! uma mesma instância pode processar vários documentos em paralelo
//! ([`SpanStemmer::process_batch`]).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::config::{FeaturePath, StemmerConfig};
use crate::document::{AnnotationId, Document};
use crate::error::{ConfigError, DocumentError, ProcessError, ResolutionError};
use crate::locale::Locale;
use crate::stemmer::{StemmerSelector, StemmingAlgorithm};
use crate::type_system::{FeatureHandle, TypeHandle};

/// Interface de um estágio do pipeline, chamada pelo host uma vez por documento.
pub trait AnalysisEngine: Send + Sync {
    fn process(&self, document: &mut Document) -> Result<StemmingReport, ProcessError>;
}

/// Resumo de uma chamada a `process`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StemmingReport {
    /// Spans do tipo alvo visitados.
    pub visited: usize,
    /// Spans sem texto coberto.
    pub skipped: usize,
    /// Atributos gravados (update) ou spans criados (create).
    pub written: usize,
}

/// Estágio que grava o radical de cada span.
#[derive(Debug)]
pub struct SpanStemmer {
    locale: Locale,
    algorithm: Box<dyn StemmingAlgorithm>,
    target: FeaturePath,
    update: bool,
}

impl SpanStemmer {
    /// Valida a configuração e escolhe o algoritmo com o seletor padrão.
    pub fn new(config: StemmerConfig) -> Result<Self, ConfigError> {
        Self::with_selector(config, &StemmerSelector::default())
    }

    pub fn with_selector(config: StemmerConfig, selector: &StemmerSelector) -> Result<Self, ConfigError> {
        let locale = Locale::new(&config.language)?;
        let algorithm = selector.select(&locale.display_language());
        let target = config.feature_path()?;

        info!(
            language = %config.language,
            algorithm = algorithm.name(),
            target = %config.feature,
            update = config.update,
            "span stemmer initialized"
        );

        Ok(Self {
            locale,
            algorithm,
            target,
            update: config.update,
        })
    }

    pub fn algorithm(&self) -> &dyn StemmingAlgorithm {
        self.algorithm.as_ref()
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn target(&self) -> &FeaturePath {
        &self.target
    }

    pub fn is_update(&self) -> bool {
        self.update
    }

    /// Radical em minúsculas, segundo o locale configurado.
    pub fn stem_word(&self, word: &str) -> String {
        self.locale.to_lowercase(&self.algorithm.stem(word))
    }

    fn resolve_type(&self, document: &Document) -> Result<TypeHandle, ResolutionError> {
        document
            .type_system()
            .type_by_name(self.target.type_name())
            .ok_or_else(|| ResolutionError::UnknownType(self.target.type_name().to_string()))
    }

    fn resolve_feature(&self, document: &Document, iterated: TypeHandle) -> Result<FeatureHandle, ResolutionError> {
        let owner = if self.update {
            iterated
        } else {
            self.resolve_type(document)?
        };
        let ts = document.type_system();
        ts.feature_by_base_name(owner, self.target.feature_name())
            .ok_or_else(|| ResolutionError::UnknownFeature {
                type_name: ts.type_name(owner).to_string(),
                feature: self.target.feature_name().to_string(),
            })
    }

    /// Aplica o stemming a todos os spans do tipo alvo.
    pub fn process(&self, document: &mut Document) -> Result<StemmingReport, ProcessError> {
        let iterated = self.resolve_type(document)?;
        let feature = self.resolve_feature(document, iterated)?;
        let domain = document.type_system().feature(feature).domain();

        // Snapshot: spans criados abaixo não entram nesta iteração
        let spans: Vec<AnnotationId> = document.select(iterated);
        let mut report = StemmingReport::default();

        for id in spans {
            report.visited += 1;
            let stem = match document.covered_text(id) {
                Some(text) if !text.is_empty() => self.stem_word(text),
                _ => {
                    trace!(?id, "span without covered text, skipping");
                    report.skipped += 1;
                    continue;
                }
            };

            if self.update {
                document.set_string_value(id, feature, stem)?;
            } else {
                let source = document
                    .annotation(id)
                    .ok_or(DocumentError::UnknownAnnotation(id))?;
                let (begin, end) = (source.begin(), source.end());
                let created = document.create_annotation(domain, begin, end)?;
                document.set_string_value(created, feature, stem)?;
                document.add_to_indexes(created)?;
            }
            report.written += 1;
        }

        debug!(
            visited = report.visited,
            skipped = report.skipped,
            written = report.written,
            update = self.update,
            "document stemmed"
        );
        Ok(report)
    }

    /// Processa documentos independentes em paralelo.
    pub fn process_batch(&self, documents: &mut [Document]) -> Vec<Result<StemmingReport, ProcessError>> {
        documents
            .par_iter_mut()
            .map(|document| self.process(document))
            .collect()
    }
}

impl AnalysisEngine for SpanStemmer {
    fn process(&self, document: &mut Document) -> Result<StemmingReport, ProcessError> {
        SpanStemmer::process(self, document)
    }
}
