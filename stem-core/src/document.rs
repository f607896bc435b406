//! # Documento e Span Store
//!
//! Um [`Document`] guarda o texto analisado e os spans (anotações) criados sobre ele.
//! Os offsets de um span são **de caractere** (não de byte), no intervalo semiaberto
//! `[begin, end)`.
//!
//! Só spans registrados com [`Document::add_to_indexes`] aparecem em [`Document::select`],
//! que os devolve na ordem natural do host:
//!
//! 1. `begin` crescente;
//! 2. `end` decrescente (o span mais longo primeiro);
//! 3. ordem de criação.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::type_system::{FeatureHandle, TypeHandle, TypeSystem, ValueKind};

/// Identificador de um span dentro do seu documento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationId(usize);

/// Valor primitivo ou string de uma feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl FeatureValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            FeatureValue::String(_) => ValueKind::String,
            FeatureValue::Integer(_) => ValueKind::Integer,
            FeatureValue::Float(_) => ValueKind::Float,
            FeatureValue::Boolean(_) => ValueKind::Boolean,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FeatureValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Um span tipado sobre o texto do documento.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    type_handle: TypeHandle,
    begin: usize,
    end: usize,
    values: Vec<(FeatureHandle, FeatureValue)>,
}

impl Annotation {
    pub fn type_handle(&self) -> TypeHandle {
        self.type_handle
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn value(&self, feature: FeatureHandle) -> Option<&FeatureValue> {
        self.values
            .iter()
            .find(|(f, _)| *f == feature)
            .map(|(_, v)| v)
    }
}

/// Documento com texto opcional e span store.
#[derive(Debug, Clone)]
pub struct Document {
    text: Option<String>,
    /// Offset de byte de cada caractere, mais `text.len()` no fim.
    boundaries: Vec<usize>,
    type_system: Arc<TypeSystem>,
    annotations: Vec<Annotation>,
    indexed: Vec<bool>,
}

impl Document {
    pub fn new(type_system: Arc<TypeSystem>, text: impl Into<String>) -> Self {
        let text = text.into();
        let boundaries = char_boundaries(&text);
        Self {
            text: Some(text),
            boundaries,
            type_system,
            annotations: Vec::new(),
            indexed: Vec::new(),
        }
    }

    /// Documento sem texto: nenhum span terá texto coberto.
    pub fn without_text(type_system: Arc<TypeSystem>) -> Self {
        Self {
            text: None,
            boundaries: Vec::new(),
            type_system,
            annotations: Vec::new(),
            indexed: Vec::new(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn type_system(&self) -> &TypeSystem {
        &self.type_system
    }

    /// Aloca um novo span. Ele só fica visível em [`select`](Self::select) depois de
    /// [`add_to_indexes`](Self::add_to_indexes).
    pub fn create_annotation(
        &mut self,
        type_handle: TypeHandle,
        begin: usize,
        end: usize,
    ) -> Result<AnnotationId, DocumentError> {
        if begin > end {
            return Err(DocumentError::InvalidOffsets { begin, end });
        }
        let id = AnnotationId(self.annotations.len());
        self.annotations.push(Annotation {
            type_handle,
            begin,
            end,
            values: Vec::new(),
        });
        self.indexed.push(false);
        Ok(id)
    }

    pub fn add_to_indexes(&mut self, id: AnnotationId) -> Result<(), DocumentError> {
        let slot = self
            .indexed
            .get_mut(id.0)
            .ok_or(DocumentError::UnknownAnnotation(id))?;
        *slot = true;
        Ok(())
    }

    /// Atalho para criar e registrar um span.
    pub fn annotate(
        &mut self,
        type_handle: TypeHandle,
        begin: usize,
        end: usize,
    ) -> Result<AnnotationId, DocumentError> {
        let id = self.create_annotation(type_handle, begin, end)?;
        self.add_to_indexes(id)?;
        Ok(id)
    }

    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.get(id.0)
    }

    /// Spans registrados do tipo `type_handle` ou de qualquer subtipo, na ordem natural.
    pub fn select(&self, type_handle: TypeHandle) -> Vec<AnnotationId> {
        let mut ids: Vec<AnnotationId> = self
            .annotations
            .iter()
            .enumerate()
            .filter(|(i, a)| {
                self.indexed[*i] && self.type_system.subsumes(type_handle, a.type_handle)
            })
            .map(|(i, _)| AnnotationId(i))
            .collect();

        ids.sort_by(|a, b| {
            let (x, y) = (&self.annotations[a.0], &self.annotations[b.0]);
            x.begin
                .cmp(&y.begin)
                .then(y.end.cmp(&x.end))
                .then(a.cmp(b))
        });
        ids
    }

    /// Texto coberto pelo span.
    ///
    /// `None` se o documento não tem texto ou se os offsets caem fora dele.
    pub fn covered_text(&self, id: AnnotationId) -> Option<&str> {
        let text = self.text.as_deref()?;
        let annotation = self.annotations.get(id.0)?;
        if annotation.begin > annotation.end {
            return None;
        }
        let start = *self.boundaries.get(annotation.begin)?;
        let stop = *self.boundaries.get(annotation.end)?;
        text.get(start..stop)
    }

    /// Escreve o valor de uma feature, validando domínio e tipo do valor.
    pub fn set_value(
        &mut self,
        id: AnnotationId,
        feature: FeatureHandle,
        value: FeatureValue,
    ) -> Result<(), DocumentError> {
        let annotation = self
            .annotations
            .get(id.0)
            .ok_or(DocumentError::UnknownAnnotation(id))?;

        let def = self.type_system.feature(feature);
        if !self.type_system.subsumes(def.domain(), annotation.type_handle) {
            return Err(DocumentError::DomainMismatch {
                feature: def.base_name().to_string(),
                domain: self.type_system.type_name(def.domain()).to_string(),
                type_name: self.type_system.type_name(annotation.type_handle).to_string(),
            });
        }
        if def.kind() != value.kind() {
            return Err(DocumentError::KindMismatch {
                feature: def.base_name().to_string(),
                expected: def.kind(),
                found: value.kind(),
            });
        }

        let values = &mut self.annotations[id.0].values;
        match values.iter_mut().find(|(f, _)| *f == feature) {
            Some((_, slot)) => *slot = value,
            None => values.push((feature, value)),
        }
        Ok(())
    }

    pub fn set_string_value(
        &mut self,
        id: AnnotationId,
        feature: FeatureHandle,
        value: impl Into<String>,
    ) -> Result<(), DocumentError> {
        self.set_value(id, feature, FeatureValue::String(value.into()))
    }

    pub fn value(&self, id: AnnotationId, feature: FeatureHandle) -> Option<&FeatureValue> {
        self.annotations.get(id.0)?.value(feature)
    }

    pub fn string_value(&self, id: AnnotationId, feature: FeatureHandle) -> Option<&str> {
        self.value(id, feature)?.as_str()
    }

    /// Total de spans alocados, registrados ou não.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}
