//! # Sistema de Tipos das Anotações
//!
//! Cada span de um documento tem um **tipo** (ex: `Token`, `Sentence`). Os tipos formam
//! uma árvore de herança simples cuja raiz é o tipo embutido [`ANNOTATION_TYPE`].
//!
//! Features (atributos) são declaradas em um tipo — o seu **domínio** — e herdadas por
//! todos os subtipos. Uma busca por nome-base sobe a cadeia de supertipos:
//!
//! ```text
//! Annotation
//!   └── Word        (lemma: String)
//!         └── Token (pos: String)
//! ```
//!
//! Aqui `Token` enxerga `lemma`, mas o domínio de `lemma` continua sendo `Word`.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use stem_core::type_system::{TypeSystemBuilder, ValueKind, ANNOTATION_TYPE};
//!
//! let mut builder = TypeSystemBuilder::new();
//! let word = builder.add_type("Word", ANNOTATION_TYPE).unwrap();
//! builder.add_feature(word, "lemma", ValueKind::String).unwrap();
//! let token = builder.add_type("Token", "Word").unwrap();
//! let ts = builder.build();
//!
//! let lemma = ts.feature_by_base_name(token, "lemma").unwrap();
//! assert_eq!(ts.feature(lemma).domain(), word);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::TypeSystemError;

/// Nome do tipo raiz, do qual todo span descende.
pub const ANNOTATION_TYPE: &str = "Annotation";

/// Referência opaca a um tipo declarado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeHandle(usize);

/// Referência opaca a uma feature declarada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureHandle(usize);

/// Tipo dos valores aceitos por uma feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
}

#[derive(Debug, Clone)]
struct TypeDef {
    name: String,
    parent: Option<TypeHandle>,
    features: Vec<FeatureHandle>,
}

/// Declaração de uma feature.
#[derive(Debug, Clone)]
pub struct FeatureDef {
    base_name: String,
    domain: TypeHandle,
    kind: ValueKind,
}

impl FeatureDef {
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Tipo onde a feature foi declarada.
    pub fn domain(&self) -> TypeHandle {
        self.domain
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }
}

/// Monta um [`TypeSystem`] imutável.
#[derive(Debug, Clone)]
pub struct TypeSystemBuilder {
    types: Vec<TypeDef>,
    features: Vec<FeatureDef>,
    by_name: HashMap<String, TypeHandle>,
}

impl TypeSystemBuilder {
    /// Cria um builder contendo apenas o tipo raiz [`ANNOTATION_TYPE`].
    pub fn new() -> Self {
        let mut by_name = HashMap::new();
        by_name.insert(ANNOTATION_TYPE.to_string(), TypeHandle(0));
        Self {
            types: vec![TypeDef {
                name: ANNOTATION_TYPE.to_string(),
                parent: None,
                features: Vec::new(),
            }],
            features: Vec::new(),
            by_name,
        }
    }

    /// Declara um novo tipo como subtipo de `parent`.
    pub fn add_type(&mut self, name: &str, parent: &str) -> Result<TypeHandle, TypeSystemError> {
        if self.by_name.contains_key(name) {
            return Err(TypeSystemError::DuplicateType(name.to_string()));
        }
        let parent = *self
            .by_name
            .get(parent)
            .ok_or_else(|| TypeSystemError::UnknownParent(parent.to_string()))?;

        let handle = TypeHandle(self.types.len());
        self.types.push(TypeDef {
            name: name.to_string(),
            parent: Some(parent),
            features: Vec::new(),
        });
        self.by_name.insert(name.to_string(), handle);
        Ok(handle)
    }

    /// Declara uma feature no tipo `domain`.
    ///
    /// Falha se o próprio tipo já declara uma feature com o mesmo nome-base.
    /// Redeclarar o nome de uma feature herdada é permitido e a sombreia nos subtipos.
    pub fn add_feature(
        &mut self,
        domain: TypeHandle,
        base_name: &str,
        kind: ValueKind,
    ) -> Result<FeatureHandle, TypeSystemError> {
        let owner = &self.types[domain.0];
        if owner
            .features
            .iter()
            .any(|f| self.features[f.0].base_name == base_name)
        {
            return Err(TypeSystemError::DuplicateFeature {
                type_name: owner.name.clone(),
                feature: base_name.to_string(),
            });
        }

        let handle = FeatureHandle(self.features.len());
        self.features.push(FeatureDef {
            base_name: base_name.to_string(),
            domain,
            kind,
        });
        self.types[domain.0].features.push(handle);
        Ok(handle)
    }

    pub fn build(self) -> TypeSystem {
        TypeSystem {
            types: self.types,
            features: self.features,
            by_name: self.by_name,
        }
    }
}

impl Default for TypeSystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Sistema de tipos congelado, compartilhado (via `Arc`) pelos documentos.
#[derive(Debug, Clone)]
pub struct TypeSystem {
    types: Vec<TypeDef>,
    features: Vec<FeatureDef>,
    by_name: HashMap<String, TypeHandle>,
}

impl TypeSystem {
    pub fn type_by_name(&self, name: &str) -> Option<TypeHandle> {
        self.by_name.get(name).copied()
    }

    pub fn type_name(&self, handle: TypeHandle) -> &str {
        &self.types[handle.0].name
    }

    pub fn parent(&self, handle: TypeHandle) -> Option<TypeHandle> {
        self.types[handle.0].parent
    }

    /// Busca uma feature pelo nome-base em `handle` e, em seguida, nos seus supertipos.
    pub fn feature_by_base_name(&self, handle: TypeHandle, base_name: &str) -> Option<FeatureHandle> {
        let mut current = Some(handle);
        while let Some(ty) = current {
            let def = &self.types[ty.0];
            if let Some(found) = def
                .features
                .iter()
                .find(|f| self.features[f.0].base_name == base_name)
            {
                return Some(*found);
            }
            current = def.parent;
        }
        None
    }

    pub fn feature(&self, handle: FeatureHandle) -> &FeatureDef {
        &self.features[handle.0]
    }

    /// `true` se `sub` é `sup` ou descende dele.
    pub fn subsumes(&self, sup: TypeHandle, sub: TypeHandle) -> bool {
        let mut current = Some(sub);
        while let Some(ty) = current {
            if ty == sup {
                return true;
            }
            current = self.types[ty.0].parent;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (TypeSystem, TypeHandle, TypeHandle) {
        let mut builder = TypeSystemBuilder::new();
        let word = builder.add_type("Word", ANNOTATION_TYPE).unwrap();
        builder.add_feature(word, "lemma", ValueKind::String).unwrap();
        let token = builder.add_type("Token", "Word").unwrap();
        builder.add_feature(token, "pos", ValueKind::String).unwrap();
        (builder.build(), word, token)
    }

    #[test]
    fn test_feature_lookup_walks_supertypes() {
        let (ts, word, token) = sample();
        let lemma = ts.feature_by_base_name(token, "lemma").unwrap();
        assert_eq!(ts.feature(lemma).domain(), word);
        assert_eq!(ts.feature(lemma).kind(), ValueKind::String);

        // Supertipo não enxerga features do subtipo
        assert!(ts.feature_by_base_name(word, "pos").is_none());
    }

    #[test]
    fn test_subsumes() {
        let (ts, word, token) = sample();
        let root = ts.type_by_name(ANNOTATION_TYPE).unwrap();
        assert!(ts.subsumes(word, token));
        assert!(ts.subsumes(root, token));
        assert!(ts.subsumes(token, token));
        assert!(!ts.subsumes(token, word));

        assert_eq!(ts.parent(token), Some(word));
        assert_eq!(ts.parent(word), Some(root));
        assert_eq!(ts.parent(root), None);
    }

    #[test]
    fn test_declaration_errors() {
        let mut builder = TypeSystemBuilder::new();
        let word = builder.add_type("Word", ANNOTATION_TYPE).unwrap();
        assert_eq!(
            builder.add_type("Word", ANNOTATION_TYPE),
            Err(TypeSystemError::DuplicateType("Word".into()))
        );
        assert_eq!(
            builder.add_type("Token", "Missing"),
            Err(TypeSystemError::UnknownParent("Missing".into()))
        );
        builder.add_feature(word, "lemma", ValueKind::String).unwrap();
        assert!(matches!(
            builder.add_feature(word, "lemma", ValueKind::String),
            Err(TypeSystemError::DuplicateFeature { .. })
        ));
    }

    #[test]
    fn test_shadowed_feature_resolves_to_nearest_declaration() {
        let mut builder = TypeSystemBuilder::new();
        let word = builder.add_type("Word", ANNOTATION_TYPE).unwrap();
        builder.add_feature(word, "stem", ValueKind::String).unwrap();
        let token = builder.add_type("Token", "Word").unwrap();
        let own = builder.add_feature(token, "stem", ValueKind::String).unwrap();
        let ts = builder.build();

        assert_eq!(ts.feature_by_base_name(token, "stem"), Some(own));
        assert_eq!(ts.type_name(ts.feature(own).domain()), "Token");
    }
}
