//! # Locale do Estágio
//!
//! O idioma configurado serve a dois propósitos:
//!
//! 1. **Escolher o stemmer**: o nome do idioma em inglês ("German", "Portuguese") é a chave
//!    do registro de algoritmos ([`crate::stemmer`]).
//! 2. **Converter para minúsculas**: a conversão respeita regras do idioma. Em turco e
//!    azerbaijano, `I` vira `ı` (sem ponto) e `İ` vira `i`.
//!
//! Aceita código ISO 639-1 (`"pt"`), ISO 639-3 (`"por"`) ou o nome em inglês
//! (`"Portuguese"`). Entradas desconhecidas não são erro: o locale fica "não resolvido",
//! usa o texto cru como nome de exibição e o seletor cai no Porter.

use std::borrow::Cow;

use isolang::Language;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Locale resolvido a partir da configuração `Language`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locale {
    tag: String,
    language: Option<Language>,
}

impl Locale {
    /// Resolve o locale. Falha apenas para entrada vazia.
    pub fn new(language: &str) -> Result<Self, ConfigError> {
        let tag = language.trim();
        if tag.is_empty() {
            return Err(ConfigError::UnresolvableLocale(language.to_string()));
        }

        let lowered = tag.to_ascii_lowercase();
        let resolved = match tag.len() {
            2 => Language::from_639_1(&lowered),
            3 => Language::from_639_3(&lowered),
            _ => None,
        }
        .or_else(|| Language::from_name(tag));

        Ok(Self {
            tag: tag.to_string(),
            language: resolved,
        })
    }

    /// Texto original da configuração (sem espaços nas bordas).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Nome do idioma em inglês, sem qualificadores entre parênteses.
    ///
    /// Ex: `"ell"` → `"Modern Greek"`; `"Klingonês"` → `"Klingonês"`.
    pub fn display_language(&self) -> Cow<'_, str> {
        match self.language {
            Some(language) => {
                let name = language.to_name();
                let name = name.split(" (").next().unwrap_or(name);
                let name = name.split(';').next().unwrap_or(name);
                Cow::Borrowed(name.trim())
            }
            None => Cow::Borrowed(self.tag.as_str()),
        }
    }

    fn is_turkic(&self) -> bool {
        self.language
            .map(|l| matches!(l.to_639_3(), "tur" | "aze" | "azj" | "azb"))
            .unwrap_or(false)
    }

    /// Converte para minúsculas segundo as regras do idioma.
    pub fn to_lowercase(&self, text: &str) -> String {
        if self.is_turkic() {
            let tailored: String = text
                .chars()
                .map(|c| match c {
                    'I' => 'ı',
                    'İ' => 'i',
                    other => other,
                })
                .collect();
            tailored.to_lowercase()
        } else {
            text.to_lowercase()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_codes_and_names() {
        for input in ["en", "eng", "English", "  EN "] {
            let locale = Locale::new(input).unwrap();
            assert_eq!(locale.display_language(), "English", "entrada {input:?}");
        }
        assert_eq!(Locale::new("de").unwrap().display_language(), "German");
        assert_eq!(Locale::new("por").unwrap().display_language(), "Portuguese");
    }

    #[test]
    fn test_unknown_language_keeps_raw_tag() {
        let locale = Locale::new("  Klingonês ").unwrap();
        assert_eq!(locale.tag(), "Klingonês");
        assert!(locale.language().is_none());
        assert_eq!(locale.display_language(), "Klingonês");
    }

    #[test]
    fn test_empty_language_is_rejected() {
        assert!(matches!(
            Locale::new("   "),
            Err(ConfigError::UnresolvableLocale(_))
        ));
    }

    #[test]
    fn test_turkish_dotted_and_dotless_i() {
        let tr = Locale::new("tr").unwrap();
        assert_eq!(tr.to_lowercase("DİYARBAKIR"), "diyarbakır");
        assert_eq!(tr.to_lowercase("ISPARTA"), "ısparta");

        let en = Locale::new("en").unwrap();
        assert_eq!(en.to_lowercase("DIYARBAKIR"), "diyarbakir");
    }

    #[test]
    fn test_generic_unicode_lowercase() {
        let pt = Locale::new("pt").unwrap();
        assert_eq!(pt.to_lowercase("AÇÃO"), "ação");
        let de = Locale::new("German").unwrap();
        assert_eq!(de.to_lowercase("ÜBER"), "über");
    }
}
