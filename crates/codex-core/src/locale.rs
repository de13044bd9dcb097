//! Supported locales and per-locale strings

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A locale from the fixed supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fr,
    De,
    Es,
    It,
    Pt,
}

impl Locale {
    /// Every supported locale
    pub const ALL: [Locale; 6] = [
        Locale::En,
        Locale::Fr,
        Locale::De,
        Locale::Es,
        Locale::It,
        Locale::Pt,
    ];

    /// Two-letter code used in URLs and data files
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::De => "de",
            Locale::Es => "es",
            Locale::It => "it",
            Locale::Pt => "pt",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        Locale::ALL
            .into_iter()
            .find(|locale| locale.code() == lower)
            .ok_or_else(|| Error::UnsupportedLocale(s.to_string()))
    }
}

/// One string per supported locale.
///
/// Data files carry translations as a `{code: text}` map. Conversion from that
/// map fails when any supported locale is missing, so a value of this type is
/// always complete and [`Translations::get`] cannot miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct Translations {
    en: String,
    fr: String,
    de: String,
    es: String,
    it: String,
    pt: String,
}

impl Translations {
    /// Build from one closure call per locale
    pub fn from_fn(mut f: impl FnMut(Locale) -> String) -> Self {
        Self {
            en: f(Locale::En),
            fr: f(Locale::Fr),
            de: f(Locale::De),
            es: f(Locale::Es),
            it: f(Locale::It),
            pt: f(Locale::Pt),
        }
    }

    /// Same text in every locale
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::from_fn(|_| text.clone())
    }

    /// Exact lookup for a locale
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Fr => &self.fr,
            Locale::De => &self.de,
            Locale::Es => &self.es,
            Locale::It => &self.it,
            Locale::Pt => &self.pt,
        }
    }
}

impl TryFrom<BTreeMap<String, String>> for Translations {
    type Error = Error;

    fn try_from(mut map: BTreeMap<String, String>) -> Result<Self> {
        let mut take = |locale: Locale| {
            map.remove(locale.code())
                .ok_or_else(|| Error::MissingTranslation(locale.code().to_string()))
        };
        Ok(Self {
            en: take(Locale::En)?,
            fr: take(Locale::Fr)?,
            de: take(Locale::De)?,
            es: take(Locale::Es)?,
            it: take(Locale::It)?,
            pt: take(Locale::Pt)?,
        })
    }
}

impl From<Translations> for BTreeMap<String, String> {
    fn from(t: Translations) -> Self {
        BTreeMap::from([
            ("en".to_string(), t.en),
            ("fr".to_string(), t.fr),
            ("de".to_string(), t.de),
            ("es".to_string(), t.es),
            ("it".to_string(), t.it),
            ("pt".to_string(), t.pt),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("fr".parse::<Locale>().unwrap(), Locale::Fr);
        assert_eq!("DE".parse::<Locale>().unwrap(), Locale::De);
        assert!(matches!(
            "nl".parse::<Locale>(),
            Err(Error::UnsupportedLocale(code)) if code == "nl"
        ));
    }

    #[test]
    fn test_exact_lookup() {
        let t = Translations::from_fn(|l| format!("name-{}", l.code()));
        for locale in Locale::ALL {
            assert_eq!(t.get(locale), format!("name-{}", locale.code()));
        }
    }

    #[test]
    fn test_missing_locale_rejected() {
        let json = r#"{"en":"a","fr":"b","de":"c","es":"d","it":"e"}"#;
        let err = serde_json::from_str::<Translations>(json).unwrap_err();
        assert!(err.to_string().contains("pt"));
    }

    #[test]
    fn test_map_round_trip() {
        let json = r#"{"de":"c","en":"a","es":"d","fr":"b","it":"e","pt":"f"}"#;
        let t: Translations = serde_json::from_str(json).unwrap();
        assert_eq!(t.get(Locale::Pt), "f");
        assert_eq!(serde_json::to_string(&t).unwrap(), json);
    }
}
