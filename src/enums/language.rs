use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Languages for item descriptions and offer messages.
///
/// Parses from and displays as the language name used by steamcommunity.com, e.g.
/// `"english"` or `"schinese"`.
#[derive(Default, Debug, Deserialize, Serialize, Display, EnumString, PartialEq, Eq, Clone, Copy)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Arabic,
    Bulgarian,
    #[strum(serialize = "schinese")]
    ChineseSimplified,
    #[strum(serialize = "tchinese")]
    ChineseTraditional,
    Czech,
    Danish,
    Dutch,
    /// The default language.
    #[default]
    English,
    Finnish,
    French,
    German,
    Greek,
    Hungarian,
    Italian,
    Japanese,
    #[strum(serialize = "koreana")]
    Korean,
    Norwegian,
    Polish,
    Portuguese,
    #[strum(serialize = "brazilian")]
    PortugueseBrazil,
    Romanian,
    Russian,
    #[strum(serialize = "spanish")]
    SpanishSpain,
    #[strum(serialize = "latam")]
    SpanishLatinAmerica,
    Swedish,
    Thai,
    Turkish,
    Ukrainian,
    Vietnamese,
}

impl Language {
    /// The language name sent as the `l` parameter to steamcommunity.com and as `language` to
    /// the Web API.
    pub fn api_language_code(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn gets_api_language_codes() {
        assert_eq!(Language::English.api_language_code(), "english");
        assert_eq!(Language::ChineseSimplified.api_language_code(), "schinese");
        assert_eq!(Language::SpanishLatinAmerica.api_language_code(), "latam");
    }

    #[test]
    fn parses_api_language_code() {
        assert_eq!(Language::from_str("schinese").unwrap(), Language::ChineseSimplified);
        assert_eq!(Language::from_str("german").unwrap(), Language::German);
        assert!(Language::from_str("klingon").is_err());
    }
}
