use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::LocaleError;

/// Supported UI languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Th,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Th];

    /// Code stored in the preference store and the document `lang` attribute
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Th => "th",
        }
    }

    /// Name of the language in itself
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Th => "ไทย",
        }
    }

    /// Text direction; both supported scripts are left-to-right
    pub fn direction(&self) -> &'static str {
        "ltr"
    }

    /// Font class applied to the document root
    pub fn font_class(&self) -> &'static str {
        match self {
            Language::En => "font-inter",
            Language::Th => "font-sarabun",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "en" => Ok(Language::En),
            "th" => Ok(Language::Th),
            other => Err(LocaleError::UnsupportedLanguage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("th".parse::<Language>().unwrap(), Language::Th);
        assert!(matches!(
            "fr".parse::<Language>(),
            Err(LocaleError::UnsupportedLanguage(code)) if code == "fr"
        ));
        // Codes are case-sensitive, like the stored values
        assert!("TH".parse::<Language>().is_err());
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }
}
