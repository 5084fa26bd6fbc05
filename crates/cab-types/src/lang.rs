use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language code, case-insensitive on input and kept uppercase ("EN", "JA", "ZH-HANS")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LangTag(String);

impl LangTag {
    pub fn parse(raw: &str) -> Result<Self, LangTagError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LangTagError::Empty);
        }
        if trimmed.eq_ignore_ascii_case("auto") {
            return Err(LangTagError::Auto);
        }

        Ok(Self(trimmed.to_uppercase()))
    }

    /// English. Default target and the fallback when detection fails
    pub fn en() -> Self {
        Self("EN".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form for services that take ISO codes verbatim
    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for LangTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LangTag {
    type Err = LangTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LangTag {
    type Error = LangTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LangTag> for String {
    fn from(tag: LangTag) -> Self {
        tag.0
    }
}

/// Source side of a lookup: either a concrete tag or "auto" (detect first)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceLang {
    #[default]
    Auto,
    Tag(LangTag),
}

impl SourceLang {
    pub fn parse(raw: &str) -> Result<Self, LangTagError> {
        if raw.trim().eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }

        LangTag::parse(raw).map(Self::Tag)
    }

    pub fn tag(&self) -> Option<&LangTag> {
        match self {
            Self::Auto => None,
            Self::Tag(tag) => Some(tag),
        }
    }
}

impl From<LangTag> for SourceLang {
    fn from(tag: LangTag) -> Self {
        Self::Tag(tag)
    }
}

impl fmt::Display for SourceLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Tag(tag) => fmt::Display::fmt(tag, f),
        }
    }
}

impl TryFrom<String> for SourceLang {
    type Error = LangTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SourceLang> for String {
    fn from(lang: SourceLang) -> Self {
        lang.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LangTagError {
    #[error("language tag must not be empty")]
    Empty,
    #[error("\"auto\" is only valid as a source language")]
    Auto,
}
