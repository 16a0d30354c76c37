use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color pattern is valid"));

/// Named accent colors offered by the design picker.
pub static PALETTE: [(&str, &str); 5] = [
    ("indigo", "#4f46e5"),
    ("sky", "#0ea5e9"),
    ("teal", "#14b8a6"),
    ("rose", "#f43f5e"),
    ("slate", "#475569"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DesignError {
    #[error("unknown template '{0}' (expected one of: classic, modern, executive, creative, minimalist)")]
    UnknownTemplate(String),

    #[error("invalid accent color '{0}': expected #rrggbb or a palette name")]
    InvalidAccent(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateName {
    #[default]
    Classic,
    Modern,
    Executive,
    Creative,
    Minimalist,
}

impl TemplateName {
    pub const ALL: [TemplateName; 5] = [
        TemplateName::Modern,
        TemplateName::Executive,
        TemplateName::Creative,
        TemplateName::Classic,
        TemplateName::Minimalist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateName::Classic => "classic",
            TemplateName::Modern => "modern",
            TemplateName::Executive => "executive",
            TemplateName::Creative => "creative",
            TemplateName::Minimalist => "minimalist",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateName::Classic => "Classic",
            TemplateName::Modern => "Modern",
            TemplateName::Executive => "Executive",
            TemplateName::Creative => "Creative",
            TemplateName::Minimalist => "Minimalist",
        }
    }

    /// Resolves a template name, falling back to the baseline template for
    /// anything unrecognized.
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for TemplateName {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(TemplateName::Classic),
            "modern" => Ok(TemplateName::Modern),
            "executive" => Ok(TemplateName::Executive),
            "creative" => Ok(TemplateName::Creative),
            "minimalist" => Ok(TemplateName::Minimalist),
            _ => Err(DesignError::UnknownTemplate(s.to_string())),
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated `#rrggbb` accent color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccentColor(String);

impl AccentColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The translucent variant used for soft backgrounds (`20` alpha suffix).
    pub fn light(&self) -> String {
        format!("{}20", self.0)
    }
}

impl Default for AccentColor {
    fn default() -> Self {
        AccentColor(PALETTE[0].1.to_string())
    }
}

impl FromStr for AccentColor {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((_, hex)) = PALETTE.iter().find(|(name, _)| name.eq_ignore_ascii_case(s)) {
            return Ok(AccentColor(hex.to_string()));
        }

        if HEX_COLOR.is_match(s) {
            Ok(AccentColor(s.to_lowercase()))
        } else {
            Err(DesignError::InvalidAccent(s.to_string()))
        }
    }
}

impl TryFrom<String> for AccentColor {
    type Error = DesignError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccentColor> for String {
    fn from(value: AccentColor) -> Self {
        value.0
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Presentational choice held next to the resume, never inside it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesignChoice {
    pub template: TemplateName,
    pub accent: AccentColor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_template_resolves_to_baseline() {
        assert_eq!(TemplateName::resolve("brutalist"), TemplateName::Classic);
        assert_eq!(TemplateName::resolve("Executive"), TemplateName::Executive);
    }

    #[test]
    fn test_accent_accepts_hex_and_palette_names() {
        assert_eq!("#0EA5E9".parse::<AccentColor>().unwrap().as_str(), "#0ea5e9");
        assert_eq!("Rose".parse::<AccentColor>().unwrap().as_str(), "#f43f5e");
        assert!("#12345".parse::<AccentColor>().is_err());
        assert!("red".parse::<AccentColor>().is_err());
    }

    #[test]
    fn test_light_variant_appends_alpha() {
        let accent: AccentColor = "#4f46e5".parse().unwrap();
        assert_eq!(accent.light(), "#4f46e520");
    }
}
