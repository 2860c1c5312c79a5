//! Theme preferences for the relationships view.

use serde::{Deserialize, Serialize};

/// Error returned when a theme name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid theme: {0}")]
pub struct ParseThemeError(pub String);

/// Named themes an agent can pick in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
    Gradient,
    Sunset,
    Ocean,
    Forest,
    Rose,
}

impl ThemeName {
    /// All selectable themes, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Light,
        Self::Dark,
        Self::Gradient,
        Self::Sunset,
        Self::Ocean,
        Self::Forest,
        Self::Rose,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Gradient => "gradient",
            Self::Sunset => "sunset",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
            Self::Rose => "rose",
        }
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemeName {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| ParseThemeError(s.to_string()))
    }
}

/// Fully resolved colors used to render the relationships view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTokens {
    pub background: String,
    pub text: String,
    pub header_color: String,
    pub header_text_color: String,
}

impl Default for ThemeTokens {
    fn default() -> Self {
        Self {
            background: "radial-gradient(circle at top, #102A38 0%, #081A23 55%, #040B10 100%)"
                .to_string(),
            text: "#ffffff".to_string(),
            header_color: "linear-gradient(90deg, #FF8A50, #FF5A1F)".to_string(),
            header_text_color: "#000000".to_string(),
        }
    }
}

impl ThemeTokens {
    /// Overlay a partial style on these tokens, field by field.
    #[must_use]
    pub fn with_style(mut self, style: &ThemeStyle) -> Self {
        if let Some(background) = &style.background {
            self.background.clone_from(background);
        }
        if let Some(text) = &style.text {
            self.text.clone_from(text);
        }
        if let Some(header_color) = &style.header_color {
            self.header_color.clone_from(header_color);
        }
        if let Some(header_text_color) = &style.header_text_color {
            self.header_text_color.clone_from(header_text_color);
        }
        self
    }
}

/// A partial set of theme tokens as stored by the preference service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_text_color: Option<String>,
}

/// A user's stored color scheme. Either part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePreference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ThemeStyle>,
}

impl ThemePreference {
    /// Resolve the tokens to render with, falling back to the defaults.
    #[must_use]
    pub fn tokens(&self) -> ThemeTokens {
        match &self.style {
            Some(style) => ThemeTokens::default().with_style(style),
            None => ThemeTokens::default(),
        }
    }

    /// The selected theme name, or the default one.
    #[must_use]
    pub fn theme_or_default(&self) -> ThemeName {
        self.theme.unwrap_or_default()
    }
}
