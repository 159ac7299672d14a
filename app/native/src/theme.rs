//! Color themes for rendered wallpapers.
//!
//! A [`Theme`] maps token categories to colors and carries the background,
//! highlight, gutter and header colors. It is built once per batch and never
//! mutated; the highlighter receives a `syntect` theme derived from it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use image::Rgb;
use syntect::highlighting::{
    Color, FontStyle, ScopeSelectors, StyleModifier, Theme as SyntectTheme, ThemeItem,
    ThemeSettings,
};

use crate::config::{ConfigError, Rgba, parse_hex_color};

/// Syntax token categories a theme can color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Comment,
    Error,
    GenericEmph,
    GenericStrong,
    GenericDeleted,
    GenericError,
    GenericInserted,
    Keyword,
    KeywordOperator,
    Literal,
    Name,
    NameFunction,
    NameTag,
    NameImport,
    NamePackage,
    Number,
    Operator,
    Punctuation,
    String,
    StringRegex,
    StringLink,
}

impl TokenCategory {
    /// All categories, in the order their theme entries are emitted.
    pub const ALL: [Self; 21] = [
        Self::Comment,
        Self::Error,
        Self::GenericEmph,
        Self::GenericStrong,
        Self::GenericDeleted,
        Self::GenericError,
        Self::GenericInserted,
        Self::Keyword,
        Self::KeywordOperator,
        Self::Literal,
        Self::Name,
        Self::NameFunction,
        Self::NameTag,
        Self::NameImport,
        Self::NamePackage,
        Self::Number,
        Self::Operator,
        Self::Punctuation,
        Self::String,
        Self::StringRegex,
        Self::StringLink,
    ];

    /// Configuration key of the category.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Error => "error",
            Self::GenericEmph => "generic-emph",
            Self::GenericStrong => "generic-strong",
            Self::GenericDeleted => "generic-deleted",
            Self::GenericError => "generic-error",
            Self::GenericInserted => "generic-inserted",
            Self::Keyword => "keyword",
            Self::KeywordOperator => "keyword-operator",
            Self::Literal => "literal",
            Self::Name => "name",
            Self::NameFunction => "name-function",
            Self::NameTag => "name-tag",
            Self::NameImport => "name-import",
            Self::NamePackage => "name-package",
            Self::Number => "number",
            Self::Operator => "operator",
            Self::Punctuation => "punctuation",
            Self::String => "string",
            Self::StringRegex => "string-regex",
            Self::StringLink => "string-link",
        }
    }

    /// Scope selectors (TextMate syntax) matched by the category.
    ///
    /// More specific selectors win inside `syntect`, so e.g. `keyword.operator.word`
    /// beats `keyword.operator` and `keyword`.
    #[must_use]
    pub const fn scope_selector(self) -> &'static str {
        match self {
            Self::Comment => "comment, punctuation.definition.comment",
            Self::Error => "invalid",
            Self::GenericEmph => "markup.italic",
            Self::GenericStrong => "markup.bold, markup.heading",
            Self::GenericDeleted => "markup.deleted",
            Self::GenericError => "message.error",
            Self::GenericInserted => "markup.inserted",
            Self::Keyword => "keyword, storage",
            Self::KeywordOperator => "keyword.operator.word, keyword.operator.logical.python",
            Self::Literal => "constant",
            Self::Name => "variable, entity.name, support.type, support.class",
            Self::NameFunction => "entity.name.function, support.function, variable.function",
            Self::NameTag => "entity.name.tag",
            Self::NameImport => "meta.import entity.name, meta.statement.import",
            Self::NamePackage => "entity.name.namespace, entity.name.module, support.module",
            Self::Number => "constant.numeric",
            Self::Operator => "keyword.operator",
            Self::Punctuation => "punctuation",
            Self::String => "string, punctuation.definition.string",
            Self::StringRegex => "string.regexp",
            Self::StringLink => "markup.underline.link, string.other.link",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.key()) }
}

impl FromStr for TokenCategory {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.key() == s)
            .ok_or_else(|| ConfigError::UnknownCategory(s.to_string()))
    }
}

/// Style applied to one token category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenStyle {
    pub category: TokenCategory,
    /// Foreground color; `None` keeps the default foreground.
    pub color: Option<Rgb<u8>>,
    pub font_style: FontStyle,
}

/// An immutable rendering theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub background: Rgb<u8>,
    pub highlight: Rgb<u8>,
    pub foreground: Rgb<u8>,
    pub line_number_background: Rgb<u8>,
    pub line_number_foreground: Rgb<u8>,
    pub header_background: Rgb<u8>,
    pub header_foreground: Rgb<u8>,
    pub tokens: Vec<TokenStyle>,
}

/// Built-in theme names.
pub const BUILTIN_THEMES: &[&str] = &["ayu-mirage"];

#[allow(clippy::cast_possible_truncation)]
const fn rgb(hex: u32) -> Rgb<u8> {
    Rgb([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8])
}

const fn colored(category: TokenCategory, hex: u32) -> TokenStyle {
    TokenStyle {
        category,
        color: Some(rgb(hex)),
        font_style: FontStyle::empty(),
    }
}

const fn styled(category: TokenCategory, font_style: FontStyle) -> TokenStyle {
    TokenStyle { category, color: None, font_style }
}

impl Theme {
    /// The Ayu Mirage palette.
    #[must_use]
    pub fn ayu_mirage() -> Self {
        use TokenCategory as T;

        let background = rgb(0x001f_2430);
        let line_number_background = rgb(0x001f_2430);
        let line_number_foreground = Rgba { r: 0x8a, g: 0x91, b: 0x99, a: 0x66 };

        Self {
            name: "ayu-mirage".to_string(),
            background,
            highlight: rgb(0x001a_1f29),
            foreground: rgb(0x0067_96e6),
            line_number_background,
            line_number_foreground: line_number_foreground.over(line_number_background),
            header_background: rgb(0x0017_1b24),
            header_foreground: rgb(0x00cc_cac2),
            tokens: vec![
                colored(T::Comment, 0x0064_768b),
                colored(T::Error, 0x00ff_6666),
                styled(T::GenericEmph, FontStyle::ITALIC),
                styled(T::GenericStrong, FontStyle::BOLD),
                colored(T::GenericDeleted, 0x00ff_6666),
                colored(T::GenericError, 0x00ff_6666),
                colored(T::GenericInserted, 0x0087_d96c),
                colored(T::Keyword, 0x00ff_ad66),
                colored(T::KeywordOperator, 0x00ff_ad66),
                colored(T::Literal, 0x00af_875f),
                colored(T::Name, 0x0073_d0ff),
                colored(T::NameFunction, 0x00ff_d173),
                colored(T::NameTag, 0x005c_cfe6),
                colored(T::NameImport, 0x00d5_ff80),
                colored(T::NamePackage, 0x00d5_ff80),
                colored(T::Number, 0x00df_bfff),
                colored(T::Operator, 0x00f2_9e74),
                colored(T::Punctuation, 0x00cc_cac2),
                colored(T::String, 0x00d5_ff80),
                colored(T::StringRegex, 0x0095_e6cb),
                colored(T::StringLink, 0x005c_cfe6),
            ],
        }
    }

    /// Looks up a built-in theme by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownTheme` for names not in [`BUILTIN_THEMES`].
    pub fn by_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "ayu-mirage" | "" => Ok(Self::ayu_mirage()),
            other => Err(ConfigError::UnknownTheme(other.to_string())),
        }
    }

    /// Returns a copy of the theme with colors replaced by configuration overrides.
    ///
    /// Keys are token category names or one of the surface names
    /// (`background`, `highlight`, `foreground`, `header-background`,
    /// `header-foreground`, `line-number-background`, `line-number-foreground`).
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys or values that are not hex colors.
    pub fn with_overrides(mut self, colors: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        for (key, value) in colors {
            let color = parse_hex_color(value).ok_or_else(|| ConfigError::InvalidColor {
                key: key.clone(),
                value: value.clone(),
            })?;

            match key.as_str() {
                "background" => self.background = color.over(self.background),
                "highlight" => self.highlight = color.over(self.background),
                "foreground" => self.foreground = color.over(self.background),
                "header-background" => self.header_background = color.to_rgb(),
                "header-foreground" => {
                    self.header_foreground = color.over(self.header_background);
                }
                "line-number-background" => self.line_number_background = color.to_rgb(),
                "line-number-foreground" => {
                    self.line_number_foreground = color.over(self.line_number_background);
                }
                category => {
                    let category = category.parse::<TokenCategory>()?;
                    let resolved = color.over(self.background);
                    match self.tokens.iter_mut().find(|token| token.category == category) {
                        Some(token) => token.color = Some(resolved),
                        None => self.tokens.push(TokenStyle {
                            category,
                            color: Some(resolved),
                            font_style: FontStyle::empty(),
                        }),
                    }
                }
            }
        }
        Ok(self)
    }

    /// Returns the style for a category, if the theme defines one.
    #[must_use]
    pub fn style_for(&self, category: TokenCategory) -> Option<&TokenStyle> {
        self.tokens.iter().find(|token| token.category == category)
    }

    /// Converts the theme into a `syntect` highlighting theme.
    #[must_use]
    pub fn to_syntect(&self) -> SyntectTheme {
        let scopes = self
            .tokens
            .iter()
            .filter_map(|token| {
                let scope = ScopeSelectors::from_str(token.category.scope_selector()).ok()?;
                Some(ThemeItem {
                    scope,
                    style: StyleModifier {
                        foreground: token.color.map(to_syntect_color),
                        background: None,
                        font_style: Some(token.font_style),
                    },
                })
            })
            .collect();

        SyntectTheme {
            name: Some(self.name.clone()),
            settings: ThemeSettings {
                foreground: Some(to_syntect_color(self.foreground)),
                background: Some(to_syntect_color(self.background)),
                line_highlight: Some(to_syntect_color(self.highlight)),
                gutter: Some(to_syntect_color(self.line_number_background)),
                gutter_foreground: Some(to_syntect_color(self.line_number_foreground)),
                ..ThemeSettings::default()
            },
            scopes,
            ..SyntectTheme::default()
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::ayu_mirage() }
}

const fn to_syntect_color(color: Rgb<u8>) -> Color {
    Color {
        r: color.0[0],
        g: color.0[1],
        b: color.0[2],
        a: 0xff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ayu_mirage_surface_colors() {
        let theme = Theme::ayu_mirage();
        assert_eq!(theme.background, Rgb([0x1f, 0x24, 0x30]));
        assert_eq!(theme.highlight, Rgb([0x1a, 0x1f, 0x29]));
        assert_eq!(theme.foreground, Rgb([0x67, 0x96, 0xe6]));
    }

    #[test]
    fn test_line_number_alpha_is_blended() {
        let theme = Theme::ayu_mirage();
        let fg = theme.line_number_foreground;
        // 40% of #8a9199 over #1f2430 lies strictly between both colors.
        assert!(fg[0] > 0x1f && fg[0] < 0x8a);
        assert!(fg[2] > 0x30 && fg[2] < 0x99);
    }

    #[test]
    fn test_every_category_has_a_style() {
        let theme = Theme::ayu_mirage();
        for category in TokenCategory::ALL {
            assert!(theme.style_for(category).is_some(), "missing {category}");
        }
    }

    #[test]
    fn test_category_keys_round_trip() {
        for category in TokenCategory::ALL {
            assert_eq!(category.key().parse::<TokenCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = "keywords".parse::<TokenCategory>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCategory(name) if name == "keywords"));
    }

    #[test]
    fn test_every_scope_selector_parses() {
        for category in TokenCategory::ALL {
            assert!(
                ScopeSelectors::from_str(category.scope_selector()).is_ok(),
                "selector for {category} does not parse"
            );
        }
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Theme::by_name("ayu-mirage").unwrap(), Theme::ayu_mirage());
        assert!(matches!(Theme::by_name("solarized"), Err(ConfigError::UnknownTheme(_))));
    }

    #[test]
    fn test_with_overrides_replaces_category_and_surface() {
        let mut colors = BTreeMap::new();
        colors.insert("keyword".to_string(), "#ff0000".to_string());
        colors.insert("background".to_string(), "#000000".to_string());

        let theme = Theme::ayu_mirage().with_overrides(&colors).unwrap();
        assert_eq!(theme.background, Rgb([0, 0, 0]));
        assert_eq!(theme.style_for(TokenCategory::Keyword).unwrap().color, Some(Rgb([255, 0, 0])));
        // Untouched entries keep their palette value.
        assert_eq!(
            theme.style_for(TokenCategory::Comment).unwrap().color,
            Some(Rgb([0x64, 0x76, 0x8b]))
        );
    }

    #[test]
    fn test_with_overrides_rejects_bad_color() {
        let mut colors = BTreeMap::new();
        colors.insert("string".to_string(), "green".to_string());
        let result = Theme::ayu_mirage().with_overrides(&colors);
        assert!(matches!(result, Err(ConfigError::InvalidColor { .. })));
    }

    #[test]
    fn test_to_syntect_carries_settings_and_scopes() {
        let theme = Theme::ayu_mirage();
        let converted = theme.to_syntect();
        assert_eq!(converted.settings.background, Some(Color { r: 0x1f, g: 0x24, b: 0x30, a: 0xff }));
        assert_eq!(converted.scopes.len(), TokenCategory::ALL.len());
    }
}
