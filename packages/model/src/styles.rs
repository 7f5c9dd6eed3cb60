//! # Block Styles
//!
//! Style attributes are plain strings keyed by a fixed set of recognized
//! names. Values are never validated; renderers fall back to
//! [`default_style`] whenever a key is absent or blank.
//!
//! Keys outside [`StyleKey`] survive parsing, editing and cloning untouched
//! but nothing reads them.

use crate::block::BlockType;
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Recognized style attribute names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleKey {
    BackgroundColor,
    Padding,
    FontSize,
    FontFamily,
    Color,
    TextAlign,
    LineHeight,
    FontWeight,
    ImageUrl,
    ImageWidth,
    ImageHeight,
    ImageAlign,
    ButtonText,
    ButtonUrl,
    ButtonColor,
    ButtonTextColor,
    ButtonPadding,
    ButtonBorderRadius,
    DividerColor,
    DividerHeight,
    DividerWidth,
    SpacerHeight,
    ColumnLayout,
}

impl StyleKey {
    pub const ALL: [StyleKey; 23] = [
        StyleKey::BackgroundColor,
        StyleKey::Padding,
        StyleKey::FontSize,
        StyleKey::FontFamily,
        StyleKey::Color,
        StyleKey::TextAlign,
        StyleKey::LineHeight,
        StyleKey::FontWeight,
        StyleKey::ImageUrl,
        StyleKey::ImageWidth,
        StyleKey::ImageHeight,
        StyleKey::ImageAlign,
        StyleKey::ButtonText,
        StyleKey::ButtonUrl,
        StyleKey::ButtonColor,
        StyleKey::ButtonTextColor,
        StyleKey::ButtonPadding,
        StyleKey::ButtonBorderRadius,
        StyleKey::DividerColor,
        StyleKey::DividerHeight,
        StyleKey::DividerWidth,
        StyleKey::SpacerHeight,
        StyleKey::ColumnLayout,
    ];

    /// Serialized (camelCase) name
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKey::BackgroundColor => "backgroundColor",
            StyleKey::Padding => "padding",
            StyleKey::FontSize => "fontSize",
            StyleKey::FontFamily => "fontFamily",
            StyleKey::Color => "color",
            StyleKey::TextAlign => "textAlign",
            StyleKey::LineHeight => "lineHeight",
            StyleKey::FontWeight => "fontWeight",
            StyleKey::ImageUrl => "imageUrl",
            StyleKey::ImageWidth => "imageWidth",
            StyleKey::ImageHeight => "imageHeight",
            StyleKey::ImageAlign => "imageAlign",
            StyleKey::ButtonText => "buttonText",
            StyleKey::ButtonUrl => "buttonUrl",
            StyleKey::ButtonColor => "buttonColor",
            StyleKey::ButtonTextColor => "buttonTextColor",
            StyleKey::ButtonPadding => "buttonPadding",
            StyleKey::ButtonBorderRadius => "buttonBorderRadius",
            StyleKey::DividerColor => "dividerColor",
            StyleKey::DividerHeight => "dividerHeight",
            StyleKey::DividerWidth => "dividerWidth",
            StyleKey::SpacerHeight => "spacerHeight",
            StyleKey::ColumnLayout => "columnLayout",
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ModelError::UnknownStyleKey(s.to_string()))
    }
}

const FONT_STACK: &str = "Arial, sans-serif";
const WHITE: &str = "#ffffff";
const INK: &str = "#333333";

/// Default value for `key` on a block of `block_type`.
///
/// | type    | defaults |
/// |---------|----------|
/// | header  | fontSize 32px, fontFamily Arial, color #333333, textAlign center, padding 32px 24px 24px 24px, backgroundColor #ffffff |
/// | text    | fontSize 16px, fontFamily Arial, color #333333, textAlign left, padding 0 24px 24px 24px, backgroundColor #ffffff, lineHeight 1.6 |
/// | image   | padding 0, backgroundColor #ffffff, imageAlign center, imageWidth 100%, imageHeight auto |
/// | button  | padding 0 24px 24px 24px, backgroundColor #ffffff, textAlign center, buttonText Click Here, buttonUrl #, buttonColor #2563eb, buttonTextColor #ffffff, buttonPadding 12px 24px, buttonBorderRadius 4px, fontSize 16px, fontFamily Arial, fontWeight 600 |
/// | divider | padding 20px, backgroundColor #ffffff, dividerColor #e5e7eb, dividerHeight 1px, dividerWidth 100% |
/// | spacer  | spacerHeight 40px, backgroundColor #ffffff |
/// | columns | padding 20px, backgroundColor #ffffff, columnLayout 50-50 |
///
/// `imageUrl` has no default.
pub fn default_style(block_type: BlockType, key: StyleKey) -> Option<&'static str> {
    use StyleKey::*;

    let value = match (block_type, key) {
        (_, BackgroundColor) => WHITE,

        (BlockType::Header, FontSize) => "32px",
        (BlockType::Header, FontFamily) => FONT_STACK,
        (BlockType::Header, Color) => INK,
        (BlockType::Header, TextAlign) => "center",
        (BlockType::Header, Padding) => "32px 24px 24px 24px",

        (BlockType::Text, FontSize) => "16px",
        (BlockType::Text, FontFamily) => FONT_STACK,
        (BlockType::Text, Color) => INK,
        (BlockType::Text, TextAlign) => "left",
        (BlockType::Text, Padding) => "0 24px 24px 24px",
        (BlockType::Text, LineHeight) => "1.6",

        (BlockType::Image, Padding) => "0",
        (BlockType::Image, ImageAlign) => "center",
        (BlockType::Image, ImageWidth) => "100%",
        (BlockType::Image, ImageHeight) => "auto",

        (BlockType::Button, Padding) => "0 24px 24px 24px",
        (BlockType::Button, TextAlign) => "center",
        (BlockType::Button, ButtonText) => "Click Here",
        (BlockType::Button, ButtonUrl) => "#",
        (BlockType::Button, ButtonColor) => "#2563eb",
        (BlockType::Button, ButtonTextColor) => WHITE,
        (BlockType::Button, ButtonPadding) => "12px 24px",
        (BlockType::Button, ButtonBorderRadius) => "4px",
        (BlockType::Button, FontSize) => "16px",
        (BlockType::Button, FontFamily) => FONT_STACK,
        (BlockType::Button, FontWeight) => "600",

        (BlockType::Divider, Padding) => "20px",
        (BlockType::Divider, DividerColor) => "#e5e7eb",
        (BlockType::Divider, DividerHeight) => "1px",
        (BlockType::Divider, DividerWidth) => "100%",

        (BlockType::Spacer, SpacerHeight) => "40px",

        (BlockType::Columns, Padding) => "20px",
        (BlockType::Columns, ColumnLayout) => "50-50",

        _ => return None,
    };

    Some(value)
}

/// Style attribute map.
///
/// Backed by a `BTreeMap` so iteration (and anything serialized from it) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Styles(BTreeMap<String, String>);

impl Styles {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: StyleKey) -> Option<&str> {
        self.get_raw(key.as_str())
    }

    /// Lookup by raw name, including unrecognized keys
    pub fn get_raw(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn set(&mut self, key: StyleKey, value: impl Into<String>) {
        self.set_raw(key.as_str(), value);
    }

    pub fn set_raw(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Copy of this map with one key replaced; everything else is kept
    pub fn merged(&self, key: StyleKey, value: impl Into<String>) -> Styles {
        let mut styles = self.clone();
        styles.set(key, value);
        styles
    }

    /// Set value, or the documented default when absent or blank
    pub fn resolve(&self, block_type: BlockType, key: StyleKey) -> &str {
        match self.get(key) {
            Some(value) if !value.trim().is_empty() => value,
            _ => default_style(block_type, key).unwrap_or(""),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(StyleKey, String)> for Styles {
    fn from_iter<I: IntoIterator<Item = (StyleKey, String)>>(iter: I) -> Self {
        let mut styles = Styles::new();
        for (key, value) in iter {
            styles.set(key, value);
        }
        styles
    }
}

/// Width split of a two-column block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    Even,
    NarrowWide,
    WideNarrow,
}

impl ColumnLayout {
    pub const ALL: [ColumnLayout; 3] = [
        ColumnLayout::Even,
        ColumnLayout::NarrowWide,
        ColumnLayout::WideNarrow,
    ];

    /// Unknown values fall back to an even split
    pub fn from_style(value: &str) -> Self {
        match value.trim() {
            "33-67" => ColumnLayout::NarrowWide,
            "67-33" => ColumnLayout::WideNarrow,
            _ => ColumnLayout::Even,
        }
    }

    /// Layout whose first cell has the given width attribute, if any matches
    pub fn from_first_width(width: &str) -> Option<Self> {
        let width = width.trim().trim_end_matches('%');
        let value: f32 = width.parse().ok()?;
        Self::ALL
            .into_iter()
            .min_by(|a, b| {
                let da = (a.first_percent() - value).abs();
                let db = (b.first_percent() - value).abs();
                da.total_cmp(&db)
            })
            .filter(|layout| (layout.first_percent() - value).abs() < 5.0)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnLayout::Even => "50-50",
            ColumnLayout::NarrowWide => "33-67",
            ColumnLayout::WideNarrow => "67-33",
        }
    }

    /// Cell width attributes for the two slots
    pub fn widths(&self) -> (&'static str, &'static str) {
        match self {
            ColumnLayout::Even => ("50%", "50%"),
            ColumnLayout::NarrowWide => ("33.33%", "66.67%"),
            ColumnLayout::WideNarrow => ("66.67%", "33.33%"),
        }
    }

    fn first_percent(&self) -> f32 {
        match self {
            ColumnLayout::Even => 50.0,
            ColumnLayout::NarrowWide => 33.33,
            ColumnLayout::WideNarrow => 66.67,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_key_names_round_trip() {
        for key in StyleKey::ALL {
            assert_eq!(key.as_str().parse::<StyleKey>().unwrap(), key);
        }
        assert!("margin".parse::<StyleKey>().is_err());
    }

    #[test]
    fn test_resolve_prefers_set_value() {
        let styles = Styles::new().merged(StyleKey::FontSize, "20px");
        assert_eq!(styles.resolve(BlockType::Header, StyleKey::FontSize), "20px");
        assert_eq!(styles.resolve(BlockType::Header, StyleKey::TextAlign), "center");
        assert_eq!(styles.resolve(BlockType::Text, StyleKey::TextAlign), "left");
    }

    #[test]
    fn test_blank_value_falls_back_to_default() {
        let styles = Styles::new().merged(StyleKey::Padding, "  ");
        assert_eq!(styles.resolve(BlockType::Divider, StyleKey::Padding), "20px");
    }

    #[test]
    fn test_image_url_has_no_default() {
        assert_eq!(default_style(BlockType::Image, StyleKey::ImageUrl), None);
        assert_eq!(Styles::new().resolve(BlockType::Image, StyleKey::ImageUrl), "");
    }

    #[test]
    fn test_every_type_has_background_default() {
        for block_type in BlockType::ALL {
            assert_eq!(
                default_style(block_type, StyleKey::BackgroundColor),
                Some("#ffffff")
            );
        }
    }

    #[test]
    fn test_unrecognized_keys_are_preserved() {
        let mut styles = Styles::new();
        styles.set_raw("margin", "0 auto");
        let styles = styles.merged(StyleKey::Color, "red");

        assert_eq!(styles.get_raw("margin"), Some("0 auto"));
        assert_eq!(styles.get(StyleKey::Color), Some("red"));
        assert_eq!(styles.len(), 2);
    }

    #[test]
    fn test_column_layout_widths() {
        assert_eq!(ColumnLayout::from_style("33-67").widths(), ("33.33%", "66.67%"));
        assert_eq!(ColumnLayout::from_style("bogus"), ColumnLayout::Even);
        assert_eq!(ColumnLayout::from_first_width("66.67%"), Some(ColumnLayout::WideNarrow));
        assert_eq!(ColumnLayout::from_first_width("33%"), Some(ColumnLayout::NarrowWide));
        assert_eq!(ColumnLayout::from_first_width("80%"), None);
        assert_eq!(ColumnLayout::from_first_width("auto"), None);
    }
}
