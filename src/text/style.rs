//! Canonical style keys for font/size pairs.
//!
//! Extractors report font sizes with sub-point jitter (10.02, 9.98, ...) for
//! spans set in the same style. Sizes are snapped to the nearest half point
//! before a key is formed, so those spans share one key.
//!
//! A [`StyleCatalog`] is scoped to one document run. It is append-only: the
//! first resolution of a key registers its descriptor, later resolutions are
//! pure lookups.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Font family and snapped size behind a style key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDescriptor {
    /// Font name as reported by the source document
    pub font_family: String,
    /// Size snapped to the nearest 0.5
    pub font_size: f64,
}

impl fmt::Display for StyleDescriptor {
    /// Render as an inline CSS declaration list.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font-family: {}; font-size: {:.1}px;", self.font_family, self.font_size)
    }
}

/// Snap a font size to the nearest half point, ties to even.
///
/// Sizes stay `f64` from deserialization onwards, so values just off a
/// quarter point are not pulled onto the tie by narrowing.
///
/// # Examples
///
/// ```
/// use paraflow::text::style::snap_font_size;
///
/// assert_eq!(snap_font_size(11.2), 11.0);
/// assert_eq!(snap_font_size(9.8), 10.0);
/// assert_eq!(snap_font_size(10.3), 10.5);
/// ```
pub fn snap_font_size(size: f64) -> f64 {
    (size * 2.0).round_ties_even() / 2.0
}

/// Form the style key for a font name and a snapped size.
///
/// Spaces in the font name become underscores; the size is encoded as a
/// zero-padded four digit integer of `size * 10`.
pub fn style_key(font: &str, snapped_size: f64) -> String {
    let size_code = (snapped_size * 10.0) as i64;
    format!("{}_{:04}", font.replace(' ', "_"), size_code)
}

/// Registry of the styles seen during one document run.
#[derive(Debug, Clone, Default)]
pub struct StyleCatalog {
    styles: BTreeMap<String, StyleDescriptor>,
}

impl StyleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a font/size pair to its style key, registering it on first use.
    ///
    /// # Examples
    ///
    /// ```
    /// use paraflow::text::style::StyleCatalog;
    ///
    /// let mut catalog = StyleCatalog::new();
    /// let key = catalog.resolve("Times New Roman", 11.2);
    /// assert_eq!(key, "Times_New_Roman_0110");
    /// assert_eq!(
    ///     catalog.descriptor(&key).unwrap().to_string(),
    ///     "font-family: Times New Roman; font-size: 11.0px;"
    /// );
    /// ```
    pub fn resolve(&mut self, font: &str, size: f64) -> String {
        let snapped = snap_font_size(size);
        let key = style_key(font, snapped);
        if !self.styles.contains_key(&key) {
            log::trace!("New style {} ({} @ {})", key, font, snapped);
            self.styles.insert(
                key.clone(),
                StyleDescriptor {
                    font_family: font.to_string(),
                    font_size: snapped,
                },
            );
        }
        key
    }

    /// Look up a registered style.
    pub fn descriptor(&self, key: &str) -> Option<&StyleDescriptor> {
        self.styles.get(key)
    }

    /// Number of distinct styles registered.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// True when no style has been registered.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Style dictionary mapping each key to its CSS declaration, sorted by key.
    pub fn css_map(&self) -> BTreeMap<String, String> {
        self.styles
            .iter()
            .map(|(key, desc)| (key.clone(), desc.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_font_size() {
        assert_eq!(snap_font_size(11.2), 11.0);
        assert_eq!(snap_font_size(11.3), 11.5);
        assert_eq!(snap_font_size(12.0), 12.0);
        assert_eq!(snap_font_size(9.74), 9.5);
        assert_eq!(snap_font_size(9.76), 10.0);
    }

    #[test]
    fn test_snap_ties_go_to_even() {
        // 10.25 * 2 = 20.5 -> 20, 10.75 * 2 = 21.5 -> 22
        assert_eq!(snap_font_size(10.25), 10.0);
        assert_eq!(snap_font_size(10.75), 11.0);
    }

    #[test]
    fn test_snap_keeps_full_precision() {
        // Just above a tie: f32 would round this to 10.25 and snap down
        assert_eq!(snap_font_size(10.2500001), 10.5);
        assert_eq!(snap_font_size(10.2499999), 10.0);
    }

    #[test]
    fn test_style_key_format() {
        assert_eq!(style_key("Times New Roman", 11.0), "Times_New_Roman_0110");
        assert_eq!(style_key("Georgia-Bold", 10.0), "Georgia-Bold_0100");
        assert_eq!(style_key("Georgia", 8.5), "Georgia_0085");
        assert_eq!(style_key("Big", 120.0), "Big_1200");
    }

    #[test]
    fn test_resolve_registers_descriptor() {
        let mut catalog = StyleCatalog::new();
        let key = catalog.resolve("Times New Roman", 11.2);

        assert_eq!(key, "Times_New_Roman_0110");
        let desc = catalog.descriptor(&key).unwrap();
        assert_eq!(desc.font_family, "Times New Roman");
        assert_eq!(desc.font_size, 11.0);
        assert_eq!(desc.to_string(), "font-family: Times New Roman; font-size: 11.0px;");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut catalog = StyleCatalog::new();
        let a = catalog.resolve("Georgia", 10.02);
        let b = catalog.resolve("Georgia", 9.98);
        let c = catalog.resolve("Georgia", 10.0);

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_first_registration_wins() {
        let mut catalog = StyleCatalog::new();
        catalog.resolve("Georgia", 10.1);
        catalog.resolve("Georgia", 9.9);
        assert_eq!(catalog.descriptor("Georgia_0100").unwrap().font_size, 10.0);
    }

    #[test]
    fn test_css_map_sorted() {
        let mut catalog = StyleCatalog::new();
        catalog.resolve("Zapf", 9.0);
        catalog.resolve("Arial", 12.0);
        assert!(!catalog.is_empty());

        let css = catalog.css_map();
        let keys: Vec<&String> = css.keys().collect();
        assert_eq!(keys, vec!["Arial_0120", "Zapf_0090"]);
        assert_eq!(css["Zapf_0090"], "font-family: Zapf; font-size: 9.0px;");
    }
}
