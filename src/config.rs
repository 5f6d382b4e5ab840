//! Configuration for paragraph extraction.

use crate::layout::bands::PageBands;

/// Extraction configuration.
///
/// The header and footer limits come from an external band detector and are
/// applied to every page of the document.
#[derive(Debug, Clone, Default)]
pub struct ExtractionConfig {
    /// Header/footer band limits.
    pub bands: PageBands,
}

impl ExtractionConfig {
    /// Create new configuration with defaults (no header or footer band).
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks ending at or above this y belong to the header band.
    pub fn with_header_y1(mut self, header_y1: f32) -> Self {
        self.bands.header_y1 = Some(header_y1);
        self
    }

    /// Blocks starting at or below this y belong to the footer band.
    pub fn with_footer_y0(mut self, footer_y0: f32) -> Self {
        self.bands.footer_y0 = Some(footer_y0);
        self
    }

    /// Replace both band limits at once.
    pub fn with_bands(mut self, bands: PageBands) -> Self {
        self.bands = bands;
        self
    }
}
