//! Inline `data:` URIs for rendered charts.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// A rendered SVG chart ready to embed in an `<img src=…>` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    svg: String,
}

impl InlineImage {
    #[must_use]
    pub const fn from_svg(svg: String) -> Self {
        Self { svg }
    }

    #[must_use]
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Base64 `data:image/svg+xml` URI of the chart.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(self.svg.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_is_base64_svg() {
        let image = InlineImage::from_svg("<svg/>".to_owned());
        assert_eq!(image.data_uri(), "data:image/svg+xml;base64,PHN2Zy8+");
    }
}
