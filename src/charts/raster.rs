//! PNG output for the static chart
//!
//! The static view is drawn as SVG and rasterized here, so both artifacts
//! share one set of drawing code.

use resvg::{tiny_skia, usvg};

use crate::error::{InsightError, InsightResult};

/// Rasterize an SVG document into PNG bytes at its natural size
pub fn svg_to_png(svg: &str) -> InsightResult<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| InsightError::Chart(format!("Invalid chart drawing: {}", e)))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| InsightError::Chart("Chart has zero size".into()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| InsightError::Chart(format!("Failed to encode PNG: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn test_svg_to_png() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"><rect width="40" height="20" fill="red"/></svg>"#;
        let png = svg_to_png(svg).unwrap();
        assert!(png.starts_with(&PNG_SIGNATURE));
    }

    #[test]
    fn test_invalid_drawing_is_chart_error() {
        let err = svg_to_png("not a drawing").unwrap_err();
        assert!(matches!(err, InsightError::Chart(_)));
    }
}
