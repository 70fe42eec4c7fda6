//! Input format detection.

use std::fmt::{Display, Formatter};

use crate::error::ImportError;

/// Supported boundary file encodings.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Format {
    /// GeoJSON (RFC 7946).
    GeoJson,
    /// OGC KML.
    Kml,
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GeoJson => write!(f, "GeoJSON"),
            Self::Kml => write!(f, "KML"),
        }
    }
}

/// Classifies raw input text as one of the supported encodings.
///
/// This is a cheap syntactic sniff, not a parse: text starting with `{` and
/// containing a `"type"` key is treated as GeoJSON, text containing an XML
/// declaration and a `<kml` tag as KML. Parse failures are reported
/// separately by the parser adapters.
pub fn detect_format(content: &str) -> Result<Format, ImportError> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('{') && trimmed.contains("\"type\"") {
        return Ok(Format::GeoJson);
    }
    if content.contains("<?xml") && content.contains("<kml") {
        return Ok(Format::Kml);
    }

    Err(ImportError::InvalidFormat)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn detects_geojson() {
        assert_matches!(
            detect_format(r#"{"type": "Polygon", "coordinates": []}"#),
            Ok(Format::GeoJson)
        );
        assert_matches!(
            detect_format("  \n {\"type\": \"FeatureCollection\", \"features\": []}"),
            Ok(Format::GeoJson)
        );
    }

    #[test]
    fn detects_kml() {
        let content = r#"<?xml version="1.0" encoding="UTF-8"?><kml xmlns="http://www.opengis.net/kml/2.2"></kml>"#;
        assert_matches!(detect_format(content), Ok(Format::Kml));
    }

    #[test]
    fn rejects_everything_else() {
        assert_matches!(detect_format(""), Err(ImportError::InvalidFormat));
        assert_matches!(detect_format("lon,lat\n1,2"), Err(ImportError::InvalidFormat));
        // JSON without a "type" key is not GeoJSON.
        assert_matches!(
            detect_format(r#"{"coordinates": []}"#),
            Err(ImportError::InvalidFormat)
        );
        // XML without a <kml> tag is not KML.
        assert_matches!(
            detect_format(r#"<?xml version="1.0"?><svg></svg>"#),
            Err(ImportError::InvalidFormat)
        );
    }
}
