//! SVG markup inspection: intrinsic size resolution and inner content extraction

use crate::io::configuration::FALLBACK_DIMENSION;

/// Root `<svg>` element split into the parts the vector renderer re-embeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgFragment {
    /// Verbatim markup between the root's start and end tags
    pub inner: String,
    /// The root's own `viewBox`, if declared
    pub view_box: Option<String>,
    /// The root's own `preserveAspectRatio`, if declared
    pub preserve_aspect_ratio: Option<String>,
    /// Prefixed namespace declarations in scope on the root, as `(prefix, uri)`
    pub namespaces: Vec<(String, String)>,
}

/// Resolves the intrinsic `(width, height)` of SVG markup
///
/// Priority: `viewBox` components three and four, then `width`/`height` attributes,
/// then [`FALLBACK_DIMENSION`]. A viewbox component that is unparseable or not
/// positive falls back individually. Unparseable markup resolves to the fallback square.
pub fn intrinsic_size(markup: &str) -> (f64, f64) {
    let Ok(document) = roxmltree::Document::parse(markup) else {
        return (FALLBACK_DIMENSION, FALLBACK_DIMENSION);
    };
    let root = document.root_element();

    if let Some(view_box) = root.attribute("viewBox") {
        let parts = split_view_box(view_box);
        if parts.len() == 4 {
            let component = |index: usize| {
                parts
                    .get(index)
                    .and_then(|part| part.parse::<f64>().ok())
                    .filter(|value| value.is_finite() && *value > 0.0)
                    .unwrap_or(FALLBACK_DIMENSION)
            };
            return (component(2), component(3));
        }
    }

    match (
        root.attribute("width").and_then(parse_length),
        root.attribute("height").and_then(parse_length),
    ) {
        (Some(width), Some(height)) => (width, height),
        (Some(width), None) => (width, FALLBACK_DIMENSION),
        (None, Some(height)) => (FALLBACK_DIMENSION, height),
        (None, None) => (FALLBACK_DIMENSION, FALLBACK_DIMENSION),
    }
}

/// Splits a `viewBox` value on whitespace and commas
pub fn split_view_box(value: &str) -> Vec<&str> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect()
}

// Accepts plain numbers and pixel lengths; percentages and other units have no intrinsic size
fn parse_length(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    number
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite() && *parsed > 0.0)
}

/// Parses markup and extracts the root element's drawable content
///
/// # Errors
///
/// Returns the parser's message if the markup is not well-formed XML or its root
/// element is not `<svg>`.
pub fn extract_fragment(markup: &str) -> Result<SvgFragment, String> {
    let document = roxmltree::Document::parse(markup).map_err(|e| e.to_string())?;
    let root = document.root_element();
    if root.tag_name().name() != "svg" {
        return Err(format!(
            "root element is <{}>, expected <svg>",
            root.tag_name().name()
        ));
    }

    let inner = match (root.first_child(), root.last_child()) {
        (Some(first), Some(last)) => markup
            .get(first.range().start..last.range().end)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    };

    let namespaces = root
        .namespaces()
        .filter_map(|ns| ns.name().map(|prefix| (prefix.to_string(), ns.uri().to_string())))
        .filter(|(prefix, _)| prefix != "xml")
        .collect();

    Ok(SvgFragment {
        inner,
        view_box: root.attribute("viewBox").map(str::to_string),
        preserve_aspect_ratio: root.attribute("preserveAspectRatio").map(str::to_string),
        namespaces,
    })
}
