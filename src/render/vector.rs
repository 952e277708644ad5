//! SVG document output of a placement sequence

use crate::assets::svg::extract_fragment;
use crate::assets::{AssetPayload, ShapeAsset};
use crate::io::configuration::{BACKGROUND_HEX, POSITION_DECIMALS};
use crate::io::error::PatternError;
use crate::layout::PlacedShape;
use crate::math::format::format_fixed;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::collections::HashMap;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// A rendered vector document and the placements it had to omit
#[derive(Debug)]
pub struct VectorDocument {
    /// Complete, standalone SVG markup
    pub markup: String,
    /// One `MalformedAssetMarkup` per omitted placement
    pub warnings: Vec<PatternError>,
}

/// Render `placements` as a standalone `size × size` SVG document
///
/// Placements appear in sequence order, each as a `<g>` carrying the same transform
/// the raster renderer applies. Vector assets are re-embedded as nested `<svg>`
/// elements keeping their own viewbox; raster assets are inlined as base64 data URIs.
/// A vector asset whose markup cannot be parsed is left out and reported in
/// [`VectorDocument::warnings`].
pub fn render_vector(placements: &[PlacedShape], size: u32) -> VectorDocument {
    let mut markup = root_open_tag(size, size, &format!("0 0 {size} {size}"));
    let mut warnings = Vec::new();
    let mut bodies: HashMap<&str, Result<String, String>> = HashMap::new();

    markup.push_str(&format!(
        r#"<rect x="0" y="0" width="{size}" height="{size}" fill="{BACKGROUND_HEX}"/>"#
    ));

    for (index, placement) in placements.iter().enumerate() {
        let asset = &placement.asset;
        let body = bodies
            .entry(asset.id())
            .or_insert_with(|| asset_body(asset));

        match body {
            Ok(body) => markup.push_str(&format!(
                r#"<g transform="{}">{body}</g>"#,
                placement.transform().to_svg()
            )),
            Err(reason) => warnings.push(PatternError::MalformedAssetMarkup {
                asset_id: asset.id().to_string(),
                placement: index,
                reason: reason.clone(),
            }),
        }
    }

    markup.push_str("</svg>");
    VectorDocument { markup, warnings }
}

/// Standalone document drawing one asset over its intrinsic box
///
/// The body is the same markup [`render_vector`] nests inside each placement group, so
/// a rasterization of this document matches the asset's appearance in the vector output.
///
/// # Errors
///
/// Returns the parser's message if a vector asset's markup cannot be parsed
pub fn asset_document(asset: &ShapeAsset) -> Result<String, String> {
    let width = format_fixed(asset.width(), POSITION_DECIMALS);
    let height = format_fixed(asset.height(), POSITION_DECIMALS);
    let mut document = root_open_tag(&width, &height, &format!("0 0 {width} {height}"));
    document.push_str(&asset_body(asset)?);
    document.push_str("</svg>");
    Ok(document)
}

fn root_open_tag(
    width: impl std::fmt::Display,
    height: impl std::fmt::Display,
    view_box: &str,
) -> String {
    format!(
        r#"<svg xmlns="{SVG_NAMESPACE}" xmlns:xlink="{XLINK_NAMESPACE}" width="{width}" height="{height}" viewBox="{view_box}">"#
    )
}

// Markup drawing the asset over `[0, width] × [0, height]` in its local frame
fn asset_body(asset: &ShapeAsset) -> Result<String, String> {
    let width = format_fixed(asset.width(), POSITION_DECIMALS);
    let height = format_fixed(asset.height(), POSITION_DECIMALS);

    match asset.payload() {
        AssetPayload::Markup(source) => {
            let fragment = extract_fragment(source)?;
            let view_box = fragment
                .view_box
                .unwrap_or_else(|| format!("0 0 {width} {height}"));

            let mut body = String::from("<svg");
            for (prefix, uri) in &fragment.namespaces {
                body.push_str(&format!(r#" xmlns:{prefix}="{}""#, escape_attribute(uri)));
            }
            body.push_str(&format!(
                r#" width="{width}" height="{height}" viewBox="{}""#,
                escape_attribute(&view_box)
            ));
            if let Some(aspect) = &fragment.preserve_aspect_ratio {
                body.push_str(&format!(
                    r#" preserveAspectRatio="{}""#,
                    escape_attribute(aspect)
                ));
            }
            body.push_str(&format!(">{}</svg>", fragment.inner));
            Ok(body)
        }
        AssetPayload::Encoded(bytes) => {
            let mime = image::guess_format(bytes)
                .map_or("image/png", |format| format.to_mime_type());
            Ok(format!(
                r#"<image width="{width}" height="{height}" xlink:href="data:{mime};base64,{}"/>"#,
                STANDARD.encode(bytes)
            ))
        }
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
