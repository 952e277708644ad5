//! Tests for raster compositing: background, transforms, draw order, caching and failures

#[cfg(test)]
mod tests {
    use crate::{place, raster_asset, vector_asset};
    use brandpattern::PatternError;
    use brandpattern::assets::{AssetPayload, ShapeAsset};
    use brandpattern::render::RasterRenderer;
    use image::RgbaImage;
    use resvg::tiny_skia::Pixmap;
    use std::sync::Arc;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    const BLUE_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="10" height="10" fill="#0000ff"/></svg>"##;

    fn is_near(image: &RgbaImage, x: u32, y: u32, expected: [u8; 4]) -> bool {
        image
            .get_pixel(x, y)
            .0
            .iter()
            .zip(expected)
            .all(|(actual, wanted)| actual.abs_diff(wanted) <= 12)
    }

    // Tests an empty sequence yields an opaque white canvas of the exact size
    // Verified by leaving the canvas transparent
    #[test]
    fn test_white_background() {
        let image = RasterRenderer::new().render(&[], 37).unwrap();
        assert_eq!(image.dimensions(), (37, 37));
        assert!(image.pixels().all(|pixel| pixel.0 == WHITE));
    }

    // Tests a zero-sized canvas is rejected
    // Verified by unwrapping the pixmap allocation
    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            RasterRenderer::new().render(&[], 0),
            Err(PatternError::InvalidParameter { .. })
        ));
    }

    // Tests a scaled raster asset covers its expected box around the center
    // Verified by drawing from the top-left corner instead of the center
    #[test]
    fn test_raster_placement_position() {
        let asset = raster_asset("red", 10, 10, RED);
        let image = RasterRenderer::new()
            .render(&[place(&asset, 50.0, 50.0, 0.0, 2.0)], 100)
            .unwrap();

        assert!(is_near(&image, 50, 50, RED));
        assert!(is_near(&image, 42, 57, RED));
        assert!(is_near(&image, 30, 30, WHITE));
        assert!(is_near(&image, 75, 50, WHITE));
    }

    // Tests rotation turns a wide bar into a tall one around its center
    // Verified by rotating about the asset's top-left corner
    #[test]
    fn test_rotation_about_center() {
        let bar = raster_asset("bar", 20, 4, RED);
        let mut renderer = RasterRenderer::new();

        let flat = renderer
            .render(&[place(&bar, 50.0, 50.0, 0.0, 2.0)], 100)
            .unwrap();
        assert!(is_near(&flat, 35, 50, RED));
        assert!(is_near(&flat, 50, 35, WHITE));

        let turned = renderer
            .render(&[place(&bar, 50.0, 50.0, 90.0, 2.0)], 100)
            .unwrap();
        assert!(is_near(&turned, 50, 35, RED));
        assert!(is_near(&turned, 35, 50, WHITE));
    }

    // Tests vector assets are drawn over their intrinsic box
    // Verified by ignoring the tree-to-intrinsic fit scale
    #[test]
    fn test_vector_placement() {
        // Declared intrinsic size differs from the markup's own size
        let asset = vector_asset("blue", BLUE_SQUARE, 20.0, 20.0);
        let image = RasterRenderer::new()
            .render(&[place(&asset, 50.0, 50.0, 0.0, 2.0)], 100)
            .unwrap();

        assert!(is_near(&image, 50, 50, BLUE));
        assert!(is_near(&image, 33, 66, BLUE));
        assert!(is_near(&image, 25, 25, WHITE));
    }

    // Tests an SVG whose width/height disagree with its viewbox fills its viewbox-sized box
    // Verified by stretching the width/height-fitted tree onto the intrinsic box
    #[test]
    fn test_vector_viewbox_wins_over_declared_size() {
        let markup = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 50 50"><rect width="50" height="50" fill="#ff0000"/></svg>"##;
        let asset = vector_asset("wide", markup, 50.0, 50.0);
        let image = RasterRenderer::new()
            .render(&[place(&asset, 100.0, 100.0, 0.0, 2.0)], 200)
            .unwrap();

        assert!(is_near(&image, 60, 100, RED));
        assert!(is_near(&image, 140, 140, RED));
        assert!(is_near(&image, 100, 55, RED));
        assert!(is_near(&image, 40, 100, WHITE));
        assert!(is_near(&image, 100, 160, WHITE));
    }

    // Tests absolute-unit sizes show the same first user units the vector output keeps
    // Verified by scaling the whole drawing into the fallback box
    #[test]
    fn test_vector_absolute_units_keep_user_space() {
        let markup = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10cm" height="10cm"><rect width="50" height="100" fill="#ff0000"/><rect x="100" width="300" height="300" fill="#0000ff"/></svg>"##;
        let asset = vector_asset("metric", markup, 100.0, 100.0);
        let image = RasterRenderer::new()
            .render(&[place(&asset, 50.0, 50.0, 0.0, 1.0)], 100)
            .unwrap();

        assert!(is_near(&image, 25, 50, RED));
        assert!(is_near(&image, 75, 50, WHITE));
    }

    // Tests later placements paint over earlier ones
    // Verified by iterating placements in reverse
    #[test]
    fn test_sequence_order() {
        let red = raster_asset("red", 10, 10, RED);
        let blue = vector_asset("blue", BLUE_SQUARE, 10.0, 10.0);
        let mut renderer = RasterRenderer::new();

        let blue_on_top = renderer
            .render(
                &[
                    place(&red, 50.0, 50.0, 0.0, 3.0),
                    place(&blue, 50.0, 50.0, 0.0, 3.0),
                ],
                100,
            )
            .unwrap();
        assert!(is_near(&blue_on_top, 50, 50, BLUE));

        let red_on_top = renderer
            .render(
                &[
                    place(&blue, 50.0, 50.0, 0.0, 3.0),
                    place(&red, 50.0, 50.0, 0.0, 3.0),
                ],
                100,
            )
            .unwrap();
        assert!(is_near(&red_on_top, 50, 50, RED));
    }

    // Tests each distinct asset is decoded once no matter how often it is placed
    // Verified by caching under the placement index
    #[test]
    fn test_decode_cache() {
        let red = raster_asset("red", 4, 4, RED);
        let blue = vector_asset("blue", BLUE_SQUARE, 10.0, 10.0);
        let mut placements = Vec::new();
        for index in 0..10 {
            let asset = if index % 2 == 0 { &red } else { &blue };
            placements.push(place(asset, f64::from(index) * 10.0, 50.0, 0.0, 1.0));
        }

        let mut renderer = RasterRenderer::new();
        renderer.render(&placements, 100).unwrap();
        assert_eq!(renderer.decoded_count(), 2);

        renderer.render(&placements, 100).unwrap();
        assert_eq!(renderer.decoded_count(), 2);
    }

    // Tests a single undecodable asset fails the whole render and leaves the buffer alone
    // Verified by skipping assets that fail to decode
    #[test]
    fn test_decode_failure_is_all_or_nothing() {
        let good = raster_asset("good", 4, 4, RED);
        let bad = Arc::new(ShapeAsset::new(
            "bad".to_string(),
            AssetPayload::Encoded(b"garbage".to_vec()),
            10.0,
            10.0,
            100.0,
        ));
        let placements = [place(&good, 10.0, 10.0, 0.0, 1.0), place(&bad, 20.0, 20.0, 0.0, 1.0)];

        let mut renderer = RasterRenderer::new();
        match renderer.render(&placements, 50) {
            Err(PatternError::RenderDecodeFailure { asset_id, .. }) => assert_eq!(asset_id, "bad"),
            other => unreachable!("Expected RenderDecodeFailure, got {other:?}"),
        }

        let mut canvas = Pixmap::new(8, 8).unwrap();
        assert!(renderer.draw_into(&placements, &mut canvas).is_err());
        assert!(canvas.pixels().iter().all(|pixel| pixel.alpha() == 0));
    }

    // Tests broken vector markup also aborts the raster render
    // Verified by treating markup parse errors as empty drawings
    #[test]
    fn test_malformed_markup_fails_raster() {
        let broken = vector_asset("broken", "<svg><g></svg>", 10.0, 10.0);
        assert!(matches!(
            RasterRenderer::new().render(&[place(&broken, 5.0, 5.0, 0.0, 1.0)], 10),
            Err(PatternError::RenderDecodeFailure { .. })
        ));
    }

    // Tests rendering the same sequence twice is pixel-identical
    // Verified by sampling the filter with random offsets
    #[test]
    fn test_render_is_deterministic() {
        let red = raster_asset("red", 7, 3, RED);
        let blue = vector_asset("blue", BLUE_SQUARE, 10.0, 10.0);
        let placements = [
            place(&red, 33.3, 41.7, 17.5, 2.3),
            place(&blue, 60.2, 58.9, 211.0, 1.7),
        ];

        let first = RasterRenderer::new().render(&placements, 96).unwrap();
        let second = RasterRenderer::new().render(&placements, 96).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
    }
}
