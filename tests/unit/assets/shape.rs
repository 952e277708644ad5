//! Tests for shape assets, media type classification and the asset pool

#[cfg(test)]
mod tests {
    use crate::{raster_asset, vector_asset};
    use brandpattern::assets::{AssetKind, AssetPayload, AssetPool, ShapeAsset};
    use std::sync::Arc;

    // Tests media types and extensions map onto the two accepted kinds
    // Verified by checking png before svg
    #[test]
    fn test_media_type_classification() {
        assert_eq!(AssetKind::from_media_type("image/svg+xml"), Some(AssetKind::Vector));
        assert_eq!(AssetKind::from_media_type("SVG"), Some(AssetKind::Vector));
        assert_eq!(AssetKind::from_media_type("image/png"), Some(AssetKind::Raster));
        assert_eq!(AssetKind::from_media_type("image/jpeg"), None);
        assert_eq!(AssetKind::from_media_type("text/plain"), None);
    }

    // Tests non-positive and non-finite dimensions are replaced with the fallback
    // Verified by accepting zero dimensions
    #[test]
    fn test_dimension_fallback() {
        let asset = ShapeAsset::new(
            "a".to_string(),
            AssetPayload::Markup(String::new()),
            0.0,
            f64::NAN,
            100.0,
        );
        assert_eq!(asset.width(), 100.0);
        assert_eq!(asset.height(), 100.0);

        let sized = ShapeAsset::new(
            "b".to_string(),
            AssetPayload::Encoded(Vec::new()),
            30.0,
            -4.0,
            100.0,
        );
        assert_eq!(sized.width(), 30.0);
        assert_eq!(sized.height(), 100.0);
        assert_eq!(sized.max_dimension(), 100.0);
    }

    // Tests kind is derived from the payload
    // Verified by hard-coding the vector kind
    #[test]
    fn test_kind_from_payload() {
        let vector = vector_asset("v", "<svg/>", 10.0, 10.0);
        let raster = raster_asset("r", 2, 2, [0, 0, 0, 255]);

        assert_eq!(vector.kind(), AssetKind::Vector);
        assert_eq!(raster.kind(), AssetKind::Raster);
    }

    // Tests duplicate identifiers are refused and insertion order is kept
    // Verified by removing the duplicate check
    #[test]
    fn test_pool_insert_unique() {
        let mut pool = AssetPool::new();
        assert!(pool.insert(vector_asset("one", "<svg/>", 10.0, 10.0)));
        assert!(pool.insert(vector_asset("two", "<svg/>", 10.0, 10.0)));
        assert!(!pool.insert(vector_asset("one", "<svg/>", 20.0, 20.0)));

        let ids: Vec<&str> = pool.assets().iter().map(|asset| asset.id()).collect();
        assert_eq!(ids, vec!["one", "two"]);
        assert_eq!(pool.len(), 2);
    }

    // Tests removal hands back the shared asset while other holders keep it alive
    // Verified by cloning asset content instead of sharing it
    #[test]
    fn test_pool_remove_keeps_shared_handle() {
        let mut pool = AssetPool::new();
        let asset = vector_asset("one", "<svg/>", 10.0, 10.0);
        pool.insert(Arc::clone(&asset));

        let removed = pool.remove("one").unwrap();
        assert!(Arc::ptr_eq(&removed, &asset));
        assert!(pool.is_empty());
        assert!(pool.remove("one").is_none());
        assert!(pool.get("one").is_none());
    }
}
