//! Unit tests for sr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(EdgeId(100) > EdgeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(41.8781, -87.6298);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(41.0, -87.6);
        let b = GeoPoint::new(42.0, -87.6);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 200.0, "got {d}");
    }

    #[test]
    fn longitude_degrees_shrink_with_latitude() {
        let o = GeoPoint::new(41.0, -87.0);
        let north = GeoPoint::new(42.0, -87.0);
        let east = GeoPoint::new(41.0, -86.0);
        assert!(o.distance_m(east) < o.distance_m(north));
    }

    #[test]
    fn finiteness() {
        assert!(GeoPoint::new(0.0, 0.0).is_finite());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_finite());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn lat_lon_order() {
        assert_eq!(GeoPoint::new(41.5, -87.5).to_lat_lon(), [41.5, -87.5]);
    }
}

#[cfg(test)]
mod config {
    use std::io::Write;

    use crate::{CoreError, SafetyConfig};

    #[test]
    fn defaults_match_production_build() {
        let cfg = SafetyConfig::default();
        assert_eq!(cfg.penalty_factor, 20.0);
        assert_eq!(cfg.default_length_m, 10.0);
        assert_eq!(cfg.default_safety_weight(10.0), 15.0);
        assert_eq!(cfg.default_highway, "unclassified");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_negative_penalty() {
        let cfg = SafetyConfig::default().with_penalty_factor(-1.0);
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_multiplier_below_one() {
        let cfg = SafetyConfig { default_safety_multiplier: 0.5, ..SafetyConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_json_file_fills_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{ "penalty_factor": 35.0 }}"#).unwrap();
        let cfg = SafetyConfig::from_json_file(f.path()).unwrap();
        assert_eq!(cfg.penalty_factor, 35.0);
        assert_eq!(cfg.default_length_m, 10.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SafetyConfig::from_json_file(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(CoreError::Io(_))));
    }
}
