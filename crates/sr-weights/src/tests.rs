//! Unit tests for sr-weights.

#[cfg(test)]
mod helpers {
    use sr_core::{GeoPoint, NodeId};
    use sr_spatial::{RoadNetwork, RoadNetworkBuilder};

    /// Three nodes on a line, keys 1..=3, two-way 100 m streets between
    /// neighbours.  Safety weights start equal to length.
    ///
    ///   a:(0,0) ── b:(0,1) ── c:(0,2)
    pub fn line_network() -> (RoadNetwork, [NodeId; 3]) {
        let mut b = RoadNetworkBuilder::new();
        let na = b.add_node(1, GeoPoint::new(0.0, 0.0)).unwrap();
        let nb = b.add_node(2, GeoPoint::new(0.0, 1.0)).unwrap();
        let nc = b.add_node(3, GeoPoint::new(0.0, 2.0)).unwrap();
        b.add_road(na, nb, 100.0, 100.0, "residential");
        b.add_road(nb, nc, 100.0, 100.0, "residential");
        (b.build(), [na, nb, nc])
    }
}

// ── Crime CSV ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod crime_csv {
    use std::io::Cursor;

    use crate::{load_incidents_csv, load_incidents_reader, CrimeIncident, WeightError};

    #[test]
    fn reads_coordinates_and_ignores_other_columns() {
        let csv = "\
Date,Primary Type,Latitude,Longitude
01/02/2024,THEFT,41.8781,-87.6298
01/02/2024,BATTERY,,
01/03/2024,ASSAULT, 41.9 , -87.7
";
        let incidents = load_incidents_reader(Cursor::new(csv)).unwrap();
        assert_eq!(
            incidents,
            vec![CrimeIncident::new(41.8781, -87.6298), CrimeIncident::new(41.9, -87.7)]
        );
    }

    #[test]
    fn header_case_is_ignored() {
        let csv = "LATITUDE,longitude\n1.5,2.5\n";
        let incidents = load_incidents_reader(Cursor::new(csv)).unwrap();
        assert_eq!(incidents, vec![CrimeIncident::new(1.5, 2.5)]);
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "Latitude,Block\n41.8,100 W MADISON\n";
        let err = load_incidents_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, WeightError::MissingColumn("longitude")));
    }

    #[test]
    fn non_numeric_coordinate_is_parse_error() {
        let csv = "Latitude,Longitude\nnorth,-87.6\n";
        let err = load_incidents_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, WeightError::Parse(_)));
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_incidents_csv(&dir.path().join("clean_crime_data.csv")).unwrap_err();
        assert!(matches!(err, WeightError::Io(_)));
    }
}

// ── Crime map & weights ───────────────────────────────────────────────────────

#[cfg(test)]
mod weights {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use sr_core::SafetyConfig;
    use sr_spatial::RoadNetwork;

    use crate::{CrimeIncident, WeightBuilder};

    #[test]
    fn incidents_snap_to_nearest_node() {
        let (net, [a, b, c]) = super::helpers::line_network();
        let incidents = [
            CrimeIncident::new(0.0, 0.1),  // a
            CrimeIncident::new(0.1, 0.9),  // b
            CrimeIncident::new(-0.2, 1.2), // b
            CrimeIncident::new(0.0, 5.0),  // c
        ];
        let (map, skipped) = WeightBuilder::default().crime_map(&net, &incidents);
        assert_eq!(skipped, 0);
        assert_eq!(map.get(a), 1);
        assert_eq!(map.get(b), 2);
        assert_eq!(map.get(c), 1);
        assert_eq!(map.len(), 3);
        assert_eq!(map.max(), 2);
    }

    #[test]
    fn penalty_sums_both_endpoints() {
        let (mut net, [a, b, c]) = super::helpers::line_network();
        let incidents = [
            CrimeIncident::new(0.0, 0.0), // a
            CrimeIncident::new(0.0, 1.0), // b
            CrimeIncident::new(0.0, 1.0), // b
        ];
        let report = WeightBuilder::default().annotate(&mut net, &incidents).unwrap();
        assert_eq!(report.incidents_assigned, 3);
        assert_eq!(report.nodes_with_crime, 2);
        assert_eq!(report.max_node_crimes, 2);
        assert_eq!(report.penalised_edges, 4);

        let ab = net.edge_between(a, b).unwrap();
        let bc = net.edge_between(b, c).unwrap();
        let cb = net.edge_between(c, b).unwrap();
        // a-b: (1 + 2) × 20 = 60
        assert_eq!(net.edge_safety_weight[ab.index()], 160.0);
        // b-c: (2 + 0) × 20 = 40, same in both directions
        assert_eq!(net.edge_safety_weight[bc.index()], 140.0);
        assert_eq!(net.edge_safety_weight[cb.index()], 140.0);
    }

    #[test]
    fn penalty_factor_is_configurable() {
        let (mut net, [a, b, _]) = super::helpers::line_network();
        let builder = WeightBuilder::new(SafetyConfig::default().with_penalty_factor(5.0));
        builder.annotate(&mut net, &[CrimeIncident::new(0.0, 0.0)]).unwrap();
        let ab = net.edge_between(a, b).unwrap();
        assert_eq!(net.edge_safety_weight[ab.index()], 105.0);
    }

    #[test]
    fn invalid_config_rejected() {
        let (mut net, _) = super::helpers::line_network();
        let builder = WeightBuilder::new(SafetyConfig::default().with_penalty_factor(f64::NAN));
        assert!(builder.annotate(&mut net, &[]).is_err());
    }

    #[test]
    fn no_incidents_means_weight_equals_length() {
        let (mut net, _) = super::helpers::line_network();
        // Start from stale weights to prove they are overwritten.
        net.set_safety_weights(vec![999.0; net.edge_count()]).unwrap();
        let report = WeightBuilder::default().annotate(&mut net, &[]).unwrap();
        assert_eq!(report.penalised_edges, 0);
        assert_eq!(net.edge_safety_weight, net.edge_length_m);
    }

    #[test]
    fn non_finite_and_unsnappable_incidents_are_skipped() {
        let (net, _) = super::helpers::line_network();
        let incidents = [CrimeIncident::new(f64::NAN, 0.0), CrimeIncident::new(0.0, 0.0)];
        let (map, skipped) = WeightBuilder::default().crime_map(&net, &incidents);
        assert_eq!(skipped, 1);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(super::helpers::line_network().1[0]), 1);

        let (empty_map, all_skipped) =
            WeightBuilder::default().crime_map(&RoadNetwork::empty(), &incidents);
        assert!(empty_map.is_empty());
        assert_eq!(all_skipped, 2);
    }

    #[test]
    fn safety_weight_never_below_length() {
        let (mut net, _) = super::helpers::line_network();
        let mut rng = SmallRng::seed_from_u64(7);
        let incidents: Vec<CrimeIncident> = (0..500)
            .map(|_| CrimeIncident::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..3.0)))
            .collect();
        WeightBuilder::default().annotate(&mut net, &incidents).unwrap();
        for (w, l) in net.edge_safety_weight.iter().zip(&net.edge_length_m) {
            assert!(w >= l, "safety_weight {w} < length {l}");
        }
    }

    #[test]
    fn rebuild_is_bit_identical() {
        let mut rng = SmallRng::seed_from_u64(2024);
        let incidents: Vec<CrimeIncident> = (0..1_000)
            .map(|_| CrimeIncident::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..2.5)))
            .collect();

        let (mut first, _) = super::helpers::line_network();
        let (mut second, _) = super::helpers::line_network();
        WeightBuilder::default().annotate(&mut first, &incidents).unwrap();
        WeightBuilder::default().annotate(&mut second, &incidents).unwrap();

        let bits = |n: &RoadNetwork| n.edge_safety_weight.iter().map(|w| w.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first), bits(&second));
    }
}

// ── File pipeline ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod pipeline {
    use std::fs;

    use sr_core::SafetyConfig;
    use sr_spatial::{load_graph_file, save_graph_file};

    use crate::{annotate_graph_file, WeightError};

    #[test]
    fn annotates_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let graph_in = dir.path().join("raw.json");
        let crimes = dir.path().join("crimes.csv");
        let graph_out = dir.path().join("annotated.json");

        let (net, _) = super::helpers::line_network();
        save_graph_file(&graph_in, &net).unwrap();
        fs::write(&crimes, "Latitude,Longitude\n0.0,2.0\n0.0,2.1\n").unwrap();

        let report = annotate_graph_file(&graph_in, &crimes, &graph_out, SafetyConfig::default())
            .unwrap();
        assert_eq!(report.incidents_assigned, 2);

        let (back, _) = load_graph_file(&graph_out, &SafetyConfig::default()).unwrap();
        let b = back.node_by_key(2).unwrap();
        let c = back.node_by_key(3).unwrap();
        let a = back.node_by_key(1).unwrap();
        let bc = back.edge_between(b, c).unwrap();
        let ab = back.edge_between(a, b).unwrap();
        assert_eq!(back.edge_safety_weight[bc.index()], 140.0);
        assert_eq!(back.edge_safety_weight[ab.index()], 100.0);
    }

    #[test]
    fn missing_crime_file_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let graph_in = dir.path().join("raw.json");
        let graph_out = dir.path().join("annotated.json");
        let (net, _) = super::helpers::line_network();
        save_graph_file(&graph_in, &net).unwrap();

        let err = annotate_graph_file(
            &graph_in,
            &dir.path().join("absent.csv"),
            &graph_out,
            SafetyConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, WeightError::Io(_)));
        assert!(!graph_out.exists());
    }
}
