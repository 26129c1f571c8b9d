mod common;

#[cfg(test)]
mod test_network_spec {
    use super::common::{exact_posterior, sprinkler};
    use bayesnet::common::errors::BayesError;
    use bayesnet::common::report::{EstimateRecord, InferenceReport};
    use bayesnet::inference::{CountGranularity, InferenceMethod, SamplingConfig};
    use bayesnet::network::{BayesNetwork, NetworkSpec, Query};
    use std::fs;
    use tempfile::tempdir;

    const SPRINKLER_JSON: &str = r#"{
        "name": "sprinkler",
        "nodes": [
            { "name": "Cloudy", "cpt": [0.5] },
            { "name": "Sprinkler", "parents": ["Cloudy"], "cpt": [0.1, 0.5] },
            { "name": "Rain", "parents": ["Cloudy"], "cpt": [0.8, 0.2] },
            { "name": "WetGrass", "parents": ["Sprinkler", "Rain"], "cpt": [0.99, 0.9, 0.9, 0.05] }
        ]
    }"#;

    #[test]
    fn test_json_network_matches_built_network() {
        let spec = NetworkSpec::from_json_str(SPRINKLER_JSON).unwrap();
        let loaded = BayesNetwork::from_spec(&spec).unwrap();
        let built = sprinkler();
        assert_eq!(loaded.to_spec(), built.to_spec());

        let query = Query::by_name(&loaded, "Rain", &[("WetGrass", true)]).unwrap();
        let expected = Query::by_name(&built, "Rain", &[("WetGrass", true)]).unwrap();
        assert!((exact_posterior(&loaded, &query) - exact_posterior(&built, &expected)).abs() < 1e-12);
    }

    #[test]
    fn test_save_and_reload_network() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sprinkler.json");
        sprinkler().to_spec().save_to_file(&path).unwrap();

        let reloaded = BayesNetwork::from_spec(&NetworkSpec::from_json_file(&path).unwrap()).unwrap();
        assert_eq!(reloaded.name(), "sprinkler");
        assert_eq!(reloaded.len(), 4);
        let wet = reloaded.resolve("WetGrass").unwrap();
        assert_eq!(reloaded.node(wet).cpt(), &[0.99, 0.9, 0.9, 0.05]);
    }

    #[test]
    fn test_parent_must_precede_child() {
        let spec = NetworkSpec::from_json_str(
            r#"{"name": "bad", "nodes": [
                { "name": "B", "parents": ["A"], "cpt": [0.5, 0.5] },
                { "name": "A", "cpt": [0.5] }
            ]}"#,
        )
        .unwrap();
        assert!(matches!(
            BayesNetwork::from_spec(&spec),
            Err(BayesError::UnknownParent { .. })
        ));
    }

    #[test]
    fn test_bad_tables_rejected() {
        let short = NetworkSpec::from_json_str(
            r#"{"name": "short", "nodes": [
                { "name": "A", "cpt": [0.5] },
                { "name": "B", "parents": ["A"], "cpt": [0.5] }
            ]}"#,
        )
        .unwrap();
        assert!(matches!(
            BayesNetwork::from_spec(&short),
            Err(BayesError::CptLength { .. })
        ));

        let range = NetworkSpec::from_json_str(
            r#"{"name": "range", "nodes": [{ "name": "A", "cpt": [1.5] }]}"#,
        )
        .unwrap();
        assert!(matches!(
            BayesNetwork::from_spec(&range),
            Err(BayesError::ProbabilityOutOfRange { .. })
        ));

        let duplicate = NetworkSpec::from_json_str(
            r#"{"name": "dup", "nodes": [{ "name": "A", "cpt": [0.5] }, { "name": "A", "cpt": [0.5] }]}"#,
        )
        .unwrap();
        assert!(matches!(
            BayesNetwork::from_spec(&duplicate),
            Err(BayesError::DuplicateNode(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        assert!(matches!(
            NetworkSpec::from_json_str("{\"name\": \"x\""),
            Err(BayesError::Json(_))
        ));
        let dir = tempdir().unwrap();
        assert!(matches!(
            NetworkSpec::from_json_file(dir.path().join("missing.json")),
            Err(BayesError::Io(_))
        ));
    }

    #[test]
    fn test_sampling_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sampling.json");
        fs::write(&path, r#"{"seed": 11, "burn_in": 50, "granularity": "variable"}"#).unwrap();
        let config = SamplingConfig::from_json_file(&path).unwrap();
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.burn_in, 50);
        assert_eq!(config.granularity, CountGranularity::PerVariable);
        assert_eq!(config.chunk_size, SamplingConfig::default().chunk_size);

        fs::write(&path, r#"{"chunk_size": 0}"#).unwrap();
        assert!(matches!(
            SamplingConfig::from_json_file(&path),
            Err(BayesError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_report_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        let mut report = InferenceReport::new("sprinkler", SamplingConfig::seeded(3));
        report.push(EstimateRecord {
            method: InferenceMethod::LikelihoodWeighting,
            query: "P(Rain | WetGrass = true)".to_string(),
            samples: 1000,
            probability: Some(0.7),
            error: None,
            elapsed_ms: 2,
        });
        report.push(EstimateRecord {
            method: InferenceMethod::Rejection,
            query: "P(A | B = true)".to_string(),
            samples: 10,
            probability: None,
            error: Some("undefined estimate: no sample was consistent with the evidence".to_string()),
            elapsed_ms: 0,
        });
        report.save_to_file(&path).unwrap();

        let loaded = InferenceReport::load_from_file(&path).unwrap();
        assert_eq!(loaded.network, "sprinkler");
        assert_eq!(loaded.sampling.seed, Some(3));
        assert_eq!(loaded.estimates, report.estimates);
    }

    #[test]
    fn test_newer_report_version_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        let mut report = InferenceReport::new("sprinkler", SamplingConfig::default());
        report.version = InferenceReport::CURRENT_VERSION + 1;
        report.save_to_file(&path).unwrap();
        assert!(matches!(
            InferenceReport::load_from_file(&path),
            Err(BayesError::InvalidConfig(_))
        ));
    }
}
