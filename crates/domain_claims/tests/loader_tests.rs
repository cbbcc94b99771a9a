//! Integration tests for loading and persisting the modeling dataset

use std::path::Path;

use proptest::prelude::*;
use tempfile::TempDir;

use core_kernel::{ColumnKind, MISSING_LEVEL};
use domain_claims::{
    load_claims, read_table, write_dataset, ClaimDataError, CATEGORICAL_COLUMNS, MODEL_COLUMNS,
    SEVERITY,
};
use test_utils::{write_fixture, ClaimsCsvFixtures};

// ============================================================================
// Loading
// ============================================================================

mod loading_tests {
    use super::*;

    #[test]
    fn test_five_claims_are_all_retained() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::five_claims());

        let loaded = load_claims(&path).unwrap();

        assert_eq!(loaded.dataset.n_rows(), 5);
        assert_eq!(loaded.report.raw_rows, 5);
        assert_eq!(loaded.report.dropped_rows, 0);
        assert_eq!(loaded.report.source, path);
        assert_eq!(
            loaded.dataset.column_names(),
            vec!["age", "policy_deductable", "insured_sex", "total_claim_amount"]
        );
    }

    #[test]
    fn test_columns_outside_allow_list_are_dropped() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::five_claims());

        let loaded = load_claims(&path).unwrap();

        assert!(!loaded.dataset.contains("incident_city"));
        assert!(!loaded.dataset.contains("policy_number"));
        for name in loaded.dataset.column_names() {
            assert!(MODEL_COLUMNS.contains(&name), "{name} is not allow-listed");
        }
    }

    #[test]
    fn test_absent_allow_listed_columns_are_reported() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::five_claims());

        let loaded = load_claims(&path).unwrap();

        assert!(loaded.report.absent_columns.contains(&"umbrella_limit".to_string()));
        assert!(!loaded.report.absent_columns.contains(&"age".to_string()));
        assert_eq!(
            loaded.report.absent_columns.len() + loaded.report.columns.len(),
            MODEL_COLUMNS.len()
        );
    }

    #[test]
    fn test_full_schema_keeps_allow_list_order() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::full_schema());

        let loaded = load_claims(&path).unwrap();

        assert_eq!(loaded.dataset.column_names(), MODEL_COLUMNS.to_vec());
        assert!(loaded.report.absent_columns.is_empty());
    }

    #[test]
    fn test_rows_without_severity_are_dropped() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::full_schema());

        let loaded = load_claims(&path).unwrap();

        assert_eq!(loaded.report.raw_rows, 12);
        assert_eq!(loaded.report.retained_rows, 11);
        assert_eq!(loaded.report.dropped_rows, 1);
        let severity = loaded.dataset.numeric(SEVERITY).unwrap();
        assert!(severity.iter().all(Option::is_some));
    }

    #[test]
    fn test_missing_predictor_values_are_kept() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::full_schema());

        let loaded = load_claims(&path).unwrap();

        let age = loaded.dataset.numeric("age").unwrap();
        assert_eq!(age.iter().filter(|a| a.is_none()).count(), 1);
    }

    #[test]
    fn test_categorical_columns_are_cast() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::full_schema());

        let loaded = load_claims(&path).unwrap();

        for name in CATEGORICAL_COLUMNS {
            let column = loaded.dataset.column(name).unwrap();
            assert_eq!(column.kind(), ColumnKind::Categorical, "{name}");
        }
        let years = loaded.dataset.categorical("auto_year").unwrap();
        assert!(years.levels().contains(&"2004".to_string()));
        let csl = loaded.dataset.categorical("policy_csl").unwrap();
        assert_eq!(csl.levels(), ["100/300", "250/500", "500/1000"]);
    }

    #[test]
    fn test_numeric_columns_stay_numeric() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::full_schema());

        let loaded = load_claims(&path).unwrap();

        for name in ["age", "policy_deductable", "umbrella_limit", SEVERITY] {
            assert_eq!(loaded.dataset.column(name).unwrap().kind(), ColumnKind::Numeric, "{name}");
        }
    }
}

// ============================================================================
// Load errors
// ============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_missing_file_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");

        let err = load_claims(&path).unwrap_err();

        match err {
            ClaimDataError::DataLoad { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected DataLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_absent_severity_is_a_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::without_severity());

        let err = load_claims(&path).unwrap_err();

        assert!(matches!(err, ClaimDataError::Schema(_)), "got {err:?}");
        assert!(err.to_string().contains(SEVERITY));
    }

    #[test]
    fn test_text_severity_is_a_schema_error() {
        let dir = TempDir::new().unwrap();
        let contents = "age,total_claim_amount\n34,high\n45,low\n";
        let path = write_fixture(dir.path(), "claims.csv", contents);

        let err = load_claims(&path).unwrap_err();

        assert!(matches!(err, ClaimDataError::Schema(_)), "got {err:?}");
    }

    #[test]
    fn test_ragged_rows_are_a_load_error() {
        let dir = TempDir::new().unwrap();
        let contents = "age,total_claim_amount\n34,100\n45\n";
        let path = write_fixture(dir.path(), "claims.csv", contents);

        let err = load_claims(&path).unwrap_err();

        assert!(matches!(err, ClaimDataError::DataLoad { .. }), "got {err:?}");
    }

    #[test]
    fn test_duplicate_header_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(dir.path(), "claims.csv", "age,age,total_claim_amount\n1,2,100\n");

        let err = load_claims(&path).unwrap_err();

        match &err {
            ClaimDataError::DataLoad { path: reported, .. } => assert_eq!(reported, &path),
            other => panic!("expected DataLoad, got {other:?}"),
        }
        assert!(err.to_string().contains("claims.csv"));
    }
}

// ============================================================================
// Persisting
// ============================================================================

mod writer_tests {
    use super::*;

    fn reload(path: &Path) -> core_kernel::Dataset {
        load_claims(path).unwrap().dataset
    }

    #[test]
    fn test_written_dataset_reloads_with_same_values() {
        let dir = TempDir::new().unwrap();
        let input = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::full_schema());
        let original = reload(&input);

        let output = dir.path().join("data").join("df_model.csv");
        write_dataset(&original, &output).unwrap();
        let reloaded = reload(&output);

        assert_eq!(reloaded.shape(), original.shape());
        assert_eq!(reloaded.column_names(), original.column_names());
        assert_eq!(
            reloaded.numeric(SEVERITY).unwrap(),
            original.numeric(SEVERITY).unwrap()
        );
        let before = original.categorical("insured_education_level").unwrap();
        let after = reloaded.categorical("insured_education_level").unwrap();
        for row in 0..original.n_rows() {
            assert_eq!(before.label(row), after.label(row));
        }
    }

    #[test]
    fn test_writer_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let input = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::five_claims());
        let dataset = reload(&input);

        let output = dir.path().join("nested").join("deeper").join("df_model.csv");
        write_dataset(&dataset, &output).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("age,policy_deductable,insured_sex,total_claim_amount")
        );
        assert_eq!(lines.next(), Some("34,500,MALE,100"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_missing_labels_are_written_blank() {
        let dir = TempDir::new().unwrap();
        let contents = "insured_sex,total_claim_amount\nMALE,100\n,200\nFEMALE,300\n";
        let input = write_fixture(dir.path(), "claims.csv", contents);
        let dataset = reload(&input);

        let sex = dataset.categorical("insured_sex").unwrap();
        assert!(sex.has_missing());
        assert_eq!(sex.level(1), MISSING_LEVEL);

        let output = dir.path().join("df_model.csv");
        write_dataset(&dataset, &output).unwrap();
        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("\n,200\n"), "{text}");
    }
}

// ============================================================================
// Property-based tests
// ============================================================================

mod property_tests {
    use super::*;
    use test_utils::{label_column_strategy, severity_strategy};

    proptest! {
        #[test]
        fn test_retained_rows_match_observed_severities(
            severities in proptest::collection::vec(proptest::option::of(severity_strategy()), 1..40)
        ) {
            let dir = TempDir::new().unwrap();
            let mut contents = String::from("age,total_claim_amount\n");
            for (i, s) in severities.iter().enumerate() {
                let field = s.map(|v| v.to_string()).unwrap_or_default();
                contents.push_str(&format!("{},{}\n", 20 + i, field));
            }
            let path = write_fixture(dir.path(), "claims.csv", &contents);

            // An all-missing severity column reads as numeric with no values
            let loaded = load_claims(&path).unwrap();

            let observed = severities.iter().filter(|s| s.is_some()).count();
            prop_assert_eq!(loaded.report.retained_rows, observed);
            prop_assert_eq!(loaded.report.dropped_rows, severities.len() - observed);
        }

        #[test]
        fn test_labels_survive_a_write_and_reload(labels in label_column_strategy(30)) {
            let dir = TempDir::new().unwrap();
            let mut contents = String::from("insured_sex,total_claim_amount\n");
            for label in &labels {
                contents.push_str(&format!("{},100\n", label.as_deref().unwrap_or("")));
            }
            let input = write_fixture(dir.path(), "claims.csv", &contents);
            let dataset = load_claims(&input).unwrap().dataset;

            let output = dir.path().join("df_model.csv");
            write_dataset(&dataset, &output).unwrap();
            let reloaded = read_table(&output, &CATEGORICAL_COLUMNS).unwrap();

            let written = reloaded.column("insured_sex").unwrap();
            for (row, label) in labels.iter().enumerate() {
                prop_assert_eq!(written.data().render(row), label.clone());
            }
        }
    }
}
