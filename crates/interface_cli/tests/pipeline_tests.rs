//! End-to-end tests for the analysis pipeline

use std::fs;
use std::path::PathBuf;

use domain_severity::FitError;
use interface_cli::{run, AnalysisConfig, PipelineError, Stage, EFFECTS_FILE};
use test_utils::{assert_non_empty_file, write_fixture, ClaimsCsvFixtures, FixtureDir};

fn config_for(fixture: &FixtureDir) -> AnalysisConfig {
    AnalysisConfig::default().rooted_at(fixture.path())
}

// ============================================================================
// Successful runs
// ============================================================================

mod run_tests {
    use super::*;

    #[test]
    fn test_five_claims_end_to_end() {
        let fixture = FixtureDir::with_claims(ClaimsCsvFixtures::five_claims());
        let config = config_for(&fixture);

        let outcome = run(&config).unwrap();

        assert_eq!(outcome.load.retained_rows, 5);
        assert_eq!(outcome.dataset.n_rows(), 5);
        assert_non_empty_file(&outcome.charts.histogram);
        assert_non_empty_file(&outcome.charts.boxplot);
        assert_eq!(outcome.model.coefficients.len(), outcome.model.terms.len());
        assert_eq!(outcome.model.coefficients.len(), 4);
        assert_eq!(outcome.effects.len(), 3);
    }

    #[test]
    fn test_outputs_land_in_standard_locations() {
        let fixture = FixtureDir::with_claims(ClaimsCsvFixtures::five_claims());
        let config = config_for(&fixture);

        let outcome = run(&config).unwrap();

        let root = fixture.path();
        assert_eq!(outcome.charts.histogram, root.join("outputs/severity_histogram.png"));
        assert_eq!(outcome.charts.boxplot, root.join("outputs/severity_by_deductible.png"));
        assert_eq!(outcome.model_data_path, root.join("data/df_model.csv"));
        assert_eq!(outcome.effects_path, root.join("outputs").join(EFFECTS_FILE));
    }

    #[test]
    fn test_modeling_dataset_is_persisted() {
        let fixture = FixtureDir::with_claims(ClaimsCsvFixtures::five_claims());
        let config = config_for(&fixture);

        run(&config).unwrap();

        let text = fs::read_to_string(&config.model_data_path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "age,policy_deductable,insured_sex,total_claim_amount");
        assert_eq!(lines[2], "45,500,FEMALE,5000");
    }

    #[test]
    fn test_effect_table_is_written_as_json() {
        let fixture = FixtureDir::with_claims(ClaimsCsvFixtures::five_claims());
        let config = config_for(&fixture);

        let outcome = run(&config).unwrap();

        let json = fs::read_to_string(config.effects_path()).unwrap();
        let rows: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(rows.len(), outcome.effects.len());
        assert_eq!(rows[0]["term"], "insured_sex[T.MALE]");
        for row in &rows {
            let beta = row["coefficient"].as_f64().unwrap();
            let pct = row["pct_effect"].as_f64().unwrap();
            assert_eq!(pct, beta.exp_m1() * 100.0);
        }
    }

    #[test]
    fn test_report_has_every_section() {
        let fixture = FixtureDir::with_claims(ClaimsCsvFixtures::five_claims());
        let config = config_for(&fixture);

        let outcome = run(&config).unwrap();
        let report = outcome.report().to_string();

        assert!(report.contains("Modeling dataset: 5 rows x 4 columns"), "{report}");
        assert!(report.contains("policy_deductable"));
        assert!(report.contains("total_claim_amount summary:"));
        assert!(report.contains("count"));
        assert!(report.contains("Generalized Linear Model Regression Results"));
        assert!(report.contains("Top 3 effects on expected severity:"));
        assert!(report.contains("severity_effects.json"));
    }

    #[test]
    fn test_charts_precede_a_failing_fit() {
        let fixture = FixtureDir::with_claims(ClaimsCsvFixtures::full_schema());
        let config = config_for(&fixture);

        let err = run(&config).unwrap_err();

        // Eleven claims cannot support one indicator per auto_year level
        match err {
            PipelineError::Fit(FitError::InsufficientData { observations, parameters }) => {
                assert_eq!(observations, 10);
                assert!(parameters > observations);
            }
            other => panic!("expected InsufficientData, got {other:?}"),
        }
        assert_non_empty_file(&config.output_dir.join("severity_histogram.png"));
        assert_non_empty_file(&config.output_dir.join("severity_by_deductible.png"));
    }
}

// ============================================================================
// Failures name their stage
// ============================================================================

mod failure_tests {
    use super::*;

    #[test]
    fn test_missing_input_fails_in_load() {
        let fixture = FixtureDir::with_claims(ClaimsCsvFixtures::five_claims());
        let config = AnalysisConfig {
            input_path: fixture.path().join("data/absent.csv"),
            ..config_for(&fixture)
        };

        let err = run(&config).unwrap_err();

        assert_eq!(err.stage(), Stage::Load);
        assert!(err.to_string().starts_with("load stage failed"));
    }

    #[test]
    fn test_blocked_output_dir_fails_in_visualize() {
        let fixture = FixtureDir::with_claims(ClaimsCsvFixtures::five_claims());
        let blocker = write_fixture(fixture.path(), "outputs", "not a directory");
        let config = config_for(&fixture);
        assert_eq!(config.output_dir, blocker);

        let err = run(&config).unwrap_err();

        assert_eq!(err.stage(), Stage::Visualize);
    }

    #[test]
    fn test_single_level_categorical_fails_in_fit() {
        let fixture = FixtureDir::with_claims(ClaimsCsvFixtures::single_sex());
        let config = config_for(&fixture);

        let err = run(&config).unwrap_err();

        assert!(matches!(err, PipelineError::Fit(_)), "got {err:?}");
        assert!(config.output_dir.join("severity_histogram.png").exists());
        assert!(!config.model_data_path.exists());
    }

    #[test]
    fn test_blocked_model_data_path_fails_in_report() {
        let fixture = FixtureDir::with_claims(ClaimsCsvFixtures::five_claims());
        let blocker = write_fixture(fixture.path(), "blocked", "not a directory");
        let config = AnalysisConfig {
            model_data_path: blocker.join("df_model.csv"),
            ..config_for(&fixture)
        };

        let err = run(&config).unwrap_err();

        assert_eq!(err.stage(), Stage::Report);
    }
}

// ============================================================================
// Configuration from the environment
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_environment_overrides_defaults() {
        std::env::set_var("SEVERITY_OUTPUT_DIR", "charts");
        std::env::set_var("SEVERITY_TOP_EFFECTS", "7");

        let config = AnalysisConfig::from_env();

        std::env::remove_var("SEVERITY_OUTPUT_DIR");
        std::env::remove_var("SEVERITY_TOP_EFFECTS");

        let config = config.unwrap();
        assert_eq!(config.output_dir, PathBuf::from("charts"));
        assert_eq!(config.top_effects, 7);
        assert_eq!(config.input_path, PathBuf::from("data/insurance_claims.csv"));
        assert_eq!(config.histogram_bins, 50);
    }
}
