//! Integration tests for chart rendering

use proptest::prelude::*;
use tempfile::TempDir;

use domain_claims::load_claims;
use infra_charts::style::ensure_font;
use infra_charts::{
    group_by_key, render_charts, BoxStats, ChartError, ChartSettings, FontSource, Histogram,
    BOXPLOT_FILE, HISTOGRAM_FILE,
};
use test_utils::{assert_non_empty_file, write_fixture, ClaimsCsvFixtures, TestDatasetBuilder};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn assert_png(path: &std::path::Path) {
    assert_non_empty_file(path);
    let bytes = std::fs::read(path).unwrap();
    assert_eq!(&bytes[..8], &PNG_SIGNATURE, "{} is not a PNG", path.display());
}

// ============================================================================
// Rendering
// ============================================================================

mod render_tests {
    use super::*;

    #[test]
    fn test_five_claims_produce_both_charts() {
        let dir = TempDir::new().unwrap();
        let input = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::five_claims());
        let dataset = load_claims(&input).unwrap().dataset;
        let output_dir = dir.path().join("outputs");

        let paths = render_charts(&dataset, &output_dir, &ChartSettings::default()).unwrap();

        assert_eq!(paths.histogram, output_dir.join(HISTOGRAM_FILE));
        assert_eq!(paths.boxplot, output_dir.join(BOXPLOT_FILE));
        assert_png(&paths.histogram);
        assert_png(&paths.boxplot);
    }

    #[test]
    fn test_custom_size_and_bins() {
        let dir = TempDir::new().unwrap();
        let input = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::full_schema());
        let dataset = load_claims(&input).unwrap().dataset;
        let settings = ChartSettings::new(400, 250).bins(10);

        let paths = render_charts(&dataset, dir.path(), &settings).unwrap();

        assert_png(&paths.histogram);
        assert_png(&paths.boxplot);
    }

    #[test]
    fn test_unusable_font_path_still_renders_with_bundled_font() {
        let dir = TempDir::new().unwrap();
        let input = write_fixture(dir.path(), "claims.csv", ClaimsCsvFixtures::five_claims());
        let dataset = load_claims(&input).unwrap().dataset;
        let settings = ChartSettings::default().font_path(dir.path().join("NoSuchFont.ttf"));

        assert_eq!(
            ensure_font(settings.font_path.as_deref()).unwrap(),
            FontSource::Bundled
        );
        let paths = render_charts(&dataset, &dir.path().join("outputs"), &settings).unwrap();

        assert_png(&paths.histogram);
        assert_png(&paths.boxplot);
    }

    #[test]
    fn test_unwritable_output_directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = write_fixture(dir.path(), "not_a_dir", "x");
        let dataset = TestDatasetBuilder::new()
            .numeric("total_claim_amount", &[100.0, 200.0])
            .numeric("policy_deductable", &[500.0, 1000.0])
            .build();

        let err = render_charts(&dataset, &blocker.join("charts"), &ChartSettings::default())
            .unwrap_err();

        assert!(matches!(err, ChartError::Io { .. }), "got {err:?}");
    }

    #[test]
    fn test_missing_deductible_column_is_reported() {
        let dir = TempDir::new().unwrap();
        let dataset = TestDatasetBuilder::new()
            .numeric("total_claim_amount", &[100.0, 200.0])
            .build();

        let err = render_charts(&dataset, dir.path(), &ChartSettings::default()).unwrap_err();

        assert!(matches!(err, ChartError::Data(_)), "got {err:?}");
    }
}

// ============================================================================
// Property-based tests
// ============================================================================

mod property_tests {
    use super::*;
    use test_utils::{deductible_strategy, severity_strategy};

    proptest! {
        #[test]
        fn test_histogram_counts_sum_to_observations(
            values in proptest::collection::vec(severity_strategy(), 1..200),
            bins in 1usize..60,
        ) {
            let histogram = Histogram::compute(&values, bins).unwrap();

            prop_assert_eq!(histogram.counts.len(), bins);
            prop_assert_eq!(histogram.edges.len(), bins + 1);
            prop_assert_eq!(histogram.total(), values.len());
            for pair in histogram.edges.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }

        #[test]
        fn test_box_statistics_are_ordered(
            values in proptest::collection::vec(severity_strategy(), 1..100),
        ) {
            let stats = BoxStats::compute(500.0, &values).unwrap();

            prop_assert!(stats.whisker_low <= stats.q1);
            prop_assert!(stats.q1 <= stats.median);
            prop_assert!(stats.median <= stats.q3);
            prop_assert!(stats.q3 <= stats.whisker_high);
            prop_assert_eq!(stats.count, values.len());
            for outlier in &stats.outliers {
                prop_assert!(*outlier < stats.whisker_low || *outlier > stats.whisker_high);
            }
        }

        #[test]
        fn test_groups_partition_rows(
            rows in proptest::collection::vec((deductible_strategy(), severity_strategy()), 1..100),
        ) {
            let keys: Vec<Option<f64>> = rows.iter().map(|(k, _)| Some(*k)).collect();
            let values: Vec<Option<f64>> = rows.iter().map(|(_, v)| Some(*v)).collect();

            let groups = group_by_key(&keys, &values);

            let total: usize = groups.iter().map(|(_, g)| g.len()).sum();
            prop_assert_eq!(total, rows.len());
            for pair in groups.windows(2) {
                prop_assert!(pair[0].0 < pair[1].0);
            }
        }
    }
}
