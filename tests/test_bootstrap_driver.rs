/// Integration tests driving the bound statistic the way an external
/// resampling harness would: the driver owns the random index sets and the
/// aggregation, the statistic only evaluates one replicate at a time.
///
/// Run with: cargo test --test test_bootstrap_driver -- --nocapture
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use refbounds::bootstrap::bootstrap_statistic;
use refbounds::bounds::{compute_bounds, BoundsResult};
use refbounds::data::Data;
use refbounds::table::ConcordanceTable;

const ALPHA_R: f64 = 0.9;
const BETA_R: f64 = 0.95;

fn draw_indices(rng: &mut ChaCha8Rng, n: usize) -> Vec<usize> {
    (0..n).map(|_| rng.gen_range(0..n)).collect()
}

fn assert_same_bounds(a: &BoundsResult, b: &BoundsResult) {
    for (x, y) in a.values().iter().zip(b.values().iter()) {
        assert!(
            (x.is_nan() && y.is_nan()) || x == y,
            "replicate values diverge: {} vs {}",
            x,
            y
        );
    }
}

#[test]
fn test_pertussis_point_estimates() {
    let data = Data::pertussis();
    let table = ConcordanceTable::from_data(&data);
    assert_eq!(table.n11, 21);
    assert_eq!(table.n10, 5);
    assert_eq!(table.n01, 8);
    assert_eq!(table.n00, 52);

    let bounds = compute_bounds(&table, ALPHA_R, BETA_R);
    assert!(bounds.is_available());
    let expected = [
        0.6246963562753036,
        0.8226720647773279,
        0.8621900826446282,
        0.9632231404958678,
        0.6981900452488687,
        0.9194570135746606,
        0.8182352941176471,
        0.9141176470588235,
    ];
    for (value, expected) in bounds.values().iter().zip(expected.iter()) {
        assert!(
            (value - expected).abs() < 1e-9,
            "expected {} but got {}",
            expected,
            value
        );
    }
}

#[test]
fn test_loading_the_sample_file_matches_the_bundled_dataset() {
    let mut data = Data::new();
    data.load_data("samples/pertussis.tsv").unwrap();
    let bundled = Data::pertussis();
    assert_eq!(data.sample_len, bundled.sample_len);
    assert_eq!(data.test, bundled.test);
    assert_eq!(data.reference, bundled.reference);
}

#[test]
fn test_percentile_driver_sweep() {
    let data = Data::pertussis();
    let n = data.sample_len;
    let mut rng = ChaCha8Rng::seed_from_u64(4815162342);

    let mut upper_sens = Vec::new();
    let mut available = 0;
    for _ in 0..500 {
        let indices = draw_indices(&mut rng, n);
        let replicate = bootstrap_statistic(&data, &indices, ALPHA_R, BETA_R);
        if !replicate.is_available() {
            continue;
        }
        available += 1;

        // the lower bound may exceed the upper one by an ulp when a
        // degenerate resample makes both tau bounds coincide
        assert!(replicate.min_sensitivity <= replicate.max_sensitivity + 1e-12);
        assert!(replicate.min_specificity <= replicate.max_specificity + 1e-12);
        if !replicate.min_ppv.is_nan() && !replicate.max_ppv.is_nan() {
            assert!(replicate.min_ppv <= replicate.max_ppv + 1e-12);
        }
        if !replicate.min_npv.is_nan() && !replicate.max_npv.is_nan() {
            assert!(replicate.min_npv <= replicate.max_npv + 1e-12);
        }
        assert!(replicate.min_sensitivity >= 0.0);
        assert!(replicate.min_specificity >= 0.0);

        upper_sens.push(replicate.max_sensitivity);
    }

    assert!(
        available > 400,
        "most replicates of this dataset should have a feasible prevalence, got {}/500",
        available
    );

    // percentile interval of the upper sensitivity bound, as the driver
    // would report it
    upper_sens.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let low = upper_sens[(0.025 * upper_sens.len() as f64) as usize];
    let high = upper_sens[(0.975 * upper_sens.len() as f64) as usize];
    assert!(low <= high);
    assert!(low > 0.5 && high < 1.5, "implausible interval [{}, {}]", low, high);
}

#[test]
fn test_parallel_replicates_match_sequential() {
    let data = Data::pertussis();
    let n = data.sample_len;
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let index_sets: Vec<Vec<usize>> = (0..200).map(|_| draw_indices(&mut rng, n)).collect();

    let sequential: Vec<BoundsResult> = index_sets
        .iter()
        .map(|indices| bootstrap_statistic(&data, indices, ALPHA_R, BETA_R))
        .collect();
    let parallel: Vec<BoundsResult> = index_sets
        .par_iter()
        .map(|indices| bootstrap_statistic(&data, indices, ALPHA_R, BETA_R))
        .collect();

    for (a, b) in sequential.iter().zip(parallel.iter()) {
        assert_same_bounds(a, b);
    }
}
