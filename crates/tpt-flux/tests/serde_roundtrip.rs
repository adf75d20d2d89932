use tpt_core::{StateSet, Tolerance};
use tpt_flux::{
    build_report, decompose_pathways, flux_from_bytes, flux_from_json, flux_to_bytes,
    flux_to_json, hash_flux, hash_pathways, hash_report, PathwayOpts, ReactiveFlux,
};
use tpt_markov::{StationaryDistribution, TransitionMatrix};

fn sample_flux() -> ReactiveFlux {
    let tol = Tolerance::default();
    let tm = TransitionMatrix::from_rows(
        vec![
            vec![0.9, 0.1, 0.0],
            vec![0.05, 0.9, 0.05],
            vec![0.0, 0.1, 0.9],
        ],
        &tol,
    )
    .unwrap();
    let pi = StationaryDistribution::new(vec![0.25, 0.5, 0.25], &tol).unwrap();
    let a = StateSet::new([0], 3).unwrap();
    let b = StateSet::new([2], 3).unwrap();
    ReactiveFlux::compute(&tm, &pi, &a, &b, &tol).unwrap()
}

#[test]
fn json_round_trip_preserves_result() {
    let flux = sample_flux();
    let json = flux_to_json(&flux).unwrap();
    let restored = flux_from_json(&json).unwrap();
    assert_eq!(flux, restored);
    assert_eq!(hash_flux(&flux).unwrap(), hash_flux(&restored).unwrap());
}

#[test]
fn binary_round_trip_preserves_result() {
    let flux = sample_flux();
    let bytes = flux_to_bytes(&flux).unwrap();
    let restored = flux_from_bytes(&bytes).unwrap();
    assert_eq!(flux, restored);
}

#[test]
fn malformed_json_surfaces_serde_error() {
    let err = flux_from_json("{\"not\": \"a flux\"}").unwrap_err();
    assert_eq!(err.info().code, "deserialize-json");
}

#[test]
fn report_hash_is_stable_and_self_consistent() {
    let flux = sample_flux();
    let report = build_report(&flux).unwrap();
    assert!(!report.flux_hash.is_empty());
    assert_eq!(report.flux_hash, hash_report(&report).unwrap());

    let again = build_report(&flux).unwrap();
    assert_eq!(report, again);
}

#[test]
fn pathway_decomposition_hash_is_deterministic() {
    let flux = sample_flux();
    let first = decompose_pathways(&flux, &PathwayOpts::default());
    let second = decompose_pathways(&flux, &PathwayOpts::default());
    assert_eq!(first, second);
    assert_eq!(
        hash_pathways(&first).unwrap(),
        hash_pathways(&second).unwrap()
    );
}
