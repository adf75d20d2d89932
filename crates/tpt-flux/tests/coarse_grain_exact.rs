use tpt_core::{StateSet, TptError, Tolerance};
use tpt_flux::{coarse_grain, ReactiveFlux};
use tpt_markov::{StationaryDistribution, TransitionMatrix};

fn birth_death_five() -> (TransitionMatrix, StationaryDistribution) {
    let tol = Tolerance::default();
    let tm = TransitionMatrix::from_rows(
        vec![
            vec![0.8, 0.2, 0.0, 0.0, 0.0],
            vec![0.1, 0.7, 0.2, 0.0, 0.0],
            vec![0.0, 0.1, 0.7, 0.2, 0.0],
            vec![0.0, 0.0, 0.1, 0.7, 0.2],
            vec![0.0, 0.0, 0.0, 0.1, 0.9],
        ],
        &tol,
    )
    .unwrap();
    // Detailed balance: pi_{i+1} = 2 pi_i, so pi ~ [1, 2, 4, 8, 16] / 31.
    let raw = [1.0, 2.0, 4.0, 8.0, 16.0];
    let total: f64 = raw.iter().sum();
    let pi = StationaryDistribution::new(raw.iter().map(|&x| x / total).collect(), &tol).unwrap();
    pi.verify_invariance(&tm, &tol).unwrap();
    (tm, pi)
}

fn fine_flux() -> ReactiveFlux {
    let (tm, pi) = birth_death_five();
    let a = StateSet::new([0], 5).unwrap();
    let b = StateSet::new([4], 5).unwrap();
    ReactiveFlux::compute(&tm, &pi, &a, &b, &Tolerance::default()).unwrap()
}

#[test]
fn lumping_preserves_total_flux_and_rate() {
    let flux = fine_flux();
    let groups = vec![vec![0], vec![1, 2], vec![3], vec![4]];
    let (sets, reduced) = coarse_grain(&flux, &groups, &Tolerance::default()).unwrap();

    assert_eq!(sets.len(), 4);
    assert_eq!(reduced.n_states(), 4);
    assert!((reduced.total_flux() - flux.total_flux()).abs() < 1e-12);
    assert!((reduced.rate() - flux.rate()).abs() < 1e-12);
    assert!((reduced.mfpt() / flux.mfpt() - 1.0).abs() < 1e-9);

    // Lumped committors are stationary-weighted averages within groups.
    let pi = flux.stationary();
    let q = flux.forward_committor();
    let expected = (pi[1] * q[1] + pi[2] * q[2]) / (pi[1] + pi[2]);
    assert!((reduced.forward_committor()[1] - expected).abs() < 1e-12);
}

#[test]
fn trivial_partition_reproduces_three_group_summary() {
    let flux = fine_flux();
    let groups = vec![vec![0], vec![1, 2, 3], vec![4]];
    let (sets, reduced) = coarse_grain(&flux, &groups, &Tolerance::default()).unwrap();

    assert_eq!(sets.len(), 3);
    assert_eq!(reduced.source().indices(), &[0]);
    assert_eq!(reduced.sink().indices(), &[2]);
    assert!((reduced.total_flux() - flux.total_flux()).abs() < 1e-12);
    assert!((reduced.rate() - flux.rate()).abs() < 1e-12);
}

#[test]
fn groups_straddling_the_boundary_are_split() {
    let flux = fine_flux();
    // One group mixes the source with an intermediate state.
    let groups = vec![vec![0, 1], vec![2, 3], vec![4]];
    let (sets, reduced) = coarse_grain(&flux, &groups, &Tolerance::default()).unwrap();

    assert_eq!(sets.len(), 4);
    assert_eq!(sets[0].indices(), &[0]);
    assert_eq!(sets[1].indices(), &[1]);
    assert_eq!(reduced.source().indices(), &[0]);
    assert_eq!(reduced.sink().indices(), &[3]);
    assert!((reduced.total_flux() - flux.total_flux()).abs() < 1e-12);
    assert!((reduced.rate() - flux.rate()).abs() < 1e-12);
}

#[test]
fn rejects_overlapping_groups() {
    let flux = fine_flux();
    let groups = vec![vec![0, 1], vec![1, 2, 3], vec![4]];
    let err = coarse_grain(&flux, &groups, &Tolerance::default()).unwrap_err();
    match err {
        TptError::OverlappingGroups(info) => {
            assert_eq!(info.context.get("state").map(String::as_str), Some("1"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_incomplete_coverage() {
    let flux = fine_flux();
    let groups = vec![vec![0], vec![1, 2], vec![4]];
    let err = coarse_grain(&flux, &groups, &Tolerance::default()).unwrap_err();
    match err {
        TptError::IncompleteCoverage(info) => {
            assert_eq!(info.code, "uncovered-state");
            assert_eq!(info.context.get("first_missing").map(String::as_str), Some("3"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_out_of_range_group_member() {
    let flux = fine_flux();
    let groups = vec![vec![0], vec![1, 2, 3], vec![4, 9]];
    let err = coarse_grain(&flux, &groups, &Tolerance::default()).unwrap_err();
    match err {
        TptError::IncompleteCoverage(info) => assert_eq!(info.code, "index-out-of-range"),
        other => panic!("unexpected error: {other:?}"),
    }
}
