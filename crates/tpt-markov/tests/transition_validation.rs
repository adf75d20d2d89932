use tpt_core::{TptError, Tolerance};
use tpt_markov::{StationaryDistribution, TransitionMatrix};

fn tol() -> Tolerance {
    Tolerance::default()
}

#[test]
fn accepts_row_stochastic_matrix() {
    let tm = TransitionMatrix::from_rows(
        vec![
            vec![0.9, 0.1, 0.0],
            vec![0.05, 0.9, 0.05],
            vec![0.0, 0.1, 0.9],
        ],
        &tol(),
    )
    .unwrap();
    assert_eq!(tm.n_states(), 3);
    assert_eq!(tm.prob(1, 2), 0.05);
}

#[test]
fn rejects_negative_entry() {
    let err = TransitionMatrix::from_rows(
        vec![vec![1.1, -0.1], vec![0.5, 0.5]],
        &tol(),
    )
    .unwrap_err();
    match err {
        TptError::Input(info) => assert_eq!(info.code, "negative-probability"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_ragged_rows() {
    let err = TransitionMatrix::from_rows(
        vec![vec![0.5, 0.5], vec![1.0]],
        &tol(),
    )
    .unwrap_err();
    match err {
        TptError::Input(info) => assert_eq!(info.code, "ragged-rows"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_non_square_matrix() {
    let err = TransitionMatrix::new(nalgebra::DMatrix::<f64>::zeros(2, 3), &tol()).unwrap_err();
    match err {
        TptError::Input(info) => assert_eq!(info.code, "not-square"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_non_stochastic_row() {
    let err = TransitionMatrix::from_rows(
        vec![vec![0.5, 0.4], vec![0.5, 0.5]],
        &tol(),
    )
    .unwrap_err();
    match err {
        TptError::Input(info) => {
            assert_eq!(info.code, "row-not-stochastic");
            assert_eq!(info.context.get("row").map(String::as_str), Some("0"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn stationary_rejects_non_positive_weight() {
    let err = StationaryDistribution::new(vec![0.5, 0.5, 0.0], &tol()).unwrap_err();
    match err {
        TptError::Input(info) => assert_eq!(info.code, "non-positive-weight"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn stationary_rejects_unnormalized_weights() {
    let err = StationaryDistribution::new(vec![0.5, 0.6], &tol()).unwrap_err();
    match err {
        TptError::Input(info) => assert_eq!(info.code, "not-normalized"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn invariance_check_accepts_true_stationary() {
    let tm = TransitionMatrix::from_rows(
        vec![
            vec![0.9, 0.1, 0.0],
            vec![0.05, 0.9, 0.05],
            vec![0.0, 0.1, 0.9],
        ],
        &tol(),
    )
    .unwrap();
    let pi = StationaryDistribution::new(vec![0.25, 0.5, 0.25], &tol()).unwrap();
    pi.verify_invariance(&tm, &tol()).unwrap();
}

#[test]
fn invariance_check_rejects_wrong_distribution() {
    let tm = TransitionMatrix::from_rows(
        vec![
            vec![0.9, 0.1, 0.0],
            vec![0.05, 0.9, 0.05],
            vec![0.0, 0.1, 0.9],
        ],
        &tol(),
    )
    .unwrap();
    let pi = StationaryDistribution::new(vec![0.5, 0.25, 0.25], &tol()).unwrap();
    let err = pi.verify_invariance(&tm, &tol()).unwrap_err();
    match err {
        TptError::Input(info) => assert_eq!(info.code, "not-invariant"),
        other => panic!("unexpected error: {other:?}"),
    }
}
