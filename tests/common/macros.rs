/// Asserts that a genome passes validation under the given config.
#[macro_export]
macro_rules! assert_valid_genome {
    ($genome:expr, $config:expr) => {
        if let Err(e) = $genome.validate(&$config.genome) {
            panic!("Genome {} failed validation: {}", $genome.id, e);
        }
    };
}

/// Asserts that two floats agree within a tolerance.
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr) => {
        assert_close!($left, $right, 1e-4)
    };
    ($left:expr, $right:expr, $eps:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $eps,
            "{} and {} differ by more than {}",
            l,
            r,
            $eps
        );
    };
}

/// Asserts that a genome settles in the expected state for the parameters.
#[macro_export]
macro_rules! assert_state {
    ($genome:expr, $params:expr, $expected:expr) => {
        let selected = genolab_lib::model::state::select_state(&$genome, &$params);
        assert_eq!(
            selected, $expected,
            "Expected state {:?} but got {:?}",
            $expected, selected
        );
    };
}
