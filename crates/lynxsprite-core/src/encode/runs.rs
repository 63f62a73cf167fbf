//! Scanline run detection.

use super::types::Run;

/// Split a row of palette indices into maximal runs, left to right.
///
/// An empty row yields no runs. Runs are not capped here; splitting long runs
/// into packets is the packer's job.
pub fn encode_runs(row: &[u8]) -> Vec<Run> {
    let mut runs = Vec::new();
    encode_runs_into(row, &mut runs);
    runs
}

/// Like [`encode_runs`], reusing `out` (cleared first).
pub fn encode_runs_into(row: &[u8], out: &mut Vec<Run>) {
    out.clear();
    for &index in row {
        match out.last_mut() {
            Some(run) if run.color == index => run.length += 1,
            _ => out.push(Run::new(index, 1)),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn row_strategy() -> impl Strategy<Value = Vec<u8>> {
        // Few distinct values so that runs actually form
        prop::collection::vec(0u8..4, 0..200)
    }

    proptest! {
        /// Property: expanding the runs reproduces the row exactly.
        #[test]
        fn prop_runs_round_trip(row in row_strategy()) {
            let runs = encode_runs(&row);
            let expanded: Vec<u8> = runs
                .iter()
                .flat_map(|r| std::iter::repeat(r.color).take(r.length))
                .collect();
            prop_assert_eq!(expanded, row);
        }

        /// Property: runs are maximal and never empty.
        #[test]
        fn prop_runs_are_maximal(row in row_strategy()) {
            let runs = encode_runs(&row);
            prop_assert!(runs.iter().all(|r| r.length >= 1));
            for pair in runs.windows(2) {
                prop_assert_ne!(pair[0].color, pair[1].color);
            }
        }
    }
}
