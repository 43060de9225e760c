#![forbid(unsafe_code)]

//! Binary search over candidate font sizes.
//!
//! The search knows nothing about text. It asks an oracle whether a size is
//! too small, too large, or exactly right, and narrows `[min, max)` until the
//! largest accepted size is found.
//!
//! # Invariants
//!
//! - For `min < max` the result lies in `[min, max)`; `max` is never tried.
//! - The result is either a size the oracle accepted (`TooSmall`) or `min`.
//! - For a monotone oracle the result is the largest accepted size.
//! - At most `floor(log2(max - min)) + 1` attempts run.
//!
//! # Example
//! ```
//! use autofit_search::{FitVerdict, find_best_size};
//!
//! // Text fits up to 20px.
//! let outcome = find_best_size(7, 99, |size| {
//!     if size <= 20 { FitVerdict::TooSmall } else { FitVerdict::TooLarge }
//! });
//! assert_eq!(outcome.size, 20);
//! assert!(!outcome.exact);
//! ```

use tracing::trace;

/// Result of testing one candidate size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitVerdict {
    /// The text fits with room to spare; a larger size may fit too.
    TooSmall,
    /// The text does not fit; shrink.
    TooLarge,
    /// Accept this size and stop searching.
    ExactFit,
}

/// What a search settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Chosen size.
    pub size: u32,
    /// The oracle reported [`FitVerdict::ExactFit`] for `size`.
    pub exact: bool,
    /// Number of oracle calls made.
    pub attempts: u32,
}

/// Find the largest size in `[min, max)` the oracle accepts.
///
/// Never fails: when nothing fits (or the range is empty) the result is
/// `min`. An [`FitVerdict::ExactFit`] ends the search at once.
pub fn find_best_size<F>(min: u32, max: u32, mut test: F) -> SearchOutcome
where
    F: FnMut(u32) -> FitVerdict,
{
    let mut outcome = SearchOutcome {
        size: min,
        exact: false,
        attempts: 0,
    };
    if max <= min {
        return outcome;
    }

    let mut lo = min;
    let mut hi = max - 1;
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let verdict = test(mid);
        outcome.attempts += 1;
        trace!(size = mid, ?verdict, lo, hi, "fit attempt");

        match verdict {
            FitVerdict::TooSmall => {
                outcome.size = mid;
                // mid < max, so this cannot overflow.
                lo = mid + 1;
            }
            FitVerdict::TooLarge => {
                let Some(next) = mid.checked_sub(1) else {
                    break;
                };
                hi = next;
            }
            FitVerdict::ExactFit => {
                outcome.size = mid;
                outcome.exact = true;
                return outcome;
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold(limit: u32) -> impl FnMut(u32) -> FitVerdict {
        move |size| {
            if size <= limit {
                FitVerdict::TooSmall
            } else {
                FitVerdict::TooLarge
            }
        }
    }

    #[test]
    fn finds_largest_fitting_size() {
        assert_eq!(find_best_size(7, 99, threshold(20)).size, 20);
        assert_eq!(find_best_size(7, 99, threshold(41)).size, 41);
    }

    #[test]
    fn everything_fits_returns_max_minus_one() {
        let outcome = find_best_size(7, 99, threshold(u32::MAX));
        assert_eq!(outcome.size, 98);
        assert!(!outcome.exact);
    }

    #[test]
    fn nothing_fits_returns_min() {
        let outcome = find_best_size(7, 99, threshold(0));
        assert_eq!(outcome.size, 7);
        assert!(outcome.attempts > 0);
    }

    #[test]
    fn upper_bound_is_never_tried() {
        let mut tried = Vec::new();
        find_best_size(7, 99, |size| {
            tried.push(size);
            FitVerdict::TooSmall
        });
        assert!(tried.iter().all(|&s| (7..99).contains(&s)));
        assert!(!tried.contains(&99));
    }

    #[test]
    fn result_is_always_an_accepted_size_or_min() {
        // With fits <= 9 in [7, 99) the attempts go 52, 29, 17, 11, 8, 9, 10.
        // The last attempt is rejected; a search that remembered the bound
        // before narrowing would report 10 here.
        let mut accepted = Vec::new();
        let outcome = find_best_size(7, 99, |size| {
            let verdict = threshold(9)(size);
            if verdict == FitVerdict::TooSmall {
                accepted.push(size);
            }
            verdict
        });
        assert_eq!(outcome.size, 9);
        assert_eq!(outcome.attempts, 7);
        assert!(accepted.contains(&outcome.size));
    }

    #[test]
    fn exact_fit_stops_immediately() {
        let mut attempts = 0;
        let outcome = find_best_size(0, 100, |size| {
            attempts += 1;
            if size == 49 {
                FitVerdict::ExactFit
            } else {
                FitVerdict::TooSmall
            }
        });
        assert_eq!(outcome.size, 49);
        assert!(outcome.exact);
        assert_eq!(attempts, 1);
        assert_eq!(outcome.attempts, 1);
    }

    #[test]
    fn empty_range_runs_no_attempts() {
        let outcome = find_best_size(12, 12, |_| unreachable!("no attempt expected"));
        assert_eq!(outcome, SearchOutcome {
            size: 12,
            exact: false,
            attempts: 0
        });
        assert_eq!(find_best_size(30, 10, threshold(20)).size, 30);
    }

    #[test]
    fn zero_lower_bound_does_not_underflow() {
        let outcome = find_best_size(0, 10, threshold(0));
        assert_eq!(outcome.size, 0);
        let outcome = find_best_size(0, 1, |_| FitVerdict::TooLarge);
        assert_eq!(outcome.size, 0);
    }

    #[test]
    fn large_bounds_do_not_overflow() {
        let outcome = find_best_size(u32::MAX - 10, u32::MAX, threshold(u32::MAX));
        assert_eq!(outcome.size, u32::MAX - 1);
        let outcome = find_best_size(0, u32::MAX, threshold(3_000_000_000));
        assert_eq!(outcome.size, 3_000_000_000);
    }

    #[test]
    fn single_candidate_range() {
        assert_eq!(find_best_size(5, 6, threshold(100)).size, 5);
        assert_eq!(find_best_size(5, 6, threshold(0)).size, 5);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn result_in_half_open_range(min in 0u32..500, span in 1u32..500, limit in 0u32..1200) {
            let max = min + span;
            let outcome = find_best_size(min, max, |s| {
                if s <= limit { FitVerdict::TooSmall } else { FitVerdict::TooLarge }
            });
            prop_assert!(outcome.size >= min && outcome.size < max);
        }

        #[test]
        fn monotone_oracle_gives_largest_fit(min in 0u32..500, span in 1u32..500, limit in 0u32..1200) {
            let max = min + span;
            let outcome = find_best_size(min, max, |s| {
                if s <= limit { FitVerdict::TooSmall } else { FitVerdict::TooLarge }
            });
            let expected = if limit < min { min } else { limit.min(max - 1) };
            prop_assert_eq!(outcome.size, expected);
        }

        #[test]
        fn attempt_count_is_logarithmic(min in 0u32..10_000, span in 1u32..100_000, limit in 0u32..200_000) {
            let outcome = find_best_size(min, min + span, |s| {
                if s <= limit { FitVerdict::TooSmall } else { FitVerdict::TooLarge }
            });
            let bound = 32 - span.leading_zeros();
            prop_assert!(outcome.attempts <= bound);
        }

        #[test]
        fn search_is_deterministic(min in 0u32..100, span in 1u32..200, limit in 0u32..400) {
            let oracle = |s: u32| if s <= limit { FitVerdict::TooSmall } else { FitVerdict::TooLarge };
            prop_assert_eq!(
                find_best_size(min, min + span, oracle),
                find_best_size(min, min + span, oracle)
            );
        }
    }
}
