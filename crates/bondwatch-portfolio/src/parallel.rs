//! Fan-out of per-position work over a book.
//!
//! With the `parallel` feature, books at or above the configured threshold
//! are spread over rayon's pool. Output is in book order in both modes, so
//! callers that collect into a `Result` still see the first failing
//! position's error.

use crate::types::{AnalyticsConfig, PricingMode};

/// Applies `f` to every position of `book`, in the mode chosen by `config`.
pub(crate) fn map_book<T, U, F>(book: &[T], config: &AnalyticsConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    match config.mode_for(book.len()) {
        PricingMode::Parallel => fan_out(book, f),
        PricingMode::Sequential => book.iter().map(f).collect(),
    }
}

#[cfg(feature = "parallel")]
fn fan_out<T, U, F>(book: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    use rayon::prelude::*;
    book.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn fan_out<T, U, F>(book: &[T], f: F) -> Vec<U>
where
    F: Fn(&T) -> U,
{
    book.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_book() {
        let book = vec![1, 2, 3, 4, 5];
        let results = map_book(&book, &AnalyticsConfig::sequential(), |x| x * 2);
        assert_eq!(results, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_large_book_keeps_order() {
        let book: Vec<u64> = (0..1_000).collect();
        let results = map_book(&book, &AnalyticsConfig::parallel_from(1), |x| x * x);
        let expected: Vec<u64> = (0..1_000).map(|x| x * x).collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn test_first_error_in_book_order() {
        let book: Vec<i32> = (0..500).collect();
        let checked = map_book(&book, &AnalyticsConfig::parallel_from(1), |x| {
            if x % 97 == 96 {
                Err(*x)
            } else {
                Ok(*x)
            }
        });
        let result: Result<Vec<i32>, i32> = checked.into_iter().collect();
        assert_eq!(result, Err(96));
    }
}
