use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row length must be non zero.
    #[error("row length must be > 0, got {0}")]
    InvalidRowLength(usize),
}

/// Controls how the per-sample work of a filter is scheduled.
///
/// Every output sample depends only on read-only inputs, so all strategies
/// produce identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    ///
    /// This is often more cache-friendly than [`ExecutionStrategy::ParallelElements`].
    #[default]
    ParallelRows,

    /// Use the global Rayon thread pool to process every sample in parallel.
    ParallelElements,

    /// Process rows on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Visit every element of a row-major buffer with its `(row, col)` position.
///
/// Each element is written by exactly one call of `f`, so no synchronization
/// is needed beyond the final join.
///
/// # Arguments
///
/// * `dst` - The destination buffer, `row_len` elements per row.
/// * `row_len` - The number of elements in a row.
/// * `strategy` - The execution strategy.
/// * `f` - The operation producing one element from its position.
///
/// # Errors
///
/// Fails for a zero `row_len`, a zero thread count or when the local pool
/// cannot be built.
pub fn par_iter_indexed<T, F>(
    dst: &mut [T],
    row_len: usize,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, usize, &mut T) + Send + Sync,
{
    if row_len == 0 {
        return Err(ParallelError::InvalidRowLength(row_len));
    }

    let row_op = |(r, row): (usize, &mut [T])| {
        row.iter_mut().enumerate().for_each(|(c, out)| f(r, c, out));
    };

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_mut(row_len).enumerate().for_each(row_op);
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_mut(row_len).enumerate().for_each(row_op);
        }
        ExecutionStrategy::ParallelElements => {
            dst.par_iter_mut()
                .enumerate()
                .for_each(|(i, out)| f(i / row_len, i % row_len, out));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;
            log::trace!("built local pool with {n} threads");

            pool.install(|| {
                dst.par_chunks_mut(row_len).enumerate().for_each(row_op);
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(strategy: ExecutionStrategy) -> Result<Vec<(usize, usize)>, ParallelError> {
        let mut dst = vec![(usize::MAX, usize::MAX); 6];
        par_iter_indexed(&mut dst, 3, strategy, |r, c, out| *out = (r, c))?;
        Ok(dst)
    }

    #[test]
    fn test_execute_all_strategies() -> Result<(), ParallelError> {
        let expected = vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)];
        for strategy in [
            ExecutionStrategy::Serial,
            ExecutionStrategy::ParallelRows,
            ExecutionStrategy::ParallelElements,
            ExecutionStrategy::Fixed(2),
        ] {
            assert_eq!(positions(strategy)?, expected, "{strategy:?}");
        }
        Ok(())
    }

    #[test]
    fn test_execute_empty_buffer() -> Result<(), ParallelError> {
        let mut dst: Vec<u8> = vec![];
        par_iter_indexed(&mut dst, 4, ExecutionStrategy::ParallelRows, |_, _, _| {
            unreachable!()
        })?;
        Ok(())
    }

    #[test]
    fn test_execute_invalid_row_length() {
        let mut dst = vec![0u8; 4];
        let res = par_iter_indexed(&mut dst, 0, ExecutionStrategy::Serial, |_, _, _| {});
        assert_eq!(res, Err(ParallelError::InvalidRowLength(0)));
    }

    #[test]
    fn test_execute_fixed_error() {
        let mut dst = vec![0u8; 4];
        let res = par_iter_indexed(&mut dst, 2, ExecutionStrategy::Fixed(0), |_, _, _| {});
        assert_eq!(res, Err(ParallelError::InvalidThreadCount(0)));
    }

    #[test]
    fn test_default_strategy() {
        assert_eq!(ExecutionStrategy::default(), ExecutionStrategy::ParallelRows);
    }
}
