use super::*;
use rayon::prelude::*;

/// Optimal split points and accumulated variances for every classing of every
/// prefix of the sorted data.
///
/// Both tables are `(n + 1) × (K + 1)`, addressed by `(row, col)` where `row`
/// is a prefix length in `1..=n` and `col` a class count in `1..=K`. Row 0 and
/// column 0 are padding so the recurrence reads naturally in 1-based terms.
///
/// - `limits[row][col]`: 1-based index at which the last class of the optimal
///   `col`-classing of the first `row` observations begins
/// - `variances[row][col]`: minimal total within-class sum of squared
///   deviations for that classing
///
/// # Recurrence
///
/// Row `l` depends only on rows `< l` one column to the left, so a single
/// forward pass fills everything:
///
/// ```text
/// variances[l][j] = min over m ≤ l of variances[m - 1][j - 1] + ssd(data[m..=l])
/// ```
///
/// Ties go to the smallest `m`. The trailing sums of squares are accumulated
/// incrementally as `Σx² − (Σx)²/w`, walking `m` down from `l`.
///
/// # Parallelism
///
/// Within a row the columns are independent. Once the row's trailing variances
/// are known, columns `2..=K` are relaxed concurrently for large tables. Each
/// cell sees the same operations in the same order either way, so the result
/// is bit-identical to the sequential sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrices {
    width: usize,
    limits: Vec<usize>,
    variances: Vec<Variance>,
}

impl Matrices {
    /// Number of observations the tables were built over.
    pub fn n(&self) -> usize {
        self.limits.len() / self.width - 1
    }
    /// Largest class count the tables were built for.
    pub fn k(&self) -> usize {
        self.width - 1
    }
    /// 1-based start of the last class for `col` classes over `row` observations.
    pub fn limit(&self, row: usize, col: usize) -> usize {
        self.limits[self.index(row, col)]
    }
    /// Minimal within-class variance for `col` classes over `row` observations.
    pub fn variance(&self, row: usize, col: usize) -> Variance {
        self.variances[self.index(row, col)]
    }
    /// Walks the optimal `k`-classing of all observations from the last class down.
    pub fn backtrack(&self, k: usize) -> Backtrack<'_> {
        Backtrack::from((self, k))
    }
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(col < self.width);
        row * self.width + col
    }

    /// Sums of squared deviations of every trailing segment `data[i..]`,
    /// indexed by `i`. Walks backwards so each step is O(1).
    fn trailing(data: &[Value], buffer: &mut Vec<Variance>) {
        let mut sum = 0.;
        let mut squares = 0.;
        let mut w = 0.;
        buffer.clear();
        buffer.resize(data.len(), 0.);
        for (i, x) in data.iter().enumerate().rev() {
            w += 1.;
            sum += x;
            squares += x * x;
            buffer[i] = squares - (sum * sum) / w;
        }
    }

    /// Relaxes one cell of row `l` against every candidate start of its last class.
    ///
    /// `above` holds rows `0..l`; `trailing[i]` is the variance of a last class
    /// starting at 0-based index `i`. Candidates are visited from the latest
    /// start to the earliest, and an equal total replaces the incumbent.
    fn relax(
        col: usize,
        width: usize,
        above: &[Variance],
        trailing: &[Variance],
        limit: &mut usize,
        variance: &mut Variance,
    ) {
        for i in (1..trailing.len()).rev() {
            let candidate = above[i * width + col - 1] + trailing[i];
            if *variance >= candidate {
                *limit = i + 1;
                *variance = candidate;
            }
        }
    }
}

/// Builds the tables for sorted `data` and class counts up to `k`.
///
/// Callers short-circuit before this when `k` reaches the number of distinct
/// values; the tables are still well-formed there, merely uninformative.
impl From<(&[Value], usize)> for Matrices {
    fn from((data, k): (&[Value], usize)) -> Self {
        debug_assert!(data.is_sorted());
        let n = data.len();
        let width = k + 1;
        let mut limits = vec![0; (n + 1) * width];
        let mut variances = vec![0.; (n + 1) * width];
        if n > 0 {
            for col in 1..width {
                limits[width + col] = 1;
                variances[width + col] = 0.;
                for row in 2..=n {
                    variances[row * width + col] = Variance::INFINITY;
                }
            }
        }
        let parallel = n * k >= PARALLEL_CELLS;
        let ref mut trailing = Vec::with_capacity(n);
        for l in 2..=n {
            Self::trailing(&data[..l], trailing);
            let trailing = &trailing[..];
            let (above, below) = variances.split_at_mut(l * width);
            let above = &*above;
            let row = &mut below[..width];
            let lim = &mut limits[l * width..(l + 1) * width];
            let from = width.min(2);
            if parallel {
                lim[from..]
                    .par_iter_mut()
                    .zip(row[from..].par_iter_mut())
                    .enumerate()
                    .for_each(|(j, (limit, variance))| {
                        Self::relax(j + 2, width, above, trailing, limit, variance)
                    });
            } else {
                lim[from..]
                    .iter_mut()
                    .zip(row[from..].iter_mut())
                    .enumerate()
                    .for_each(|(j, (limit, variance))| {
                        Self::relax(j + 2, width, above, trailing, limit, variance)
                    });
            }
            if width > 1 {
                lim[1] = 1;
                row[1] = trailing[0];
            }
        }
        log::debug!("built {}x{} jenks matrices", n, k);
        Self {
            width,
            limits,
            variances,
        }
    }
}
