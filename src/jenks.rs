use super::*;

/// A classifier over one sample, built once for class counts up to `max_k`.
///
/// Holds the sorted sample and a single [`Matrices`] build, and answers any
/// number of queries for class counts `1..=max_k` against them. Counts at or
/// beyond the number of distinct values short-circuit to those values, one
/// class each, and never touch the matrices.
///
/// Nothing is shared between classifiers; dropping one discards its matrices.
#[derive(Debug, Clone)]
pub struct Jenks<'a> {
    sample: Sample<'a>,
    uniques: usize,
    max_k: usize,
    matrices: Matrices,
}

impl<'a> Jenks<'a> {
    /// Sorts `data` (borrowing it if already ascending) and builds matrices
    /// for class counts up to `max_k`.
    pub fn new(data: &'a [Value], max_k: usize) -> Self {
        Self::from((Sample::from(data), max_k))
    }
    pub fn sample(&self) -> &Sample<'a> {
        &self.sample
    }
    pub fn matrices(&self) -> &Matrices {
        &self.matrices
    }
    /// Largest class count this classifier answers for.
    pub fn max_k(&self) -> usize {
        self.max_k
    }
    /// Number of distinct observations.
    pub fn uniques(&self) -> usize {
        self.uniques
    }
    fn is_degenerate(&self, k: usize) -> bool {
        k >= self.uniques
    }

    /// Lower boundary of each of the `k` optimal classes, ascending.
    /// The first is always the minimum; the maximum is never included.
    ///
    /// # Panics
    ///
    /// If `k` is zero, or exceeds `max_k` while below the distinct count.
    pub fn breaks(&self, k: usize) -> Vec<Value> {
        match self.is_degenerate(k) {
            true => self.sample.uniques(),
            false => self
                .indices(k)
                .into_iter()
                .map(|i| self.sample.values()[i])
                .collect(),
        }
    }

    /// 0-based start index of each of the `k` optimal classes in the sorted
    /// sample. When degenerate, the first index of each distinct value.
    ///
    /// # Panics
    ///
    /// If `k` is zero, or exceeds `max_k` while below the distinct count.
    pub fn indices(&self, k: usize) -> Vec<usize> {
        assert!(k >= 1, "at least one class is required");
        let values = self.sample.values();
        match self.is_degenerate(k) {
            true => (0..values.len())
                .filter(|&i| i == 0 || values[i - 1] != values[i])
                .collect(),
            false => {
                assert!(k <= self.max_k, "{} classes exceeds built {}", k, self.max_k);
                self.matrices.backtrack(k).indices()
            }
        }
    }

    /// Boundaries for every class count from 2 up to `max_k`, stopping at the
    /// number of distinct values.
    pub fn all(&self) -> Vec<Vec<Value>> {
        (2..=self.max_k.min(self.uniques))
            .map(|k| self.breaks(k))
            .collect()
    }

    /// Goodness of variance fit of the optimal `k`-classing.
    pub fn fitness(&self, k: usize) -> anyhow::Result<Fitness> {
        fitness(self.sample.values(), &self.indices(k))
    }

    /// Scans class counts upward from 2 and stops at the first whose fit
    /// reaches `min_gvf`, returning the best-fitting boundaries seen.
    /// When the threshold is never reached, that is the best up to `max_k`.
    pub fn best(&self, min_gvf: Fitness) -> anyhow::Result<Vec<Value>> {
        let mut best = None::<(usize, Fitness)>;
        for k in 2..=self.max_k.min(self.uniques) {
            let gvf = self.fitness(k)?;
            log::trace!("{:>4} classes: gvf {:.6}", k, gvf);
            if best.map_or(true, |(_, incumbent)| gvf > incumbent) {
                best = Some((k, gvf));
            }
            if gvf >= min_gvf {
                break;
            }
        }
        match best {
            Some((k, gvf)) => {
                log::debug!("settled on {} classes with gvf {:.6}", k, gvf);
                Ok(self.breaks(k))
            }
            None => Ok(self.sample.uniques()),
        }
    }
}

/// Builds matrices only as wide as the sample can use: class counts at or
/// past the distinct count never read them.
impl<'a> From<(Sample<'a>, usize)> for Jenks<'a> {
    fn from((sample, max_k): (Sample<'a>, usize)) -> Self {
        let uniques = sample.n_unique();
        let width = max_k.min(uniques.saturating_sub(1));
        let matrices = Matrices::from((sample.values(), width));
        Self {
            sample,
            uniques,
            max_k,
            matrices,
        }
    }
}

/// Lower boundaries of the `k` natural classes of `data`.
///
/// Requesting at least as many classes as there are distinct values yields
/// the distinct values themselves.
///
/// # Panics
///
/// If `k` is zero.
pub fn natural_breaks(data: &[Value], k: usize) -> Vec<Value> {
    assert!(k >= 1, "at least one class is required");
    let sample = Sample::from(data);
    if k >= sample.n_unique() {
        return sample.uniques();
    }
    Jenks::from((sample, k)).breaks(k)
}

/// Lower boundaries of the natural classes of `data` for every class count
/// from 2 to `max_k`, from a single matrix build. Counts beyond the number of
/// distinct values are skipped.
///
/// # Panics
///
/// If `max_k` is below 2.
pub fn all_natural_breaks(data: &[Value], max_k: usize) -> Vec<Vec<Value>> {
    assert!(max_k >= 2, "class counts start at 2");
    Jenks::new(data, max_k).all()
}

/// Lower boundaries for the smallest class count up to `max_k` whose goodness
/// of variance fit reaches `min_gvf`, or the best fit found otherwise.
///
/// # Panics
///
/// If `max_k` is below 2 or `min_gvf` lies outside (0, 1].
pub fn best_natural_breaks(
    data: &[Value],
    max_k: usize,
    min_gvf: Fitness,
) -> anyhow::Result<Vec<Value>> {
    assert!(max_k >= 2, "class counts start at 2");
    assert!(min_gvf > 0. && min_gvf <= 1., "gvf threshold must lie in (0, 1]");
    Jenks::new(data, max_k).best(min_gvf)
}
