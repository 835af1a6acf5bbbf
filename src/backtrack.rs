use super::*;

/// Recovers an optimal classing from [`Matrices`] by backward chaining.
///
/// Starting from the full-data row and the requested class count, each step
/// reads where the last class begins, then continues from the prefix that ends
/// just before it with one class fewer. Yields `(class, start)` pairs from the
/// highest class down to class 1, where `class` is 1-based and `start` is the
/// 0-based index of the class's first observation. Class 1 always starts at 0.
///
/// The walk is finite and not restartable; collect it to reuse the result.
pub struct Backtrack<'a> {
    matrices: &'a Matrices,
    row: usize,
    class: usize,
}

impl Backtrack<'_> {
    /// Start indices ordered from the first class to the last.
    pub fn indices(self) -> Vec<usize> {
        let mut indices = self.map(|(_, start)| start).collect::<Vec<usize>>();
        indices.reverse();
        indices
    }
}

impl Iterator for Backtrack<'_> {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        match self.class {
            0 => None,
            1 => {
                self.class = 0;
                Some((1, 0))
            }
            class => {
                // a zero limit only appears outside any reachable classing,
                // and maps to an index that fitness validation rejects
                let start = self.matrices.limit(self.row, class).wrapping_sub(1);
                self.row = start.min(self.row);
                self.class -= 1;
                Some((class, start))
            }
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.class, Some(self.class))
    }
}

impl ExactSizeIterator for Backtrack<'_> {}

impl<'a> From<(&'a Matrices, usize)> for Backtrack<'a> {
    fn from((matrices, k): (&'a Matrices, usize)) -> Self {
        debug_assert!(k <= matrices.k());
        Self {
            matrices,
            row: matrices.n(),
            class: k.min(matrices.n()),
        }
    }
}
