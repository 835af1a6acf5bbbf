use super::*;
use std::borrow::Cow;

/// An ascending view over a sequence of observations.
///
/// Every downstream stage (matrix construction, backtracking, rounding)
/// assumes sorted input, so this is the single entry point that enforces it.
/// Already-sorted input is borrowed as-is; anything else is copied and sorted,
/// so the caller's sequence is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<'a>(Cow<'a, [Value]>);

impl<'a> Sample<'a> {
    /// Borrows `data` if it is already ascending, otherwise sorts a copy.
    pub fn ascending(data: &'a [Value]) -> Cow<'a, [Value]> {
        if data.is_sorted() {
            Cow::Borrowed(data)
        } else {
            let mut copy = data.to_vec();
            copy.sort_by(Value::total_cmp);
            Cow::Owned(copy)
        }
    }
    /// Distinct values of sorted data, in ascending order.
    pub fn dedupe(sorted: &[Value]) -> Vec<Value> {
        let mut uniques = sorted.to_vec();
        uniques.dedup();
        uniques
    }
    /// Number of distinct values in sorted data.
    /// Counts adjacent transitions so no allocation is needed.
    pub fn distinct(sorted: &[Value]) -> usize {
        sorted
            .iter()
            .zip(sorted.iter().skip(1))
            .filter(|(a, b)| a != b)
            .count()
            + sorted.len().min(1)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Whether sorting had to copy the caller's data.
    pub fn is_owned(&self) -> bool {
        matches!(self.0, Cow::Owned(_))
    }
    pub fn min(&self) -> Option<Value> {
        self.0.first().copied()
    }
    pub fn max(&self) -> Option<Value> {
        self.0.last().copied()
    }
    pub fn uniques(&self) -> Vec<Value> {
        Self::dedupe(self.values())
    }
    pub fn n_unique(&self) -> usize {
        Self::distinct(self.values())
    }
    /// Detach from the borrowed input.
    pub fn into_owned(self) -> Sample<'static> {
        Sample(Cow::Owned(self.0.into_owned()))
    }
}

impl<'a> From<&'a [Value]> for Sample<'a> {
    fn from(data: &'a [Value]) -> Self {
        Self(Self::ascending(data))
    }
}

impl From<Vec<Value>> for Sample<'static> {
    fn from(mut data: Vec<Value>) -> Self {
        if !data.is_sorted() {
            data.sort_by(Value::total_cmp);
        }
        Self(Cow::Owned(data))
    }
}

/// A few tight clusters of observations around random centers.
impl Arbitrary for Sample<'static> {
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::rng();
        let clusters = rng.random_range(2..=6);
        let data = (0..clusters)
            .flat_map(|_| {
                let center = rng.random_range(-1000.0..1000.0);
                let spread = rng.random_range(0.1..25.0);
                let size = rng.random_range(1..=24);
                (0..size)
                    .map(|_| center + rng.random_range(-spread..=spread))
                    .collect::<Vec<Value>>()
            })
            .collect::<Vec<Value>>();
        Self::from(data)
    }
}
