use super::*;

/// A finished classing: boundaries, how well they fit, and how many
/// observations landed in each class.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Summary {
    pub classes: usize,
    pub breaks: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounded: Option<Vec<Value>>,
    pub counts: Vec<usize>,
    pub gvf: Fitness,
}

impl Summary {
    /// Attaches rounded boundaries, computed against the same observations.
    pub fn with_rounding(mut self, data: &[Value]) -> Self {
        self.rounded = Some(round(&self.breaks, data));
        self
    }
}

impl TryFrom<(&[Value], Vec<Value>)> for Summary {
    type Error = anyhow::Error;
    fn try_from((data, breaks): (&[Value], Vec<Value>)) -> Result<Self, Self::Error> {
        let gvf = gvf(data, &breaks)?;
        let counts = assignments(data, &breaks)
            .into_iter()
            .fold(vec![0; breaks.len()], |mut counts, class| {
                counts[class] += 1;
                counts
            });
        Ok(Self {
            classes: breaks.len(),
            breaks,
            rounded: None,
            counts,
            gvf,
        })
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "classes {:>4}  gvf {:.6}", self.classes, self.gvf)?;
        for (i, (lower, count)) in self.breaks.iter().zip(self.counts.iter()).enumerate() {
            match self.rounded.as_ref().and_then(|r| r.get(i)) {
                Some(rounded) => writeln!(f, "{:>4}  {:>12} ~ {:<12} {:>6}", i, lower, rounded, count)?,
                None => writeln!(f, "{:>4}  {:>12} {:>6}", i, lower, count)?,
            }
        }
        Ok(())
    }
}
