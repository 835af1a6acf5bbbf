use super::*;

/// Sum of squared deviations about the arithmetic mean. Zero for no values.
pub fn ssd(values: &[Value]) -> Variance {
    if values.is_empty() {
        return 0.;
    }
    let mean = values.iter().sum::<Value>() / values.len() as Value;
    values.iter().map(|x| (x - mean) * (x - mean)).sum()
}

/// Goodness of variance fit of a classing given by its boundary values.
///
/// ```text
/// GVF = (SDAM - SDCM) / SDAM
/// ```
///
/// where SDAM is the squared deviation of all data about its mean and SDCM
/// the sum of each class's squared deviation about its own mean. A class
/// holds every observation from its boundary up to (excluding) the next one.
///
/// Boundaries that do not describe a classing of `data` (no boundaries, one
/// above the maximum, the first above the minimum, or any not strictly
/// increasing) can only come from a broken matrix build, and are reported
/// as errors rather than clamped.
pub fn gvf(data: &[Value], breaks: &[Value]) -> anyhow::Result<Fitness> {
    let sample = Sample::from(data);
    let sorted = sample.values();
    let starts = breaks
        .iter()
        .map(|b| sorted.partition_point(|x| x < b))
        .collect::<Vec<usize>>();
    fitness(sorted, &starts)
}

/// Goodness of variance fit of a classing given by 0-based class start indices
/// into sorted data.
pub fn fitness(sorted: &[Value], starts: &[usize]) -> anyhow::Result<Fitness> {
    debug_assert!(sorted.is_sorted());
    anyhow::ensure!(!starts.is_empty(), "classing has no classes");
    anyhow::ensure!(starts[0] == 0, "first class starts at {}, not 0", starts[0]);
    if let Some(start) = starts.iter().find(|&&start| start >= sorted.len()) {
        anyhow::bail!("class start {} out of range for {} values", start, sorted.len());
    }
    if let Some(pair) = starts.windows(2).find(|pair| pair[0] >= pair[1]) {
        anyhow::bail!("class starts not increasing: {} then {}", pair[0], pair[1]);
    }
    let sdam = ssd(sorted);
    if sdam == 0. {
        return Ok(1.);
    }
    let sdcm = starts
        .iter()
        .zip(starts.iter().skip(1).chain(std::iter::once(&sorted.len())))
        .map(|(&lo, &hi)| ssd(&sorted[lo..hi]))
        .sum::<Variance>();
    Ok((sdam - sdcm) / sdam)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [Value; 12] = [1., 2., 3., 12., 13., 14., 21., 22., 23., 27., 28., 29.];

    #[test]
    fn ssd_of_nothing() {
        assert_eq!(ssd(&[]), 0.);
        assert_eq!(ssd(&[7.]), 0.);
    }

    #[test]
    fn ssd_of_triplet() {
        assert!((ssd(&[1., 2., 3.]) - 2.).abs() < 1e-12);
        assert!((ssd(&[5., 8., 9., 12., 15.]) - 58.8).abs() < 1e-9);
    }

    #[test]
    fn gvf_of_known_classings() {
        let expected = [
            (vec![1., 21.], 0.790492579049258),
            (vec![1., 12., 21.], 0.9466551946655195),
            (vec![1., 12., 21., 27.], 0.99311679931168),
        ];
        for (breaks, gvf) in expected {
            let actual = super::gvf(&DATA, &breaks).unwrap();
            assert!((actual - gvf).abs() < 1e-9, "{:?}: {} != {}", breaks, actual, gvf);
        }
    }

    #[test]
    fn single_class_explains_nothing() {
        assert!(gvf(&DATA, &[1.]).unwrap().abs() < 1e-12);
    }

    #[test]
    fn one_class_per_value_explains_everything() {
        let data = [1., 1., 2., 3., 3.];
        assert!((gvf(&data, &[1., 2., 3.]).unwrap() - 1.).abs() < 1e-12);
    }

    #[test]
    fn constant_data_fits_perfectly() {
        assert_eq!(gvf(&[4., 4., 4.], &[4.]).unwrap(), 1.);
    }

    #[test]
    fn unsorted_data_is_sorted_first() {
        let shuffled = [29., 1., 22., 13., 3., 28., 12., 2., 21., 14., 27., 23.];
        let a = gvf(&shuffled, &[1., 12., 21.]).unwrap();
        let b = gvf(&DATA, &[1., 12., 21.]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_boundary_above_maximum() {
        assert!(gvf(&DATA, &[1., 12., 30.]).is_err());
    }

    #[test]
    fn rejects_non_increasing_boundaries() {
        assert!(gvf(&DATA, &[1., 21., 12.]).is_err());
        assert!(gvf(&DATA, &[1., 12., 12.]).is_err());
        assert!(fitness(&DATA, &[0, 3, 3]).is_err());
    }

    #[test]
    fn rejects_first_boundary_above_minimum() {
        assert!(gvf(&DATA, &[2., 12.]).is_err());
    }

    #[test]
    fn rejects_empty_classing() {
        assert!(gvf(&DATA, &[]).is_err());
        assert!(fitness(&DATA, &[]).is_err());
    }

    #[test]
    fn boundary_below_minimum_is_first_class() {
        let a = gvf(&DATA, &[0., 10., 20.]).unwrap();
        let b = gvf(&DATA, &[1., 12., 21.]).unwrap();
        assert_eq!(a, b);
    }
}
