use super::*;

/// Class index of `value` under ascending `breaks`.
///
/// A value belongs to the last class whose boundary does not exceed it.
/// Values below the first boundary fall into class 0.
pub fn classify(value: Value, breaks: &[Value]) -> usize {
    debug_assert!(breaks.is_sorted());
    breaks.partition_point(|b| *b <= value).saturating_sub(1)
}

/// Class index of every observation, in input order.
pub fn assignments(data: &[Value], breaks: &[Value]) -> Vec<usize> {
    data.iter().map(|x| classify(*x, breaks)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_belongs_to_its_own_class() {
        let breaks = [1., 12., 21., 27.];
        assert_eq!(classify(1., &breaks), 0);
        assert_eq!(classify(12., &breaks), 1);
        assert_eq!(classify(21., &breaks), 2);
        assert_eq!(classify(27., &breaks), 3);
    }

    #[test]
    fn values_between_boundaries() {
        let breaks = [1., 12., 21., 27.];
        assert_eq!(classify(11.999, &breaks), 0);
        assert_eq!(classify(20., &breaks), 1);
        assert_eq!(classify(1e9, &breaks), 3);
    }

    #[test]
    fn below_first_boundary() {
        assert_eq!(classify(-5., &[0., 10.]), 0);
    }

    #[test]
    fn assigns_in_input_order() {
        let data = [28., 2., 13., 22.];
        assert_eq!(assignments(&data, &[1., 12., 21., 27.]), vec![3, 0, 1, 2]);
    }
}
