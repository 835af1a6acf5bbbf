use super::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Seeded observations with plenty of repeats: a coarse grid of integers,
/// halves, and a sprinkling of arbitrary reals, some negative.
fn dataset(seed: u64, n: usize) -> Vec<Value> {
    let ref mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| match rng.random_range(0..3) {
            0 => rng.random_range(0..6) as Value,
            1 => rng.random_range(-6..6) as Value * 0.5,
            _ => rng.random_range(-50.0..50.0),
        })
        .collect()
}

/// Minimal within-class squared deviation over every way to cut sorted data
/// into `k` non-empty runs.
fn exhaustive(sorted: &[Value], k: usize) -> Variance {
    fn recurse(sorted: &[Value], k: usize) -> Variance {
        match k {
            1 => ssd(sorted),
            k => (k - 1..sorted.len())
                .map(|cut| recurse(&sorted[..cut], k - 1) + ssd(&sorted[cut..]))
                .fold(Variance::INFINITY, Variance::min),
        }
    }
    recurse(sorted, k)
}

fn sdcm(sorted: &[Value], starts: &[usize]) -> Variance {
    starts
        .iter()
        .zip(starts.iter().skip(1).chain(std::iter::once(&sorted.len())))
        .map(|(&lo, &hi)| ssd(&sorted[lo..hi]))
        .sum()
}

#[test]
fn degenerate_counts_yield_distinct_values() {
    for seed in 0..64 {
        let data = dataset(seed, 1 + seed as usize % 12);
        let sample = Sample::from(&data[..]);
        let uniques = sample.n_unique();
        for k in uniques..uniques + 3 {
            assert_eq!(natural_breaks(&data, k.max(1)), sample.uniques());
        }
    }
}

#[test]
fn all_agrees_with_single_builds() {
    for seed in 0..48 {
        let data = dataset(seed, 24);
        let all = all_natural_breaks(&data, 8);
        for (i, breaks) in all.iter().enumerate() {
            assert_eq!(breaks, &natural_breaks(&data, i + 2), "seed {} k {}", seed, i + 2);
        }
    }
}

#[test]
fn breaks_ascend_from_minimum() {
    for seed in 0..64 {
        let data = dataset(seed, 30);
        let min = data.iter().copied().fold(Value::INFINITY, Value::min);
        for k in 1..=8 {
            let breaks = natural_breaks(&data, k);
            assert_eq!(breaks[0], min);
            assert!(breaks.windows(2).all(|w| w[0] < w[1]), "seed {} k {}: {:?}", seed, k, breaks);
        }
    }
}

#[test]
fn classes_never_split_repeated_values() {
    for seed in 0..64 {
        let data = dataset(seed, 20);
        let jenks = Jenks::new(&data, 6);
        let sorted = jenks.sample().values();
        for k in 2..=6 {
            for start in jenks.indices(k).into_iter().skip(1) {
                assert!(sorted[start - 1] < sorted[start], "seed {} k {}", seed, k);
            }
        }
    }
}

#[test]
fn matches_exhaustive_search() {
    for seed in 0..96 {
        let data = dataset(seed, 3 + seed as usize % 7);
        let jenks = Jenks::new(&data, 4);
        let sorted = jenks.sample().values();
        for k in 2..=usize::min(4, jenks.uniques() - 1) {
            let optimal = exhaustive(sorted, k);
            let found = sdcm(sorted, &jenks.indices(k));
            assert!((optimal - found).abs() < 1e-9, "seed {} k {}: {} vs {}", seed, k, found, optimal);
        }
    }
}

#[test]
fn matrix_variance_is_classing_variance() {
    for seed in 0..32 {
        let data = dataset(seed, 40);
        let jenks = Jenks::new(&data, 6);
        let sorted = jenks.sample().values();
        for k in 1..=usize::min(6, jenks.uniques() - 1) {
            let table = jenks.matrices().variance(sorted.len(), k);
            let found = sdcm(sorted, &jenks.indices(k));
            assert!((table - found).abs() < 1e-6, "seed {} k {}: {} vs {}", seed, k, table, found);
        }
    }
}

#[test]
fn gvf_never_worsens_with_more_classes() {
    for seed in 0..48 {
        let data = dataset(seed, 32);
        let jenks = Jenks::new(&data, 10);
        let fits = (2..=usize::min(10, jenks.uniques()))
            .map(|k| jenks.fitness(k).unwrap())
            .collect::<Vec<Fitness>>();
        assert!(fits.iter().all(|f| *f > 0. && *f <= 1. + 1e-12));
        assert!(fits.windows(2).all(|w| w[0] <= w[1] + 1e-9), "seed {}: {:?}", seed, fits);
    }
}

#[test]
fn order_of_input_is_irrelevant() {
    for seed in 0..32 {
        let data = dataset(seed, 25);
        let mut reversed = data.clone();
        reversed.reverse();
        assert_eq!(natural_breaks(&data, 5), natural_breaks(&reversed, 5));
    }
}

#[test]
fn rounding_preserves_membership() {
    for seed in 0..64 {
        let data = dataset(seed, 36);
        for k in 2..=6 {
            let breaks = natural_breaks(&data, k);
            let rounded = round(&breaks, &data);
            assert_eq!(rounded.len(), breaks.len());
            assert!(rounded.windows(2).all(|w| w[0] < w[1]), "seed {}: {:?}", seed, rounded);
            assert_eq!(assignments(&data, &rounded), assignments(&data, &breaks), "seed {}", seed);
        }
    }
}

#[test]
fn rounding_preserves_fit() {
    for seed in 0..32 {
        let data = dataset(seed, 36);
        let breaks = natural_breaks(&data, 4);
        let rounded = round(&breaks, &data);
        assert_eq!(gvf(&data, &rounded).unwrap(), gvf(&data, &breaks).unwrap());
    }
}

#[test]
fn clustered_samples_separate() {
    for _ in 0..16 {
        let sample = Sample::random();
        let jenks = Jenks::new(sample.values(), 6);
        let best = jenks.best(0.5).unwrap();
        assert!(!best.is_empty());
        assert_eq!(best[0], sample.min().unwrap());
        let breaks = jenks.breaks(best.len());
        assert_eq!(best, breaks);
    }
}
