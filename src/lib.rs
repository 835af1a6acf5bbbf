//! Jenks natural breaks classification.
//!
//! Partitions a sequence of observations into `k` contiguous classes that
//! minimize the total within-class variance, using the exact O(n²·k) dynamic
//! program rather than an iterative heuristic.
//!
//! ## Pipeline
//!
//! 1. **Sort**: [`Sample`] borrows ascending input, copies otherwise
//! 2. **Build**: [`Matrices`] fills optimal split points for every class count ≤ K
//! 3. **Extract**: [`Backtrack`] walks those split points back into boundaries
//! 4. **Evaluate**: [`gvf`] scores a classing as the fraction of variance explained
//! 5. **Round**: [`round`] simplifies boundaries without moving any observation
//!
//! ## Entry Points
//!
//! - [`natural_breaks`]: boundaries for a single class count
//! - [`all_natural_breaks`]: boundaries for every class count 2..=K
//! - [`best_natural_breaks`]: smallest class count reaching a GVF threshold
//! - [`Jenks`]: one matrix build serving any number of the above
mod backtrack;
mod classify;
mod fitness;
mod jenks;
mod matrices;
mod rounding;
mod sample;
mod summary;

#[cfg(test)]
mod tests;

#[cfg(feature = "cli")]
pub mod cli;

pub use backtrack::*;
pub use classify::*;
pub use fitness::*;
pub use jenks::*;
pub use matrices::*;
pub use rounding::*;
pub use sample::*;
pub use summary::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// A single observation, and any boundary derived from observations.
pub type Value = f64;
/// Sums of squared deviations, within or across classes.
pub type Variance = f64;
/// Goodness of variance fit, in (0, 1].
pub type Fitness = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a random instance.
    fn random() -> Self;
}

// ============================================================================
// MATRIX CONSTRUCTION
// ============================================================================
/// Matrix size (rows × classes) above which each row's columns are relaxed
/// in parallel. Below this, thread dispatch costs more than the row itself.
pub const PARALLEL_CELLS: usize = 1 << 16;

// ============================================================================
// ROUNDING
// ============================================================================
/// Fractional digits kept in the decimal text form that rounding truncates.
pub const DECIMALS: usize = 6;

// ============================================================================
// COMMAND LINE DEFAULTS
// ============================================================================
/// Quality floor for threshold scans when none is given.
pub const DEFAULT_MIN_GVF: Fitness = 0.8;
/// Largest class count scanned when none is given.
pub const DEFAULT_MAX_CLASSES: usize = 10;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging on stderr, leaving stdout for results.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
