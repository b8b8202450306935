pub mod differ;

pub use differ::{compute_difference, CategoryCounts, DifferenceResult};
