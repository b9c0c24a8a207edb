//! Priority scoring: ranks methods by how urgently they need a test.

mod method_scan;
mod scorer;

pub use method_scan::scan_methods;
pub use scorer::ScoreCalculator;
