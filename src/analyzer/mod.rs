// Analyzer module: the pure indicator math and the signal scorer.

pub mod indicators;
pub mod scoring;

pub use indicators::IndicatorEngine;
pub use scoring::SignalScorer;
