//! Keyboard highlighting engines
//!
//! Four independent engines, composed only by the session driver:
//! zone classification, sequence advancing, next-key tracking and
//! progressive reveal.

pub mod next_key;
pub mod reveal;
pub mod sequence;
pub mod zones;

pub use next_key::{HighlightState, NextKeyTracker, PressOutcome};
pub use reveal::ProgressiveRevealer;
pub use sequence::SequenceAdvancer;
pub use zones::{Zone, ZoneClassifier};
