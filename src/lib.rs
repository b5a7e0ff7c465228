//! Key Highlight - keyboard highlighting engine for young typists
//!
//! Tracks the next key to press, checks presses against it, classifies keys
//! into keyboard zones and reveals key lists over time. A small terminal
//! front end drives the engines as a set of practice drills.

pub mod config;
pub mod highlight;
pub mod report;
pub mod timer;
pub mod ui;

pub use config::Config;
