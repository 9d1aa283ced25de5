//! Selection state machine
//!
//! Holds the selected dates and the selected range, and applies day clicks
//! according to the configured selection mode.

pub mod machine;
pub mod types;

pub use machine::SelectionState;
pub use types::DateRange;
