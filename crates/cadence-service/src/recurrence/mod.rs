//! Recurrence rules and occurrence generation.
//!
//! - `weekday`: weekday bitset used by weekly rules
//! - `rule`: the validated rule value type
//! - `generator`: expansion of a rule into occurrence start times

mod generator;
mod rule;
mod weekday;

pub use generator::generate;
pub use rule::{Frequency, MonthlyPattern, RecurrenceRule, RuleError};
pub use weekday::WeekdaySet;
