//! Growing degree days: heat accumulated above a base temperature, day after day.
//!
//! ```
//! use growing_days::GrowingDays;
//!
//! let days = GrowingDays::new(&[5.0, 1.0, 20.0], 10.0);
//! assert_eq!(days.cumulative(), &[0.0, 0.0, 10.0]);
//! assert_eq!(days.first_day_at_or_above(10.0), Some(2));
//! ```

mod growing;
mod locate;
pub mod source;

pub use growing::GrowingDays;
pub use source::{Column, Layout, Reading, Series, SourceError};
