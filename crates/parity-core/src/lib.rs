//! # Parity Core
//!
//! Dates, calendars, and day count conventions for the Parity period engine.
//!
//! - **Types**: [`Date`], [`Frequency`], [`Currency`]
//! - **Calendars**: business day calendars and adjustment conventions
//! - **Day Counts**: exact day count fractions behind the [`DayCountOracle`] seam
//!
//! ## Example
//!
//! ```rust
//! use parity_core::prelude::*;
//!
//! let start = Date::from_ymd(2024, 1, 15).unwrap();
//! let end = start.add_months(6).unwrap();
//! let yf = StandardDayCounts
//!     .year_fraction(start, end, DayCountConvention::Act365Fixed, false, None, None)
//!     .unwrap();
//! assert!((yf - 182.0 / 365.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, WeekendCalendar};
    pub use crate::daycounts::{ActActParams, DayCountConvention, DayCountOracle, StandardDayCounts};
    pub use crate::error::{ParityError, ParityResult};
    pub use crate::types::{Currency, Date, Frequency};
}

// Re-export commonly used types at crate root
pub use daycounts::{ActActParams, DayCountConvention, DayCountOracle, StandardDayCounts};
pub use error::{ensure_finite, ParityError, ParityResult};
pub use types::{Currency, Date, Frequency};
