//! Domain types shared by every crate in the workspace.
//!
//! - [`Date`]: Calendar date with serial-day arithmetic
//! - [`Frequency`]: Coupon and reset frequency
//! - [`Currency`]: ISO currency codes

mod currency;
mod date;
mod frequency;

pub use currency::Currency;
pub use date::Date;
pub use frequency::Frequency;

pub(crate) use date::is_leap_year;
