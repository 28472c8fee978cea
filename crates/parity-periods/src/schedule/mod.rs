//! Period sequence generation.
//!
//! Edge dates are generated by stepping whole tenors from an anchor:
//!
//! - **Backward** (default) anchors at maturity; a leftover interval
//!   becomes a front stub
//! - **Forward** anchors at the effective date; a leftover interval
//!   becomes a back stub
//!
//! The `k`-th edge is `anchor ± k * tenor` months, so day-of-month drift
//! never accumulates. When end-of-month rolling is on and the anchor is a
//! month end, every generated edge is a month end.

mod builder;

pub use builder::{LegTerms, PeriodSequenceBuilder};

use log::debug;
use parity_core::{Date, Frequency};
use serde::{Deserialize, Serialize};

use crate::error::{PeriodError, PeriodResult};

/// Which end the schedule is anchored at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Step forward from the effective date; any stub is at the back.
    Forward,
    /// Step backward from maturity; any stub is at the front.
    #[default]
    Backward,
}

/// What happens to a leftover sub-tenor interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StubPolicy {
    /// The leftover interval is its own short period.
    #[default]
    ShortStub,
    /// The leftover interval is merged with its neighbour into one long
    /// period.
    MergeIntoAdjacent,
}

/// Where the irregular period of a schedule sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StubPosition {
    /// The first period is irregular.
    Front,
    /// The last period is irregular.
    Back,
}

/// Generated edge dates and stub placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSchedule {
    dates: Vec<Date>,
    stub: Option<StubPosition>,
}

impl EdgeSchedule {
    /// Returns the edge dates, effective date first and maturity last.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the stub placement, if the tenor does not divide the span.
    #[must_use]
    pub fn stub(&self) -> Option<StubPosition> {
        self.stub
    }

    /// Returns the number of periods.
    #[must_use]
    pub fn num_periods(&self) -> usize {
        self.dates.len().saturating_sub(1)
    }

    /// Returns an iterator over `(start, end)` pairs.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }

    /// Returns true if period `index` is the irregular one.
    #[must_use]
    pub fn is_stub(&self, index: usize) -> bool {
        match self.stub {
            Some(StubPosition::Front) => index == 0,
            Some(StubPosition::Back) => index + 1 == self.num_periods(),
            None => false,
        }
    }

    /// Drops interior edge `index`, joining its two periods into one
    /// irregular period at that end of the schedule.
    pub(crate) fn merge_at(&mut self, index: usize) {
        if index == 0 || index + 1 >= self.dates.len() {
            return;
        }
        self.dates.remove(index);
        if index == 1 {
            self.stub = Some(StubPosition::Front);
        } else if index + 1 == self.dates.len() {
            self.stub = Some(StubPosition::Back);
        }
    }
}

/// Steps `months` from `date`, snapping to month end when `roll_eom`.
pub(crate) fn step_months(date: Date, months: i32, roll_eom: bool) -> PeriodResult<Date> {
    let stepped = date.add_months(months)?;
    Ok(if roll_eom { stepped.end_of_month() } else { stepped })
}

/// Generates the edge dates between `effective` and `maturity`.
///
/// The result starts at `effective`, ends at `maturity`, and is strictly
/// increasing. A zero frequency yields the single interval.
///
/// # Errors
///
/// Returns `PeriodError::InvalidPeriod` unless `effective < maturity`.
pub fn generate_edges(
    effective: Date,
    maturity: Date,
    frequency: Frequency,
    direction: Direction,
    stub_policy: StubPolicy,
    eom: bool,
) -> PeriodResult<EdgeSchedule> {
    if maturity <= effective {
        return Err(PeriodError::invalid_period(format!(
            "maturity {maturity} is not after effective date {effective}"
        )));
    }

    if frequency.is_zero() {
        return Ok(EdgeSchedule {
            dates: vec![effective, maturity],
            stub: None,
        });
    }

    let tenor = frequency.months_per_period() as i32;
    let (anchor, far, sign) = match direction {
        Direction::Backward => (maturity, effective, -1),
        Direction::Forward => (effective, maturity, 1),
    };
    let roll_eom = eom && anchor.is_end_of_month();
    let beyond = |date: Date| match direction {
        Direction::Backward => date <= far,
        Direction::Forward => date >= far,
    };

    let mut interior = Vec::new();
    let mut k = 1;
    let landed_on_far = loop {
        let edge = step_months(anchor, sign * k * tenor, roll_eom)?;
        if beyond(edge) {
            break edge == far;
        }
        interior.push(edge);
        k += 1;
    };

    let stub = if landed_on_far {
        None
    } else {
        if stub_policy == StubPolicy::MergeIntoAdjacent && !interior.is_empty() {
            interior.pop();
        }
        Some(match direction {
            Direction::Backward => StubPosition::Front,
            Direction::Forward => StubPosition::Back,
        })
    };

    if direction == Direction::Backward {
        interior.reverse();
    }
    let mut dates = Vec::with_capacity(interior.len() + 2);
    dates.push(effective);
    dates.extend(interior);
    dates.push(maturity);

    debug!(
        "generated {} edge(s) from {effective} to {maturity} ({direction:?}, stub {stub:?})",
        dates.len()
    );

    Ok(EdgeSchedule { dates, stub })
}
