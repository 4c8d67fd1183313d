//! Caller-supplied date values.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone};

/// A point in time that can be placed on the calendar.
///
/// Counting only looks at the calendar day a value falls on. Floating values
/// (no offset) are read on their own wall clock. Zoned values are first moved
/// into a shared frame, see [`calendar_days`].
pub trait DateValue {
    /// Returns the value as a wall-clock date and time.
    fn to_naive(&self) -> NaiveDateTime;

    /// The UTC offset the wall clock is read in, `None` for floating values.
    fn utc_offset(&self) -> Option<FixedOffset> {
        None
    }
}

impl DateValue for NaiveDate {
    fn to_naive(&self) -> NaiveDateTime {
        self.and_time(chrono::NaiveTime::MIN)
    }
}

impl DateValue for NaiveDateTime {
    fn to_naive(&self) -> NaiveDateTime {
        *self
    }
}

impl<Tz: TimeZone> DateValue for DateTime<Tz> {
    fn to_naive(&self) -> NaiveDateTime {
        self.naive_local()
    }

    fn utc_offset(&self) -> Option<FixedOffset> {
        Some(self.offset().fix())
    }
}

impl<T: DateValue + ?Sized> DateValue for &T {
    fn to_naive(&self) -> NaiveDateTime {
        (**self).to_naive()
    }

    fn utc_offset(&self) -> Option<FixedOffset> {
        (**self).utc_offset()
    }
}

/// Returns the calendar days of `start` and `end`, both read in one frame.
///
/// When both values are zoned, the frame is the offset of whichever denotes
/// the earlier instant (the larger offset on a tie), so swapping the arguments
/// swaps the days and their order matches the order of the instants. When only
/// one is zoned, its offset is the frame. Floating values are taken as already
/// being in the frame.
pub fn calendar_days<S, E>(start: &S, end: &E) -> (NaiveDate, NaiveDate)
where
    S: DateValue + ?Sized,
    E: DateValue + ?Sized,
{
    let frame = match (start.utc_offset(), end.utc_offset()) {
        (Some(a), Some(b)) => {
            let a_utc = shifted(start.to_naive(), -a.local_minus_utc());
            let b_utc = shifted(end.to_naive(), -b.local_minus_utc());
            Some(match a_utc.cmp(&b_utc) {
                Ordering::Less => a,
                Ordering::Greater => b,
                Ordering::Equal => std::cmp::max_by_key(a, b, FixedOffset::local_minus_utc),
            })
        }
        (a, b) => a.or(b),
    };
    (
        wall_clock_in(start, frame).date(),
        wall_clock_in(end, frame).date(),
    )
}

fn wall_clock_in<D: DateValue + ?Sized>(value: &D, frame: Option<FixedOffset>) -> NaiveDateTime {
    let naive = value.to_naive();
    match (value.utc_offset(), frame) {
        (Some(own), Some(frame)) => shifted(naive, frame.local_minus_utc() - own.local_minus_utc()),
        _ => naive,
    }
}

/// Moves a wall-clock reading by `seconds`, saturating at chrono's range.
fn shifted(naive: NaiveDateTime, seconds: i32) -> NaiveDateTime {
    let delta = TimeDelta::seconds(i64::from(seconds));
    naive
        .checked_add_signed(delta)
        .unwrap_or(if seconds < 0 { NaiveDateTime::MIN } else { NaiveDateTime::MAX })
}
