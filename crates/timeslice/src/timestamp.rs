//! Timestamp keys.
//!
//! A [`Timestamp`] is any totally ordered point in time. The collection only
//! ever asks "is this before that", so the trait is a thin marker over `Ord`
//! that names the comparisons the way callers think about them.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// A totally ordered point-in-time value used as a sort key.
///
/// Sorting and positional comparison both go through `Ord`. Overrides of
/// `is_before`/`is_after` must agree with it.
pub trait Timestamp: Ord {
    /// Strictly earlier than `other`.
    fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    /// Strictly later than `other`.
    fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

impl Timestamp for SystemTime {}
impl Timestamp for Instant {}
impl<Tz: TimeZone> Timestamp for DateTime<Tz> {}
impl Timestamp for NaiveDateTime {}
impl Timestamp for NaiveDate {}

/// Milliseconds since the Unix epoch.
///
/// The compact form used for `created_at` style fields on records that
/// are serialized as plain integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixMillis(pub u64);

impl UnixMillis {
    /// Current wall-clock time. Clocks before the epoch read as zero.
    pub fn now() -> Self {
        Self::from(SystemTime::now())
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl Timestamp for UnixMillis {}

impl From<SystemTime> for UnixMillis {
    fn from(time: SystemTime) -> Self {
        let millis = time
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Self(millis)
    }
}

impl From<u64> for UnixMillis {
    fn from(millis: u64) -> Self {
        Self(millis)
    }
}

impl std::fmt::Display for UnixMillis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
