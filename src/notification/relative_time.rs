use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

const MINUTES_IN_HOUR: i64 = 60;
const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2_520;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;
const MINUTES_IN_YEAR: i64 = 525_600;
const MINUTES_IN_CALENDAR_MONTH: i64 = MINUTES_IN_YEAR / 12;

/// Coarse, human-sized magnitude of a time span.
///
/// Variant order (and field order inside `Years`) follows the span length, so
/// the derived `Ord` agrees with the underlying duration: a longer span never
/// compares below a shorter one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    LessThanAMinute,
    Minutes(i64),
    AboutHours(i64),
    Days(i64),
    AboutMonths(i64),
    Months(i64),
    Years { whole: i64, qualifier: YearQualifier },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YearQualifier {
    About,
    Over,
    Almost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Past,
    Future,
}

/// A distance plus which side of the reference time it lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelativeTime {
    pub distance: Distance,
    pub direction: Direction,
}

fn div_round(value: i64, unit: i64) -> i64 {
    (value + unit / 2) / unit
}

impl Distance {
    pub fn from_minutes(minutes: i64) -> Self {
        let minutes = minutes.abs();

        match minutes {
            0 => Distance::LessThanAMinute,
            m if m < 45 => Distance::Minutes(m),
            m if m < 90 => Distance::AboutHours(1),
            m if m < MINUTES_IN_DAY => Distance::AboutHours(div_round(m, MINUTES_IN_HOUR)),
            m if m < MINUTES_IN_ALMOST_TWO_DAYS => Distance::Days(1),
            m if m < MINUTES_IN_MONTH => Distance::Days(div_round(m, MINUTES_IN_DAY)),
            m if m < MINUTES_IN_TWO_MONTHS => Distance::AboutMonths(div_round(m, MINUTES_IN_MONTH)),
            m if m < MINUTES_IN_YEAR => Distance::Months(div_round(m, MINUTES_IN_MONTH)),
            m => {
                let months = m / MINUTES_IN_CALENDAR_MONTH;
                let qualifier = match months % 12 {
                    0..=2 => YearQualifier::About,
                    3..=8 => YearQualifier::Over,
                    _ => YearQualifier::Almost,
                };
                Distance::Years {
                    whole: months / 12,
                    qualifier,
                }
            }
        }
    }
}

impl RelativeTime {
    /// Position of `target` relative to `now`. A target exactly at `now`
    /// counts as upcoming.
    pub fn between(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let delta = target - now;
        // Round to the nearest whole minute.
        let minutes = div_round(delta.num_seconds().abs(), 60);

        RelativeTime {
            distance: Distance::from_minutes(minutes),
            direction: if target < now {
                Direction::Past
            } else {
                Direction::Future
            },
        }
    }
}

fn plural(f: &mut fmt::Formatter<'_>, prefix: &str, n: i64, unit: &str) -> fmt::Result {
    if n == 1 {
        write!(f, "{}1 {}", prefix, unit)
    } else {
        write!(f, "{}{} {}s", prefix, n, unit)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Distance::LessThanAMinute => write!(f, "less than a minute"),
            Distance::Minutes(n) => plural(f, "", n, "minute"),
            Distance::AboutHours(n) => plural(f, "about ", n, "hour"),
            Distance::Days(n) => plural(f, "", n, "day"),
            Distance::AboutMonths(n) => plural(f, "about ", n, "month"),
            Distance::Months(n) => plural(f, "", n, "month"),
            Distance::Years { whole, qualifier } => match qualifier {
                YearQualifier::About => plural(f, "about ", whole, "year"),
                YearQualifier::Over => plural(f, "over ", whole, "year"),
                YearQualifier::Almost => plural(f, "almost ", whole + 1, "year"),
            },
        }
    }
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Past => write!(f, "{} ago", self.distance),
            Direction::Future => write!(f, "in {}", self.distance),
        }
    }
}

impl Serialize for RelativeTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
