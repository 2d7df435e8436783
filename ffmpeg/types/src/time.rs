/*!
    Timing types.
*/

use std::time::Duration;

/**
    A rational number, used for time bases and frame rates.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /**
        Returns the value as a float, or 0.0 when the denominator is zero.
    */
    pub fn to_f64(self) -> f64 {
        if self.den == 0 {
            0.0
        } else {
            self.num as f64 / self.den as f64
        }
    }
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/**
    Presentation or decode timestamp, in units of the stream time base.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pts(pub i64);

impl Pts {
    /**
        Converts the timestamp to wall-clock time.

        Returns `None` for negative timestamps, an unusable time base, or a
        value too large for [`Duration`].
    */
    pub fn to_duration(self, time_base: Rational) -> Option<Duration> {
        if self.0 < 0 || time_base.num <= 0 || time_base.den <= 0 {
            return None;
        }
        Duration::try_from_secs_f64(self.0 as f64 * time_base.to_f64()).ok()
    }
}

/**
    Duration of a packet, in units of the stream time base.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MediaDuration(pub i64);
