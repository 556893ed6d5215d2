use std::fmt;
use std::time::Duration;

/// Millisecond timescale used for every position and duration we report.
pub const MILLIS_TIMESCALE: i32 = 1000;

/// A rational time value (`value / timescale` seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaTime {
    pub value: i64,
    pub timescale: i32,
}

impl MediaTime {
    pub const ZERO: MediaTime = MediaTime {
        value: 0,
        timescale: MILLIS_TIMESCALE,
    };

    /// "Duration unknown / nothing loaded" marker (-1 s).
    pub const INDEFINITE: MediaTime = MediaTime {
        value: -(MILLIS_TIMESCALE as i64),
        timescale: MILLIS_TIMESCALE,
    };

    pub fn new(value: i64, timescale: i32) -> Self {
        Self { value, timescale }
    }

    /// Nearest representable time at `timescale`. Non-finite input becomes zero.
    pub fn from_seconds(seconds: f64, timescale: i32) -> Self {
        if !seconds.is_finite() || timescale <= 0 {
            return Self::new(0, timescale.max(1));
        }
        Self::new((seconds * timescale as f64).round() as i64, timescale)
    }

    pub fn from_secs_f64(seconds: f64) -> Self {
        Self::from_seconds(seconds, MILLIS_TIMESCALE)
    }

    pub fn seconds(&self) -> f64 {
        if self.timescale == 0 {
            return 0.0;
        }
        self.value as f64 / self.timescale as f64
    }

    /// Whole seconds, truncated toward zero.
    pub fn whole_seconds(&self) -> i64 {
        self.seconds().trunc() as i64
    }

    pub fn is_indefinite(&self) -> bool {
        self.value < 0
    }

    /// Converts to a `Duration`, saturating negative values at zero.
    pub fn to_duration(&self) -> Duration {
        Duration::from_secs_f64(self.seconds().max(0.0))
    }
}

impl From<Duration> for MediaTime {
    fn from(d: Duration) -> Self {
        MediaTime::new(d.as_millis() as i64, MILLIS_TIMESCALE)
    }
}

impl Default for MediaTime {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for MediaTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_indefinite() {
            return write!(f, "--:--");
        }
        let total = self.whole_seconds();
        write!(f, "{:02}:{:02}", total / 60, total % 60)
    }
}
