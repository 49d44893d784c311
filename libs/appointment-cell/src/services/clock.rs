use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use shared_config::{DEFAULT_BUSINESS_CLOSE_MINUTES, DEFAULT_BUSINESS_OPEN_MINUTES};

pub const MINUTES_PER_DAY: u32 = 1440;
const HALF_DAY: u32 = 720;

const _: () = assert!(DEFAULT_BUSINESS_OPEN_MINUTES < DEFAULT_BUSINESS_CLOSE_MINUTES);
const _: () = assert!(DEFAULT_BUSINESS_CLOSE_MINUTES < MINUTES_PER_DAY);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Time must be in format HH:MM AM/PM, got {0:?}")]
    InvalidFormat(String),

    #[error("Hour {0} is outside 1-12")]
    HourOutOfRange(u32),

    #[error("Minute {0} is outside 0-59")]
    MinuteOutOfRange(u32),

    #[error("Offset {0} is not within a single day")]
    OffsetOutOfRange(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

/// Minutes since midnight, always below 1440.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteOffset(u32);

impl MinuteOffset {
    pub const DEFAULT_OPEN: MinuteOffset = MinuteOffset(DEFAULT_BUSINESS_OPEN_MINUTES);
    pub const DEFAULT_CLOSE: MinuteOffset = MinuteOffset(DEFAULT_BUSINESS_CLOSE_MINUTES);

    pub fn new(minutes: u32) -> Result<Self, ClockError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(ClockError::OffsetOutOfRange(minutes));
        }
        Ok(Self(minutes))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// 12-hour wall-clock time as shown to customers, e.g. `09:45 AM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
    meridiem: Meridiem,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32, meridiem: Meridiem) -> Result<Self, ClockError> {
        if !(1..=12).contains(&hour) {
            return Err(ClockError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ClockError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute, meridiem })
    }

    /// 12 AM is midnight and 12 PM is noon; every other PM hour gains 12 hours.
    pub fn to_minutes(&self) -> MinuteOffset {
        let base = (self.hour % 12) * 60 + self.minute;
        let minutes = match self.meridiem {
            Meridiem::Am => base,
            Meridiem::Pm => base + HALF_DAY,
        };
        MinuteOffset(minutes)
    }

    pub fn from_minutes(offset: MinuteOffset) -> Self {
        let hours = offset.0 / 60;
        let minute = offset.0 % 60;

        let (hour, meridiem) = match hours {
            0 => (12, Meridiem::Am),
            1..=11 => (hours, Meridiem::Am),
            12 => (12, Meridiem::Pm),
            _ => (hours - 12, Meridiem::Pm),
        };

        Self { hour, minute, meridiem }
    }
}

impl From<TimeOfDay> for MinuteOffset {
    fn from(time: TimeOfDay) -> Self {
        time.to_minutes()
    }
}

impl From<MinuteOffset> for TimeOfDay {
    fn from(offset: MinuteOffset) -> Self {
        TimeOfDay::from_minutes(offset)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} {}", self.hour, self.minute, self.meridiem.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = ClockError;

    /// Accepts `H:MM AM`, `HH:MM PM`, `HH:MMpm`; the meridiem is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClockError::InvalidFormat(s.to_string());

        let trimmed = s.trim();
        if trimmed.len() < 2 || !trimmed.is_char_boundary(trimmed.len() - 2) {
            return Err(invalid());
        }
        let (clock, suffix) = trimmed.split_at(trimmed.len() - 2);

        let meridiem = if suffix.eq_ignore_ascii_case("AM") {
            Meridiem::Am
        } else if suffix.eq_ignore_ascii_case("PM") {
            Meridiem::Pm
        } else {
            return Err(invalid());
        };

        let (hour, minute) = clock.trim_end().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str, max_len: usize| {
            if part.is_empty() || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u32>().map_err(|_| invalid())
        };

        if minute.len() != 2 {
            return Err(invalid());
        }

        TimeOfDay::new(digits(hour, 2)?, digits(minute, 2)?, meridiem)
    }
}

/// Parses a clock string straight into minutes since midnight.
pub fn to_minutes(time: &str) -> Result<MinuteOffset, ClockError> {
    time.parse::<TimeOfDay>().map(|t| t.to_minutes())
}

/// Formats minutes since midnight as a zero-padded 12-hour clock string.
pub fn to_clock_string(offset: MinuteOffset) -> String {
    TimeOfDay::from_minutes(offset).to_string()
}
