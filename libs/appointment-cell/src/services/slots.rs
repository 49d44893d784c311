//! Slot arithmetic over one barber's day. Every value here is minutes since
//! midnight; durations never include the buffer unless a parameter says so.

use thiserror::Error;
use tracing::warn;

use shared_config::{
    AppConfig, DEFAULT_BUSINESS_CLOSE_MINUTES, DEFAULT_BUSINESS_OPEN_MINUTES, DEFAULT_SLOT_BUFFER_MINUTES,
};

use crate::services::clock::{ClockError, MinuteOffset, MINUTES_PER_DAY};

/// Duration assumed for slot listing when no service was requested.
pub const DEFAULT_LISTING_DURATION: u32 = 30;
/// Duration assumed for a booking whose service is not in the catalog.
pub const DEFAULT_BOOKED_DURATION: u32 = 45;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotSettingsError {
    #[error("Business hours: {0}")]
    Offset(#[from] ClockError),

    #[error("Business window must open before it closes (open {start}, close {end})")]
    EmptyWindow { start: u32, end: u32 },

    #[error("Slot buffer of {0} minutes is longer than a day")]
    BufferTooLong(u32),
}

/// Half-open overlap: `[start1, start1+duration1)` against `[start2, start2+duration2)`.
/// Intervals that only touch do not overlap. An end past `u32::MAX` saturates.
pub fn overlaps(start1: u32, duration1: u32, start2: u32, duration2: u32) -> bool {
    start1 < start2.saturating_add(duration2) && start2 < start1.saturating_add(duration1)
}

/// Opening hours within a single day; `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessWindow {
    start: MinuteOffset,
    end: MinuteOffset,
}

impl BusinessWindow {
    pub fn new(start: MinuteOffset, end: MinuteOffset) -> Result<Self, SlotSettingsError> {
        if start >= end {
            return Err(SlotSettingsError::EmptyWindow {
                start: start.get(),
                end: end.get(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn from_minutes(start: u32, end: u32) -> Result<Self, SlotSettingsError> {
        Self::new(MinuteOffset::new(start)?, MinuteOffset::new(end)?)
    }

    pub fn start(&self) -> u32 {
        self.start.get()
    }

    pub fn end(&self) -> u32 {
        self.end.get()
    }
}

impl Default for BusinessWindow {
    fn default() -> Self {
        Self {
            start: MinuteOffset::DEFAULT_OPEN,
            end: MinuteOffset::DEFAULT_CLOSE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSettings {
    pub window: BusinessWindow,
    pub buffer: u32,
}

impl Default for SlotSettings {
    fn default() -> Self {
        Self {
            window: BusinessWindow::default(),
            buffer: DEFAULT_SLOT_BUFFER_MINUTES,
        }
    }
}

impl SlotSettings {
    pub fn new(window: BusinessWindow, buffer: u32) -> Result<Self, SlotSettingsError> {
        if buffer >= MINUTES_PER_DAY {
            return Err(SlotSettingsError::BufferTooLong(buffer));
        }
        Ok(Self { window, buffer })
    }

    /// Falls back to the default window or buffer, with a warning, when the
    /// configured values cannot describe a day.
    pub fn from_config(config: &AppConfig) -> Self {
        let defaults = Self::default();

        let window = BusinessWindow::from_minutes(config.business_open_minutes, config.business_close_minutes)
            .unwrap_or_else(|e| {
                warn!(
                    "{} - using default business hours {}-{}",
                    e, DEFAULT_BUSINESS_OPEN_MINUTES, DEFAULT_BUSINESS_CLOSE_MINUTES
                );
                defaults.window
            });

        Self::new(window, config.slot_buffer_minutes).unwrap_or_else(|e| {
            warn!("{} - using default buffer {}", e, DEFAULT_SLOT_BUFFER_MINUTES);
            Self { window, ..defaults }
        })
    }
}

/// A booking already on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedInterval {
    pub start: u32,
    pub duration: u32,
}

impl BookedInterval {
    pub fn new(start: u32, duration: u32) -> Self {
        Self { start, duration }
    }

    /// Both sides are padded with the buffer before the overlap test.
    pub fn conflicts_with(&self, start: u32, duration: u32, buffer: u32) -> bool {
        overlaps(
            start,
            duration.saturating_add(buffer),
            self.start,
            self.duration.saturating_add(buffer),
        )
    }
}

/// Step between candidate slots.
pub fn slot_interval(service_duration: Option<u32>, buffer: u32) -> u32 {
    service_duration.unwrap_or(DEFAULT_LISTING_DURATION).saturating_add(buffer)
}

/// Candidate start times, ascending and without duplicates: the grid from
/// the window start, plus the last moment a service can still start when
/// the grid misses it.
pub fn generate_candidates(window: BusinessWindow, service_duration: u32, interval: u32) -> Vec<u32> {
    let mut slots = Vec::new();
    let Some(last_possible) = window.end().checked_sub(service_duration) else {
        return slots;
    };
    let step = interval.max(1);

    let mut next = Some(window.start());
    while let Some(minutes) = next.filter(|&m| m <= last_possible) {
        slots.push(minutes);
        next = minutes.checked_add(step);
    }

    if let Some(&previous) = slots.last() {
        if last_possible > window.start() && last_possible > previous {
            slots.push(last_possible);
        }
    }

    slots
}

/// Drops candidates that run past closing or collide with a booking.
pub fn filter_available(
    candidates: &[u32],
    window: BusinessWindow,
    service_duration: u32,
    buffer: u32,
    booked: &[BookedInterval],
) -> Vec<u32> {
    candidates
        .iter()
        .copied()
        .filter(|&slot| slot.checked_add(service_duration).is_some_and(|end| end <= window.end()))
        .filter(|&slot| !booked.iter().any(|b| b.conflicts_with(slot, service_duration, buffer)))
        .collect()
}

/// The first booking the proposed interval runs into, if any.
pub fn find_conflict<'a>(
    start: u32,
    duration: u32,
    buffer: u32,
    booked: &'a [BookedInterval],
) -> Option<&'a BookedInterval> {
    booked.iter().find(|b| b.conflicts_with(start, duration, buffer))
}
