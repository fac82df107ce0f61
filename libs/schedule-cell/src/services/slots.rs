use tracing::debug;

use crate::models::{BreakTime, ScheduleError, TimeSlot};

pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "17:00";
pub const DEFAULT_SLOT_DURATION: i32 = 30;

/// Parse `"HH:MM"` into minutes since midnight.
pub fn time_to_minutes(time: &str) -> Result<i32, ScheduleError> {
    let invalid = || ScheduleError::InvalidFormat(format!("Invalid time: {}", time));

    let (hours_str, minutes_str) = time.split_once(':').ok_or_else(invalid)?;
    if minutes_str.contains(':') {
        return Err(invalid());
    }

    let hours: i32 = hours_str.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes_str.parse().map_err(|_| invalid())?;

    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// Inverse of [`time_to_minutes`], zero-padded.
pub fn minutes_to_time(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Generate the bookable slots for one working day.
///
/// Slots step in multiples of `slot_duration` from the start of the day.
/// A candidate is emitted only if it ends within the working window and
/// has no intersection with the break - an overlapping slot is dropped
/// whole, never trimmed, so the grid is not re-aligned after the break.
pub fn generate_time_slots(
    start_time: Option<&str>,
    end_time: Option<&str>,
    slot_duration: i32,
    break_time: &BreakTime,
) -> Vec<TimeSlot> {
    let start_time = start_time.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_START_TIME);
    let end_time = end_time.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_END_TIME);
    let slot_duration = if slot_duration < 5 {
        DEFAULT_SLOT_DURATION
    } else {
        slot_duration
    };

    debug!(
        "Generating time slots: start={}, end={}, duration={}, break={}-{}",
        start_time, end_time, slot_duration, break_time.start, break_time.end
    );

    let start_minutes =
        time_to_minutes(start_time).unwrap_or_else(|_| time_to_minutes(DEFAULT_START_TIME).unwrap());
    let end_minutes =
        time_to_minutes(end_time).unwrap_or_else(|_| time_to_minutes(DEFAULT_END_TIME).unwrap());
    let break_start = time_to_minutes(&break_time.start).unwrap_or(13 * 60);
    let break_end = time_to_minutes(&break_time.end).unwrap_or(14 * 60);

    let mut slots = Vec::new();
    let mut current = start_minutes;

    while current + slot_duration <= end_minutes {
        let slot_end = current + slot_duration;

        let overlaps_break = current < break_end && slot_end > break_start;
        if !overlaps_break {
            slots.push(TimeSlot {
                start_time: minutes_to_time(current),
                end_time: minutes_to_time(slot_end),
                is_available: true,
                is_selected: true,
            });
        }

        current += slot_duration;
    }

    debug!("Generated {} time slots", slots.len());
    slots
}
