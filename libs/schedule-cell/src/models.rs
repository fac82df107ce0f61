use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

// Field names stay camelCase on the wire: the store holds documents
// written by earlier versions of this service.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Case-insensitive parse of a day name, as used in the day-patch path.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(name.trim()))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
    // Marked selected by default for the admin interface
    #[serde(default = "default_true")]
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub day: DayOfWeek,
    #[serde(default)]
    pub is_working_day: bool,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

impl DaySchedule {
    pub fn non_working(day: DayOfWeek) -> Self {
        Self {
            day,
            is_working_day: false,
            time_slots: Vec::new(),
        }
    }
}

fn default_break_start() -> String {
    "13:00".to_string()
}

fn default_break_end() -> String {
    "14:00".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakTime {
    #[serde(default = "default_break_start")]
    pub start: String,
    #[serde(default = "default_break_end")]
    pub end: String,
}

impl Default for BreakTime {
    fn default() -> Self {
        Self {
            start: default_break_start(),
            end: default_break_end(),
        }
    }
}

fn default_slot_duration() -> i32 {
    30
}

fn default_max_patients() -> i32 {
    1
}

fn default_weekly_schedule() -> Vec<DaySchedule> {
    DayOfWeek::ALL.into_iter().map(DaySchedule::non_working).collect()
}

/// A doctor's stored weekly schedule document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub doctor: String,
    #[serde(default = "default_weekly_schedule")]
    pub weekly_schedule: Vec<DaySchedule>,
    #[serde(default = "default_slot_duration")]
    pub default_slot_duration: i32,
    #[serde(default)]
    pub break_time: BreakTime,
    #[serde(default = "default_max_patients")]
    pub max_patients_per_slot: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub effective_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Schedule {
    pub fn day(&self, day: DayOfWeek) -> Option<&DaySchedule> {
        self.weekly_schedule.iter().find(|d| d.day == day)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCreate {
    pub doctor: String,
    #[serde(default = "default_weekly_schedule")]
    pub weekly_schedule: Vec<DaySchedule>,
    #[serde(default = "default_slot_duration")]
    pub default_slot_duration: i32,
    #[serde(default)]
    pub break_time: BreakTime,
    #[serde(default = "default_max_patients")]
    pub max_patients_per_slot: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_schedule: Option<Vec<DaySchedule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_slot_duration: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_time: Option<BreakTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_patients_per_slot: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// Partial update for a single day, used by the day-patch endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPatch {
    #[serde(default)]
    pub is_working_day: Option<bool>,
    #[serde(default)]
    pub time_slots: Option<Vec<TimeSlot>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    Regular,
    FollowUp,
    Emergency,
}

fn default_status() -> AppointmentStatus {
    AppointmentStatus::Scheduled
}

fn default_type() -> AppointmentType {
    AppointmentType::Regular
}

/// Booked appointment, read-only in this cell; only `time` and the date
/// window are used to count bookings against slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub doctor: String,
    pub patient: String,
    #[serde(default)]
    pub schedule: Option<String>,
    pub date: DateTime<Utc>,
    pub time: String,
    #[serde(default = "default_slot_duration")]
    pub duration: i32,
    #[serde(default = "default_status")]
    pub status: AppointmentStatus,
    #[serde(rename = "type", default = "default_type")]
    pub appointment_type: AppointmentType,
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Schedule not found")]
    ScheduleNotFound,

    #[error("Day not found in schedule: {0}")]
    DayNotFound(String),

    #[error("Not authorized: {0}")]
    Forbidden(String),

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::InvalidFormat(msg) => AppError::BadRequest(msg),
            ScheduleError::ScheduleNotFound => AppError::NotFound("Schedule not found".to_string()),
            ScheduleError::DayNotFound(day) => {
                AppError::NotFound(format!("Day not found in schedule: {}", day))
            }
            ScheduleError::Forbidden(msg) => AppError::Forbidden(msg),
            ScheduleError::Store(e) => AppError::Store(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_of_week_parses_case_insensitively() {
        assert_eq!(DayOfWeek::parse("monday"), Some(DayOfWeek::Monday));
        assert_eq!(DayOfWeek::parse("TUESDAY"), Some(DayOfWeek::Tuesday));
        assert_eq!(DayOfWeek::parse(" Sunday "), Some(DayOfWeek::Sunday));
        assert_eq!(DayOfWeek::parse("Funday"), None);
    }

    #[test]
    fn day_of_week_serializes_as_full_name() {
        let json = serde_json::to_string(&DayOfWeek::Wednesday).unwrap();
        assert_eq!(json, "\"Wednesday\"");
    }

    #[test]
    fn schedule_deserializes_legacy_document_with_missing_fields() {
        let doc = serde_json::json!({
            "doctor": "681f7ccb07d9971a5fc43801",
            "weeklySchedule": [
                { "day": "Monday", "isWorkingDay": true, "timeSlots": [
                    { "startTime": "09:00", "endTime": "09:30" }
                ]}
            ]
        });

        let schedule: Schedule = serde_json::from_value(doc).unwrap();
        assert_eq!(schedule.default_slot_duration, 30);
        assert_eq!(schedule.max_patients_per_slot, 1);
        assert_eq!(schedule.break_time.start, "13:00");
        let slot = &schedule.weekly_schedule[0].time_slots[0];
        assert!(slot.is_available);
        assert!(slot.is_selected);
    }

    #[test]
    fn appointment_type_uses_kebab_case() {
        let json = serde_json::to_string(&AppointmentType::FollowUp).unwrap();
        assert_eq!(json, "\"follow-up\"");
        let json = serde_json::to_string(&AppointmentStatus::NoShow).unwrap();
        assert_eq!(json, "\"no-show\"");
    }
}
