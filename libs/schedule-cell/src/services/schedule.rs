use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{
    Appointment, DayOfWeek, DayPatch, DaySchedule, Schedule, ScheduleCreate, ScheduleError,
    ScheduleUpdate,
};
use crate::services::slots::{generate_time_slots, time_to_minutes};

/// Strip the whitespace and stray quotes that clients have historically
/// sent around doctor identifiers.
pub(crate) fn normalize_doctor_param(doctor_id: &str) -> String {
    doctor_id
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}

/// Canonical store-native rendering of a doctor id, when the given string
/// parses as one and differs from it. Schedules written by older clients
/// may hold either encoding, so reads retry with this form.
pub(crate) fn canonical_doctor_id(doctor_id: &str) -> Option<String> {
    Uuid::parse_str(doctor_id)
        .ok()
        .map(|id| id.to_string())
        .filter(|canonical| canonical != doctor_id)
}

/// Two-attempt lookup of a schedule by doctor identity: the string exactly
/// as given, then the canonical identifier form.
pub(crate) async fn find_schedule_by_doctor(
    store: &StoreClient,
    doctor_id: &str,
) -> Result<Option<Schedule>, ScheduleError> {
    let doctor_id = normalize_doctor_param(doctor_id);

    debug!("Searching for schedule with doctor: {}", doctor_id);
    let path = format!(
        "/rest/v1/schedules?doctor=eq.{}&limit=1",
        urlencoding::encode(&doctor_id)
    );
    let result: Vec<Schedule> = store.request(Method::GET, &path, None).await?;
    if let Some(schedule) = result.into_iter().next() {
        return Ok(Some(schedule));
    }

    if let Some(canonical) = canonical_doctor_id(&doctor_id) {
        debug!("Retrying schedule lookup with canonical doctor id: {}", canonical);
        let path = format!("/rest/v1/schedules?doctor=eq.{}&limit=1", canonical);
        let result: Vec<Schedule> = store.request(Method::GET, &path, None).await?;
        return Ok(result.into_iter().next());
    }

    Ok(None)
}

/// The working-hours settings slots are generated from, resolved in
/// priority order: update value, then stored value, then generator default.
#[derive(Debug, Clone)]
pub(crate) struct SlotSettings {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub slot_duration: i32,
    pub break_time: crate::models::BreakTime,
}

impl SlotSettings {
    pub(crate) fn effective(existing: &Schedule, update: &ScheduleUpdate) -> Self {
        Self {
            start_time: update.start_time.clone().or_else(|| existing.start_time.clone()),
            end_time: update.end_time.clone().or_else(|| existing.end_time.clone()),
            slot_duration: update
                .default_slot_duration
                .unwrap_or(existing.default_slot_duration),
            break_time: update
                .break_time
                .clone()
                .unwrap_or_else(|| existing.break_time.clone()),
        }
    }

    pub(crate) fn generate(&self) -> Vec<crate::models::TimeSlot> {
        generate_time_slots(
            self.start_time.as_deref(),
            self.end_time.as_deref(),
            self.slot_duration,
            &self.break_time,
        )
    }
}

/// Per-day merge policy: clear a non-working day, preserve a working day
/// that already had slots, regenerate otherwise.
pub(crate) fn resolve_day(
    existing_day: Option<&DaySchedule>,
    new_day: &DaySchedule,
    settings: &SlotSettings,
) -> DaySchedule {
    let time_slots = if !new_day.is_working_day {
        Vec::new()
    } else if let Some(prev) =
        existing_day.filter(|d| d.is_working_day && !d.time_slots.is_empty())
    {
        debug!("Preserving existing time slots for {}", new_day.day);
        prev.time_slots.clone()
    } else {
        debug!("Generating time slots for {}", new_day.day);
        settings.generate()
    };

    DaySchedule {
        day: new_day.day,
        is_working_day: new_day.is_working_day,
        time_slots,
    }
}

/// Resolve the final weekly schedule for a full update. Days absent from
/// the update keep their stored record untouched. Returns `None` when the
/// update does not touch the weekly schedule at all.
pub(crate) fn resolve_weekly_schedule(
    existing: &Schedule,
    update: &ScheduleUpdate,
) -> Option<Vec<DaySchedule>> {
    let updated_days = update.weekly_schedule.as_ref()?;
    let settings = SlotSettings::effective(existing, update);

    let mut merged = existing.weekly_schedule.clone();
    for new_day in updated_days {
        let resolved = resolve_day(existing.day(new_day.day), new_day, &settings);
        match merged.iter_mut().find(|d| d.day == new_day.day) {
            Some(day) => *day = resolved,
            None => merged.push(resolved),
        }
    }

    Some(merged)
}

fn validate_time_field(label: &str, value: &str) -> Result<i32, ScheduleError> {
    time_to_minutes(value)
        .map_err(|_| ScheduleError::InvalidFormat(format!("{} is not a valid HH:MM time: {}", label, value)))
}

fn validate_common_fields(
    slot_duration: Option<i32>,
    max_patients: Option<i32>,
    break_time: Option<&crate::models::BreakTime>,
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> Result<(), ScheduleError> {
    if let Some(duration) = slot_duration {
        if !(5..=120).contains(&duration) {
            return Err(ScheduleError::InvalidFormat(
                "defaultSlotDuration must be between 5 and 120 minutes".to_string(),
            ));
        }
    }

    if let Some(max) = max_patients {
        if !(1..=10).contains(&max) {
            return Err(ScheduleError::InvalidFormat(
                "maxPatientsPerSlot must be between 1 and 10".to_string(),
            ));
        }
    }

    if let Some(break_time) = break_time {
        let start = validate_time_field("breakTime.start", &break_time.start)?;
        let end = validate_time_field("breakTime.end", &break_time.end)?;
        if end <= start {
            return Err(ScheduleError::InvalidFormat(
                "breakTime.end must be after breakTime.start".to_string(),
            ));
        }
    }

    let start = start_time.map(|s| validate_time_field("startTime", s)).transpose()?;
    let end = end_time.map(|s| validate_time_field("endTime", s)).transpose()?;
    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            return Err(ScheduleError::InvalidFormat(
                "endTime must be after startTime".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_days(days: &[DaySchedule]) -> Result<(), ScheduleError> {
    for (idx, day) in days.iter().enumerate() {
        if days[..idx].iter().any(|d| d.day == day.day) {
            return Err(ScheduleError::InvalidFormat(format!(
                "Duplicate day in weekly schedule: {}",
                day.day
            )));
        }

        for slot in &day.time_slots {
            let start = validate_time_field("timeSlot.startTime", &slot.start_time)?;
            let end = validate_time_field("timeSlot.endTime", &slot.end_time)?;
            if end <= start {
                return Err(ScheduleError::InvalidFormat(format!(
                    "Time slot end must be after start: {}-{}",
                    slot.start_time, slot.end_time
                )));
            }
        }
    }

    Ok(())
}

pub struct ScheduleService {
    store: StoreClient,
}

impl ScheduleService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    pub async fn list_schedules(&self) -> Result<Vec<Schedule>, ScheduleError> {
        let schedules: Vec<Schedule> = self
            .store
            .request(Method::GET, "/rest/v1/schedules", None)
            .await?;
        Ok(schedules)
    }

    /// Look up a doctor's schedule, provisioning a default all-non-working
    /// one when none exists yet.
    pub async fn get_or_create_schedule(&self, doctor_id: &str) -> Result<Schedule, ScheduleError> {
        if let Some(schedule) = find_schedule_by_doctor(&self.store, doctor_id).await? {
            return Ok(schedule);
        }

        let doctor = {
            let normalized = normalize_doctor_param(doctor_id);
            canonical_doctor_id(&normalized).unwrap_or(normalized)
        };
        info!("No schedule found for doctor {}, creating default", doctor);

        let now = Utc::now();
        let default_schedule = Schedule {
            id: None,
            doctor,
            weekly_schedule: DayOfWeek::ALL.into_iter().map(DaySchedule::non_working).collect(),
            default_slot_duration: 30,
            break_time: Default::default(),
            max_patients_per_slot: 1,
            start_time: None,
            end_time: None,
            effective_from: Some(now),
            updated_at: Some(now),
        };

        let inserted = self.insert_schedule(&default_schedule).await?;
        Ok(inserted.unwrap_or(default_schedule))
    }

    pub async fn create_schedule(&self, request: ScheduleCreate) -> Result<Schedule, ScheduleError> {
        validate_common_fields(
            Some(request.default_slot_duration),
            Some(request.max_patients_per_slot),
            Some(&request.break_time),
            request.start_time.as_deref(),
            request.end_time.as_deref(),
        )?;
        validate_days(&request.weekly_schedule)?;

        // Normalize the identity encoding at the write boundary.
        let doctor = {
            let normalized = normalize_doctor_param(&request.doctor);
            canonical_doctor_id(&normalized).unwrap_or(normalized)
        };

        let settings = SlotSettings {
            start_time: request.start_time.clone(),
            end_time: request.end_time.clone(),
            slot_duration: request.default_slot_duration,
            break_time: request.break_time.clone(),
        };

        // Overlay the supplied days on the full 7-day template; every
        // working day gets freshly generated slots on creation.
        let mut weekly_schedule: Vec<DaySchedule> =
            DayOfWeek::ALL.into_iter().map(DaySchedule::non_working).collect();
        for day in &request.weekly_schedule {
            let resolved = resolve_day(None, day, &settings);
            if let Some(slot) = weekly_schedule.iter_mut().find(|d| d.day == day.day) {
                *slot = resolved;
            }
        }

        let now = Utc::now();
        let schedule = Schedule {
            id: None,
            doctor,
            weekly_schedule,
            default_slot_duration: request.default_slot_duration,
            break_time: request.break_time,
            max_patients_per_slot: request.max_patients_per_slot,
            start_time: request.start_time,
            end_time: request.end_time,
            effective_from: Some(now),
            updated_at: Some(now),
        };

        info!("Creating schedule for doctor: {}", schedule.doctor);
        let inserted = self.insert_schedule(&schedule).await?;
        Ok(inserted.unwrap_or(schedule))
    }

    pub async fn update_schedule(
        &self,
        doctor_id: &str,
        update: ScheduleUpdate,
    ) -> Result<Schedule, ScheduleError> {
        validate_common_fields(
            update.default_slot_duration,
            update.max_patients_per_slot,
            update.break_time.as_ref(),
            update.start_time.as_deref(),
            update.end_time.as_deref(),
        )?;
        if let Some(days) = &update.weekly_schedule {
            validate_days(days)?;
        }

        let existing = find_schedule_by_doctor(&self.store, doctor_id)
            .await?
            .ok_or(ScheduleError::ScheduleNotFound)?;

        let mut update_data = serde_json::Map::new();

        if let Some(weekly) = resolve_weekly_schedule(&existing, &update) {
            update_data.insert("weeklySchedule".to_string(), json!(weekly));
        }
        if let Some(duration) = update.default_slot_duration {
            update_data.insert("defaultSlotDuration".to_string(), json!(duration));
        }
        if let Some(break_time) = &update.break_time {
            update_data.insert("breakTime".to_string(), json!(break_time));
        }
        if let Some(max) = update.max_patients_per_slot {
            update_data.insert("maxPatientsPerSlot".to_string(), json!(max));
        }
        if let Some(start) = &update.start_time {
            update_data.insert("startTime".to_string(), json!(start));
        }
        if let Some(end) = &update.end_time {
            update_data.insert("endTime".to_string(), json!(end));
        }

        self.apply_update(&existing, update_data).await
    }

    /// Patch a single day by name, then persist the whole schedule.
    pub async fn patch_day(
        &self,
        doctor_id: &str,
        day_name: &str,
        patch: DayPatch,
    ) -> Result<Schedule, ScheduleError> {
        let day = DayOfWeek::parse(day_name)
            .ok_or_else(|| ScheduleError::DayNotFound(day_name.to_string()))?;

        if let Some(slots) = &patch.time_slots {
            validate_days(&[DaySchedule {
                day,
                is_working_day: true,
                time_slots: slots.clone(),
            }])?;
        }

        let existing = self.get_or_create_schedule(doctor_id).await?;
        let current_day = existing
            .day(day)
            .ok_or_else(|| ScheduleError::DayNotFound(day_name.to_string()))?;

        let is_working_day = patch.is_working_day.unwrap_or(current_day.is_working_day);
        let time_slots = if !is_working_day {
            debug!("Setting {} as non-working day, clearing time slots", day);
            Vec::new()
        } else if let Some(slots) = patch.time_slots {
            slots
        } else if current_day.is_working_day && !current_day.time_slots.is_empty() {
            debug!("Preserving existing time slots for {}", day);
            current_day.time_slots.clone()
        } else {
            debug!("Generating time slots for {}", day);
            SlotSettings::effective(&existing, &ScheduleUpdate::default()).generate()
        };

        let mut weekly = existing.weekly_schedule.clone();
        if let Some(record) = weekly.iter_mut().find(|d| d.day == day) {
            *record = DaySchedule {
                day,
                is_working_day,
                time_slots,
            };
        }

        let mut update_data = serde_json::Map::new();
        update_data.insert("weeklySchedule".to_string(), json!(weekly));

        self.apply_update(&existing, update_data).await
    }

    pub async fn delete_schedule(&self, schedule_id: &str) -> Result<(), ScheduleError> {
        let path = format!("/rest/v1/schedules?id=eq.{}", urlencoding::encode(schedule_id));
        let deleted: Vec<Value> = self
            .store
            .request_with_headers(Method::DELETE, &path, None, Some(representation_headers()))
            .await?;

        if deleted.is_empty() {
            return Err(ScheduleError::ScheduleNotFound);
        }

        info!("Deleted schedule: {}", schedule_id);
        Ok(())
    }

    pub async fn get_schedule_by_id(&self, schedule_id: &str) -> Result<Schedule, ScheduleError> {
        let path = format!(
            "/rest/v1/schedules?id=eq.{}&limit=1",
            urlencoding::encode(schedule_id)
        );
        let result: Vec<Schedule> = self.store.request(Method::GET, &path, None).await?;
        result.into_iter().next().ok_or(ScheduleError::ScheduleNotFound)
    }

    /// All schedules referencing the doctor, under either identity encoding.
    pub async fn list_doctor_schedules(&self, doctor_id: &str) -> Result<Vec<Schedule>, ScheduleError> {
        let doctor_id = normalize_doctor_param(doctor_id);

        let path = format!(
            "/rest/v1/schedules?doctor=eq.{}",
            urlencoding::encode(&doctor_id)
        );
        let mut schedules: Vec<Schedule> = self.store.request(Method::GET, &path, None).await?;

        if let Some(canonical) = canonical_doctor_id(&doctor_id) {
            let path = format!("/rest/v1/schedules?doctor=eq.{}", canonical);
            let more: Vec<Schedule> = self.store.request(Method::GET, &path, None).await?;
            schedules.extend(more);
        }

        Ok(schedules)
    }

    pub async fn list_patient_appointments(
        &self,
        patient_id: &str,
    ) -> Result<Vec<Appointment>, ScheduleError> {
        let path = format!(
            "/rest/v1/appointments?patient=eq.{}",
            urlencoding::encode(patient_id)
        );
        let appointments: Vec<Appointment> = self.store.request(Method::GET, &path, None).await?;
        Ok(appointments)
    }

    async fn insert_schedule(&self, schedule: &Schedule) -> Result<Option<Schedule>, ScheduleError> {
        let inserted: Vec<Schedule> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/schedules",
                Some(json!(schedule)),
                Some(representation_headers()),
            )
            .await?;

        Ok(inserted.into_iter().next())
    }

    /// Single write persisting a merged update; every update stamps
    /// `updatedAt`. Read-merge-write is not serialized across requests -
    /// racing updates to one doctor can lose, callers needing strictness
    /// must serialize externally.
    async fn apply_update(
        &self,
        existing: &Schedule,
        mut update_data: serde_json::Map<String, Value>,
    ) -> Result<Schedule, ScheduleError> {
        update_data.insert("updatedAt".to_string(), json!(Utc::now()));

        let path = match &existing.id {
            Some(id) => format!("/rest/v1/schedules?id=eq.{}", urlencoding::encode(id)),
            None => format!(
                "/rest/v1/schedules?doctor=eq.{}",
                urlencoding::encode(&existing.doctor)
            ),
        };

        let updated: Vec<Schedule> = self
            .store
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(Value::Object(update_data)),
                Some(representation_headers()),
            )
            .await?;

        updated
            .into_iter()
            .next()
            .ok_or(ScheduleError::ScheduleNotFound)
    }
}

fn representation_headers() -> reqwest::header::HeaderMap {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        "Prefer",
        reqwest::header::HeaderValue::from_static("return=representation"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BreakTime, TimeSlot};
    use assert_matches::assert_matches;

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot {
            start_time: start.to_string(),
            end_time: end.to_string(),
            is_available: true,
            is_selected: true,
        }
    }

    fn working_day(day: DayOfWeek, slots: Vec<TimeSlot>) -> DaySchedule {
        DaySchedule {
            day,
            is_working_day: true,
            time_slots: slots,
        }
    }

    fn schedule_with_days(days: Vec<DaySchedule>) -> Schedule {
        let mut weekly: Vec<DaySchedule> =
            DayOfWeek::ALL.into_iter().map(DaySchedule::non_working).collect();
        for day in days {
            let idx = weekly.iter().position(|d| d.day == day.day).unwrap();
            weekly[idx] = day;
        }

        Schedule {
            id: Some("sched-1".to_string()),
            doctor: "doc-1".to_string(),
            weekly_schedule: weekly,
            default_slot_duration: 30,
            break_time: BreakTime::default(),
            max_patients_per_slot: 1,
            start_time: None,
            end_time: None,
            effective_from: None,
            updated_at: None,
        }
    }

    #[test]
    fn update_preserves_slots_of_day_already_working() {
        let monday_slots = vec![slot("09:00", "09:30"), slot("09:30", "10:00")];
        let existing = schedule_with_days(vec![working_day(DayOfWeek::Monday, monday_slots.clone())]);

        let update = ScheduleUpdate {
            weekly_schedule: Some(vec![working_day(DayOfWeek::Monday, vec![])]),
            ..Default::default()
        };

        let merged = resolve_weekly_schedule(&existing, &update).unwrap();
        let monday = merged.iter().find(|d| d.day == DayOfWeek::Monday).unwrap();
        assert!(monday.is_working_day);
        assert_eq!(monday.time_slots, monday_slots);
    }

    #[test]
    fn update_clears_slots_when_day_toggled_off() {
        let existing = schedule_with_days(vec![working_day(
            DayOfWeek::Monday,
            vec![slot("09:00", "09:30")],
        )]);

        let update = ScheduleUpdate {
            weekly_schedule: Some(vec![DaySchedule::non_working(DayOfWeek::Monday)]),
            ..Default::default()
        };

        let merged = resolve_weekly_schedule(&existing, &update).unwrap();
        let monday = merged.iter().find(|d| d.day == DayOfWeek::Monday).unwrap();
        assert!(!monday.is_working_day);
        assert!(monday.time_slots.is_empty());
    }

    #[test]
    fn update_generates_slots_for_newly_working_day() {
        let existing = schedule_with_days(vec![]);

        let update = ScheduleUpdate {
            weekly_schedule: Some(vec![working_day(DayOfWeek::Tuesday, vec![])]),
            ..Default::default()
        };

        let merged = resolve_weekly_schedule(&existing, &update).unwrap();
        let tuesday = merged.iter().find(|d| d.day == DayOfWeek::Tuesday).unwrap();
        assert!(tuesday.is_working_day);
        // Default hours and break: 09:00-17:00 at 30 minutes, 13:00-14:00 out
        assert_eq!(tuesday.time_slots.len(), 14);
        assert_eq!(tuesday.time_slots[0].start_time, "09:00");
    }

    #[test]
    fn update_settings_take_priority_over_stored_ones() {
        let mut existing = schedule_with_days(vec![]);
        existing.default_slot_duration = 30;
        existing.start_time = Some("08:00".to_string());

        let update = ScheduleUpdate {
            weekly_schedule: Some(vec![working_day(DayOfWeek::Friday, vec![])]),
            default_slot_duration: Some(60),
            start_time: Some("10:00".to_string()),
            end_time: Some("16:00".to_string()),
            ..Default::default()
        };

        let merged = resolve_weekly_schedule(&existing, &update).unwrap();
        let friday = merged.iter().find(|d| d.day == DayOfWeek::Friday).unwrap();
        // 10:00-16:00 hourly minus the 13:00-14:00 break: 10, 11, 12, 14, 15
        assert_eq!(friday.time_slots.len(), 5);
        assert_eq!(friday.time_slots[0].start_time, "10:00");
        assert_eq!(friday.time_slots[3].start_time, "14:00");
    }

    #[test]
    fn days_absent_from_update_are_untouched() {
        let wednesday_slots = vec![slot("09:00", "09:30")];
        let existing = schedule_with_days(vec![working_day(
            DayOfWeek::Wednesday,
            wednesday_slots.clone(),
        )]);

        let update = ScheduleUpdate {
            weekly_schedule: Some(vec![working_day(DayOfWeek::Monday, vec![])]),
            ..Default::default()
        };

        let merged = resolve_weekly_schedule(&existing, &update).unwrap();
        assert_eq!(merged.len(), 7);
        let wednesday = merged.iter().find(|d| d.day == DayOfWeek::Wednesday).unwrap();
        assert_eq!(wednesday.time_slots, wednesday_slots);
    }

    #[test]
    fn field_only_update_leaves_weekly_schedule_alone() {
        let existing = schedule_with_days(vec![working_day(
            DayOfWeek::Monday,
            vec![slot("09:00", "09:30")],
        )]);

        let update = ScheduleUpdate {
            default_slot_duration: Some(45),
            ..Default::default()
        };

        assert!(resolve_weekly_schedule(&existing, &update).is_none());
    }

    #[test]
    fn canonical_id_is_produced_for_alternate_uuid_forms() {
        let canonical = "67e55044-10b1-426f-9247-bb680e5fe0c8";

        // Simple (unhyphenated) and uppercase forms resolve to canonical
        assert_eq!(
            canonical_doctor_id("67e5504410b1426f9247bb680e5fe0c8").as_deref(),
            Some(canonical)
        );
        assert_eq!(
            canonical_doctor_id("67E55044-10B1-426F-9247-BB680E5FE0C8").as_deref(),
            Some(canonical)
        );

        // Already canonical: no second lookup needed
        assert_eq!(canonical_doctor_id(canonical), None);

        // Not a store-native id at all
        assert_eq!(canonical_doctor_id("dr-strange"), None);
    }

    #[test]
    fn normalize_strips_quotes_and_whitespace() {
        assert_eq!(normalize_doctor_param(" \"doc-1\" "), "doc-1");
        assert_eq!(normalize_doctor_param("'doc-2'"), "doc-2");
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        assert_matches!(
            validate_common_fields(Some(3), None, None, None, None),
            Err(ScheduleError::InvalidFormat(_))
        );
        assert_matches!(
            validate_common_fields(Some(121), None, None, None, None),
            Err(ScheduleError::InvalidFormat(_))
        );
        assert_matches!(
            validate_common_fields(None, Some(0), None, None, None),
            Err(ScheduleError::InvalidFormat(_))
        );
        assert_matches!(
            validate_common_fields(None, Some(11), None, None, None),
            Err(ScheduleError::InvalidFormat(_))
        );
        assert_matches!(
            validate_common_fields(None, None, None, Some("17:00"), Some("09:00")),
            Err(ScheduleError::InvalidFormat(_))
        );
        assert!(validate_common_fields(Some(30), Some(2), None, Some("09:00"), Some("17:00")).is_ok());
    }

    #[test]
    fn duplicate_days_are_rejected() {
        let days = vec![
            working_day(DayOfWeek::Monday, vec![]),
            working_day(DayOfWeek::Monday, vec![]),
        ];
        assert_matches!(validate_days(&days), Err(ScheduleError::InvalidFormat(_)));
    }

    #[test]
    fn inverted_time_slot_is_rejected() {
        let days = vec![working_day(DayOfWeek::Monday, vec![slot("10:00", "09:30")])];
        assert_matches!(validate_days(&days), Err(ScheduleError::InvalidFormat(_)));
    }
}
