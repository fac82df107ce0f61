use chrono::NaiveDate;
use reqwest::Method;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{Appointment, DayOfWeek, ScheduleError, TimeSlot};
use crate::services::schedule::{find_schedule_by_doctor, normalize_doctor_param};
use crate::services::slots::time_to_minutes;

/// A slot stays bookable while fewer than `max_per_slot` appointments
/// start inside `[startTime, endTime)`. Input order is preserved.
pub(crate) fn filter_available_slots(
    slots: &[TimeSlot],
    appointments: &[Appointment],
    max_per_slot: i32,
) -> Vec<TimeSlot> {
    slots
        .iter()
        .filter(|slot| {
            if !slot.is_available {
                return false;
            }

            let (Ok(start), Ok(end)) = (
                time_to_minutes(&slot.start_time),
                time_to_minutes(&slot.end_time),
            ) else {
                // A slot with unparseable bounds cannot be booked against
                return false;
            };

            let booked = appointments
                .iter()
                .filter(|apt| {
                    time_to_minutes(&apt.time)
                        .map(|t| t >= start && t < end)
                        .unwrap_or(false)
                })
                .count() as i32;

            booked < max_per_slot
        })
        .cloned()
        .collect()
}

pub struct AvailabilityService {
    store: StoreClient,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// Compute the open slots for a doctor on a given date.
    pub async fn get_available_slots(
        &self,
        doctor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, ScheduleError> {
        debug!("Calculating available slots for doctor {} on {}", doctor_id, date);

        let schedule = find_schedule_by_doctor(&self.store, doctor_id)
            .await?
            .ok_or(ScheduleError::ScheduleNotFound)?;

        let day = DayOfWeek::from_date(date);
        let Some(day_schedule) = schedule.day(day).filter(|d| d.is_working_day) else {
            debug!("{} is not a working day for doctor {}", day, doctor_id);
            return Ok(Vec::new());
        };

        let appointments = self.get_appointments_for_date(doctor_id, date).await?;

        let available = filter_available_slots(
            &day_schedule.time_slots,
            &appointments,
            schedule.max_patients_per_slot,
        );

        debug!("Found {} available slots", available.len());
        Ok(available)
    }

    async fn get_appointments_for_date(
        &self,
        doctor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, ScheduleError> {
        let start_of_day = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let end_of_day = date.and_hms_opt(23, 59, 59).unwrap().and_utc();

        let path = format!(
            "/rest/v1/appointments?doctor=eq.{}&date=gte.{}&date=lte.{}",
            urlencoding::encode(&normalize_doctor_param(doctor_id)),
            urlencoding::encode(&start_of_day.to_rfc3339()),
            urlencoding::encode(&end_of_day.to_rfc3339()),
        );

        let appointments: Vec<Appointment> = self.store.request(Method::GET, &path, None).await?;
        Ok(appointments)
    }
}
