use std::sync::Arc;

use tracing::{debug, error, info, warn};

use catalog_cell::CatalogRepository;

use crate::models::{AppointmentError, BookedAppointment};
use crate::services::clock::{to_clock_string, to_minutes, MinuteOffset};
use crate::services::slots::{
    filter_available, find_conflict, generate_candidates, slot_interval, BookedInterval, SlotSettings,
    DEFAULT_BOOKED_DURATION, DEFAULT_LISTING_DURATION,
};
use crate::services::validation::{is_future_date, today};
use crate::store::AppointmentStore;

pub struct AvailabilityService {
    catalog: Arc<dyn CatalogRepository>,
    store: Arc<dyn AppointmentStore>,
    settings: SlotSettings,
}

impl AvailabilityService {
    pub fn new(catalog: Arc<dyn CatalogRepository>, store: Arc<dyn AppointmentStore>, settings: SlotSettings) -> Self {
        Self { catalog, store, settings }
    }

    /// Open start times for a barber on a date, ascending, as `HH:MM AM/PM`.
    ///
    /// Barber, service and date are all checked before the store is queried.
    pub async fn get_available_time_slots(
        &self,
        barber_id: u32,
        service_id: Option<u32>,
        date: &str,
    ) -> Result<Vec<String>, AppointmentError> {
        let barber = self.catalog.barber(barber_id).ok_or_else(|| {
            error!(barber_id, "Barber not found");
            AppointmentError::BarberNotFound
        })?;

        let service_duration = match service_id {
            Some(id) => {
                let service = self.catalog.service(id).ok_or_else(|| {
                    error!(service_id = id, "Service not found");
                    AppointmentError::ServiceNotFound
                })?;
                Some(service.duration)
            }
            None => None,
        };

        if !is_future_date(date, today()) {
            error!(date, "Date must be in the future");
            return Err(AppointmentError::InvalidDate);
        }

        let SlotSettings { window, buffer } = self.settings;
        let interval = slot_interval(service_duration, buffer);
        let duration = service_duration.unwrap_or(DEFAULT_LISTING_DURATION);

        debug!(
            barber = %barber.name,
            ?service_id,
            duration,
            interval,
            buffer,
            date,
            "Fetching bookings for slot listing"
        );

        let bookings = self.store.find_active_bookings(barber_id, date).await.map_err(|e| {
            error!(barber_id, date, "Error getting available time slots: {}", e);
            AppointmentError::DatabaseError(format!("Error getting available time slots: {}", e))
        })?;

        let booked = self.booked_intervals(&bookings);
        let candidates = generate_candidates(window, duration, interval);
        let available = filter_available(&candidates, window, duration, buffer, &booked);

        let slots: Vec<String> = available
            .into_iter()
            .filter_map(|minutes| match MinuteOffset::new(minutes) {
                Ok(offset) => Some(to_clock_string(offset)),
                Err(e) => {
                    warn!(barber_id, date, error = %e, "Skipping slot outside the day");
                    None
                }
            })
            .collect();

        info!(
            barber_id,
            date,
            total_slots = candidates.len(),
            booked_appointments = booked.len(),
            available_slots = slots.len(),
            "Time slots computed"
        );

        Ok(slots)
    }

    /// Rejects a proposed booking that collides with an existing one.
    ///
    /// Only a confirmed overlap blocks: if the bookings cannot be read the
    /// slot is assumed available.
    pub async fn check_time_slot_availability(
        &self,
        barber_id: u32,
        date: &str,
        time: &str,
        service_id: u32,
    ) -> Result<(), AppointmentError> {
        let buffer = self.settings.buffer;
        debug!(barber_id, date, time, service_id, buffer, "Checking time slot availability");

        let bookings = match self.store.find_active_bookings(barber_id, date).await {
            Ok(bookings) => bookings,
            Err(e) => {
                warn!(error = %e, "Error checking time slot availability, assuming available");
                return Ok(());
            }
        };

        let start = match to_minutes(time) {
            Ok(offset) => offset.get(),
            Err(e) => {
                warn!(error = %e, "Error checking time slot availability, assuming available");
                return Ok(());
            }
        };
        let duration = self.booked_duration(Some(service_id));
        let booked = self.booked_intervals(&bookings);

        if let Some(existing) = find_conflict(start, duration, buffer, &booked) {
            warn!(
                barber_id,
                date,
                time,
                new_start = start,
                new_end = start.saturating_add(duration).saturating_add(buffer),
                existing_start = existing.start,
                existing_end = existing.start.saturating_add(existing.duration).saturating_add(buffer),
                buffer,
                "Time slot unavailable - overlapping appointment"
            );
            return Err(AppointmentError::TimeSlotUnavailable);
        }

        info!(
            found = bookings.len(),
            new_start = start,
            new_end = start.saturating_add(duration).saturating_add(buffer),
            "Time slot available"
        );
        Ok(())
    }

    fn booked_duration(&self, service_id: Option<u32>) -> u32 {
        service_id
            .and_then(|id| self.catalog.service_duration(id))
            .unwrap_or(DEFAULT_BOOKED_DURATION)
    }

    fn booked_intervals(&self, bookings: &[BookedAppointment]) -> Vec<BookedInterval> {
        bookings
            .iter()
            .filter_map(|booking| match to_minutes(&booking.time) {
                Ok(start) => Some(BookedInterval::new(start.get(), self.booked_duration(booking.service_id))),
                Err(e) => {
                    warn!(appointment_id = ?booking.id, "Ignoring booking with unreadable time: {}", e);
                    None
                }
            })
            .collect()
    }
}
