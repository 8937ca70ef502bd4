use crate::{backend::SlotBackend, error::SlotError, types::BookingSlot};
use chrono::NaiveTime;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info};
use uuid::Uuid;

/// In-memory slot list, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct LocalSlots {
    slots: Arc<Mutex<Vec<BookingSlot>>>,
}

impl LocalSlots {
    pub fn insert_example_slots(&self) {
        const EXAMPLE_HOURS: [u32; 6] = [9, 10, 11, 14, 15, 16];

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        for hour in EXAMPLE_HOURS {
            if let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) {
                slots.push(BookingSlot::at(time));
            }
        }
    }
}

impl SlotBackend for LocalSlots {
    fn slots(&self) -> Vec<BookingSlot> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn book_slot(&self, id: Uuid) -> Result<BookingSlot, SlotError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(slot) = slots.iter_mut().find(|slot| slot.id() == id) else {
            let err = SlotError::NotFound(id);
            error!("{err}");
            return Err(err);
        };
        if slot.is_booked() {
            let err = SlotError::AlreadyBooked(id);
            error!("{err}");
            return Err(err);
        }

        *slot = slot.booked();
        info!(%id, time = slot.time(), "Slot booked");
        Ok(slot.clone())
    }

    fn add_slot(&self, time: String) -> BookingSlot {
        let slot = BookingSlot::new(time, false);
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(slot.clone());
        slot
    }

    fn remove_slot(&self, id: Uuid) -> Result<(), SlotError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let count = slots.len();
        slots.retain(|slot| slot.id() != id);
        if slots.len() == count {
            let err = SlotError::NotFound(id);
            error!("{err}");
            return Err(err);
        }
        Ok(())
    }

    fn remove_all_slots(&self) {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
