use crate::{error::SlotError, types::BookingSlot};
use uuid::Uuid;

pub trait SlotBackend: Clone + Send + Sync + 'static {
    fn slots(&self) -> Vec<BookingSlot>;
    fn book_slot(&self, id: Uuid) -> Result<BookingSlot, SlotError>;
    fn add_slot(&self, time: String) -> BookingSlot;
    fn remove_slot(&self, id: Uuid) -> Result<(), SlotError>;
    fn remove_all_slots(&self);
}
