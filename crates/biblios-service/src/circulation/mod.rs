//! Circulation: book copies and the reservation / loan workflow.

pub mod instance;
pub mod reservation;

pub use instance::InstanceService;
pub use reservation::ReservationService;
