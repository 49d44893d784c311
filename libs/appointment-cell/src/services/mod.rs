pub mod availability;
pub mod booking;
pub mod clock;
pub mod confirmation;
pub mod slots;
pub mod validation;

pub use availability::AvailabilityService;
pub use booking::AppointmentBookingService;
pub use confirmation::ConfirmationService;
