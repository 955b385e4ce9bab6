mod club;
mod registration;

pub use club::{Club, OPEN_CLUB_NAME};
pub use registration::{NewRegistration, RecalculationRow, RegistrationDetailRow};
