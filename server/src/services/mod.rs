//! Business logic services for the clinic back-office

mod appointments;
mod files;
mod owners;
mod pets;

pub use appointments::AppointmentService;
pub use files::{stored_file_name, FileService, NewUpload};
pub(crate) use files::remove_stored_files;
pub use owners::OwnerService;
pub use pets::PetService;
