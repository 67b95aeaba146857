pub mod appointment_repo;
pub mod client_repo;
pub mod gallery_repo;
pub mod service_repo;
pub mod settings_repo;
pub mod testimonial_repo;
pub mod user_repo;

pub use appointment_repo::AppointmentRepository;
pub use client_repo::ClientRepository;
pub use gallery_repo::GalleryRepository;
pub use service_repo::ServiceRepository;
pub use settings_repo::SettingsRepository;
pub use testimonial_repo::TestimonialRepository;
pub use user_repo::UserRepository;
