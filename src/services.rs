pub mod auth_service;
pub mod scheduling;
pub mod testimonial_service;

pub use auth_service::AuthService;
pub use scheduling::SchedulingService;
pub use testimonial_service::TestimonialService;
