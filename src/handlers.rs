pub mod appointments;
pub mod auth;
pub mod clients;
pub mod gallery;
pub mod services;
pub mod settings;
pub mod testimonials;
