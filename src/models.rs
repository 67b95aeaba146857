pub mod appointment;
pub mod auth;
pub mod client;
pub mod gallery;
pub mod service;
pub mod settings;
pub mod testimonial;
