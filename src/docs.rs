// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Serviços ---
        handlers::services::list_services,
        handlers::services::get_service,
        handlers::services::create_service,
        handlers::services::update_service,
        handlers::services::activate_service,
        handlers::services::delete_service,

        // --- Clientes ---
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::create_client,
        handlers::clients::update_client,

        // --- Agendamentos ---
        handlers::appointments::availability,
        handlers::appointments::create_appointment,
        handlers::appointments::create_manual,
        handlers::appointments::list_appointments,
        handlers::appointments::get_appointment,
        handlers::appointments::update_status,

        // --- Settings ---
        handlers::settings::get_public_settings,
        handlers::settings::get_settings,
        handlers::settings::update_settings,

        // --- Galeria ---
        handlers::gallery::list_gallery,
        handlers::gallery::add_gallery_image,
        handlers::gallery::delete_gallery_image,
        handlers::gallery::list_service_images,
        handlers::gallery::add_service_image,
        handlers::gallery::delete_service_image,

        // --- Depoimentos ---
        handlers::testimonials::list_published,
        handlers::testimonials::list_all,
        handlers::testimonials::generate_link,
        handlers::testimonials::link_info,
        handlers::testimonials::form_info,
        handlers::testimonials::submit,
        handlers::testimonials::delete_testimonial,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::AuthUser,
            models::auth::AuthResponse,
            models::auth::RegisterPayload,
            models::auth::LoginPayload,

            // --- Serviços ---
            models::service::Service,
            models::service::UpsertServicePayload,
            models::service::ActivateServicePayload,

            // --- Clientes ---
            models::client::Client,
            models::client::ClientPage,
            models::client::ClientDetail,
            models::client::UpsertClientPayload,

            // --- Agendamentos ---
            models::appointment::AppointmentStatus,
            models::appointment::Appointment,
            models::appointment::AppointmentDetail,
            models::appointment::AppointmentWithService,
            models::appointment::AvailabilityResponse,
            models::appointment::CreateAppointmentPayload,
            models::appointment::ManualAppointmentPayload,
            models::appointment::UpdateStatusPayload,

            // --- Settings ---
            models::settings::Settings,
            models::settings::PublicSettings,
            models::settings::UpdateSettingsPayload,

            // --- Galeria ---
            models::gallery::GalleryImage,
            models::gallery::AddGalleryImagePayload,
            models::gallery::ServiceImage,
            models::gallery::AddServiceImagePayload,

            // --- Depoimentos ---
            models::testimonial::TestimonialStatus,
            models::testimonial::Testimonial,
            models::testimonial::TestimonialDetail,
            models::testimonial::PublishedTestimonial,
            models::testimonial::TestimonialFormInfo,
            models::testimonial::TestimonialLinkInfo,
            models::testimonial::SubmitTestimonialPayload,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login da administradora"),
        (name = "Serviços", description = "Catálogo de serviços do estúdio"),
        (name = "Clientes", description = "Cadastro de clientes"),
        (name = "Agendamentos", description = "Agenda, disponibilidade e admissão"),
        (name = "Settings", description = "Configuração do site"),
        (name = "Galeria", description = "Fotos do site e dos serviços"),
        (name = "Depoimentos", description = "Depoimentos com link único"),
    )
)]
pub struct ApiDoc;
