// src/handlers/testimonials.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::testimonial::{
        PublishedTestimonial, SubmitTestimonialPayload, Testimonial, TestimonialDetail,
        TestimonialFormInfo, TestimonialLinkInfo,
    },
};

// GET /api/testimonials/published — vitrine do site
#[utoipa::path(
    get,
    path = "/api/testimonials/published",
    tag = "Depoimentos",
    responses((status = 200, description = "Depoimentos publicados", body = Vec<PublishedTestimonial>))
)]
pub async fn list_published(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let testimonials = app_state.testimonial_repo.list_published().await?;
    Ok(Json(testimonials))
}

// GET /api/testimonials — painel
#[utoipa::path(
    get,
    path = "/api/testimonials",
    tag = "Depoimentos",
    responses((status = 200, description = "Todos os depoimentos", body = Vec<TestimonialDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_all(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let testimonials = app_state.testimonial_repo.list_all_detail().await?;
    Ok(Json(testimonials))
}

// POST /api/testimonials/generate-link/{appointmentId}
// Idempotente: repetir devolve o link já existente.
#[utoipa::path(
    post,
    path = "/api/testimonials/generate-link/{appointment_id}",
    tag = "Depoimentos",
    params(("appointment_id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Link já existia", body = Testimonial),
        (status = 201, description = "Link criado", body = Testimonial),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_link(
    State(app_state): State<AppState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (testimonial, created) = app_state
        .testimonial_service
        .generate_link(appointment_id)
        .await?;

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(testimonial)))
}

// GET /api/testimonials/link-info/{appointmentId} — para envio via WhatsApp
#[utoipa::path(
    get,
    path = "/api/testimonials/link-info/{appointment_id}",
    tag = "Depoimentos",
    params(("appointment_id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Link e mensagem prontos", body = TestimonialLinkInfo),
        (status = 404, description = "Link de depoimento não gerado")
    ),
    security(("api_jwt" = []))
)]
pub async fn link_info(
    State(app_state): State<AppState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let info = app_state.testimonial_service.link_info(appointment_id).await?;
    Ok(Json(info))
}

// GET /api/testimonials/public/{uniqueLink} — formulário público
#[utoipa::path(
    get,
    path = "/api/testimonials/public/{unique_link}",
    tag = "Depoimentos",
    params(("unique_link" = String, Path, description = "Token do link de depoimento")),
    responses(
        (status = 200, description = "Dados do formulário", body = TestimonialFormInfo),
        (status = 404, description = "Link de depoimento inválido")
    )
)]
pub async fn form_info(
    State(app_state): State<AppState>,
    Path(unique_link): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let info = app_state.testimonial_service.form_info(&unique_link).await?;
    Ok(Json(info))
}

// POST /api/testimonials/submit/{uniqueLink} — envio público, uma única vez
#[utoipa::path(
    post,
    path = "/api/testimonials/submit/{unique_link}",
    tag = "Depoimentos",
    params(("unique_link" = String, Path, description = "Token do link de depoimento")),
    request_body = SubmitTestimonialPayload,
    responses(
        (status = 200, description = "Depoimento publicado", body = Testimonial),
        (status = 400, description = "Depoimento já enviado"),
        (status = 404, description = "Link de depoimento inválido")
    )
)]
pub async fn submit(
    State(app_state): State<AppState>,
    Path(unique_link): Path<String>,
    Json(payload): Json<SubmitTestimonialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let testimonial = app_state
        .testimonial_service
        .submit(&unique_link, payload)
        .await?;

    Ok(Json(json!({
        "message": "Depoimento enviado com sucesso!",
        "testimonial": testimonial,
    })))
}

// DELETE /api/testimonials/{id}
#[utoipa::path(
    delete,
    path = "/api/testimonials/{id}",
    tag = "Depoimentos",
    params(("id" = Uuid, Path, description = "ID do depoimento")),
    responses((status = 200, description = "Depoimento deletado")),
    security(("api_jwt" = []))
)]
pub async fn delete_testimonial(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.testimonial_repo.delete(id).await?;
    Ok(Json(json!({ "message": "Depoimento deletado com sucesso" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envio_exige_nota_de_1_a_5_e_texto_minimo() {
        let payload = SubmitTestimonialPayload {
            rating: 6,
            text: "curto".to_string(),
        };

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("rating"));
        assert!(errors.field_errors().contains_key("text"));
    }

    #[test]
    fn envio_valido_passa_na_validacao() {
        let payload = SubmitTestimonialPayload {
            rating: 5,
            text: "Atendimento maravilhoso, super recomendo!".to_string(),
        };

        assert!(payload.validate().is_ok());
    }
}
