// src/handlers/appointments.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::appointment::{
        Appointment, AppointmentDetail, AvailabilityQuery, AvailabilityResponse,
        CreateAppointmentPayload, ListAppointmentsQuery, ManualAppointmentPayload,
        UpdateStatusPayload,
    },
};

// GET /api/appointments/availability — calendário público de vagas
#[utoipa::path(
    get,
    path = "/api/appointments/availability",
    tag = "Agendamentos",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Horários livres do dia", body = AvailabilityResponse),
        (status = 400, description = "Serviço inválido")
    )
)]
pub async fn availability(
    State(app_state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let response = app_state
        .scheduling_service
        .available_slots(query.service_id, query.date)
        .await?;

    Ok(Json(response))
}

// POST /api/appointments — criação pública
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Agendamentos",
    request_body = CreateAppointmentPayload,
    responses(
        (status = 201, description = "Agendamento criado", body = AppointmentDetail),
        (status = 400, description = "Dados ou serviço inválidos"),
        (status = 409, description = "Horário já ocupado")
    )
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let appointment = app_state.scheduling_service.create_appointment(payload).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// POST /api/appointments/manual — criação pela dona, no painel
#[utoipa::path(
    post,
    path = "/api/appointments/manual",
    tag = "Agendamentos",
    request_body = ManualAppointmentPayload,
    responses(
        (status = 201, description = "Agendamento criado", body = AppointmentDetail),
        (status = 409, description = "Horário já ocupado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_manual(
    State(app_state): State<AppState>,
    Json(payload): Json<ManualAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let appointment = app_state
        .scheduling_service
        .create_manual_appointment(payload)
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// GET /api/appointments — listagem do painel
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Agendamentos",
    params(ListAppointmentsQuery),
    responses((status = 200, description = "Agendamentos", body = Vec<AppointmentDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    Query(query): Query<ListAppointmentsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = app_state
        .appointment_repo
        .list_detail(query.date, query.status)
        .await?;

    Ok(Json(appointments))
}

// GET /api/appointments/{id}
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "Agendamentos",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Detalhe do agendamento", body = AppointmentDetail),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_appointment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = app_state
        .appointment_repo
        .find_detail(id)
        .await?
        .ok_or(AppError::NotFound("Agendamento não encontrado"))?;

    Ok(Json(appointment))
}

// PATCH /api/appointments/{id}/status — transição livre entre os 4 status
#[utoipa::path(
    patch,
    path = "/api/appointments/{id}/status",
    tag = "Agendamentos",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Appointment),
        (status = 404, description = "Agendamento não encontrado"),
        (status = 409, description = "Horário já ocupado por outro agendamento")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = app_state
        .appointment_repo
        .update_status(id, payload.status)
        .await?;

    Ok(Json(appointment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn payload_publico_exige_nome_e_telefone() {
        let payload = CreateAppointmentPayload {
            name: String::new(),
            phone: "123".to_string(),
            service_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            time: "14:30".to_string(),
            notes: None,
        };

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("phone"));
    }
}
