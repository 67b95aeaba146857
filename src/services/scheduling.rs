// src/services/scheduling.rs
//
// Motor de agenda: catálogo de vagas, disponibilidade e admissão de
// agendamentos. O catálogo é gerado a partir do horário de funcionamento
// por dia da semana e da duração do serviço.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, ClientRepository, ServiceRepository, SettingsRepository},
    models::{
        appointment::{
            AppointmentDetail, AppointmentStatus, AvailabilityResponse, CreateAppointmentPayload,
            ManualAppointmentPayload,
        },
        client::Client,
        settings::{DayHours, WeekHours},
    },
};

/// Valida o rótulo de horário no formato `HH:MM` (24h).
pub fn is_valid_time_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    if !bytes.iter().enumerate().all(|(i, b)| i == 2 || b.is_ascii_digit()) {
        return false;
    }
    let hours: u32 = label[..2].parse().unwrap_or(99);
    let minutes: u32 = label[3..].parse().unwrap_or(99);
    hours < 24 && minutes < 60
}

/// Gera os horários candidatos de um dia: um a cada `duration_minutes`,
/// a partir da abertura, enquanto o início ficar antes do fechamento.
pub fn candidate_slots(day: DayHours, duration_minutes: i32) -> Vec<String> {
    if day.is_closed() || duration_minutes <= 0 {
        return Vec::new();
    }

    let open_minute = day.open * 60;
    let close_minute = day.close * 60;
    let step = duration_minutes as u32;

    let mut slots = Vec::new();
    let mut minute = open_minute;
    while minute < close_minute {
        slots.push(format!("{:02}:{:02}", minute / 60, minute % 60));
        minute += step;
    }

    slots
}

/// Remove do catálogo os horários já ocupados, preservando a ordem.
pub fn filter_available(candidates: Vec<String>, occupied: &HashSet<String>) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|time| !occupied.contains(time))
        .collect()
}

// Ajuda a montar erros de validação fora do derive (checagens condicionais)
fn field_error(field: &'static str, message: &'static str) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    let mut error = validator::ValidationError::new("invalid");
    error.message = Some(message.into());
    errors.add(field, error);
    AppError::ValidationError(errors)
}

#[derive(Clone)]
pub struct SchedulingService {
    pool: PgPool,
    service_repo: ServiceRepository,
    client_repo: ClientRepository,
    appointment_repo: AppointmentRepository,
    settings_repo: SettingsRepository,
}

impl SchedulingService {
    pub fn new(
        pool: PgPool,
        service_repo: ServiceRepository,
        client_repo: ClientRepository,
        appointment_repo: AppointmentRepository,
        settings_repo: SettingsRepository,
    ) -> Self {
        Self {
            pool,
            service_repo,
            client_repo,
            appointment_repo,
            settings_repo,
        }
    }

    /// Horário de funcionamento vigente: o configurado em settings,
    /// ou o padrão do estúdio quando não há configuração.
    async fn current_week_hours(&self) -> Result<WeekHours, AppError> {
        let week = self
            .settings_repo
            .get()
            .await?
            .map(|settings| WeekHours::from_settings(&settings.opening_hours))
            .unwrap_or_default();

        Ok(week)
    }

    /// Calcula as vagas livres de um serviço em uma data. Leitura pura:
    /// o resultado reflete o estado da agenda no momento da consulta.
    pub async fn available_slots(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<AvailabilityResponse, AppError> {
        let service = self
            .service_repo
            .find_by_id(&self.pool, service_id)
            .await?
            .filter(|s| s.active)
            .ok_or(AppError::InvalidService)?;

        let week = self.current_week_hours().await?;
        let day = week.for_weekday(date.weekday());
        let candidates = candidate_slots(day, service.duration_minutes);

        let occupied: HashSet<String> = self
            .appointment_repo
            .occupied_times(service_id, date)
            .await?
            .into_iter()
            .collect();

        Ok(AvailabilityResponse {
            date,
            service_id,
            available_times: filter_available(candidates, &occupied),
        })
    }

    /// Admissão pública: valida o serviço, checa o conflito, resolve o
    /// cliente pelo telefone e grava, tudo na mesma transação. A corrida
    /// entre duas requisições é fechada pelo índice único parcial do banco.
    pub async fn create_appointment(
        &self,
        payload: CreateAppointmentPayload,
    ) -> Result<AppointmentDetail, AppError> {
        if !is_valid_time_label(&payload.time) {
            return Err(AppError::InvalidTimeLabel);
        }

        let mut tx = self.pool.begin().await?;

        let service = self
            .service_repo
            .find_by_id(&mut *tx, payload.service_id)
            .await?
            .filter(|s| s.active)
            .ok_or(AppError::InvalidService)?;

        if self
            .appointment_repo
            .slot_is_taken(&mut *tx, service.id, payload.date, &payload.time)
            .await?
        {
            return Err(AppError::SlotTaken);
        }

        let client = self
            .resolve_client_by_phone(&mut tx, &payload.name, &payload.phone)
            .await?;

        let appointment = self
            .appointment_repo
            .insert(
                &mut *tx,
                client.id,
                service.id,
                payload.date,
                &payload.time,
                AppointmentStatus::Scheduled,
                payload.notes.as_deref(),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Agendamento criado: {} em {} às {}",
            appointment.id,
            appointment.date,
            appointment.time
        );

        self.appointment_repo
            .find_detail(appointment.id)
            .await?
            .ok_or(AppError::NotFound("Agendamento não encontrado"))
    }

    /// Admissão manual (painel): aceita um cliente já conhecido por id,
    /// ou cria pelo telefone como na admissão pública; o status inicial
    /// pode ser diferente de "scheduled".
    pub async fn create_manual_appointment(
        &self,
        payload: ManualAppointmentPayload,
    ) -> Result<AppointmentDetail, AppError> {
        if !is_valid_time_label(&payload.time) {
            return Err(AppError::InvalidTimeLabel);
        }

        let mut tx = self.pool.begin().await?;

        let service = self
            .service_repo
            .find_by_id(&mut *tx, payload.service_id)
            .await?
            .filter(|s| s.active)
            .ok_or(AppError::InvalidService)?;

        if self
            .appointment_repo
            .slot_is_taken(&mut *tx, service.id, payload.date, &payload.time)
            .await?
        {
            return Err(AppError::SlotTaken);
        }

        let client_id = match payload.client_id {
            Some(client_id) => {
                self.client_repo
                    .find_by_id(client_id)
                    .await?
                    .ok_or(AppError::NotFound("Cliente não encontrado"))?
                    .id
            }
            None => {
                let (name, phone) = match (payload.name.as_deref(), payload.phone.as_deref()) {
                    (Some(name), Some(phone)) if !name.is_empty() && phone.len() >= 8 => {
                        (name, phone)
                    }
                    _ => return Err(field_error("clientId", "Informe clientId ou (name e phone)")),
                };

                self.resolve_client_by_phone(&mut tx, name, phone).await?.id
            }
        };

        let appointment = self
            .appointment_repo
            .insert(
                &mut *tx,
                client_id,
                service.id,
                payload.date,
                &payload.time,
                payload.status.unwrap_or(AppointmentStatus::Scheduled),
                payload.notes.as_deref(),
            )
            .await?;

        tx.commit().await?;

        self.appointment_repo
            .find_detail(appointment.id)
            .await?
            .ok_or(AppError::NotFound("Agendamento não encontrado"))
    }

    /// Busca o cliente pelo telefone; cria se não existir. Nome divergente
    /// é sobrescrito pelo informado (último escritor vence).
    async fn resolve_client_by_phone(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        name: &str,
        phone: &str,
    ) -> Result<Client, AppError> {
        match self.client_repo.find_by_phone(&mut **tx, phone).await? {
            Some(client) if client.name != name => {
                self.client_repo.update_name(&mut **tx, client.id, name).await
            }
            Some(client) => Ok(client),
            None => self.client_repo.create(&mut **tx, name, phone).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(open: u32, close: u32) -> DayHours {
        DayHours { open, close }
    }

    #[test]
    fn exemplo_de_150_minutos() {
        // Duração 150min entre 9h e 18h: 4 vagas espaçadas de 2h30
        let slots = candidate_slots(hours(9, 18), 150);
        assert_eq!(slots, vec!["09:00", "11:30", "14:00", "16:30"]);
    }

    #[test]
    fn divisao_exata_preenche_o_dia() {
        // (18 - 9) * 60 / 90 = 6 vagas exatas
        let slots = candidate_slots(hours(9, 18), 90);
        assert_eq!(slots.len(), 6);
        assert_eq!(slots.first().map(String::as_str), Some("09:00"));
        assert_eq!(slots.last().map(String::as_str), Some("16:30"));
    }

    #[test]
    fn vagas_consecutivas_diferem_pela_duracao() {
        let to_minutes = |label: &str| -> i32 {
            let (h, m) = label.split_at(2);
            h.parse::<i32>().unwrap() * 60 + m[1..].parse::<i32>().unwrap()
        };

        for duration in [30, 45, 60, 150] {
            let slots = candidate_slots(hours(7, 18), duration);
            for pair in slots.windows(2) {
                assert_eq!(to_minutes(&pair[1]) - to_minutes(&pair[0]), duration);
            }
        }
    }

    #[test]
    fn dia_fechado_nao_tem_vagas() {
        assert!(candidate_slots(DayHours::CLOSED, 60).is_empty());
        assert!(candidate_slots(hours(9, 9), 60).is_empty());
    }

    #[test]
    fn duracao_invalida_nao_tem_vagas() {
        assert!(candidate_slots(hours(9, 18), 0).is_empty());
        assert!(candidate_slots(hours(9, 18), -30).is_empty());
    }

    #[test]
    fn filtro_remove_ocupados_e_preserva_ordem() {
        let candidates = candidate_slots(hours(9, 18), 150);
        let occupied: HashSet<String> = ["11:30".to_string()].into();

        let available = filter_available(candidates, &occupied);
        assert_eq!(available, vec!["09:00", "14:00", "16:30"]);
    }

    #[test]
    fn filtro_nunca_devolve_horario_ocupado() {
        let candidates = candidate_slots(hours(7, 18), 60);
        let occupied: HashSet<String> =
            candidates.iter().step_by(2).cloned().collect();

        let available = filter_available(candidates, &occupied);
        assert!(available.iter().all(|time| !occupied.contains(time)));
    }

    #[test]
    fn rotulos_de_horario_validos_e_invalidos() {
        assert!(is_valid_time_label("00:00"));
        assert!(is_valid_time_label("14:30"));
        assert!(is_valid_time_label("23:59"));

        assert!(!is_valid_time_label("24:00"));
        assert!(!is_valid_time_label("12:60"));
        assert!(!is_valid_time_label("9:30"));
        assert!(!is_valid_time_label("09h30"));
        assert!(!is_valid_time_label("09:3a"));
        assert!(!is_valid_time_label(""));
    }
}
