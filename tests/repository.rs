// Testes de integração contra o Postgres: exercitam as garantias que
// vivem no banco (índice parcial de vagas, unicidade de telefone,
// transição única do depoimento). `#[sqlx::test]` cria um banco por
// teste e aplica as migrações de ./migrations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use studio_agenda_backend::common::error::AppError;
use studio_agenda_backend::db::{
    AppointmentRepository, ClientRepository, ServiceRepository, SettingsRepository,
    TestimonialRepository,
};
use studio_agenda_backend::models::appointment::{
    AppointmentStatus, CreateAppointmentPayload,
};
use studio_agenda_backend::models::service::Service;
use studio_agenda_backend::models::testimonial::{SubmitTestimonialPayload, TestimonialStatus};
use studio_agenda_backend::services::{SchedulingService, TestimonialService};

fn scheduling(pool: &PgPool) -> SchedulingService {
    SchedulingService::new(
        pool.clone(),
        ServiceRepository::new(pool.clone()),
        ClientRepository::new(pool.clone()),
        AppointmentRepository::new(pool.clone()),
        SettingsRepository::new(pool.clone()),
    )
}

fn testimonials(pool: &PgPool) -> TestimonialService {
    TestimonialService::new(
        TestimonialRepository::new(pool.clone()),
        AppointmentRepository::new(pool.clone()),
        "http://localhost:8080".to_string(),
    )
}

async fn seed_service(pool: &PgPool) -> Service {
    ServiceRepository::new(pool.clone())
        .create("Design de sobrancelhas", None, 90, Decimal::new(12000, 2), true)
        .await
        .unwrap()
}

fn booking(service: &Service, name: &str, phone: &str, time: &str) -> CreateAppointmentPayload {
    CreateAppointmentPayload {
        name: name.to_string(),
        phone: phone.to_string(),
        service_id: service.id,
        date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
        time: time.to_string(),
        notes: None,
    }
}

#[sqlx::test]
async fn agendar_o_mesmo_horario_duas_vezes_conflita(pool: PgPool) {
    let service = seed_service(&pool).await;
    let scheduling = scheduling(&pool);

    scheduling
        .create_appointment(booking(&service, "Maria", "11999998888", "14:30"))
        .await
        .unwrap();

    let err = scheduling
        .create_appointment(booking(&service, "Joana", "11988887777", "14:30"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::SlotTaken));
}

#[sqlx::test]
async fn insercao_concorrente_bate_no_indice_parcial(pool: PgPool) {
    // Pula a pré-checagem e insere direto: é o caminho da corrida em que
    // as duas requisições passaram pela checagem ao mesmo tempo.
    let service = seed_service(&pool).await;
    let clients = ClientRepository::new(pool.clone());
    let appointments = AppointmentRepository::new(pool.clone());

    let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
    let a = clients.create(&pool, "Maria", "11999998888").await.unwrap();
    let b = clients.create(&pool, "Joana", "11988887777").await.unwrap();

    appointments
        .insert(&pool, a.id, service.id, date, "09:00", AppointmentStatus::Scheduled, None)
        .await
        .unwrap();

    let err = appointments
        .insert(&pool, b.id, service.id, date, "09:00", AppointmentStatus::Scheduled, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::SlotTaken));
}

#[sqlx::test]
async fn horario_cancelado_pode_ser_reagendado(pool: PgPool) {
    let service = seed_service(&pool).await;
    let scheduling = scheduling(&pool);
    let appointments = AppointmentRepository::new(pool.clone());

    let first = scheduling
        .create_appointment(booking(&service, "Maria", "11999998888", "14:30"))
        .await
        .unwrap();

    appointments
        .update_status(first.appointment.id, AppointmentStatus::Canceled)
        .await
        .unwrap();

    // A vaga voltou a existir: o índice parcial ignora cancelados
    let second = scheduling
        .create_appointment(booking(&service, "Joana", "11988887777", "14:30"))
        .await
        .unwrap();

    assert_eq!(second.appointment.time, "14:30");
    assert_ne!(second.appointment.id, first.appointment.id);
}

#[sqlx::test]
async fn horario_ocupado_some_da_disponibilidade(pool: PgPool) {
    let service = seed_service(&pool).await;
    let scheduling = scheduling(&pool);
    let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();

    scheduling
        .create_appointment(booking(&service, "Maria", "11999998888", "08:30"))
        .await
        .unwrap();

    let availability = scheduling.available_slots(service.id, date).await.unwrap();
    assert!(!availability.available_times.contains(&"08:30".to_string()));
    assert!(availability.available_times.contains(&"07:00".to_string()));
}

#[sqlx::test]
async fn segundo_envio_de_depoimento_falha_e_nao_altera_nada(pool: PgPool) {
    let service = seed_service(&pool).await;
    let scheduling = scheduling(&pool);
    let testimonials = testimonials(&pool);
    let repo = TestimonialRepository::new(pool.clone());

    let appointment = scheduling
        .create_appointment(booking(&service, "Maria", "11999998888", "14:30"))
        .await
        .unwrap();

    let (link, created) = testimonials.generate_link(appointment.appointment.id).await.unwrap();
    assert!(created);

    let published = testimonials
        .submit(
            &link.unique_link,
            SubmitTestimonialPayload {
                rating: 5,
                text: "Atendimento maravilhoso, super recomendo!".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(published.status, TestimonialStatus::Published);

    let err = testimonials
        .submit(
            &link.unique_link,
            SubmitTestimonialPayload {
                rating: 1,
                text: "Mudei de ideia, foi péssimo!".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::TestimonialAlreadySubmitted));

    // O primeiro envio permanece intacto
    let stored = repo.find_by_link(&link.unique_link).await.unwrap().unwrap();
    assert_eq!(stored.rating, 5);
    assert_eq!(stored.text, "Atendimento maravilhoso, super recomendo!");
}

#[sqlx::test]
async fn gerar_link_duas_vezes_devolve_o_mesmo_token(pool: PgPool) {
    let service = seed_service(&pool).await;
    let scheduling = scheduling(&pool);
    let testimonials = testimonials(&pool);

    let appointment = scheduling
        .create_appointment(booking(&service, "Maria", "11999998888", "14:30"))
        .await
        .unwrap();

    let (first, created_first) = testimonials.generate_link(appointment.appointment.id).await.unwrap();
    let (second, created_second) = testimonials.generate_link(appointment.appointment.id).await.unwrap();

    assert!(created_first);
    assert!(!created_second);
    assert_eq!(first.unique_link, second.unique_link);
}

#[sqlx::test]
async fn telefone_duplicado_vira_conflito(pool: PgPool) {
    let clients = ClientRepository::new(pool.clone());

    clients.create(&pool, "Maria", "11999998888").await.unwrap();
    let err = clients.create(&pool, "Outra Maria", "11999998888").await.unwrap_err();

    assert!(matches!(err, AppError::PhoneAlreadyExists));
}

#[sqlx::test]
async fn busca_trata_curinga_como_literal(pool: PgPool) {
    let clients = ClientRepository::new(pool.clone());

    clients.create(&pool, "Maria da Silva", "11999998888").await.unwrap();
    clients.create(&pool, "Promoção 100%", "11988887777").await.unwrap();

    let page = clients.list_paginated(1, 20, "%").await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "Promoção 100%");
}
