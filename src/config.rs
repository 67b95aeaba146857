// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        AppointmentRepository, ClientRepository, GalleryRepository, ServiceRepository,
        SettingsRepository, TestimonialRepository, UserRepository,
    },
    services::{AuthService, SchedulingService, TestimonialService},
};

// O estado compartilhado, acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub cors_origin: String,

    pub auth_service: AuthService,
    pub scheduling_service: SchedulingService,
    pub testimonial_service: TestimonialService,

    // CRUDs simples falam direto com o repositório
    pub service_repo: ServiceRepository,
    pub client_repo: ClientRepository,
    pub appointment_repo: AppointmentRepository,
    pub settings_repo: SettingsRepository,
    pub gallery_repo: GalleryRepository,
    pub testimonial_repo: TestimonialRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let cors_origin = env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".to_string());

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let service_repo = ServiceRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let appointment_repo = AppointmentRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());
        let gallery_repo = GalleryRepository::new(db_pool.clone());
        let testimonial_repo = TestimonialRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret);
        let scheduling_service = SchedulingService::new(
            db_pool.clone(),
            service_repo.clone(),
            client_repo.clone(),
            appointment_repo.clone(),
            settings_repo.clone(),
        );
        let testimonial_service = TestimonialService::new(
            testimonial_repo.clone(),
            appointment_repo.clone(),
            frontend_url,
        );

        Ok(Self {
            db_pool,
            cors_origin,
            auth_service,
            scheduling_service,
            testimonial_service,
            service_repo,
            client_repo,
            appointment_repo,
            settings_repo,
            gallery_repo,
            testimonial_repo,
        })
    }
}
