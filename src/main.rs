// src/main.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tokio::net::TcpListener;
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use studio_agenda_backend::config::AppState;
use studio_agenda_backend::middleware::auth::auth_guard;
use studio_agenda_backend::{docs, handlers};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route(
            "/me",
            get(handlers::auth::get_me).layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        );

    // Serviços: leitura pública, escrita protegida
    let service_admin_routes = Router::new()
        .route("/", post(handlers::services::create_service))
        .route(
            "/{id}",
            put(handlers::services::update_service).delete(handlers::services::delete_service),
        )
        .route("/{id}/activate", axum::routing::patch(handlers::services::activate_service))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let service_routes = Router::new()
        .route("/", get(handlers::services::list_services))
        .route("/{id}", get(handlers::services::get_service))
        .merge(service_admin_routes);

    // Clientes: tudo protegido
    let client_routes = Router::new()
        .route(
            "/",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/{id}",
            get(handlers::clients::get_client).put(handlers::clients::update_client),
        )
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Agendamentos: disponibilidade e criação públicas, painel protegido
    let appointment_admin_routes = Router::new()
        .route("/", get(handlers::appointments::list_appointments))
        .route("/manual", post(handlers::appointments::create_manual))
        .route("/{id}", get(handlers::appointments::get_appointment))
        .route("/{id}/status", axum::routing::patch(handlers::appointments::update_status))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let appointment_routes = Router::new()
        .route("/availability", get(handlers::appointments::availability))
        .route("/", post(handlers::appointments::create_appointment))
        .merge(appointment_admin_routes);

    // Settings: leitura pública parcial, o resto protegido
    let settings_admin_routes = Router::new()
        .route(
            "/",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let settings_routes = Router::new()
        .route("/public", get(handlers::settings::get_public_settings))
        .merge(settings_admin_routes);

    // Galeria do site
    let gallery_routes = Router::new()
        .route("/", get(handlers::gallery::list_gallery))
        .route(
            "/",
            post(handlers::gallery::add_gallery_image).layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth_guard),
            ),
        )
        .route(
            "/{id}",
            delete(handlers::gallery::delete_gallery_image).layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth_guard),
            ),
        );

    let service_image_routes = Router::new()
        .route("/service/{service_id}", get(handlers::gallery::list_service_images))
        .route(
            "/",
            post(handlers::gallery::add_service_image).layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth_guard),
            ),
        )
        .route(
            "/{id}",
            delete(handlers::gallery::delete_service_image).layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth_guard),
            ),
        );

    // Depoimentos: formulário e envio públicos, gestão protegida
    let testimonial_admin_routes = Router::new()
        .route("/", get(handlers::testimonials::list_all))
        .route(
            "/generate-link/{appointment_id}",
            post(handlers::testimonials::generate_link),
        )
        .route("/link-info/{appointment_id}", get(handlers::testimonials::link_info))
        .route("/{id}", delete(handlers::testimonials::delete_testimonial))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let testimonial_routes = Router::new()
        .route("/published", get(handlers::testimonials::list_published))
        .route("/public/{unique_link}", get(handlers::testimonials::form_info))
        .route("/submit/{unique_link}", post(handlers::testimonials::submit))
        .merge(testimonial_admin_routes);

    let cors = build_cors(&app_state.cors_origin);

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/services", service_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/appointments", appointment_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/gallery", gallery_routes)
        .nest("/api/service-images", service_image_routes)
        .nest("/api/testimonials", testimonial_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}

// CORS_ORIGIN "*" libera geral; qualquer outro valor restringe à origem do site
fn build_cors(origin: &str) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
    ];

    if origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origin = origin
            .parse::<HeaderValue>()
            .expect("CORS_ORIGIN inválida");
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(Any)
    }
}
