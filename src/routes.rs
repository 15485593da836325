// src/routes.rs

use axum::{
    Router,
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

fn cors_layer(allowed_origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    Ok(match allowed_origin {
        Some(origin) => cors.allow_origin(origin.parse::<HeaderValue>()?),
        None => cors.allow_origin(Any),
    })
}

pub fn build_router(app_state: AppState) -> anyhow::Result<Router> {
    let cors = cors_layer(app_state.config.cors_allowed_origin.as_deref())?;

    // Rotas públicas de autenticação
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    let catalog_routes = Router::new()
        .route("/offers", get(handlers::catalog::list_offers))
        .route("/branches", get(handlers::catalog::list_branches));

    // Painel administrativo (protegido pelo middleware)
    let admin_routes = Router::new()
        // Ledger
        .route("/ledger/active-counts", get(handlers::dashboard::get_active_counts))
        .route("/ledger/calendar", get(handlers::dashboard::get_calendar))
        .route("/ledger/financials", get(handlers::dashboard::get_financials))
        .route("/analytics", get(handlers::dashboard::get_analytics))
        .route("/leads/view", post(handlers::dashboard::get_day_view))
        // Retenção
        .route("/leads/bulk-status", post(handlers::retention::bulk_status))
        .route("/leads/import", post(handlers::retention::import_leads))
        .route("/leads/{id}/status", post(handlers::retention::change_status))
        .route("/leads/{id}/follow-up", post(handlers::retention::schedule_follow_up))
        .route("/leads/{id}/outcome", post(handlers::retention::record_outcome))
        .route("/leads/{id}/notes", put(handlers::retention::attach_note))
        // Exportação e mensagens
        .route("/leads/{id}/whatsapp", get(handlers::export::whatsapp_link))
        .route("/export/csv", post(handlers::export::export_csv))
        .route("/export/phones", post(handlers::export::copy_phones))
        // Regras de automação
        .route(
            "/automation-rules",
            get(handlers::settings::list_rules).post(handlers::settings::create_rule),
        )
        .route("/automation-rules/{id}", delete(handlers::settings::delete_rule))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        // O próprio handler decide quais ações exigem token
        .route(
            "/api.php",
            get(handlers::action::dispatch).post(handlers::action::dispatch),
        )
        .nest("/api/auth", auth_routes)
        .nest("/api/catalog", catalog_routes)
        .nest("/api/admin", admin_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    Ok(app)
}
