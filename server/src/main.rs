mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::supabase::{SupabaseClient, UserRecords};

#[tokio::main]
async fn main() {
    // A missing .env file is normal outside local development.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env();
    let port = config.port;

    // Non-fatal: logins answer "unavailable" until Supabase is configured.
    let records: Option<Arc<dyn UserRecords>> = if config.supabase.is_configured() {
        match SupabaseClient::new(&config.supabase) {
            Ok(client) => {
                tracing::info!(url = %config.supabase.url, "supabase client initialized");
                let client: Arc<dyn UserRecords> = Arc::new(client);
                Some(client)
            }
            Err(e) => {
                tracing::warn!(error = %e, "supabase client unavailable — logins disabled");
                None
            }
        }
    } else {
        tracing::warn!(
            has_url = config.supabase.has_url(),
            has_key = config.supabase.has_key(),
            "SUPABASE_URL / SUPABASE_ANON_KEY missing — logins disabled"
        );
        None
    };

    let state = state::AppState::new(config, records);
    let app = match routes::leptos_app(state) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "failed to build application router");
            std::process::exit(1);
        }
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "auth server listening");
    axum::serve(listener, app).await.expect("server failed");
}
