use actix_web::{web, App, HttpServer};
use sevens_server::config::ServerConfig;
use sevens_server::state::app_state::AppState;
use sevens_server::{routes, telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: via docker-compose env_file or docker run --env-file
    // - Local dev: source env files manually (e.g., set -a; . ./.env; set +a)
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };
    let host = config.host.clone();
    let port = config.port;

    let app_state = match AppState::new(config) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("failed to build application state: {err}");
            std::process::exit(1);
        }
    };

    tracing::info!(host = %host, port, "starting sevens server");

    let data = web::Data::new(app_state);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
