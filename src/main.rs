use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::info;

use daifugo_server::app_state::AppState;
use daifugo_server::config::ServerConfig;
use daifugo_server::services::rooms::Rooms;
use daifugo_server::{routes, telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    let bind = (config.host.clone(), config.port);
    let rooms = Arc::new(Rooms::new(config));
    let app_state = web::Data::new(AppState::new(rooms));

    info!(host = %bind.0, port = bind.1, "starting daifugo server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
