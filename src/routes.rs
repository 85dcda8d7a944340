use actix_web::web;

use crate::health::health;
use crate::ws::session;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .route("/ws", web::get().to(session::upgrade));
}
