use actix_web::{get, web, HttpResponse, Responder};

use super::navigation::{redirect, LISTS_PATH};

#[get("/")]
async fn index() -> impl Responder {
    redirect(LISTS_PATH)
}

#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(health_check);
}
