use std::io;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use log::{error, info};
use session_manager::{MemorySessionStorage, SessionManager};

use crate::config::ServerConfig;
use crate::controllers::{list_controller, system_controller, todo_controller};
use crate::middleware::{SessionMiddleware, TracingMiddleware};

const IDLE_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub struct AppState {
    pub sessions: SessionManager<MemorySessionStorage>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            sessions: SessionManager::new(MemorySessionStorage::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(system_controller::config)
        .configure(list_controller::config)
        .configure(todo_controller::config);
}

/// Periodically discard sessions nobody has used within `max_idle`
fn spawn_idle_sweeper(
    state: web::Data<AppState>,
    max_idle: chrono::Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(IDLE_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(e) = state.sessions.purge_idle(max_idle).await {
                error!("Failed to purge idle sessions: {}", e);
            }
        }
    })
}

pub async fn run(config: ServerConfig) -> io::Result<()> {
    info!("Starting todo web service...");

    let app_state = web::Data::new(AppState::new());
    let sweeper = spawn_idle_sweeper(app_state.clone(), config.idle_timeout());
    let cookie_name = config.cookie_name.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(SessionMiddleware::new(&cookie_name))
            .wrap(TracingMiddleware)
            .configure(app_config)
    })
    .workers(config.workers)
    .bind(config.bind_address())?
    .run();

    info!("Todo web service listening on http://{}", config.bind_address());

    let result = server.await;
    sweeper.abort();
    if let Err(e) = &result {
        error!("Web server error: {}", e);
    }
    result
}
