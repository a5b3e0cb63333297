use actix_web::{get, post, web, HttpRequest, HttpResponse};
use log::{info, warn};
use serde::Deserialize;
use session_manager::Flash;

use super::navigation::{
    is_xhr, list_path, parse_list_id, record_outcome, redirect, LISTS_PATH,
};
use crate::dto::{ListDetailDTO, ListFormDTO, ListPageDTO, ListSummaryDTO, ListsPageDTO};
use crate::error::AppError;
use crate::middleware::SessionId;
use crate::server::AppState;

/// Configure list routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(list_lists)
        .service(create_list)
        .service(show_list)
        .service(update_list)
        .service(destroy_list)
        .service(complete_all_todos);
}

#[derive(Debug, Deserialize)]
pub struct ListNameForm {
    #[serde(default)]
    pub list_name: String,
}

/// GET /lists - Overview of every list, incomplete ones first
#[get("/lists")]
pub async fn list_lists(
    app_state: web::Data<AppState>,
    session_id: SessionId,
) -> Result<HttpResponse, AppError> {
    let page = app_state
        .sessions
        .with_session(session_id.as_str(), |session| {
            let flash = session.take_flash();
            ListsPageDTO::new(session.store.lists(), flash)
        })
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// POST /lists - Create a list
#[post("/lists")]
pub async fn create_list(
    app_state: web::Data<AppState>,
    session_id: SessionId,
    form: web::Form<ListNameForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let created = app_state
        .sessions
        .with_session(session_id.as_str(), |session| {
            let result = session
                .store
                .create_list(&form.list_name)
                .map(|list| (list.id, list.name.clone()));
            record_outcome(session, &result, "The list has been created.");
            result
        })
        .await?;

    match created {
        Ok((id, name)) => {
            info!("Created list {} '{}'", id, name);
            Ok(redirect(LISTS_PATH))
        }
        Err(err) => {
            warn!("Rejected list name: {}", err);
            Ok(HttpResponse::UnprocessableEntity().json(ListFormDTO {
                flash: Flash::error(err.to_string()),
                list_name: form.list_name,
                list: None,
            }))
        }
    }
}

/// GET /lists/{id} - One list with its todos
#[get("/lists/{id}")]
pub async fn show_list(
    app_state: web::Data<AppState>,
    session_id: SessionId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw_id = path.into_inner();
    let page = app_state
        .sessions
        .with_session(session_id.as_str(), |session| {
            let result = parse_list_id(&raw_id)
                .and_then(|id| session.store.get_list(id).map(ListDetailDTO::from));
            match result {
                Ok(list) => Ok(ListPageDTO {
                    list,
                    flash: session.take_flash(),
                }),
                Err(err) => {
                    session.set_error(err.to_string());
                    Err(err)
                }
            }
        })
        .await?;

    match page {
        Ok(page) => Ok(HttpResponse::Ok().json(page)),
        Err(err) => {
            warn!("Cannot show list '{}': {}", raw_id, err);
            Ok(redirect(LISTS_PATH))
        }
    }
}

/// POST /lists/{id} - Rename a list
#[post("/lists/{id}")]
pub async fn update_list(
    app_state: web::Data<AppState>,
    session_id: SessionId,
    path: web::Path<String>,
    form: web::Form<ListNameForm>,
) -> Result<HttpResponse, AppError> {
    let raw_id = path.into_inner();
    let form = form.into_inner();
    let renamed = app_state
        .sessions
        .with_session(session_id.as_str(), |session| {
            let result = parse_list_id(&raw_id).and_then(|id| {
                session
                    .store
                    .rename_list(id, &form.list_name)
                    .map(|list| list.id)
            });
            record_outcome(session, &result, "The list has been updated.");
            result.map_err(|err| {
                let current = parse_list_id(&raw_id)
                    .and_then(|id| session.store.get_list(id).map(ListSummaryDTO::from))
                    .ok();
                (err, current)
            })
        })
        .await?;

    match renamed {
        Ok(id) => {
            info!("Renamed list {} to '{}'", id, form.list_name.trim());
            Ok(redirect(&list_path(id)))
        }
        Err((err, current)) if err.is_validation() => {
            warn!("Rejected new name for list '{}': {}", raw_id, err);
            Ok(HttpResponse::UnprocessableEntity().json(ListFormDTO {
                flash: Flash::error(err.to_string()),
                list_name: form.list_name,
                list: current,
            }))
        }
        Err((err, _)) => {
            warn!("Cannot rename list '{}': {}", raw_id, err);
            Ok(redirect(LISTS_PATH))
        }
    }
}

/// POST /lists/{id}/destroy - Delete a list
#[post("/lists/{id}/destroy")]
pub async fn destroy_list(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    session_id: SessionId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let xhr = is_xhr(&req);
    let raw_id = path.into_inner();
    let deleted = app_state
        .sessions
        .with_session(session_id.as_str(), |session| {
            let result = parse_list_id(&raw_id).and_then(|id| session.store.delete_list(id));
            if !xhr {
                record_outcome(session, &result, "The list has been deleted.");
            }
            result
        })
        .await?;

    match deleted {
        Ok(list) => {
            info!("Deleted list {} '{}'", list.id, list.name);
            if xhr {
                Ok(HttpResponse::Ok().body(LISTS_PATH))
            } else {
                Ok(redirect(LISTS_PATH))
            }
        }
        Err(err) => {
            warn!("Cannot delete list '{}': {}", raw_id, err);
            if xhr {
                Err(err.into())
            } else {
                Ok(redirect(LISTS_PATH))
            }
        }
    }
}

/// POST /lists/{id}/complete_all - Mark every todo of a list completed
#[post("/lists/{id}/complete_all")]
pub async fn complete_all_todos(
    app_state: web::Data<AppState>,
    session_id: SessionId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw_id = path.into_inner();
    let completed = app_state
        .sessions
        .with_session(session_id.as_str(), |session| {
            let result = parse_list_id(&raw_id)
                .and_then(|id| session.store.complete_all_todos(id).map(|list| list.id));
            record_outcome(session, &result, "All todos have been completed.");
            result
        })
        .await?;

    match completed {
        Ok(id) => {
            info!("Completed all todos of list {}", id);
            Ok(redirect(&list_path(id)))
        }
        Err(err) => {
            warn!("Cannot complete list '{}': {}", raw_id, err);
            Ok(redirect(LISTS_PATH))
        }
    }
}
