use actix_web::{post, web, HttpRequest, HttpResponse};
use log::{info, warn};
use serde::Deserialize;
use session_manager::Flash;

use super::navigation::{
    is_xhr, list_path, not_found_location, parse_list_id, parse_todo_id, record_outcome, redirect,
};
use crate::dto::{ListDetailDTO, TodoFormDTO};
use crate::error::AppError;
use crate::middleware::SessionId;
use crate::server::AppState;

/// Configure todo routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add_todo)
        .service(destroy_todo)
        .service(update_todo);
}

#[derive(Debug, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub todo: String,
}

#[derive(Debug, Deserialize)]
pub struct TodoStatusForm {
    #[serde(default)]
    pub completed: String,
}

impl TodoStatusForm {
    /// Only the literal `true` marks a todo completed
    fn is_completed(&self) -> bool {
        self.completed == "true"
    }
}

/// POST /lists/{list_id}/todos - Add a todo to a list
#[post("/lists/{list_id}/todos")]
pub async fn add_todo(
    app_state: web::Data<AppState>,
    session_id: SessionId,
    path: web::Path<String>,
    form: web::Form<TodoForm>,
) -> Result<HttpResponse, AppError> {
    let raw_list_id = path.into_inner();
    let form = form.into_inner();
    let added = app_state
        .sessions
        .with_session(session_id.as_str(), |session| {
            let result = parse_list_id(&raw_list_id).and_then(|list_id| {
                session
                    .store
                    .add_todo(list_id, &form.todo)
                    .map(|todo| (list_id, todo.id))
            });
            record_outcome(session, &result, "The todo is successfully added.");
            result.map_err(|err| {
                let list = parse_list_id(&raw_list_id)
                    .and_then(|id| session.store.get_list(id).map(ListDetailDTO::from))
                    .ok();
                (err, list)
            })
        })
        .await?;

    match added {
        Ok((list_id, todo_id)) => {
            info!("Added todo {} to list {}", todo_id, list_id);
            Ok(redirect(&list_path(list_id)))
        }
        Err((err, Some(list))) if err.is_validation() => {
            warn!("Rejected todo for list {}: {}", list.id, err);
            Ok(HttpResponse::UnprocessableEntity().json(TodoFormDTO {
                flash: Flash::error(err.to_string()),
                todo: form.todo,
                list,
            }))
        }
        Err((err, _)) => {
            warn!("Cannot add todo to list '{}': {}", raw_list_id, err);
            Ok(redirect(&not_found_location(&err, &raw_list_id)))
        }
    }
}

/// POST /lists/{list_id}/todos/{id}/destroy - Delete a todo
#[post("/lists/{list_id}/todos/{id}/destroy")]
pub async fn destroy_todo(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    session_id: SessionId,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let xhr = is_xhr(&req);
    let (raw_list_id, raw_todo_id) = path.into_inner();
    let deleted = app_state
        .sessions
        .with_session(session_id.as_str(), |session| {
            let result = parse_list_id(&raw_list_id).and_then(|list_id| {
                session.store.get_list(list_id)?;
                let todo_id = parse_todo_id(&raw_todo_id)?;
                session
                    .store
                    .delete_todo(list_id, todo_id)
                    .map(|todo| (list_id, todo))
            });
            if !xhr {
                record_outcome(session, &result, "The todo has been deleted.");
            }
            result
        })
        .await?;

    match deleted {
        Ok((list_id, todo)) => {
            info!("Deleted todo {} '{}' from list {}", todo.id, todo.name, list_id);
            if xhr {
                Ok(HttpResponse::NoContent().finish())
            } else {
                Ok(redirect(&list_path(list_id)))
            }
        }
        Err(err) => {
            warn!(
                "Cannot delete todo '{}' of list '{}': {}",
                raw_todo_id, raw_list_id, err
            );
            if xhr {
                Err(err.into())
            } else {
                Ok(redirect(&not_found_location(&err, &raw_list_id)))
            }
        }
    }
}

/// POST /lists/{list_id}/todos/{id} - Mark a todo completed or not
#[post("/lists/{list_id}/todos/{id}")]
pub async fn update_todo(
    app_state: web::Data<AppState>,
    session_id: SessionId,
    path: web::Path<(String, String)>,
    form: web::Form<TodoStatusForm>,
) -> Result<HttpResponse, AppError> {
    let (raw_list_id, raw_todo_id) = path.into_inner();
    let completed = form.is_completed();
    let updated = app_state
        .sessions
        .with_session(session_id.as_str(), |session| {
            let result = parse_list_id(&raw_list_id).and_then(|list_id| {
                session.store.get_list(list_id)?;
                let todo_id = parse_todo_id(&raw_todo_id)?;
                session
                    .store
                    .set_todo_completed(list_id, todo_id, completed)
                    .map(|todo| (list_id, todo.id))
            });
            record_outcome(session, &result, "The todo has been updated.");
            result
        })
        .await?;

    match updated {
        Ok((list_id, todo_id)) => {
            info!(
                "Set todo {} of list {} completed={}",
                todo_id, list_id, completed
            );
            Ok(redirect(&list_path(list_id)))
        }
        Err(err) => {
            warn!(
                "Cannot update todo '{}' of list '{}': {}",
                raw_todo_id, raw_list_id, err
            );
            Ok(redirect(&not_found_location(&err, &raw_list_id)))
        }
    }
}
