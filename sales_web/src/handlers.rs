//! Page handlers

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use std::collections::HashMap;
use std::sync::Arc;
use tower_sessions::Session;
use tracing::{error, info};

use sales_model::pipeline::build_model;
use sales_model::predict::predict_from_form;
use sales_model::{DataLoader, ModelBlob, SalesError};

use crate::auth::{self, MODEL_KEY};
use crate::error::Result;
use crate::state::AppState;
use crate::views;

pub async fn home(session: Session) -> Result<Response> {
    let Some(user) = auth::current_user(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let flash = auth::take_flash(&session).await?;
    Ok(Html(views::home_page(&user, flash.as_deref())).into_response())
}

pub async fn sales_data(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response> {
    let Some(user) = auth::current_user(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let table = DataLoader::from_csv(&state.config.detail_data_path)
        .and_then(|table| table.to_rows());
    match table {
        Ok((headers, rows)) => {
            Ok(Html(views::sales_page(&user, &headers, &rows)).into_response())
        }
        Err(err) => flash_and_home(&session, &format!("Failed to load sales data: {}", err)).await,
    }
}

pub async fn model_summary(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response> {
    let Some(user) = auth::current_user(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    match cached_model(&state, &session).await? {
        Ok(blob) => Ok(Html(views::summary_page(&user, &blob)).into_response()),
        Err(err) => {
            flash_and_home(&session, &format!("Model could not be built: {}", err)).await
        }
    }
}

pub async fn predict_page(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response> {
    let Some(user) = auth::current_user(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    match cached_model(&state, &session).await? {
        Ok(blob) => Ok(Html(views::predict_page(
            &user, &state.spec, &blob, None, None, None,
        ))
        .into_response()),
        Err(err) => {
            flash_and_home(&session, &format!("Model could not be built: {}", err)).await
        }
    }
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response> {
    let Some(user) = auth::current_user(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let blob = match cached_model(&state, &session).await? {
        Ok(blob) => blob,
        Err(err) => {
            return flash_and_home(&session, &format!("Model could not be built: {}", err)).await
        }
    };

    // Validation problems render inline; the cached model is kept.
    let page = match predict_from_form(&blob.model, &state.spec, &form) {
        Ok((prediction, inputs)) => views::predict_page(
            &user,
            &state.spec,
            &blob,
            Some(prediction),
            Some(&inputs),
            None,
        ),
        Err(err) => {
            views::predict_page(&user, &state.spec, &blob, None, None, Some(&err.to_string()))
        }
    };

    Ok(Html(page).into_response())
}

/// The session's cached model, fitting and caching it first if absent.
///
/// Fitting is synchronous within the request, per the single
/// request-response execution model.
async fn cached_model(
    state: &AppState,
    session: &Session,
) -> Result<std::result::Result<ModelBlob, SalesError>> {
    if let Some(blob) = session.get::<String>(MODEL_KEY).await? {
        match ModelBlob::from_blob(&blob) {
            Ok(model) => return Ok(Ok(model)),
            Err(err) => error!("discarding unreadable cached model: {}", err),
        }
    }

    match build_model(&state.config.sales_data_path, &state.spec) {
        Ok(model) => {
            let blob = match model.to_blob() {
                Ok(blob) => blob,
                Err(err) => return Ok(Err(err)),
            };
            session.insert(MODEL_KEY, blob).await?;
            info!(
                "fitted model on {} observations with {} features",
                model.model.summary().n_obs,
                model.trained_features.len()
            );
            Ok(Ok(model))
        }
        Err(err) => Ok(Err(err)),
    }
}

async fn flash_and_home(session: &Session, message: &str) -> Result<Response> {
    auth::set_flash(session, message).await?;
    Ok(Redirect::to("/").into_response())
}
