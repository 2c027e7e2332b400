//! Login and logout against the fixed credential set

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;
use tracing::info;

use crate::error::Result;
use crate::state::AppState;
use crate::views;

/// Session key holding the logged-in user's display name.
pub const USER_KEY: &str = "user";
/// Session key holding the serialized fitted model.
pub const MODEL_KEY: &str = "fitted_model";
/// Session key holding a one-shot flash message.
pub const FLASH_KEY: &str = "flash";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

/// Display name of the logged-in user, if any.
pub async fn current_user(session: &Session) -> Result<Option<String>> {
    Ok(session.get::<String>(USER_KEY).await?)
}

pub async fn set_flash(session: &Session, message: &str) -> Result<()> {
    session.insert(FLASH_KEY, message.to_string()).await?;
    Ok(())
}

/// Take the pending flash message, clearing it.
pub async fn take_flash(session: &Session) -> Result<Option<String>> {
    Ok(session.remove::<String>(FLASH_KEY).await?)
}

pub async fn login_page(session: Session) -> Result<Response> {
    if current_user(&session).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let flash = take_flash(&session).await?;
    Ok(Html(views::login_page(flash.as_deref())).into_response())
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match state.config.users.get(&form.username) {
        Some(user) if user.password == form.password => {
            session.insert(USER_KEY, user.display_name.clone()).await?;
            set_flash(&session, "Login successful.").await?;
            info!("user '{}' logged in", form.username);
            Ok(Redirect::to("/").into_response())
        }
        _ => {
            info!("failed login attempt for '{}'", form.username);
            Ok(Html(views::login_page(Some(
                "Login failed. Check your username and password.",
            )))
            .into_response())
        }
    }
}

/// Logout clears the cached model along with the authenticated flag,
/// leaving a confirmation message for the login page.
pub async fn logout(session: Session) -> Result<Redirect> {
    session.remove::<String>(USER_KEY).await?;
    session.remove::<String>(MODEL_KEY).await?;
    set_flash(&session, "You have been logged out.").await?;
    Ok(Redirect::to("/login"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn logout_clears_login_and_confirms() {
        let session = session();
        session
            .insert(USER_KEY, "Sales Admin".to_string())
            .await
            .unwrap();
        session
            .insert(MODEL_KEY, "cached".to_string())
            .await
            .unwrap();

        logout(session.clone()).await.unwrap();

        assert_eq!(current_user(&session).await.unwrap(), None);
        assert_eq!(session.get::<String>(MODEL_KEY).await.unwrap(), None);
        assert_eq!(
            take_flash(&session).await.unwrap().as_deref(),
            Some("You have been logged out.")
        );
    }
}
