//! Login, signup, rename and logout.

use league_core::error::{DomainError, LeagueResult};
use league_core::types::{Credentials, Session};
use league_events::UsernameUpdated;
use tracing::info;

use crate::context::AppContext;

/// Shortest accepted password.
pub const MIN_PASSWORD_LEN: usize = 8;

pub struct Auth<'a> {
    ctx: &'a AppContext,
}

impl<'a> Auth<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Exchange credentials for tokens and store the session.
    pub async fn login(&self, username: &str, password: &str) -> LeagueResult<Session> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::Required("Username").into());
        }
        if password.is_empty() {
            return Err(DomainError::Required("Password").into());
        }

        let credentials = Credentials::new(username, password);
        let tokens = self.ctx.api().obtain_token(&credentials).await?;
        self.ctx.session().save_login(&tokens, username)?;
        Ok(self.ctx.current_session())
    }

    /// Create an account, then log straight in.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> LeagueResult<Session> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::Required("Username").into());
        }
        if password != confirm_password {
            return Err(DomainError::PasswordMismatch.into());
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            }
            .into());
        }

        self.ctx
            .api()
            .register(&Credentials::new(username, password))
            .await?;
        info!("Registered {}", username);
        self.login(username, password).await
    }

    /// Change the username of the logged in user.
    pub async fn rename(&self, new_username: &str) -> LeagueResult<String> {
        let token = self.ctx.require_token()?;
        let new_username = new_username.trim();
        if new_username.is_empty() {
            return Err(DomainError::Required("Username").into());
        }
        if self.ctx.session().username().as_deref() == Some(new_username) {
            return Err(DomainError::SameUsername.into());
        }

        let result = self.ctx.api().update_username(&token, new_username).await;
        let stored = self.ctx.check(result)?;
        self.ctx.session().set_username(&stored)?;
        self.ctx
            .username_bus()
            .publish(&UsernameUpdated::new(stored.as_str()));
        info!("Renamed to {}", stored);
        Ok(stored)
    }

    pub fn logout(&self) {
        self.ctx.teardown();
    }
}
