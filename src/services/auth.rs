use std::sync::Arc;

use crate::config::latency::{pause, LatencyProfile};
use crate::models::User;
use crate::services::ids::{IdGenerator, UuidGenerator};
use crate::storage::PersistentStore;
use crate::utils::error::{AppError, AppResult};

/// The signed-in user, handed explicitly to every mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

/// Mock identity provider. Any non-empty credentials are accepted; the
/// resulting user is remembered under the `user` key until logout.
#[derive(Clone)]
pub struct AuthService {
    store: PersistentStore,
    ids: Arc<dyn IdGenerator>,
    latency: LatencyProfile,
}

impl AuthService {
    pub fn new(store: PersistentStore, latency: LatencyProfile) -> Self {
        Self {
            store,
            ids: Arc::new(UuidGenerator),
            latency,
        }
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        require("Email", email)?;
        require("Password", password)?;
        pause(self.latency.auth).await;

        let email = email.trim();
        let user = User {
            id: self.ids.next_id(),
            name: User::name_from_email(email),
            email: email.to_string(),
        };
        self.store.save_user(&user)?;

        tracing::info!(user = %user.id, email = %user.email, "Logged in");
        Ok(Session::new(user))
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<Session> {
        require("Name", name)?;
        require("Email", email)?;
        require("Password", password)?;
        pause(self.latency.auth).await;

        let user = User {
            id: self.ids.next_id(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        };
        self.store.save_user(&user)?;

        tracing::info!(user = %user.id, email = %user.email, "Registered");
        Ok(Session::new(user))
    }

    pub fn logout(&self) -> AppResult<()> {
        self.store.clear_user()?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn current_user(&self) -> AppResult<Option<User>> {
        self.store.load_user()
    }

    pub fn current_session(&self) -> AppResult<Option<Session>> {
        Ok(self.current_user()?.map(Session::new))
    }
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::AuthError(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ids::testing::ScriptedIds;
    use crate::storage::{KeyValueStorage, MemoryStorage};

    fn auth() -> (Arc<MemoryStorage>, AuthService) {
        let medium = Arc::new(MemoryStorage::new());
        let auth = AuthService::new(PersistentStore::new(medium.clone()), LatencyProfile::none())
            .with_id_generator(Arc::new(ScriptedIds::new(&["u-1", "u-2"])));
        (medium, auth)
    }

    #[tokio::test]
    async fn test_login_derives_name_and_persists() {
        let (medium, auth) = auth();

        let session = auth.login("grace@example.edu", "hunter2").await.unwrap();

        assert_eq!(session.user_id(), "u-1");
        assert_eq!(session.user().name, "grace");
        assert_eq!(auth.current_user().unwrap().as_ref(), Some(session.user()));
        assert!(medium.has_item("user").unwrap());
    }

    #[tokio::test]
    async fn test_login_rejects_empty_credentials() {
        let (medium, auth) = auth();

        let err = auth.login("grace@example.edu", "").await.unwrap_err();
        assert_eq!(err.code(), "AUTH_ERROR");
        assert!(auth.login("  ", "pw").await.is_err());
        assert!(medium.is_empty());
    }

    #[tokio::test]
    async fn test_register_uses_supplied_name() {
        let (_, auth) = auth();

        let session = auth
            .register("Grace Hopper", "grace@example.edu", "pw")
            .await
            .unwrap();

        assert_eq!(session.user().name, "Grace Hopper");
        assert_eq!(auth.current_session().unwrap(), Some(session));
    }

    #[tokio::test]
    async fn test_second_login_replaces_user() {
        let (_, auth) = auth();
        auth.login("a@example.edu", "pw").await.unwrap();
        auth.login("b@example.edu", "pw").await.unwrap();

        let user = auth.current_user().unwrap().unwrap();
        assert_eq!(user.id, "u-2");
        assert_eq!(user.name, "b");
    }

    #[tokio::test]
    async fn test_logout_clears_user() {
        let (_, auth) = auth();
        auth.login("a@example.edu", "pw").await.unwrap();

        auth.logout().unwrap();

        assert!(auth.current_user().unwrap().is_none());
        // logging out again is harmless
        auth.logout().unwrap();
    }
}
