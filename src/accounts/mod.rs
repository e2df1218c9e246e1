use crate::models::{User, UserSession};
use crate::store::{
    from_document, to_document, BackendError, CollectionName, DocumentStore, FindOrInsert, Query,
    StoreError,
};
use thiserror::Error;
use tracing::{info, warn};

/// Storage key remembering the signed-in user between runs. It sits in the
/// reserved namespace so no collection can share it.
pub const CURRENT_USER_KEY: &str = "__current_user";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("a user with email '{0}' already exists")]
    DuplicateUser(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to access the saved session")]
    Session(#[source] BackendError),

    #[error("saved session is malformed")]
    MalformedSession(#[source] serde_json::Error),
}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Sign-up / sign-in flow layered on the `users` collection.
///
/// Uniqueness of emails is checked here, not by the store.
#[derive(Clone)]
pub struct AccountService {
    store: DocumentStore,
}

impl AccountService {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    pub async fn signup(&self, email: &str, password: &str, name: &str) -> AuthResult<UserSession> {
        let user = User {
            id: String::new(),
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        };

        let outcome = self
            .store
            .collection(CollectionName::Users)
            .find_one_or_insert(&Query::new().eq("email", email), to_document(&user)?)
            .await?;

        let user: User = match outcome {
            FindOrInsert::Found(_) => {
                warn!("Signup rejected, email already registered: {}", email);
                return Err(AuthError::DuplicateUser(email.to_string()));
            }
            FindOrInsert::Inserted(inserted) => from_document(inserted.inserted_doc)?,
        };

        info!("Created account for {}", user.email);
        self.start_session(UserSession::from(&user)).await
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthResult<UserSession> {
        let found: Option<User> = self
            .store
            .collection(CollectionName::Users)
            .find_one_as(&Query::new().eq("email", email).eq("password", password))
            .await?;

        match found {
            Some(user) => {
                info!("Signed in {}", user.email);
                self.start_session(UserSession::from(&user)).await
            }
            None => Err(AuthError::InvalidCredentials),
        }
    }

    /// Session saved by the last signup or login, if any
    pub async fn current_session(&self) -> AuthResult<Option<UserSession>> {
        let raw = self
            .store
            .backend()
            .get_item(CURRENT_USER_KEY)
            .await
            .map_err(AuthError::Session)?;
        raw.map(|raw| serde_json::from_str(&raw).map_err(AuthError::MalformedSession))
            .transpose()
    }

    pub async fn logout(&self) -> AuthResult<()> {
        self.store
            .backend()
            .remove_item(CURRENT_USER_KEY)
            .await
            .map_err(AuthError::Session)?;
        info!("Signed out");
        Ok(())
    }

    async fn start_session(&self, session: UserSession) -> AuthResult<UserSession> {
        let raw = serde_json::to_string(&session).map_err(AuthError::MalformedSession)?;
        self.store
            .backend()
            .set_item(CURRENT_USER_KEY, &raw)
            .await
            .map_err(AuthError::Session)?;
        Ok(session)
    }
}
