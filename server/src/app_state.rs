//! Application state shared across handlers

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::{CredentialStore, PasswordHasher, PgCredentialStore, TokenIssuer, TokenVerifier};
use crate::config::AuthConfig;
use crate::services::{AppointmentService, FileService, OwnerService, PetService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub hasher: PasswordHasher,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
    pub owner_service: Arc<OwnerService>,
    pub pet_service: Arc<PetService>,
    pub appointment_service: Arc<AppointmentService>,
    pub file_service: Arc<FileService>,
}

impl AppState {
    /// Wire every service against one pool.
    pub fn new(pool: PgPool, auth: &AuthConfig, upload_dir: PathBuf) -> Self {
        let credentials: Arc<dyn CredentialStore> = Arc::new(PgCredentialStore::new(pool.clone()));
        Self::with_credentials(pool, auth, upload_dir, credentials)
    }

    /// Same as [`AppState::new`] with a caller-supplied credential store.
    pub fn with_credentials(
        pool: PgPool,
        auth: &AuthConfig,
        upload_dir: PathBuf,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            credentials,
            hasher: PasswordHasher::from_config(auth),
            issuer: Arc::new(TokenIssuer::new(auth)),
            verifier: Arc::new(TokenVerifier::new(auth)),
            owner_service: Arc::new(OwnerService::new(pool.clone())),
            pet_service: Arc::new(PetService::new(pool.clone())),
            appointment_service: Arc::new(AppointmentService::new(pool.clone())),
            file_service: Arc::new(FileService::new(pool, upload_dir)),
        }
    }

    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }
}

impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.verifier.clone()
    }
}

impl FromRef<AppState> for Arc<OwnerService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.owner_service.clone()
    }
}

impl FromRef<AppState> for Arc<PetService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pet_service.clone()
    }
}

impl FromRef<AppState> for Arc<AppointmentService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.appointment_service.clone()
    }
}

impl FromRef<AppState> for Arc<FileService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.file_service.clone()
    }
}
