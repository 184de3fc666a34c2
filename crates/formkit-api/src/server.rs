//! The runnable application.
//!
//! [`FormApp`] ties settings and handler state together and serves the
//! router over TCP.
//!
//! ```no_run
//! use formkit_api::FormApp;
//! use formkit_core::Settings;
//!
//! # async fn example() -> formkit_core::FormResult<()> {
//! let settings = Settings::default();
//! let addr = settings.bind_address();
//! FormApp::from_settings(settings)?.run(&addr).await?;
//! # Ok(())
//! # }
//! ```

use axum::Router;
use formkit_core::{FormError, FormResult, Settings};

use crate::router::build_router;
use crate::state::AppState;

/// The formkit HTTP application.
#[derive(Clone)]
pub struct FormApp {
    settings: Settings,
    state: AppState,
}

impl FormApp {
    /// Creates an application around existing state.
    pub const fn new(settings: Settings, state: AppState) -> Self {
        Self { settings, state }
    }

    /// Resolves the schema named by `settings` and creates an empty store.
    pub fn from_settings(settings: Settings) -> FormResult<Self> {
        let state = AppState::from_settings(&settings)?;
        Ok(Self::new(settings, state))
    }

    /// Returns the settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the handler state.
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Converts the application into an axum router.
    pub fn into_router(self) -> Router {
        build_router(self.state, &self.settings.cors_allowed_origins)
    }

    /// Serves the application on `addr` until Ctrl-C is received.
    pub async fn run(self, addr: &str) -> FormResult<()> {
        let router = self.into_router();
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            FormError::Configuration(format!("Failed to bind to {addr}: {e}"))
        })?;

        tracing::info!("Serving form API at http://{addr}/");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| FormError::Internal(format!("Server error: {e}")))?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

impl std::fmt::Debug for FormApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormApp")
            .field("bind_address", &self.settings.bind_address())
            .field("schema", &self.state.store().schema().title)
            .field("submissions", &self.state.store().len())
            .finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
