use std::sync::Arc;

use shared::error::AppError;

use crate::core::Config;
use crate::db::DbService;
use crate::notify::{NotificationEvent, Notifier, WebhookNotifier};

/// Shared server state — configuration, database, and the notifier
/// capability, cheaply cloneable into every handler
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub notifier: Arc<dyn Notifier>,
}

impl ServerState {
    /// Open the database and build the outbound notifier
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        let notifier = WebhookNotifier::new(
            config.notify_webhook_url.clone(),
            config.approval_email_url.clone(),
            config.request_timeout_ms,
        )?;

        Ok(Self {
            config: config.clone(),
            db,
            notifier: Arc::new(notifier),
        })
    }

    /// Build a state over an existing database with a custom notifier
    /// (tests inject a no-op or recording notifier here)
    pub fn with_parts(config: Config, db: DbService, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config,
            db,
            notifier,
        }
    }

    /// Fire-and-forget an activity notification. The send runs on its own
    /// task; a failure is the notifier's to log, never the caller's.
    pub fn notify(&self, event: NotificationEvent) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            notifier.send_event(event).await;
        });
    }
}
