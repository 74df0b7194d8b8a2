//! Validate-then-configure sequence behind the form's submit action.

use std::sync::Arc;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{info, warn};

use botpanel_common::models::ActivityKind;
use botpanel_common::{RequestError, ValidationError};

use crate::activity::SharedActivityLog;
use crate::form::ConfigForm;
use crate::gateway::RequestGateway;
use crate::status::{StatusReconciler, StatusSignal};

pub type SharedForm = Arc<Mutex<ConfigForm>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Request(#[from] RequestError),
}

#[derive(Clone)]
pub struct SubmissionWorkflow {
    gateway: RequestGateway,
    reconciler: StatusReconciler,
    activity: SharedActivityLog,
}

impl SubmissionWorkflow {
    pub fn new(gateway: RequestGateway, reconciler: StatusReconciler, activity: SharedActivityLog) -> Self {
        Self { gateway, reconciler, activity }
    }

    /// Runs one submission and returns the configured subreddit.
    ///
    /// Authenticate and set-target go out one after the other; set-target is
    /// never sent unless authenticate succeeded. Request failures are already
    /// in the activity feed when this returns.
    pub async fn submit(&self, form: &SharedForm) -> Result<String, SubmitError> {
        let validated = form.lock().validate();
        let config = match validated {
            Ok(config) => config,
            Err(err) => {
                warn!("Submission rejected, missing: {:?}", err.missing);
                self.activity
                    .lock()
                    .push(ActivityKind::Validation, "Validation Error", err.to_string());
                return Err(err.into());
            }
        };

        info!("Configuring bot for r/{} as {}", config.subreddit, config.username);

        if let Err(err) = self.gateway.authenticate(&config).await {
            self.reconciler.apply(StatusSignal::ConfigureFailed);
            return Err(err.into());
        }
        if let Err(err) = self.gateway.set_target(&config).await {
            self.reconciler.apply(StatusSignal::ConfigureFailed);
            return Err(err.into());
        }

        form.lock().clear_secrets();
        self.reconciler.apply(StatusSignal::Configured);
        self.activity.lock().push(
            ActivityKind::Success,
            "Bot Configured",
            format!("Bot configured successfully for r/{}", config.subreddit),
        );

        Ok(config.subreddit.clone())
    }
}
