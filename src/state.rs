use std::sync::Arc;

use crate::config::{InvitationConfig, UpstreamPolicy};
use crate::github::GitHubClient;
use crate::mail::Mailer;

/// State for the invitation function
#[derive(Clone)]
pub struct InvitationState {
    pub config: Arc<InvitationConfig>,
    pub github: Arc<GitHubClient>,
}

impl InvitationState {
    pub fn new(config: InvitationConfig, github: GitHubClient) -> Self {
        Self {
            config: Arc::new(config),
            github: Arc::new(github),
        }
    }

    pub fn upstream_policy(&self) -> UpstreamPolicy {
        self.config.upstream_policy
    }
}

/// State for the welcome-email function
#[derive(Clone)]
pub struct EmailState {
    pub mailer: Arc<Mailer>,
}

impl EmailState {
    pub fn new(mailer: Mailer) -> Self {
        Self {
            mailer: Arc::new(mailer),
        }
    }
}
