//! Confirmation gate consulted before destructive operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Answer of the user to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confirmation {
    Accepted,
    /// Declined, or the prompt was closed.
    Cancelled,
}

/// Asks the user to confirm an action, typically through a modal dialog.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    async fn confirm(&self, message: &str) -> Confirmation;
}

/// Gate answering every prompt the same way. Useful for headless hosts.
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirmation(pub Confirmation);

#[async_trait]
impl ConfirmationGate for FixedConfirmation {
    async fn confirm(&self, _message: &str) -> Confirmation {
        self.0
    }
}
