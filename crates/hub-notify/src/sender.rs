//! Email Delivery

use async_trait::async_trait;
use std::sync::RwLock;

use crate::error::{NotifyError, Result};
use crate::message::EmailMessage;

/// Email delivery trait
///
/// Implementations must return `Err` when the provider fails so callers can
/// decide whether delivery failure is fatal to their own processing.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Logging stub sender: no provider is configured yet, so messages are only
/// logged. Swap for a real provider implementation without touching callers.
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        tracing::info!(
            to = %message.to,
            template = message.template,
            subject = %message.subject,
            "Email would be sent (provider not configured)"
        );
        Ok(())
    }
}

/// In-memory sender (for development and tests): records every message and
/// optionally fails each send.
pub struct MemoryEmailSender {
    sent: RwLock<Vec<EmailMessage>>,
    fail: bool,
}

impl Default for MemoryEmailSender {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEmailSender {
    pub fn new() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
            fail: false,
        }
    }

    /// A sender whose every send fails, for exercising error paths
    pub fn failing() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
            fail: true,
        }
    }

    /// Messages delivered so far
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.read().unwrap().len()
    }
}

#[async_trait]
impl EmailSender for MemoryEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        if self.fail {
            return Err(NotifyError::Delivery("simulated provider outage".into()));
        }

        self.sent.write().unwrap().push(message.clone());
        Ok(())
    }
}
