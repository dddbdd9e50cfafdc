//! # hub-notify
//!
//! Transactional email for orders, subscriptions, and payment events.
//!
//! Rendering is pure: a [`Notification`] knows its subject, template name,
//! and HTML body. Delivery goes through the [`EmailSender`] trait so a real
//! provider (SendGrid, Mailgun, Resend, ...) can slot in later; the default
//! [`LogEmailSender`] only logs, which is the current behavior. Senders must
//! propagate failures so callers can decide whether delivery is fatal.

mod error;
mod message;
mod sender;
mod templates;

pub use error::{NotifyError, Result};
pub use message::{EmailMessage, Notification};
pub use sender::{EmailSender, LogEmailSender, MemoryEmailSender};
