pub mod cli;
pub mod config;
pub mod global;
pub mod notify;
pub mod summary;
pub mod upload;

pub use notify::{DismissReason, Notification, NotificationQueue, Severity};
pub use summary::SummaryModal;
pub use upload::{UploadController, UploadKind, UploadOutcome};
