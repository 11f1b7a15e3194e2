//! Notification sink for one-time codes
//!
//! Real delivery (email/SMS) is out of scope; the default sink writes
//! the code to the log. Callers treat sink failure as non-fatal and
//! never run it inside a capacity-affecting transaction.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Outbound channel for one-time codes.
#[async_trait]
pub trait OtpSink: Send + Sync {
    async fn send(&self, email: &str, code: &str) -> Result<(), SinkError>;
}

/// Development sink: the code goes to the log stream.
pub struct LogOtpSink;

#[async_trait]
impl OtpSink for LogOtpSink {
    async fn send(&self, email: &str, code: &str) -> Result<(), SinkError> {
        info!("OTP for {}: {}", email, code);
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Captures dispatched codes for assertions.
    #[derive(Default)]
    pub struct CapturingOtpSink {
        pub sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl OtpSink for CapturingOtpSink {
        async fn send(&self, email: &str, code: &str) -> Result<(), SinkError> {
            self.sent
                .lock()
                .unwrap()
                .push((email.to_string(), code.to_string()));
            Ok(())
        }
    }
}
