use async_trait::async_trait;

use guide_core::{PhoneNumber, SmsSender};

/// Sender used when no provider is usable; every send fails
#[derive(Debug, Clone, Copy)]
pub struct DisabledSmsSender {
    reason: &'static str,
}

impl DisabledSmsSender {
    pub fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

#[async_trait]
impl SmsSender for DisabledSmsSender {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn send(&self, _to: &PhoneNumber, _message: &str) -> bool {
        tracing::warn!(reason = self.reason, "SMS not sent, sender disabled");
        false
    }
}
