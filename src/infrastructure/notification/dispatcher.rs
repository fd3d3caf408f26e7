use async_trait::async_trait;

use crate::domain::auth::ports::OtpDispatcher;

use super::email_sender::EmailOtpSender;
use super::sms_sender::SmsOtpSender;

/// Routes OTP codes to email or SMS based on the identifier shape.
/// Implements the best-effort delivery contract: failures are logged
/// and reported as `false`, never raised.
pub struct ChannelOtpDispatcher {
  email: EmailOtpSender,
  sms: SmsOtpSender,
}

impl ChannelOtpDispatcher {
  pub fn new(email: EmailOtpSender, sms: SmsOtpSender) -> Self {
    Self { email, sms }
  }
}

#[async_trait]
impl OtpDispatcher for ChannelOtpDispatcher {
  async fn dispatch(&self, identifier: &str, code: &str, display_name: &str) -> bool {
    let result = if identifier.contains('@') {
      self.email.send(identifier, code, display_name).await
    } else {
      self.sms.send(identifier, code).await
    };

    match result {
      Ok(()) => true,
      Err(e) => {
        tracing::warn!("OTP delivery failed: {:#}", e);
        false
      }
    }
  }
}
