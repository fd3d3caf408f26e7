use anyhow::Context;
use lettre::{
  SmtpTransport, Transport, message::header::ContentType,
  transport::smtp::authentication::Credentials,
};

use crate::infrastructure::config::MailConfig;

/// SMTP sender for OTP emails
pub struct EmailOtpSender {
  mailer: SmtpTransport,
  from: String,
}

impl EmailOtpSender {
  /// Builds the transport from the mail configuration
  pub fn new(config: &MailConfig) -> anyhow::Result<Self> {
    let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

    let mailer = SmtpTransport::relay(&config.smtp_host)
      .context("invalid SMTP host")?
      .port(config.smtp_port)
      .credentials(creds)
      .build();

    Ok(Self {
      mailer,
      from: format!("{} <{}>", config.from_name, config.from_address),
    })
  }

  /// Sends the OTP email. The SMTP transport is blocking, so the send
  /// runs on the blocking thread pool.
  pub async fn send(&self, to: &str, code: &str, display_name: &str) -> anyhow::Result<()> {
    let email = lettre::Message::builder()
      .from(self.from.parse().context("invalid from address")?)
      .to(to.parse().context("invalid recipient address")?)
      .subject("Your verification code")
      .header(ContentType::TEXT_PLAIN)
      .body(format!(
        "Hello {},\n\nYour verification code is {}. It expires in 10 minutes.\n\nIf you did not request this code, you can ignore this message.",
        display_name, code
      ))?;

    let mailer = self.mailer.clone();
    tokio::task::spawn_blocking(move || mailer.send(&email))
      .await
      .context("email send task failed")?
      .context("SMTP send failed")?;

    Ok(())
  }
}
