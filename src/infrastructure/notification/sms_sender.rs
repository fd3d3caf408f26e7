use anyhow::{Context, bail};
use serde_json::Value;

use crate::infrastructure::config::SmsConfig;

/// Form-POST client for the SMS gateway
pub struct SmsOtpSender {
  client: reqwest::Client,
  config: SmsConfig,
}

impl SmsOtpSender {
  pub fn new(config: SmsConfig) -> Self {
    Self {
      client: reqwest::Client::new(),
      config,
    }
  }

  /// Sends the OTP message. The gateway answers HTTP 200 with a JSON
  /// body; delivery counts as accepted when the body carries
  /// `success: true` or `response_code: 202`.
  pub async fn send(&self, phone: &str, code: &str) -> anyhow::Result<()> {
    let number = normalize_phone(phone, &self.config.country_code);
    let message = format!("Your verification code is {}. It expires in 10 minutes.", code);

    let response = self
      .client
      .post(&self.config.api_url)
      .form(&[
        ("api_key", self.config.api_key.as_str()),
        ("senderid", self.config.sender_id.as_str()),
        ("number", number.as_str()),
        ("message", message.as_str()),
      ])
      .send()
      .await
      .context("SMS gateway request failed")?;

    if !response.status().is_success() {
      bail!("SMS gateway returned HTTP {}", response.status());
    }

    let body: Value = response
      .json()
      .await
      .context("SMS gateway returned a non-JSON body")?;

    let accepted = body["success"].as_bool() == Some(true)
      || body["response_code"].as_i64() == Some(202);
    if !accepted {
      bail!("SMS gateway rejected the message: {}", body);
    }

    Ok(())
  }
}

/// Normalizes a phone number to international format without a plus
/// sign. Local numbers have the trunk `0` replaced by the country
/// code; numbers already starting with the country code pass through.
pub fn normalize_phone(phone: &str, country_code: &str) -> String {
  let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

  if digits.starts_with(country_code) {
    return digits;
  }

  if let Some(rest) = digits.strip_prefix('0') {
    return format!("{}{}", country_code, rest);
  }

  format!("{}{}", country_code, digits)
}
