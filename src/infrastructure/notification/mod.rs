mod dispatcher;
mod email_sender;
mod sms_sender;

pub use dispatcher::ChannelOtpDispatcher;
pub use email_sender::EmailOtpSender;
pub use sms_sender::{SmsOtpSender, normalize_phone};
