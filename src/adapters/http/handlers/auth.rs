use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    ForgotPasswordApiResponse, ForgotPasswordRequest, LoginRequest, LoginResponse,
    OtpSentResponse, RegisterRequest, RequestOtpRequest, SuccessResponse, VerifyOtpRequest,
    VerifyOtpResponse,
  },
  errors::ApiError,
};
use crate::application::auth::{
  ForgotPasswordCommand, ForgotPasswordResponse as UseCaseForgotResponse, ForgotPasswordUseCase,
  LoginUserCommand, LoginUserResponse as UseCaseLoginResponse, LoginUserUseCase,
  RegisterUserCommand, RegisterUserUseCase, RequestOtpCommand, RequestOtpUseCase,
  VerifyOtpCommand, VerifyOtpUseCase,
};
use crate::domain::auth::value_objects::Channel;

/// Extract the client IP from the request, honoring reverse-proxy
/// headers via actix's connection info
pub(super) fn extract_ip_address(req: &HttpRequest) -> Option<String> {
  req
    .connection_info()
    .realip_remote_addr()
    .map(|addr| addr.split(':').next().unwrap_or(addr).to_string())
}

/// Handler for user/company registration
///
/// POST /api/auth/register
/// Body: RegisterRequest (JSON)
/// Response: SuccessResponse (JSON) with status 201; no token
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = RegisterUserCommand {
    full_name: request.full_name.clone(),
    email: request.email.clone(),
    phone: request.phone.clone(),
    company_name: request.company_name.clone(),
    password: request.password.clone(),
    ip_address: extract_ip_address(&http_req),
  };

  use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(SuccessResponse::new("Registration successful")))
}

/// Handler for the credential step of login
///
/// POST /api/auth/login
/// Body: LoginRequest (JSON)
/// Response: LoginResponse (JSON) with status 200. Login is not
/// complete: either an OTP was sent or a company must be selected.
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = LoginUserCommand {
    identifier: request.identifier.clone(),
    password: request.password.clone(),
    ip_address: extract_ip_address(&http_req),
  };

  let response = use_case.execute(command).await?;

  let api_response = match response {
    UseCaseLoginResponse::OtpSent {
      user_id,
      company_id,
      channel,
      masked_identifier,
    } => LoginResponse::OtpSent {
      success: true,
      user_id,
      company_id,
      channel,
      masked_identifier,
    },
    UseCaseLoginResponse::SelectCompany { user_id, companies } => LoginResponse::SelectCompany {
      success: true,
      user_id,
      companies,
    },
  };

  Ok(HttpResponse::Ok().json(api_response))
}

/// Handler for an explicit OTP request after company selection, also
/// used for resends
///
/// POST /api/auth/request-otp
/// Body: RequestOtpRequest (JSON)
/// Response: OtpSentResponse (JSON) with status 200
pub async fn request_otp_handler(
  request: web::Json<RequestOtpRequest>,
  use_case: web::Data<Arc<RequestOtpUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = RequestOtpCommand {
    user_id: request.user_id,
    company_id: request.company_id,
    identifier: request.identifier.clone(),
    ip_address: extract_ip_address(&http_req),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(OtpSentResponse {
    success: true,
    channel: response.channel,
    masked_identifier: response.masked_identifier,
  }))
}

/// Handler for the OTP step of login
///
/// POST /api/auth/verify-otp
/// Body: VerifyOtpRequest (JSON)
/// Response: VerifyOtpResponse (JSON) with status 200 and the session
/// token
pub async fn verify_otp_handler(
  request: web::Json<VerifyOtpRequest>,
  use_case: web::Data<Arc<VerifyOtpUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = VerifyOtpCommand {
    user_id: request.user_id,
    code: request.otp_code.clone(),
    ip_address: extract_ip_address(&http_req),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(VerifyOtpResponse {
    success: true,
    access_token: response.access_token,
    token_type: "bearer",
    redirect: response.redirect,
  }))
}

/// Maps the wire-level step number onto a typed reset command
fn forgot_password_command(
  request: &ForgotPasswordRequest,
  ip_address: Option<String>,
) -> Result<ForgotPasswordCommand, ApiError> {
  match request.step {
    1 => {
      let method = match request.method.as_deref() {
        Some("email") => Channel::Email,
        Some("sms") => Channel::Sms,
        Some(other) => {
          return Err(ApiError::Validation(format!(
            "Unknown delivery method: {}",
            other
          )));
        }
        None => return Err(ApiError::Validation("Missing required field: method".to_string())),
      };
      Ok(ForgotPasswordCommand::Initiate {
        contact: request.contact.clone(),
        method,
        ip_address,
      })
    }
    2 => {
      let code = request
        .otp_code
        .clone()
        .ok_or_else(|| ApiError::Validation("Missing required field: otp_code".to_string()))?;
      Ok(ForgotPasswordCommand::Verify {
        contact: request.contact.clone(),
        code,
      })
    }
    3 => Ok(ForgotPasswordCommand::Companies {
      contact: request.contact.clone(),
    }),
    4 => {
      let company_id = request
        .company_id
        .ok_or_else(|| ApiError::Validation("Missing required field: company_id".to_string()))?;
      let new_password = request.new_password.clone().ok_or_else(|| {
        ApiError::Validation("Missing required field: new_password".to_string())
      })?;
      Ok(ForgotPasswordCommand::Commit {
        contact: request.contact.clone(),
        company_id,
        new_password,
        ip_address,
      })
    }
    other => Err(ApiError::Validation(format!(
      "Invalid reset step: {}",
      other
    ))),
  }
}

/// Handler for the four-step password reset conversation
///
/// POST /api/auth/forgot-password
/// Body: ForgotPasswordRequest (JSON); the `step` field selects the
/// operation
/// Response: step-specific JSON with status 200
pub async fn forgot_password_handler(
  request: web::Json<ForgotPasswordRequest>,
  use_case: web::Data<Arc<ForgotPasswordUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let ip_address = extract_ip_address(&http_req);
  let command = forgot_password_command(&request, ip_address)?;

  let response = use_case.execute(command).await?;

  let api_response = match response {
    UseCaseForgotResponse::CodeSent { masked_contact } => ForgotPasswordApiResponse::CodeSent {
      success: true,
      masked_contact,
    },
    UseCaseForgotResponse::CodeVerified => ForgotPasswordApiResponse::Message {
      success: true,
      message: "OTP verified".to_string(),
    },
    UseCaseForgotResponse::Companies { companies } => ForgotPasswordApiResponse::Companies {
      success: true,
      companies,
    },
    UseCaseForgotResponse::PasswordChanged => ForgotPasswordApiResponse::Message {
      success: true,
      message: "Password changed successfully".to_string(),
    },
  };

  Ok(HttpResponse::Ok().json(api_response))
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;
  use uuid::Uuid;

  fn reset_request(step: u8) -> ForgotPasswordRequest {
    ForgotPasswordRequest {
      step,
      contact: "test@example.com".to_string(),
      method: None,
      otp_code: None,
      company_id: None,
      new_password: None,
    }
  }

  #[test]
  fn test_extract_ip_address_from_peer() {
    let req = TestRequest::default()
      .peer_addr("192.168.1.10:51234".parse().unwrap())
      .to_http_request();

    assert_eq!(extract_ip_address(&req), Some("192.168.1.10".to_string()));
  }

  #[test]
  fn test_forgot_password_step1_requires_method() {
    let result = forgot_password_command(&reset_request(1), None);
    assert!(result.is_err());

    let mut request = reset_request(1);
    request.method = Some("email".to_string());
    assert!(matches!(
      forgot_password_command(&request, None),
      Ok(ForgotPasswordCommand::Initiate {
        method: Channel::Email,
        ..
      })
    ));
  }

  #[test]
  fn test_forgot_password_step2_requires_code() {
    let result = forgot_password_command(&reset_request(2), None);
    assert!(result.is_err());

    let mut request = reset_request(2);
    request.otp_code = Some("123456".to_string());
    assert!(matches!(
      forgot_password_command(&request, None),
      Ok(ForgotPasswordCommand::Verify { .. })
    ));
  }

  #[test]
  fn test_forgot_password_step4_requires_company_and_password() {
    let mut request = reset_request(4);
    request.company_id = Some(Uuid::new_v4());
    assert!(forgot_password_command(&request, None).is_err());

    request.new_password = Some("brand-new-pw".to_string());
    assert!(matches!(
      forgot_password_command(&request, None),
      Ok(ForgotPasswordCommand::Commit { .. })
    ));
  }

  #[test]
  fn test_forgot_password_unknown_step_rejected() {
    assert!(forgot_password_command(&reset_request(5), None).is_err());
  }
}
