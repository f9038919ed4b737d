//! # Account Commands
//!
//! Session bookkeeping and the "forgot password" flow.
//!
//! `login` records the user the login endpoint returned; it does not
//! authenticate anyone. `reset_password` walks the OTP state machine with
//! everything supplied up front and returns both requests it would send.

use loop_core::password_reset::{OtpRequest, PasswordReset, PasswordResetRequest};
use loop_core::validation::validate_entity_id;
use serde::Serialize;
use tracing::{debug, info};

use super::ApiCall;
use crate::error::ApiError;
use crate::state::{ConfigState, SessionStore, UserSession};

pub const RESET_OTP_PATH: &str = "/user/reset-otp";
pub const RESET_PASSWORD_PATH: &str = "/user/reset-pass";

/// Signs a user in.
///
/// ## Arguments
/// * `store_id` - Set for vendor accounts, enables the vendor commands
pub fn login(
    store: &SessionStore,
    user_id: &str,
    store_id: Option<&str>,
    store_name: Option<&str>,
) -> Result<UserSession, ApiError> {
    debug!(user_id, ?store_id, "login command");

    validate_entity_id("userId", user_id).map_err(|e| ApiError::validation(e.to_string()))?;
    if let Some(store_id) = store_id {
        validate_entity_id("storeId", store_id)
            .map_err(|e| ApiError::validation(e.to_string()))?;
    }

    let user = UserSession {
        user_id: user_id.trim().to_string(),
        store_id: store_id.map(|s| s.trim().to_string()),
        store_name: store_name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };

    store.save_user(&user)?;
    info!(user_id = %user.user_id, vendor = user.store_id.is_some(), "signed in");
    Ok(user)
}

/// Forgets the signed-in user. The cart is kept.
pub fn logout(store: &SessionStore) -> Result<(), ApiError> {
    debug!("logout command");
    store.clear_user()?;
    Ok(())
}

/// Everything typed into the reset pages.
#[derive(Debug, Clone)]
pub struct ResetPasswordInput<'a> {
    pub email: &'a str,
    /// The code the server issued (echoed back by `/user/reset-otp`)
    pub issued_otp: &'a str,
    /// The code the user typed
    pub otp: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

/// The two requests of a successful reset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordResponse {
    pub otp_request: ApiCall<OtpRequest>,
    pub reset_request: ApiCall<PasswordResetRequest>,
}

/// Runs the password reset flow end to end.
///
/// ## Errors
/// - `VALIDATION_ERROR` for a bad email, wrong OTP, mismatched or weak password
pub fn reset_password(
    config: &ConfigState,
    input: &ResetPasswordInput<'_>,
) -> Result<ResetPasswordResponse, ApiError> {
    debug!(email = input.email, "reset_password command");

    let mut flow = PasswordReset::new();

    let otp_request = flow.request_otp(input.email)?;
    flow.otp_issued(&otp_request.email, input.issued_otp)?;
    let reset_request = flow.verify(input.otp, input.password, input.confirm_password)?;
    flow.complete()?;

    Ok(ResetPasswordResponse {
        otp_request: ApiCall::post(config.endpoint(RESET_OTP_PATH), otp_request),
        reset_request: ApiCall::post(config.endpoint(RESET_PASSWORD_PATH), reset_request),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    fn input<'a>(otp: &'a str, password: &'a str, confirm: &'a str) -> ResetPasswordInput<'a> {
        ResetPasswordInput {
            email: "ayesha@loopwear.pk",
            issued_otp: "482913",
            otp,
            password,
            confirm_password: confirm,
        }
    }

    #[test]
    fn test_login_and_logout() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        let user = login(&store, " u-1 ", Some("s-9"), Some("  ")).unwrap();
        assert_eq!(user.user_id, "u-1");
        assert_eq!(user.store_id.as_deref(), Some("s-9"));
        assert!(user.store_name.is_none());
        assert_eq!(store.load_user().unwrap(), Some(user));

        logout(&store).unwrap();
        assert!(store.load_user().unwrap().is_none());
    }

    #[test]
    fn test_login_rejects_blank_user() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        let err = login(&store, "  ", None, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(store.load_user().unwrap().is_none());
    }

    #[test]
    fn test_reset_password() {
        let response = reset_password(
            &ConfigState::default(),
            &input("482913", "n3w-secret", "n3w-secret"),
        )
        .unwrap();

        assert_eq!(
            response.otp_request.endpoint,
            "http://localhost:8000/user/reset-otp"
        );
        assert_eq!(response.reset_request.payload.email, "ayesha@loopwear.pk");
        assert_eq!(response.reset_request.payload.password, "n3w-secret");
    }

    #[test]
    fn test_reset_password_failures() {
        let config = ConfigState::default();

        let err = reset_password(&config, &input("111111", "n3w-secret", "n3w-secret")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Invalid OTP");

        let err = reset_password(&config, &input("482913", "n3w-secret", "other")).unwrap_err();
        assert_eq!(err.message, "Passwords do not match");
    }
}
