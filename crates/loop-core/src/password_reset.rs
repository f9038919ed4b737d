//! # Password Reset Flow
//!
//! The OTP-gated "forgot password" flow, as an explicit state machine.
//!
//! ## States
//! ```text
//! ┌─────────────────┐  request_otp(email)   POST /user/reset-otp { email }
//! │  AwaitingEmail  │ ────────────────────► (server emails the OTP and
//! └────────┬────────┘                        echoes it back on success)
//!          │ otp_issued(otp)
//!          ▼
//! ┌─────────────────┐  verify(otp, password, confirm)
//! │   AwaitingOtp   │ ────────────────────► POST /user/reset-pass
//! │  email, otp     │   ✗ InvalidOtp          { email, password }
//! └────────┬────────┘   ✗ PasswordMismatch
//!          │ complete()
//!          ▼
//! ┌─────────────────┐
//! │    Completed    │  → redirect to /login
//! └─────────────────┘
//! ```
//!
//! A failed verification leaves the flow in `AwaitingOtp` so the user can
//! retype the code.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation::{validate_email, validate_otp, validate_password};

/// Body of `POST /user/reset-otp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OtpRequest {
    pub email: String,
}

/// Body of `POST /user/reset-pass`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PasswordResetRequest {
    pub email: String,
    pub password: String,
}

/// Where the reset flow currently is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PasswordReset {
    #[default]
    AwaitingEmail,
    AwaitingOtp {
        email: String,
        otp: String,
    },
    Completed {
        email: String,
    },
}

impl PasswordReset {
    pub fn new() -> Self {
        PasswordReset::AwaitingEmail
    }

    fn label(&self) -> &'static str {
        match self {
            PasswordReset::AwaitingEmail => "awaiting email",
            PasswordReset::AwaitingOtp { .. } => "awaiting OTP",
            PasswordReset::Completed { .. } => "completed",
        }
    }

    fn wrong_state(&self, operation: &'static str) -> CoreError {
        CoreError::InvalidResetState {
            current: self.label(),
            operation,
        }
    }

    /// Validates the email and returns the OTP request body.
    ///
    /// Allowed from `AwaitingEmail` and `AwaitingOtp` (asking again resends
    /// the code and drops the previous one).
    pub fn request_otp(&mut self, email: &str) -> CoreResult<OtpRequest> {
        if matches!(self, PasswordReset::Completed { .. }) {
            return Err(self.wrong_state("request an OTP"));
        }

        validate_email(email)?;

        let email = email.trim().to_string();
        debug!(email = %email, "requesting password reset OTP");

        *self = PasswordReset::AwaitingEmail;
        Ok(OtpRequest { email })
    }

    /// Records the OTP the server issued for `email`.
    pub fn otp_issued(&mut self, email: &str, otp: &str) -> CoreResult<()> {
        if !matches!(self, PasswordReset::AwaitingEmail) {
            return Err(self.wrong_state("accept an OTP"));
        }

        validate_email(email)?;
        let otp = validate_otp(otp)?;

        *self = PasswordReset::AwaitingOtp {
            email: email.trim().to_string(),
            otp,
        };
        Ok(())
    }

    /// Checks the typed OTP and new password.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidOtp`] when the code doesn't match
    /// - [`CoreError::PasswordMismatch`] when the confirmation differs
    /// - [`CoreError::Validation`] when the password is unacceptable
    pub fn verify(
        &self,
        submitted_otp: &str,
        password: &str,
        confirm_password: &str,
    ) -> CoreResult<PasswordResetRequest> {
        let PasswordReset::AwaitingOtp { email, otp } = self else {
            return Err(self.wrong_state("verify an OTP"));
        };

        if submitted_otp.trim() != otp.as_str() {
            return Err(CoreError::InvalidOtp);
        }

        if password != confirm_password {
            return Err(CoreError::PasswordMismatch);
        }

        validate_password(password)?;

        Ok(PasswordResetRequest {
            email: email.clone(),
            password: password.to_string(),
        })
    }

    /// Marks the reset as done once the server accepted the new password.
    pub fn complete(&mut self) -> CoreResult<()> {
        let email = match self {
            PasswordReset::AwaitingOtp { email, .. } => std::mem::take(email),
            _ => return Err(self.wrong_state("complete")),
        };

        info!(email = %email, "password reset completed");
        *self = PasswordReset::Completed { email };
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, PasswordReset::Completed { .. })
    }
}
