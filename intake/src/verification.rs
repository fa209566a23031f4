//! Optional phone verification, offered before submitting a survey that
//! carries a phone number.

use intake_types::{RemoteStore, VerifiedIdentity};

use crate::notice::Notice;

/// Length of the texted one-time code.
pub const CODE_LENGTH: usize = 6;

const TITLE: &str = "Phone Verification";

pub const SEND_FAILED: &str = "Failed to send verification code. Please try again.";
pub const CODE_INCOMPLETE: &str = "Please enter a 6-digit verification code";
pub const CODE_INVALID: &str = "Invalid verification code. Please try again.";
pub const CODE_NOT_SENT: &str = "Please send a verification code first";

/// Where the respondent is in the verification flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStep {
    /// Confirm the number and request a code.
    Phone,
    /// A code was sent; waiting for the respondent to type it.
    Otp,
    /// The backend accepted the code.
    Verified,
}

/// One run of the phone verification flow.
///
/// Skipping is decided by the owner: dropping this value abandons the flow.
#[derive(Debug, Clone)]
pub struct PhoneVerification {
    phone: String,
    step: VerificationStep,
    code: String,
    identity: Option<VerifiedIdentity>,
}

impl PhoneVerification {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            step: VerificationStep::Phone,
            code: String::new(),
            identity: None,
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn step(&self) -> VerificationStep {
        self.step
    }

    /// The code typed so far.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn identity(&self) -> Option<&VerifiedIdentity> {
        self.identity.as_ref()
    }

    /// Replace the typed code, keeping only digits and at most six of them.
    pub fn enter_code(&mut self, raw: &str) {
        self.code = sanitize_code(raw);
    }

    /// Ask the backend to text a code. Moves `Phone` to `Otp` on success.
    ///
    /// Also used to resend from `Otp`. Does nothing once verified.
    pub async fn send_code<R: RemoteStore + ?Sized>(&mut self, remote: &R) -> Result<(), Notice> {
        if self.step == VerificationStep::Verified {
            return Ok(());
        }
        match remote.send_otp(&self.phone).await {
            Ok(()) => {
                tracing::debug!(phone = %self.phone, "verification code sent");
                self.step = VerificationStep::Otp;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "failed to send verification code");
                Err(Notice::error(TITLE, SEND_FAILED))
            }
        }
    }

    /// Request a fresh code while waiting in `Otp`.
    pub async fn resend<R: RemoteStore + ?Sized>(&mut self, remote: &R) -> Result<(), Notice> {
        if self.step != VerificationStep::Otp {
            return Err(Notice::validation(CODE_NOT_SENT));
        }
        self.send_code(remote).await
    }

    /// Check the typed code with the backend.
    ///
    /// A code that is not exactly six digits is refused without a remote
    /// call. A refused code keeps the flow in `Otp` with the code intact.
    pub async fn verify_code<R: RemoteStore + ?Sized>(
        &mut self,
        remote: &R,
    ) -> Result<VerifiedIdentity, Notice> {
        if let Some(identity) = &self.identity {
            return Ok(identity.clone());
        }
        if self.step != VerificationStep::Otp {
            return Err(Notice::validation(CODE_NOT_SENT));
        }
        if self.code.len() != CODE_LENGTH {
            return Err(Notice::validation(CODE_INCOMPLETE));
        }

        match remote.verify_otp(&self.phone, &self.code).await {
            Ok(identity) => {
                tracing::info!(phone = %self.phone, "phone number verified");
                self.step = VerificationStep::Verified;
                self.identity = Some(identity.clone());
                Ok(identity)
            }
            Err(error) => {
                tracing::warn!(%error, "verification code rejected");
                Err(Notice::error(TITLE, CODE_INVALID))
            }
        }
    }
}

/// Keep digits only, truncated to [`CODE_LENGTH`].
pub fn sanitize_code(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(CODE_LENGTH)
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::recording::RecordingRemote;

    #[rstest]
    #[case("123456", "123456")]
    #[case("12 34 56", "123456")]
    #[case("1234567890", "123456")]
    #[case("ab12-c3", "123")]
    #[case("", "")]
    fn code_is_sanitized(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitize_code(raw), expected);
    }

    #[tokio::test]
    async fn send_then_verify() {
        let remote = RecordingRemote::new().with_identity("user-1");
        let mut flow = PhoneVerification::new("+15550100");

        flow.send_code(&remote).await.unwrap();
        assert_eq!(flow.step(), VerificationStep::Otp);

        flow.enter_code("123456");
        let identity = flow.verify_code(&remote).await.unwrap();
        assert_eq!(identity.as_str(), "user-1");
        assert_eq!(flow.step(), VerificationStep::Verified);
        assert_eq!(remote.verified_codes(), vec![("+15550100".to_string(), "123456".to_string())]);
    }

    #[tokio::test]
    async fn failed_send_stays_on_phone() {
        let remote = RecordingRemote::new().failing_send();
        let mut flow = PhoneVerification::new("+15550100");

        let notice = flow.send_code(&remote).await.unwrap_err();
        assert_eq!(notice.message, SEND_FAILED);
        assert_eq!(flow.step(), VerificationStep::Phone);
    }

    #[tokio::test]
    async fn short_code_never_reaches_the_backend() {
        let remote = RecordingRemote::new();
        let mut flow = PhoneVerification::new("+15550100");
        flow.send_code(&remote).await.unwrap();

        flow.enter_code("123");
        let notice = flow.verify_code(&remote).await.unwrap_err();
        assert_eq!(notice.message, CODE_INCOMPLETE);
        assert!(remote.verified_codes().is_empty());
    }

    #[tokio::test]
    async fn rejected_code_keeps_otp_and_code() {
        let remote = RecordingRemote::new().failing_verify();
        let mut flow = PhoneVerification::new("+15550100");
        flow.send_code(&remote).await.unwrap();
        flow.enter_code("654321");

        let notice = flow.verify_code(&remote).await.unwrap_err();
        assert_eq!(notice.message, CODE_INVALID);
        assert_eq!(flow.step(), VerificationStep::Otp);
        assert_eq!(flow.code(), "654321");
    }

    #[tokio::test]
    async fn resend_only_from_otp() {
        let remote = RecordingRemote::new();
        let mut flow = PhoneVerification::new("+15550100");
        assert!(flow.resend(&remote).await.is_err());

        flow.send_code(&remote).await.unwrap();
        flow.resend(&remote).await.unwrap();
        assert_eq!(remote.sent_codes().len(), 2);
    }
}
