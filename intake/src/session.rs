//! The survey state machine.
//!
//! A [`SurveySession`] owns the answers and the step counter. Every operation
//! returns a [`Transition`] describing what happened; nothing is shown to the
//! respondent from in here.

use intake_types::{
    Field, FieldError, FieldValue, InsertReceipt, RemoteStore, TrackedEvent, VerifiedIdentity,
};

use crate::answers::SurveyAnswers;
use crate::notice::{Celebration, Notice};
use crate::steps::{self, STEP_COUNT, Step};
use crate::submission::{self, SURVEY_TYPE};
use crate::verification::PhoneVerification;

/// The outcome of a session operation.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Transition {
    /// Moved forward to `step`.
    Advanced { step: usize },
    /// Moved back to `step` (stays at 0 on the first step).
    Retreated { step: usize },
    /// The input was refused: a step failed validation, or a verification
    /// code could not be sent or checked. When the answers fail the final
    /// re-check before submission, the session moves back to the first
    /// failing step.
    Rejected(Notice),
    /// The last step passed and a phone number needs verifying (or skipping)
    /// before the survey is submitted.
    VerificationRequired { phone: String },
    /// A verification code was texted.
    CodeSent,
    /// The survey was stored. The session is now complete.
    Submitted {
        receipt: InsertReceipt,
        celebration: Celebration,
    },
    /// Storing the survey failed. The session stays on the last step and
    /// submitting again is allowed.
    SubmissionFailed(Notice),
    /// The survey was already submitted; nothing changed.
    AlreadyComplete,
    /// Phone verification is in progress; navigation waits for it.
    AwaitingVerification,
    /// A verification operation was called with no verification in progress.
    NotVerifying,
}

/// One respondent's walk through the caregiver survey.
pub struct SurveySession<R> {
    remote: R,
    answers: SurveyAnswers,
    step: usize,
    verification: Option<PhoneVerification>,
    verified: Option<VerifiedPhone>,
}

/// An identity together with the phone number it proves ownership of.
struct VerifiedPhone {
    phone: String,
    identity: VerifiedIdentity,
}

impl<R: RemoteStore> SurveySession<R> {
    pub fn new(remote: R) -> Self {
        Self::with_answers(remote, SurveyAnswers::new())
    }

    /// Start a session from pre-filled answers, on the first step.
    pub fn with_answers(remote: R, answers: SurveyAnswers) -> Self {
        Self {
            remote,
            answers,
            step: 0,
            verification: None,
            verified: None,
        }
    }

    /// Index of the current step; equals [`STEP_COUNT`] once submitted.
    pub fn step(&self) -> usize {
        self.step
    }

    /// The current step, or `None` once submitted.
    pub fn current(&self) -> Option<&'static Step> {
        steps::step(self.step)
    }

    pub fn is_complete(&self) -> bool {
        self.step >= STEP_COUNT
    }

    /// Fraction of steps reached, for a progress bar.
    pub fn progress(&self) -> f32 {
        (self.step + 1).min(STEP_COUNT) as f32 / STEP_COUNT as f32
    }

    pub fn answers(&self) -> &SurveyAnswers {
        &self.answers
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// The running verification flow, if any.
    pub fn verification(&self) -> Option<&PhoneVerification> {
        self.verification.as_ref()
    }

    /// The verified identity, if it still belongs to the current phone number.
    pub fn identity(&self) -> Option<&VerifiedIdentity> {
        self.verified.as_ref().map(|v| &v.identity)
    }

    /// Write one answer. No validation happens here.
    ///
    /// Answers are locked while phone verification runs.
    pub fn update_field(&mut self, field: Field, value: impl Into<FieldValue>) -> Result<(), FieldError> {
        if self.verification.is_some() {
            return Err(FieldError::Locked(field));
        }
        self.answers.set(field, value)?;
        self.forget_stale_identity();
        Ok(())
    }

    /// Check or uncheck one option of a multi-select.
    pub fn toggle(&mut self, field: Field, value: &str, checked: bool) -> Result<(), FieldError> {
        if self.verification.is_some() {
            return Err(FieldError::Locked(field));
        }
        self.answers.toggle(field, value, checked)
    }

    /// Drop the verified identity once the phone number no longer matches it.
    fn forget_stale_identity(&mut self) {
        if let Some(verified) = &self.verified
            && self.answers.phone() != Some(verified.phone.as_str())
        {
            tracing::debug!("phone number changed, verified identity dropped");
            self.verified = None;
        }
    }

    /// Validate the current step and move on.
    ///
    /// On the last step this either starts phone verification or submits.
    pub async fn next(&mut self) -> Transition {
        if self.is_complete() {
            return Transition::AlreadyComplete;
        }
        if self.verification.is_some() {
            return Transition::AwaitingVerification;
        }

        if let Err(error) = steps::validate_step(self.step, &self.answers) {
            tracing::debug!(step = self.step, field = %error.field, "step rejected");
            return Transition::Rejected(error.into());
        }

        if self.step + 1 < STEP_COUNT {
            let completed = self.step;
            self.step += 1;
            tracing::debug!(step = self.step, "advanced");
            self.track_step_completed(completed).await;
            return Transition::Advanced { step: self.step };
        }

        let unverified_phone = match (self.answers.phone(), &self.verified) {
            (Some(phone), None) => Some(phone.to_string()),
            _ => None,
        };
        match unverified_phone {
            Some(phone) => {
                tracing::debug!("phone verification offered");
                self.verification = Some(PhoneVerification::new(phone.clone()));
                Transition::VerificationRequired { phone }
            }
            None => self.submit().await,
        }
    }

    /// Go back one step. No validation.
    pub fn previous(&mut self) -> Transition {
        if self.is_complete() {
            return Transition::AlreadyComplete;
        }
        if self.verification.is_some() {
            return Transition::AwaitingVerification;
        }
        self.step = self.step.saturating_sub(1);
        tracing::debug!(step = self.step, "retreated");
        Transition::Retreated { step: self.step }
    }

    /// Text a verification code, or a fresh one if one was already sent.
    pub async fn send_code(&mut self) -> Transition {
        let Some(flow) = self.verification.as_mut() else {
            return Transition::NotVerifying;
        };
        match flow.send_code(&self.remote).await {
            Ok(()) => Transition::CodeSent,
            Err(notice) => Transition::Rejected(notice),
        }
    }

    /// Request another code while waiting for one.
    pub async fn resend_code(&mut self) -> Transition {
        let Some(flow) = self.verification.as_mut() else {
            return Transition::NotVerifying;
        };
        match flow.resend(&self.remote).await {
            Ok(()) => Transition::CodeSent,
            Err(notice) => Transition::Rejected(notice),
        }
    }

    /// Type the verification code. Non-digits are dropped.
    pub fn enter_code(&mut self, raw: &str) -> Transition {
        match self.verification.as_mut() {
            Some(flow) => {
                flow.enter_code(raw);
                Transition::AwaitingVerification
            }
            None => Transition::NotVerifying,
        }
    }

    /// Check the entered code; on success, submit with the verified identity.
    pub async fn verify_code(&mut self) -> Transition {
        let Some(flow) = self.verification.as_mut() else {
            return Transition::NotVerifying;
        };
        match flow.verify_code(&self.remote).await {
            Ok(identity) => {
                let phone = flow.phone().to_string();
                self.verified = Some(VerifiedPhone { phone, identity });
                self.verification = None;
                self.submit().await
            }
            Err(notice) => Transition::Rejected(notice),
        }
    }

    /// Abandon verification and submit without an identity.
    pub async fn skip_verification(&mut self) -> Transition {
        if self.verification.take().is_none() {
            return Transition::NotVerifying;
        }
        tracing::debug!("phone verification skipped");
        self.submit().await
    }

    async fn submit(&mut self) -> Transition {
        // Earlier steps may have been edited since they passed.
        let failing = (0..STEP_COUNT)
            .find_map(|index| steps::validate_step(index, &self.answers).err().map(|e| (index, e)));
        if let Some((index, error)) = failing {
            tracing::warn!(step = index, field = %error.field, "answers no longer valid at submission");
            self.step = index;
            return Transition::Rejected(error.into());
        }

        let identity = self.verified.as_ref().map(|v| &v.identity);
        match submission::submit(&self.remote, &self.answers, identity).await {
            Ok(receipt) => {
                self.step = STEP_COUNT;
                Transition::Submitted {
                    receipt,
                    celebration: Celebration::burst(),
                }
            }
            Err(notice) => Transition::SubmissionFailed(notice),
        }
    }

    async fn track_step_completed(&self, step: usize) {
        let title = steps::step(step)
            .map(|s| s.definition.title.clone())
            .unwrap_or_default();
        self.remote
            .track_event(
                TrackedEvent::new("survey_step_completed")
                    .with("step_number", step)
                    .with("survey_type", SURVEY_TYPE)
                    .with("step_name", title),
            )
            .await;
    }
}
