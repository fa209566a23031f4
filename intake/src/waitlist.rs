//! The waitlist signup dialog.
//!
//! Unlike the survey, the dialog is shared between event handlers, so its
//! operations take `&self`. A second `submit` while one is in flight
//! reports [`FormOutcome::Busy`] instead of sending a duplicate row.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde_json::json;

use intake_types::{RemoteStore, Table, TrackedEvent};

use crate::form::{FormOutcome, failure_notice};
use crate::notice::{Celebration, Notice};
use crate::validation::is_valid_email;

pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const TERMS_REQUIRED: &str = "You must agree to the terms to continue";

/// `source` column written with every waitlist row.
pub const SOURCE: &str = "waitlist";

/// Which screen the dialog shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WaitlistStep {
    #[default]
    Form,
    ThankYou,
}

/// What the respondent typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitlistSignup {
    pub name: String,
    pub email: String,
    pub agree_to_terms: bool,
}

impl WaitlistSignup {
    pub fn validate(&self) -> Result<(), Notice> {
        if self.name.chars().count() < 2 {
            return Err(Notice::validation(NAME_TOO_SHORT));
        }
        if !is_valid_email(&self.email) {
            return Err(Notice::validation(INVALID_EMAIL));
        }
        if !self.agree_to_terms {
            return Err(Notice::validation(TERMS_REQUIRED));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct WaitlistState {
    step: WaitlistStep,
    signup: WaitlistSignup,
}

/// The waitlist dialog.
#[derive(Debug, Default)]
pub struct WaitlistForm {
    state: Mutex<WaitlistState>,
    submitting: AtomicBool,
}

/// Clears the in-flight flag when dropped, including when the submit
/// future is dropped before it finishes.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl WaitlistForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WaitlistStep {
        self.state.lock().step
    }

    pub fn signup(&self) -> WaitlistSignup {
        self.state.lock().signup.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.state.lock().signup.name = name.into();
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.state.lock().signup.email = email.into();
    }

    pub fn set_agree_to_terms(&self, agreed: bool) {
        self.state.lock().signup.agree_to_terms = agreed;
    }

    /// Validate, insert into `signups` and move to the thank-you screen.
    pub async fn submit<R: RemoteStore + ?Sized>(&self, remote: &R) -> FormOutcome {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return FormOutcome::Busy;
        }
        let _in_flight = InFlight(&self.submitting);

        let signup = {
            let state = self.state.lock();
            if state.step == WaitlistStep::ThankYou {
                return FormOutcome::AlreadySubmitted;
            }
            state.signup.clone()
        };
        if let Err(notice) = signup.validate() {
            return FormOutcome::Rejected(notice);
        }

        let record = json!({
            "name": signup.name,
            "email": signup.email,
            "source": SOURCE,
        });
        match remote.insert_record(Table::Signups, &record).await {
            Ok(receipt) => {
                tracing::info!(id = ?receipt.id, "waitlist signup stored");
                remote.track_event(TrackedEvent::new("Lead")).await;
                self.state.lock().step = WaitlistStep::ThankYou;
                FormOutcome::Submitted {
                    receipt,
                    celebration: Celebration::gentle(),
                }
            }
            Err(error) => {
                tracing::warn!(%error, "waitlist signup failed");
                FormOutcome::Failed(failure_notice(&error))
            }
        }
    }

    /// Close the dialog: back to an empty form.
    pub fn close(&self) {
        *self.state.lock() = WaitlistState::default();
    }
}
