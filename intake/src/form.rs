//! Outcome shared by the single-page forms.

use intake_types::{InsertReceipt, RemoteError};

use crate::notice::{Celebration, Notice};
use crate::submission::UNEXPECTED_FAILURE;

pub const FORM_SUBMISSION_FAILED: &str =
    "There was an error submitting your information. Please try again.";

/// What happened when a form was submitted.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum FormOutcome {
    /// Stored; show the thank-you state.
    Submitted {
        receipt: InsertReceipt,
        celebration: Celebration,
    },
    /// Input is invalid; nothing was sent.
    Rejected(Notice),
    /// The backend call failed; the same input can be submitted again.
    Failed(Notice),
    /// The form was already submitted.
    AlreadySubmitted,
    /// Another submission of this form is still in flight.
    Busy,
}

impl FormOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }
}

/// The notice for a failed insert.
pub(crate) fn failure_notice(error: &RemoteError) -> Notice {
    if error.is_unexpected() {
        Notice::submission_failed(UNEXPECTED_FAILURE)
    } else {
        Notice::submission_failed(FORM_SUBMISSION_FAILED)
    }
}
