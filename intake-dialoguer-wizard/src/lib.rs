//! # intake-dialoguer-wizard
//!
//! Dialoguer wizard front-end for the caregiver survey.
//!
//! This crate walks an [`intake::SurveySession`] in the terminal using the
//! `dialoguer` library. Each survey step is presented in classic CLI wizard
//! style, and the phone verification flow is offered before submitting when
//! the respondent left a phone number.
//!
//! ## Example
//!
//! ```rust,ignore
//! use intake::{RecordingRemote, SurveySession};
//! use intake_dialoguer_wizard::DialoguerWizard;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut session = SurveySession::new(RecordingRemote::new());
//!     let receipt = DialoguerWizard::new().run(&mut session).await?;
//!     println!("Stored as {:?}", receipt.id);
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{DialoguerWizard, WizardError};
