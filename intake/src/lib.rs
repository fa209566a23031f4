//! # intake
//!
//! The landing page's intake flows, without any presentation.
//!
//! This crate provides the ten-step caregiver survey as a state machine,
//! plus the collaborator inquiry form and the waitlist dialog. Front-ends
//! feed user events in and render the returned values; every remote call
//! goes through a [`RemoteStore`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use intake::{Field, RecordingRemote, SurveySession, Transition};
//!
//! let mut session = SurveySession::new(RecordingRemote::new());
//! session.update_field(Field::Name, "Ada")?;
//! session.update_field(Field::Email, "ada@example.com")?;
//! session.update_field(Field::Country, "Canada")?;
//!
//! match session.next().await {
//!     Transition::Advanced { step } => println!("now on step {step}"),
//!     Transition::Rejected(notice) => println!("{notice}"),
//!     other => println!("{other:?}"),
//! }
//! ```
//!
//! ## Flow
//!
//! - `next()` validates the current step before moving on
//! - on the last step, a phone number that is not yet verified starts the
//!   phone verification flow; `verify_code()` or `skip_verification()`
//!   then submits
//! - a failed submission leaves the session on the last step, ready to retry
//!
//! ## Backends
//!
//! - `RecordingRemote` - in-memory, records every call (tests, offline runs)
//! - `intake-supabase` - the hosted backend over HTTP

// Re-export all types from intake-types
pub use intake_types::*;

pub mod answers;
pub mod collaborator;
pub mod content_filter;
pub mod country;
pub mod form;
pub mod notice;
pub mod recording;
pub mod session;
pub mod steps;
pub mod submission;
pub mod tagline;
pub mod validation;
pub mod verification;
pub mod waitlist;

pub use answers::SurveyAnswers;
pub use collaborator::{CollaboratorField, CollaboratorForm, CollaboratorInquiry};
pub use country::Country;
pub use form::FormOutcome;
pub use notice::{Celebration, Notice, NoticeKind};
pub use recording::{Failure, RecordingRemote};
pub use session::{SurveySession, Transition};
pub use steps::{STEP_COUNT, Step, caregiver_survey};
pub use submission::SubmissionRecord;
pub use tagline::{TAGLINES, TaglineCarousel};
pub use validation::ValidationError;
pub use verification::{PhoneVerification, VerificationStep};
pub use waitlist::{WaitlistForm, WaitlistSignup, WaitlistStep};
