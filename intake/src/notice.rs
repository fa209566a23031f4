//! User-facing outcomes returned from form operations.
//!
//! Nothing in this crate pops toasts or fires confetti itself. Operations
//! return a [`Notice`] or a [`Celebration`] and the front-end presents them.

use std::fmt;

use crate::validation::ValidationError;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Input needs fixing before the respondent can continue.
    Validation,
    /// Something failed remotely; the same action can be retried.
    Error,
}

/// A message for the respondent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: Option<String>,
    pub message: String,
}

impl Notice {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Validation,
            title: None,
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: Some(title.into()),
            message: message.into(),
        }
    }

    /// The generic retryable notice for a failed remote write.
    pub(crate) fn submission_failed(message: &str) -> Self {
        Self::error("Submission Failed", message)
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl From<ValidationError> for Notice {
    fn from(err: ValidationError) -> Self {
        Self::validation(err.message)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{title}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Parameters for the confetti burst shown after a successful submission.
///
/// Purely cosmetic; front-ends without a canvas can ignore it.
#[derive(Debug, Clone, PartialEq)]
pub struct Celebration {
    pub particle_count: u32,
    pub spread: f32,
    pub origin_y: f32,
    pub gravity: Option<f32>,
    pub decay: Option<f32>,
    pub start_velocity: Option<f32>,
    pub colors: Vec<&'static str>,
}

impl Celebration {
    /// The standard burst used by the survey and the collaborator form.
    pub fn burst() -> Self {
        Self {
            particle_count: 100,
            spread: 70.0,
            origin_y: 0.6,
            gravity: None,
            decay: None,
            start_velocity: None,
            colors: Vec::new(),
        }
    }

    /// The slower, softer burst used by the waitlist.
    pub fn gentle() -> Self {
        Self {
            gravity: Some(0.8),
            decay: Some(0.9),
            start_velocity: Some(15.0),
            colors: vec!["#ff6b9d", "#ffc93c", "#07beb8", "#3dccc7", "#68d8f0"],
            ..Self::burst()
        }
    }
}

#[cfg(test)]
mod tests {
    use intake_types::Field;

    use super::*;

    #[test]
    fn display_with_and_without_title() {
        assert_eq!(
            Notice::error("Submission Failed", "Try again.").to_string(),
            "Submission Failed: Try again."
        );
        assert_eq!(Notice::validation("Pick one").to_string(), "Pick one");
    }

    #[test]
    fn validation_error_becomes_validation_notice() {
        let notice = Notice::from(ValidationError::new(Field::Email, "bad email"));
        assert_eq!(notice.kind, NoticeKind::Validation);
        assert_eq!(notice.message, "bad email");
        assert!(!notice.is_error());
    }

    #[test]
    fn gentle_burst_keeps_base_shape() {
        let gentle = Celebration::gentle();
        assert_eq!(gentle.particle_count, 100);
        assert_eq!(gentle.colors.len(), 5);
        assert_eq!(gentle.gravity, Some(0.8));
    }
}
