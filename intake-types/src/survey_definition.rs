use crate::Question;

/// One screen of a survey: a title, a subtitle and the questions it asks.
#[derive(Debug, Clone)]
pub struct StepDefinition {
    /// Heading shown for the step.
    pub title: String,

    /// Secondary line under the heading.
    pub subtitle: String,

    /// The questions on this step, in display order.
    pub questions: Vec<Question>,
}

impl StepDefinition {
    /// Create a new step.
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            questions,
        }
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// The ordered steps of a survey plus its framing messages.
///
/// A survey definition is presentation-agnostic: it can be rendered as a
/// terminal wizard, a web form, or anything else that walks the steps.
#[derive(Debug, Clone)]
pub struct SurveyDefinition {
    /// Optional message shown before the first step.
    pub prelude: Option<String>,

    /// All steps in order.
    pub steps: Vec<StepDefinition>,

    /// Optional message shown once the survey is submitted.
    pub epilogue: Option<String>,
}

impl SurveyDefinition {
    /// Create a new survey definition with the given steps.
    pub fn new(steps: Vec<StepDefinition>) -> Self {
        Self {
            prelude: None,
            steps,
            epilogue: None,
        }
    }

    /// Set the prelude message.
    pub fn with_prelude(mut self, prelude: impl Into<String>) -> Self {
        self.prelude = Some(prelude.into());
        self
    }

    /// Set the epilogue message.
    pub fn with_epilogue(mut self, epilogue: impl Into<String>) -> Self {
        self.epilogue = Some(epilogue.into());
        self
    }

    /// Get the steps.
    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Get a step by index.
    pub fn step(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    /// Check if the survey has any steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }
}
