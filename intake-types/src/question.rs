use crate::Field;

/// The sentinel option value that asks for a paired free-text answer.
pub const OTHER_CHOICE: &str = "other";

/// A single question on a survey step.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// The field this question's answer is written to.
    field: Field,

    /// The prompt text shown to the user.
    ask: String,

    /// Whether the step validator insists on an answer.
    required: bool,

    /// The kind of question (determines the input control).
    kind: QuestionKind,

    /// Only show this question while another field has a given choice selected.
    shown_when: Option<ShownWhen>,
}

impl Question {
    /// Create a new required question.
    pub fn new(field: Field, ask: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            field,
            ask: ask.into(),
            required: true,
            kind,
            shown_when: None,
        }
    }

    /// Mark this question as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Show this question only while `field` has `value` selected.
    pub fn shown_when(mut self, field: Field, value: &'static str) -> Self {
        self.shown_when = Some(ShownWhen { field, value });
        self
    }

    /// Get the field this question writes to.
    pub fn field(&self) -> Field {
        self.field
    }

    /// Get the prompt text.
    pub fn ask(&self) -> &str {
        &self.ask
    }

    /// Whether an answer is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Get the visibility condition, if any.
    pub fn condition(&self) -> Option<&ShownWhen> {
        self.shown_when.as_ref()
    }
}

/// Visibility condition for a follow-up question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShownWhen {
    /// The multi-select to look at.
    pub field: Field,
    /// The option that must be selected.
    pub value: &'static str,
}

/// The kind of question, determining the input control.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    /// Single-line text input.
    Input(InputQuestion),

    /// Multi-line text input (textarea or editor).
    Multiline(MultilineQuestion),

    /// Choose exactly one option.
    OneOf(OneOfQuestion),

    /// Choose any number of options.
    AnyOf(AnyOfQuestion),
}

/// A selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// The value stored in the answers and persisted.
    pub value: String,

    /// The label shown to the user.
    pub label: String,
}

impl Choice {
    /// Create a new choice with the given stored value and label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Create a choice whose label is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    /// Whether this is the `other` sentinel.
    pub fn is_other(&self) -> bool {
        self.value == OTHER_CHOICE
    }
}

/// What a single-line input expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Phone,
    PostalCode,
}

/// Configuration for a text input question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputQuestion {
    /// What the input expects.
    pub input_type: InputType,

    /// Placeholder hint.
    pub placeholder: Option<String>,
}

impl InputQuestion {
    /// Create a new plain text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input of the given type.
    pub fn of_type(input_type: InputType) -> Self {
        Self {
            input_type,
            placeholder: None,
        }
    }

    /// Set the placeholder hint.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// Configuration for a multi-line text question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultilineQuestion {
    /// Placeholder hint.
    pub placeholder: Option<String>,
}

impl MultilineQuestion {
    /// Create a new multiline question.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a placeholder hint.
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: Some(placeholder.into()),
        }
    }
}

/// Configuration for a OneOf question (single select).
///
/// When `depends_on` is set the options are not fixed: they are derived from
/// the current value of that field (regions of the chosen country, say), and
/// `choices` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOfQuestion {
    /// The fixed options.
    pub choices: Vec<Choice>,

    /// The field the options are derived from, if they are not fixed.
    pub depends_on: Option<Field>,
}

impl OneOfQuestion {
    /// Create a new single select with fixed options.
    pub fn new(choices: Vec<Choice>) -> Self {
        Self {
            choices,
            depends_on: None,
        }
    }

    /// Create a single select whose options come from another field's value.
    pub fn depending_on(field: Field) -> Self {
        Self {
            choices: Vec::new(),
            depends_on: Some(field),
        }
    }

    /// Get the fixed options.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }
}

/// Configuration for an AnyOf question (multi-select).
#[derive(Debug, Clone, PartialEq)]
pub struct AnyOfQuestion {
    /// The available options.
    pub choices: Vec<Choice>,
}

impl AnyOfQuestion {
    /// Create a new multi-select with the given options.
    pub fn new(choices: Vec<Choice>) -> Self {
        Self { choices }
    }

    /// Get the options.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Whether one of the options is the `other` sentinel.
    pub fn has_other(&self) -> bool {
        self.choices.iter().any(Choice::is_other)
    }
}
