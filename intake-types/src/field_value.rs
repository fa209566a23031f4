/// A single value written to a survey field.
///
/// Text inputs and single selects carry a `Text`; multi-selects carry
/// `Choices` holding the selected option values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A string value (free text, or the value of a single select).
    Text(String),

    /// The values chosen in a multi-select.
    Choices(Vec<String>),
}

impl FieldValue {
    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Choices(_) => None,
        }
    }

    /// True for empty text and for an empty selection.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Choices(values) => values.is_empty(),
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Choices(_) => "Choices",
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        Self::Choices(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Choices(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldValue {
    fn from(values: [&str; N]) -> Self {
        Self::Choices(values.into_iter().map(str::to_string).collect())
    }
}
