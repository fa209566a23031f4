//! The answers collected by one survey session.

use intake_types::{Field, FieldError, FieldValue, OTHER_CHOICE};

use crate::country::Country;

/// Everything a respondent has entered so far.
///
/// Single selects are stored as their option value (`""` when nothing is
/// picked); multi-selects as the list of selected values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyAnswers {
    name: String,
    email: String,
    phone_number: String,
    country: String,
    state: String,
    zipcode: String,
    who_caring_for: Vec<String>,
    other_who_caring_for: String,
    emotional_challenges: String,
    what_would_support: String,
    ai_helpful_support: String,
    ai_comfort: String,
    human_services_openness: String,
    communication_preference: Vec<String>,
    other_communication_preference: String,
    urgency_level: String,
    final_thoughts: String,
}

impl SurveyAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one field.
    ///
    /// Setting the country clears the state and zipcode, whatever they held.
    /// Replacing a multi-select with a list that lacks `other` clears the
    /// paired free text.
    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) -> Result<(), FieldError> {
        let value = value.into();
        let actual = value.type_name();
        match value {
            FieldValue::Text(text) => match self.text_slot(field) {
                Some(slot) => *slot = text,
                None => return Err(self.mismatch(field, actual)),
            },
            FieldValue::Choices(values) => match self.choices_slot(field) {
                Some(slot) => *slot = values,
                None => return Err(self.mismatch(field, actual)),
            },
        }

        for dependent in field.dependents() {
            self.clear(*dependent);
        }
        if let Some(other) = field.other_text()
            && !self.is_selected(field, OTHER_CHOICE)
        {
            self.clear(other);
        }
        Ok(())
    }

    /// Check or uncheck one option of a multi-select.
    ///
    /// Unchecking `other` clears its free text.
    pub fn toggle(&mut self, field: Field, value: &str, checked: bool) -> Result<(), FieldError> {
        let mut selected = self.choices(field)?.to_vec();
        let present = selected.iter().any(|v| v == value);
        if checked && !present {
            selected.push(value.to_string());
        } else if !checked && present {
            selected.retain(|v| v != value);
        } else {
            return Ok(());
        }
        self.set(field, selected)
    }

    /// Read one field.
    pub fn get(&self, field: Field) -> FieldValue {
        if field.is_multi_select() {
            FieldValue::Choices(self.choices(field).map(<[String]>::to_vec).unwrap_or_default())
        } else {
            FieldValue::Text(self.text(field).to_string())
        }
    }

    /// Text value of a single-value field; `""` for multi-selects.
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::PhoneNumber => &self.phone_number,
            Field::Country => &self.country,
            Field::State => &self.state,
            Field::Zipcode => &self.zipcode,
            Field::OtherWhoCaringFor => &self.other_who_caring_for,
            Field::EmotionalChallenges => &self.emotional_challenges,
            Field::WhatWouldSupport => &self.what_would_support,
            Field::AiHelpfulSupport => &self.ai_helpful_support,
            Field::AiComfort => &self.ai_comfort,
            Field::HumanServicesOpenness => &self.human_services_openness,
            Field::OtherCommunicationPreference => &self.other_communication_preference,
            Field::UrgencyLevel => &self.urgency_level,
            Field::FinalThoughts => &self.final_thoughts,
            Field::WhoCaringFor | Field::CommunicationPreference => "",
        }
    }

    /// Selected values of a multi-select.
    pub fn choices(&self, field: Field) -> Result<&[String], FieldError> {
        match field {
            Field::WhoCaringFor => Ok(&self.who_caring_for),
            Field::CommunicationPreference => Ok(&self.communication_preference),
            _ => Err(FieldError::TypeMismatch {
                field,
                expected: "Choices",
                actual: self.get(field).type_name(),
            }),
        }
    }

    /// Whether `value` is selected in the multi-select `field`.
    pub fn is_selected(&self, field: Field, value: &str) -> bool {
        self.choices(field)
            .map(|values| values.iter().any(|v| v == value))
            .unwrap_or(false)
    }

    /// The chosen country, if it is one of the known ones.
    pub fn country(&self) -> Option<Country> {
        Country::from_label(&self.country)
    }

    /// The phone number as entered, if any.
    pub fn phone(&self) -> Option<&str> {
        let phone = self.phone_number.trim();
        (!phone.is_empty()).then_some(phone)
    }

    fn clear(&mut self, field: Field) {
        if let Some(slot) = self.text_slot(field) {
            slot.clear();
        } else if let Some(slot) = self.choices_slot(field) {
            slot.clear();
        }
    }

    /// A write of kind `actual` into a slot of the other kind.
    fn mismatch(&self, field: Field, actual: &'static str) -> FieldError {
        FieldError::TypeMismatch {
            field,
            expected: self.get(field).type_name(),
            actual,
        }
    }

    fn text_slot(&mut self, field: Field) -> Option<&mut String> {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::PhoneNumber => &mut self.phone_number,
            Field::Country => &mut self.country,
            Field::State => &mut self.state,
            Field::Zipcode => &mut self.zipcode,
            Field::OtherWhoCaringFor => &mut self.other_who_caring_for,
            Field::EmotionalChallenges => &mut self.emotional_challenges,
            Field::WhatWouldSupport => &mut self.what_would_support,
            Field::AiHelpfulSupport => &mut self.ai_helpful_support,
            Field::AiComfort => &mut self.ai_comfort,
            Field::HumanServicesOpenness => &mut self.human_services_openness,
            Field::OtherCommunicationPreference => &mut self.other_communication_preference,
            Field::UrgencyLevel => &mut self.urgency_level,
            Field::FinalThoughts => &mut self.final_thoughts,
            Field::WhoCaringFor | Field::CommunicationPreference => return None,
        };
        Some(slot)
    }

    fn choices_slot(&mut self, field: Field) -> Option<&mut Vec<String>> {
        match field {
            Field::WhoCaringFor => Some(&mut self.who_caring_for),
            Field::CommunicationPreference => Some(&mut self.communication_preference),
            _ => None,
        }
    }
}
