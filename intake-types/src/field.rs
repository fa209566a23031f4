use std::fmt;
use std::str::FromStr;

use crate::FieldError;

/// Identifies one answer slot in a caregiver survey, e.g. `"phone_number"`.
///
/// Fields are the keys questions write to and validators read from. The
/// string form is stable and is what front-ends use to address a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    PhoneNumber,
    Country,
    State,
    Zipcode,
    WhoCaringFor,
    OtherWhoCaringFor,
    EmotionalChallenges,
    WhatWouldSupport,
    AiHelpfulSupport,
    AiComfort,
    HumanServicesOpenness,
    CommunicationPreference,
    OtherCommunicationPreference,
    UrgencyLevel,
    FinalThoughts,
}

impl Field {
    /// Every field, in the order the survey asks for them.
    pub const ALL: [Field; 17] = [
        Field::Name,
        Field::Email,
        Field::PhoneNumber,
        Field::Country,
        Field::State,
        Field::Zipcode,
        Field::WhoCaringFor,
        Field::OtherWhoCaringFor,
        Field::EmotionalChallenges,
        Field::WhatWouldSupport,
        Field::AiHelpfulSupport,
        Field::AiComfort,
        Field::HumanServicesOpenness,
        Field::CommunicationPreference,
        Field::OtherCommunicationPreference,
        Field::UrgencyLevel,
        Field::FinalThoughts,
    ];

    /// Get the field key as a string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Country => "country",
            Self::State => "state",
            Self::Zipcode => "zipcode",
            Self::WhoCaringFor => "who_caring_for",
            Self::OtherWhoCaringFor => "other_who_caring_for",
            Self::EmotionalChallenges => "emotional_challenges",
            Self::WhatWouldSupport => "what_would_support",
            Self::AiHelpfulSupport => "ai_helpful_support",
            Self::AiComfort => "ai_comfort",
            Self::HumanServicesOpenness => "human_services_openness",
            Self::CommunicationPreference => "communication_preference",
            Self::OtherCommunicationPreference => "other_communication_preference",
            Self::UrgencyLevel => "urgency_level",
            Self::FinalThoughts => "final_thoughts",
        }
    }

    /// Whether this field holds a multi-select list rather than a single string.
    pub fn is_multi_select(&self) -> bool {
        matches!(self, Self::WhoCaringFor | Self::CommunicationPreference)
    }

    /// The free-text field paired with this multi-select's `other` option.
    pub fn other_text(&self) -> Option<Field> {
        match self {
            Self::WhoCaringFor => Some(Self::OtherWhoCaringFor),
            Self::CommunicationPreference => Some(Self::OtherCommunicationPreference),
            _ => None,
        }
    }

    /// Fields whose values are only meaningful for the current country.
    pub fn dependents(&self) -> &'static [Field] {
        match self {
            Self::Country => &[Self::State, Self::Zipcode],
            _ => &[],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}
