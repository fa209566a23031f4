//! The ten steps of the caregiver survey.
//!
//! Each step pairs a presentation-agnostic [`StepDefinition`] with a pure
//! validator. The list is fixed and indexed by the session's step counter.

use std::sync::LazyLock;

use intake_types::{
    AnyOfQuestion, Choice, Field, InputQuestion, InputType, MultilineQuestion, OTHER_CHOICE,
    OneOfQuestion, Question, QuestionKind, StepDefinition, SurveyDefinition,
};

use crate::answers::SurveyAnswers;
use crate::country::Country;
use crate::validation::{
    Validation, check_identity, check_multi_select, check_reflection, check_selected,
};

/// Number of steps in the survey.
pub const STEP_COUNT: usize = 10;

/// Options for "who are you caring for", as `(value, label)`.
pub const CARING_FOR_OPTIONS: [(&str, &str); 9] = [
    ("spouse", "A spouse or partner"),
    ("parent", "A parent"),
    ("child", "A child (including special needs)"),
    ("sibling", "A sibling"),
    ("friend", "A friend or neighbor"),
    ("loved-one", "Another loved one"),
    ("self", "I'm caring for myself (e.g. chronic illness, mental health)"),
    ("not-caregiver", "I am not a caregiver right now"),
    (OTHER_CHOICE, "Other (please specify)"),
];

pub const AI_COMFORT_OPTIONS: [(&str, &str); 5] = [
    ("1", "Not at all comfortable"),
    ("2", "Somewhat uncomfortable"),
    ("3", "Neutral"),
    ("4", "Somewhat comfortable"),
    ("5", "Very comfortable"),
];

pub const HUMAN_SERVICES_OPTIONS: [(&str, &str); 4] = [
    ("yes", "Yes"),
    ("no", "No"),
    ("maybe", "Maybe / depends on the task"),
    ("need-info", "I'd need more information"),
];

pub const COMMUNICATION_OPTIONS: [(&str, &str); 7] = [
    ("voice", "Voice (like Alexa/Siri)"),
    ("text", "Text chat (like WhatsApp/SMS)"),
    ("app", "App interface"),
    ("email", "Email"),
    ("phone", "Phone call with a real person"),
    ("in-person", "In-person / at-home support"),
    (OTHER_CHOICE, "Other (please specify)"),
];

pub const URGENCY_OPTIONS: [(&str, &str); 4] = [
    ("crisis", "I'm in crisis / overwhelmed"),
    ("ongoing", "I need consistent, ongoing support"),
    ("planning", "I'm planning ahead"),
    ("exploring", "Not urgent - just exploring"),
];

/// A step's validator.
pub type StepValidator = fn(&SurveyAnswers) -> Validation;

/// One survey step: what to show and how to check it.
#[derive(Debug, Clone)]
pub struct Step {
    pub definition: StepDefinition,
    pub validate: StepValidator,
}

static STEPS: LazyLock<Vec<Step>> = LazyLock::new(build_steps);

/// The fixed step list.
pub fn steps() -> &'static [Step] {
    &STEPS
}

/// The step at `index`, if it exists.
pub fn step(index: usize) -> Option<&'static Step> {
    STEPS.get(index)
}

/// Run the validator for step `index` against `answers`.
///
/// Indices past the last step have nothing to validate.
pub fn validate_step(index: usize, answers: &SurveyAnswers) -> Validation {
    match step(index) {
        Some(step) => (step.validate)(answers),
        None => Ok(()),
    }
}

/// The caregiver survey as a presentation-agnostic definition.
pub fn caregiver_survey() -> SurveyDefinition {
    SurveyDefinition::new(STEPS.iter().map(|s| s.definition.clone()).collect())
        .with_prelude("Help us shape support for caregivers. It takes about five minutes.")
        .with_epilogue(
            "Thank you for sharing your caregiving experience. Your answers help us build better support.",
        )
}

/// Options for a single select whose choices depend on another field.
pub fn dependent_choices(question: &OneOfQuestion, answers: &SurveyAnswers) -> Vec<Choice> {
    match question.depends_on {
        Some(Field::Country) => answers
            .country()
            .map(|c| c.regions().iter().map(|r| Choice::plain(*r)).collect())
            .unwrap_or_default(),
        Some(_) => Vec::new(),
        None => question.choices.clone(),
    }
}

/// Whether `question` should be shown given the current answers.
pub fn is_visible(question: &Question, answers: &SurveyAnswers) -> bool {
    if question.field() == Field::State {
        return answers.country().is_some_and(|c| c.requires_region());
    }
    match question.condition() {
        Some(cond) => answers.is_selected(cond.field, cond.value),
        None => true,
    }
}

fn choices(options: &[(&str, &str)]) -> Vec<Choice> {
    options.iter().map(|(value, label)| Choice::new(*value, *label)).collect()
}

fn values(options: &[(&'static str, &str)]) -> Vec<&'static str> {
    options.iter().map(|(value, _)| *value).collect()
}

fn text(field: Field, ask: &str, input: InputQuestion) -> Question {
    Question::new(field, ask, QuestionKind::Input(input))
}

fn reflection(field: Field, ask: &str, placeholder: &str) -> Question {
    Question::new(
        field,
        ask,
        QuestionKind::Multiline(MultilineQuestion::with_placeholder(placeholder)),
    )
}

fn build_steps() -> Vec<Step> {
    let countries: Vec<Choice> = Country::ALL.iter().map(|c| Choice::plain(c.label())).collect();

    vec![
        Step {
            definition: StepDefinition::new(
                "Let's start with the basics",
                "All fields are required",
                vec![
                    text(Field::Name, "Full Name", InputQuestion::new().with_placeholder("Your full name")),
                    text(
                        Field::Email,
                        "Email Address",
                        InputQuestion::of_type(InputType::Email).with_placeholder("john@example.com"),
                    ),
                    text(
                        Field::PhoneNumber,
                        "Phone Number (optional)",
                        InputQuestion::of_type(InputType::Phone).with_placeholder("+1 (555) 123-4567"),
                    )
                    .optional(),
                    Question::new(Field::Country, "Country", QuestionKind::OneOf(OneOfQuestion::new(countries))),
                    Question::new(
                        Field::State,
                        "State",
                        QuestionKind::OneOf(OneOfQuestion::depending_on(Field::Country)),
                    ),
                    text(
                        Field::Zipcode,
                        "ZIP / Postal Code (optional)",
                        InputQuestion::of_type(InputType::PostalCode),
                    )
                    .optional(),
                ],
            ),
            validate: check_identity,
        },
        Step {
            definition: StepDefinition::new(
                "Who are you currently caring for?",
                "Select all that apply",
                vec![
                    Question::new(
                        Field::WhoCaringFor,
                        "Who are you currently caring for?",
                        QuestionKind::AnyOf(AnyOfQuestion::new(choices(&CARING_FOR_OPTIONS))),
                    ),
                    text(
                        Field::OtherWhoCaringFor,
                        "Please specify",
                        InputQuestion::new().with_placeholder("Please specify your caregiving relationship"),
                    )
                    .shown_when(Field::WhoCaringFor, OTHER_CHOICE),
                ],
            ),
            validate: validate_caring_for,
        },
        Step {
            definition: StepDefinition::new(
                "What are the biggest emotional or practical challenges you face as a caregiver?",
                "Help us understand your experience",
                vec![reflection(
                    Field::EmotionalChallenges,
                    "Your challenges",
                    "Share the challenges that weigh on you most...",
                )],
            ),
            validate: validate_emotional_challenges,
        },
        Step {
            definition: StepDefinition::new(
                "What would make you feel more supported, emotionally and practically, in your caregiving role?",
                "Help us understand what you need",
                vec![reflection(
                    Field::WhatWouldSupport,
                    "What would help",
                    "Describe what support would look like for you...",
                )],
            ),
            validate: validate_what_would_support,
        },
        Step {
            definition: StepDefinition::new(
                "When thinking about AI support for caregiving, what would feel truly helpful to you?",
                "Your ideas matter to us",
                vec![reflection(
                    Field::AiHelpfulSupport,
                    "Helpful AI support",
                    "Reminders, check-ins, finding resources...",
                )],
            ),
            validate: validate_ai_helpful_support,
        },
        Step {
            definition: StepDefinition::new(
                "How comfortable are you using AI tools?",
                "Like chatbots, voice assistants, or AI-based scheduling",
                vec![Question::new(
                    Field::AiComfort,
                    "Comfort level",
                    QuestionKind::OneOf(OneOfQuestion::new(choices(&AI_COMFORT_OPTIONS))),
                )],
            ),
            validate: validate_ai_comfort,
        },
        Step {
            definition: StepDefinition::new(
                "If AI can't help with a task, would you want a human to step in?",
                "Arranged automatically and covered by insurance",
                vec![Question::new(
                    Field::HumanServicesOpenness,
                    "Human support",
                    QuestionKind::OneOf(OneOfQuestion::new(choices(&HUMAN_SERVICES_OPTIONS))),
                )],
            ),
            validate: validate_human_services,
        },
        Step {
            definition: StepDefinition::new(
                "How would you prefer to communicate with a caregiving assistant?",
                "AI or human - select all that apply",
                vec![
                    Question::new(
                        Field::CommunicationPreference,
                        "Preferred channels",
                        QuestionKind::AnyOf(AnyOfQuestion::new(choices(&COMMUNICATION_OPTIONS))),
                    ),
                    text(
                        Field::OtherCommunicationPreference,
                        "Please specify",
                        InputQuestion::new().with_placeholder("Please specify your preferred communication method"),
                    )
                    .shown_when(Field::CommunicationPreference, OTHER_CHOICE),
                ],
            ),
            validate: validate_communication,
        },
        Step {
            definition: StepDefinition::new(
                "How urgent is the support you need right now?",
                "Help us understand your timeline",
                vec![Question::new(
                    Field::UrgencyLevel,
                    "Urgency",
                    QuestionKind::OneOf(OneOfQuestion::new(choices(&URGENCY_OPTIONS))),
                )],
            ),
            validate: validate_urgency,
        },
        Step {
            definition: StepDefinition::new(
                "Is there anything else you'd like to share?",
                "About your experience as a caregiver or what you hope this support could offer",
                vec![reflection(
                    Field::FinalThoughts,
                    "Final thoughts",
                    "Anything else on your mind...",
                )],
            ),
            validate: validate_final_thoughts,
        },
    ]
}

fn validate_caring_for(answers: &SurveyAnswers) -> Validation {
    check_multi_select(
        answers,
        Field::WhoCaringFor,
        "Please select who you are currently caring for",
        "Please specify your other caregiving relationship",
    )
}

fn validate_emotional_challenges(answers: &SurveyAnswers) -> Validation {
    check_reflection(
        answers,
        Field::EmotionalChallenges,
        "Please share your biggest emotional or practical challenges",
    )
}

fn validate_what_would_support(answers: &SurveyAnswers) -> Validation {
    check_reflection(
        answers,
        Field::WhatWouldSupport,
        "Please share what would make you feel more supported",
    )
}

fn validate_ai_helpful_support(answers: &SurveyAnswers) -> Validation {
    check_reflection(
        answers,
        Field::AiHelpfulSupport,
        "Please share what AI support would feel helpful to you",
    )
}

fn validate_ai_comfort(answers: &SurveyAnswers) -> Validation {
    check_selected(
        answers,
        Field::AiComfort,
        &values(&AI_COMFORT_OPTIONS),
        "Please select your comfort level with AI tools",
    )
}

fn validate_human_services(answers: &SurveyAnswers) -> Validation {
    check_selected(
        answers,
        Field::HumanServicesOpenness,
        &values(&HUMAN_SERVICES_OPTIONS),
        "Please select your preference for human support",
    )
}

fn validate_communication(answers: &SurveyAnswers) -> Validation {
    check_multi_select(
        answers,
        Field::CommunicationPreference,
        "Please select your preferred communication methods",
        "Please specify your other communication preference",
    )
}

fn validate_urgency(answers: &SurveyAnswers) -> Validation {
    check_selected(
        answers,
        Field::UrgencyLevel,
        &values(&URGENCY_OPTIONS),
        "Please select how urgent your support needs are",
    )
}

fn validate_final_thoughts(answers: &SurveyAnswers) -> Validation {
    check_reflection(
        answers,
        Field::FinalThoughts,
        "Please share any additional thoughts about your caregiving experience",
    )
}
