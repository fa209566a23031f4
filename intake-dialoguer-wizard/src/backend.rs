//! Dialoguer front-end for the caregiver survey session.

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Confirm, Editor, FuzzySelect, Input, MultiSelect, Select};
use intake::steps::{self, STEP_COUNT};
use intake::validation::{check_email, check_postal_code, is_valid_phone};
use intake::{
    Choice, Country, Field, FieldError, InputQuestion, InputType, InsertReceipt, Question,
    QuestionKind, RemoteStore, SurveyAnswers, SurveySession, Transition, VerificationStep,
    caregiver_survey,
};
use thiserror::Error;

/// Error type for the dialoguer wizard.
#[derive(Debug, Error)]
pub enum WizardError {
    /// User cancelled the survey (e.g., pressed Ctrl+C or Escape).
    #[error("Survey cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// An answer did not fit the field it was written to.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The respondent gave up after a failed submission.
    #[error("Submission abandoned: {0}")]
    Abandoned(String),

    /// The session had already been submitted.
    #[error("Survey was already submitted")]
    AlreadySubmitted,
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> WizardError {
    if is_cancelled(&err) {
        WizardError::Cancelled
    } else {
        WizardError::Dialoguer(err)
    }
}

/// Dialoguer wizard for the caregiver survey.
///
/// Walks a [`SurveySession`] one step at a time: every visible question of
/// the current step is prompted, then the step is submitted with `next()`.
/// Rejected steps are asked again with the previous answers filled in.
#[derive(Debug, Default, Clone)]
pub struct DialoguerWizard {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerWizard {
    /// Create a new wizard with the colorful theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a wizard with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    /// Run the survey to completion.
    ///
    /// Returns the receipt of the stored response once the session reports
    /// `Submitted`.
    pub async fn run<R: RemoteStore>(
        &self,
        session: &mut SurveySession<R>,
    ) -> Result<InsertReceipt, WizardError> {
        if session.is_complete() {
            return Err(WizardError::AlreadySubmitted);
        }

        let survey = caregiver_survey();
        if let Some(prelude) = &survey.prelude {
            println!("{prelude}");
            println!();
        }

        let mut retry = false;
        loop {
            let transition = if retry {
                retry = false;
                session.next().await
            } else if session.verification().is_some() {
                self.verification_round(session).await?
            } else {
                self.step_round(session).await?
            };

            match transition {
                Transition::Submitted { receipt, .. } => {
                    if let Some(epilogue) = &survey.epilogue {
                        println!();
                        println!("{epilogue}");
                    }
                    return Ok(receipt);
                }
                Transition::Rejected(notice) => println!("Error: {notice}"),
                Transition::SubmissionFailed(notice) => {
                    println!("{notice}");
                    if !self.confirm("Try submitting again?")? {
                        return Err(WizardError::Abandoned(notice.message));
                    }
                    retry = true;
                }
                Transition::VerificationRequired { phone } => {
                    println!();
                    println!("Phone Verification");
                    println!("We can verify {phone} before sending your answers.");
                }
                Transition::CodeSent => println!("Verification code sent."),
                Transition::AlreadyComplete => return Err(WizardError::AlreadySubmitted),
                Transition::Advanced { .. }
                | Transition::Retreated { .. }
                | Transition::AwaitingVerification
                | Transition::NotVerifying => {}
            }
        }
    }

    /// Prompt every visible question of the current step, then move on.
    async fn step_round<R: RemoteStore>(
        &self,
        session: &mut SurveySession<R>,
    ) -> Result<Transition, WizardError> {
        let index = session.step();
        let Some(step) = session.current() else {
            return Ok(Transition::AlreadyComplete);
        };
        let definition = &step.definition;
        tracing::debug!(step = index, title = %definition.title, "prompting step");

        println!();
        println!("Step {} of {STEP_COUNT}: {}", index + 1, definition.title);
        if !definition.subtitle.is_empty() {
            println!("{}", definition.subtitle);
        }

        for question in definition.questions() {
            // Re-checked per question: answering the country decides whether a state is asked.
            if steps::is_visible(question, session.answers()) {
                self.ask_question(question, session)?;
            }
        }

        if index > 0 && self.select("Ready?", &["Continue", "Back"], 0)? == 1 {
            return Ok(session.previous());
        }
        Ok(session.next().await)
    }

    async fn verification_round<R: RemoteStore>(
        &self,
        session: &mut SurveySession<R>,
    ) -> Result<Transition, WizardError> {
        let Some(flow) = session.verification() else {
            return Ok(Transition::NotVerifying);
        };
        let phone = flow.phone().to_string();

        match flow.step() {
            VerificationStep::Phone => {
                let items = ["Send verification code", "Skip verification"];
                match self.select("How would you like to continue?", &items, 0)? {
                    0 => Ok(session.send_code().await),
                    _ => Ok(session.skip_verification().await),
                }
            }
            VerificationStep::Otp => {
                let items = ["Enter code", "Resend code", "Skip verification"];
                match self.select(&format!("Code sent to {phone}"), &items, 0)? {
                    0 => {
                        let code = self.ask_code()?;
                        let _ = session.enter_code(&code);
                        Ok(session.verify_code().await)
                    }
                    1 => Ok(session.resend_code().await),
                    _ => Ok(session.skip_verification().await),
                }
            }
            VerificationStep::Verified => Ok(session.verify_code().await),
        }
    }

    /// Ask a single question and write the answer into the session.
    fn ask_question<R: RemoteStore>(
        &self,
        question: &Question,
        session: &mut SurveySession<R>,
    ) -> Result<(), WizardError> {
        let field = question.field();
        let answers = session.answers();

        match question.kind() {
            QuestionKind::Input(input) => {
                let value =
                    self.ask_input(question, input, answers.text(field), answers.country())?;
                session.update_field(field, value)?;
            }

            QuestionKind::Multiline(_) => {
                let value = self.ask_multiline(question.ask(), answers.text(field))?;
                session.update_field(field, value)?;
            }

            QuestionKind::OneOf(one_of) => {
                let choices = steps::dependent_choices(one_of, answers);
                if choices.is_empty() {
                    return Ok(());
                }
                let default = selected_index(&choices, answers.text(field));
                let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
                // Region lists run long; let the respondent type to filter.
                let selection = if one_of.depends_on.is_some() {
                    self.fuzzy_select(question.ask(), &labels, default)?
                } else {
                    self.select(question.ask(), &labels, default)?
                };
                session.update_field(field, choices[selection].value.clone())?;
            }

            QuestionKind::AnyOf(any_of) => {
                let choices = any_of.choices();
                let defaults = selection_defaults(choices, answers, field);
                let values = self.ask_any_of(question.ask(), choices, &defaults)?;
                session.update_field(field, values)?;
            }
        }

        Ok(())
    }

    fn ask_input(
        &self,
        question: &Question,
        input: &InputQuestion,
        current: &str,
        country: Option<Country>,
    ) -> Result<String, WizardError> {
        let theme = self.theme();
        let prompt = match &input.placeholder {
            Some(hint) if current.is_empty() => format!("{} ({hint})", question.ask()),
            _ => question.ask().to_string(),
        };

        let input_type = input.input_type;
        let mut builder = Input::<String>::with_theme(&*theme)
            .with_prompt(prompt)
            .allow_empty(!question.is_required())
            .validate_with(move |value: &String| check_input(input_type, country, value));
        if !current.is_empty() {
            builder = builder.with_initial_text(current);
        }

        builder.interact_text().map_err(prompt_error)
    }

    fn ask_multiline(&self, prompt: &str, current: &str) -> Result<String, WizardError> {
        println!("{prompt}");

        match Editor::new().edit(current) {
            Ok(Some(value)) => Ok(value.trim_end().to_string()),
            // Editor closed without saving; keep what was there.
            Ok(None) => Ok(current.to_string()),
            Err(e) => Err(prompt_error(e)),
        }
    }

    fn ask_any_of(
        &self,
        prompt: &str,
        choices: &[Choice],
        defaults: &[bool],
    ) -> Result<Vec<String>, WizardError> {
        let theme = self.theme();
        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();

        let picked = MultiSelect::with_theme(&*theme)
            .with_prompt(prompt)
            .items(&labels)
            .defaults(defaults)
            .interact()
            .map_err(prompt_error)?;

        Ok(picked
            .into_iter()
            .map(|idx| choices[idx].value.clone())
            .collect())
    }

    fn ask_code(&self) -> Result<String, WizardError> {
        let theme = self.theme();
        Input::<String>::with_theme(&*theme)
            .with_prompt("6-digit code")
            .interact_text()
            .map_err(prompt_error)
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize, WizardError> {
        let theme = self.theme();
        Select::with_theme(&*theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn fuzzy_select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize, WizardError> {
        let theme = self.theme();
        FuzzySelect::with_theme(&*theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm(&self, prompt: &str) -> Result<bool, WizardError> {
        let theme = self.theme();
        Confirm::with_theme(&*theme)
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(prompt_error)
    }
}

/// Format check for a typed value, so a bad email is caught at the prompt.
///
/// Blank values pass; whether a field is required is the step's call.
fn check_input(input_type: InputType, country: Option<Country>, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Ok(());
    }
    match input_type {
        InputType::Text => Ok(()),
        InputType::Email => check_email(value).map_err(|e| e.message),
        InputType::Phone if is_valid_phone(value) => Ok(()),
        InputType::Phone => Err("Please enter a valid phone number".to_string()),
        InputType::PostalCode => check_postal_code(country, value).map_err(|e| e.message),
    }
}

/// Index of the choice whose value is `current`, or the first one.
fn selected_index(choices: &[Choice], current: &str) -> usize {
    choices
        .iter()
        .position(|c| c.value == current)
        .unwrap_or(0)
}

/// Which options of a multi-select start out checked.
fn selection_defaults(choices: &[Choice], answers: &SurveyAnswers, field: Field) -> Vec<bool> {
    choices
        .iter()
        .map(|c| answers.is_selected(field, &c.value))
        .collect()
}
