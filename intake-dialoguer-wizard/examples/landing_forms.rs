//! Landing Page Forms
//!
//! Shows the rotating tagline, then the waitlist dialog and the collaborator
//! inquiry form, backed by an in-memory store.
//!
//! Run with: cargo run -p intake-dialoguer-wizard --example landing_forms

use std::time::Duration;

use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use intake::{
    CollaboratorField, CollaboratorForm, FormOutcome, RecordingRemote, TaglineCarousel,
    WaitlistForm, WaitlistStep,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let theme = ColorfulTheme::default();
    let remote = RecordingRemote::new();

    let carousel = TaglineCarousel::with_period(Duration::from_millis(400));
    let mut taglines = carousel.subscribe();
    println!("{}", carousel.current());
    for _ in 0..2 {
        taglines.changed().await?;
        println!("{}", intake::TAGLINES[*taglines.borrow_and_update()]);
    }
    drop(carousel);

    println!();
    println!("Join the waitlist");
    let waitlist = WaitlistForm::new();
    while waitlist.step() == WaitlistStep::Form {
        let signup = waitlist.signup();
        waitlist.set_name(
            Input::<String>::with_theme(&theme)
                .with_prompt("Name")
                .with_initial_text(signup.name)
                .interact_text()?,
        );
        waitlist.set_email(
            Input::<String>::with_theme(&theme)
                .with_prompt("Email")
                .with_initial_text(signup.email)
                .interact_text()?,
        );
        waitlist.set_agree_to_terms(
            Confirm::with_theme(&theme)
                .with_prompt("I agree to the terms and privacy policy")
                .interact()?,
        );

        match waitlist.submit(&remote).await {
            FormOutcome::Submitted { .. } => println!("Thanks! We'll be in touch."),
            FormOutcome::Rejected(notice) | FormOutcome::Failed(notice) => {
                println!("Error: {notice}")
            }
            FormOutcome::AlreadySubmitted | FormOutcome::Busy => {}
        }
    }
    waitlist.close();

    println!();
    if Confirm::with_theme(&theme)
        .with_prompt("Would you like to collaborate with us?")
        .default(false)
        .interact()?
    {
        let mut form = CollaboratorForm::new();
        while !form.is_submitted() {
            for field in CollaboratorField::ALL {
                let current = form.inquiry().get(field).to_string();
                let value = Input::<String>::with_theme(&theme)
                    .with_prompt(field.label())
                    .with_initial_text(current)
                    .allow_empty(true)
                    .interact_text()?;
                form.update_field(field, value);
            }
            match form.submit(&remote).await {
                FormOutcome::Submitted { .. } => println!("Thank you, we'll reach out soon."),
                FormOutcome::Rejected(notice) | FormOutcome::Failed(notice) => {
                    println!("Error: {notice}")
                }
                FormOutcome::AlreadySubmitted | FormOutcome::Busy => {}
            }
        }
    }

    println!();
    for (table, record) in remote.inserts() {
        println!("{table}: {record}");
    }
    Ok(())
}
