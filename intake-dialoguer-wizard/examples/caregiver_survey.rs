//! Caregiver Survey
//!
//! Runs the ten-step survey in the terminal. With a Supabase project in
//! `intake.toml` (or `INTAKE_SUPABASE__URL` / `INTAKE_SUPABASE__ANON_KEY`)
//! answers are stored there; otherwise they are kept in memory and printed.
//!
//! Run with: cargo run -p intake-dialoguer-wizard --example caregiver_survey

use std::sync::Arc;

use intake::{RecordingRemote, RemoteStore, SurveySession, Table};
use intake_dialoguer_wizard::{DialoguerWizard, WizardError};
use intake_supabase::{IntakeConfig, SupabaseRemote};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("INTAKE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = IntakeConfig::load()?;
    let recording = RecordingRemote::new();
    let remote: Arc<dyn RemoteStore> = if config.supabase.is_configured() {
        Arc::new(SupabaseRemote::new(&config.supabase)?)
    } else {
        tracing::warn!("supabase is not configured, keeping answers in memory");
        Arc::new(recording.clone())
    };

    let mut session = SurveySession::new(remote);
    match DialoguerWizard::new().run(&mut session).await {
        Ok(receipt) => {
            println!();
            println!("Stored response {}", receipt.id.as_deref().unwrap_or("(no id)"));
        }
        Err(WizardError::Cancelled) => {
            println!("Survey cancelled.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    for record in recording.records(Table::SurveyResponses) {
        println!("{}", serde_json::to_string_pretty(&record)?);
    }

    Ok(())
}
