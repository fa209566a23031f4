//! # intake-supabase
//!
//! Supabase-backed [`RemoteStore`](intake_types::RemoteStore) for the intake
//! flows.
//!
//! Rows go to PostgREST (`/rest/v1/{table}`), phone codes to Supabase Auth
//! (`/auth/v1/otp`, `/auth/v1/verify`). Analytics events are logged only, as
//! the project has no events table.
//!
//! ## Configuration
//!
//! ```toml
//! # intake.toml
//! [supabase]
//! url = "https://abcd.supabase.co"
//! anon_key = "..."
//! timeout_secs = 30
//! ```
//!
//! Every key can be overridden with `INTAKE_SUPABASE__<KEY>`.

pub mod client;
pub mod config;
pub mod error;

pub use client::SupabaseRemote;
pub use config::{IntakeConfig, SupabaseConfig};
pub use error::{ConfigError, SupabaseError};
