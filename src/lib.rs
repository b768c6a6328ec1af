//! rankgap classifies "gap" keywords (terms competitors rank for that the
//! brand does not) into pass / review / out-of-play buckets with opportunity
//! scores and human-readable justifications.
//!
//! The engine lives under [`workflows::gap`]; [`config`], [`telemetry`], and
//! [`error`] carry the service plumbing shared by the CLI and HTTP surfaces.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
