//! Form-accuracy verification engine for stand-scouting data.
//!
//! Pure engine crate: receives grouped stand forms and authoritative match
//! results, returns discrepancy reports. Storage and HTTP live behind the
//! collaborator traits in [`source`].

pub mod compare;
pub mod config;
pub mod coverage;
pub mod engine;
pub mod error;
pub mod fields;
pub mod group;
pub mod join;
pub mod model;
pub mod reconcile;
pub mod render;
pub mod source;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{CheckOptions, CompetitionContext, CompetitionKey};
pub use engine::{run, verify_form_accuracy, AccuracyInput, Collaborators};
pub use error::AccuracyError;
pub use fields::Observations;
pub use group::{group_by_alliance, group_by_team};
pub use model::{
    AccuracyOutcome, AccuracyReport, AllianceGroup, AuthoritativeMatch, ScoutingForm, TeamGroup,
};
pub use render::render_text;
pub use source::{Authorizer, FormStore, MatchSource};
