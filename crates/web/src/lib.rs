//! `tallydesk-web` — the HTTP application.
//!
//! Route handlers decode form submissions, hand them to the action pipeline,
//! and translate the resulting [`app::actions::ActionOutcome`] into HTTP:
//! field errors re-render as state, successes redirect. Navigation is plain
//! data here; no control-flow signal ever passes through an error path.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
pub mod revalidate;
