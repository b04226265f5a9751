//! Dashboard state: the agent form, the run history, the current run and
//! its status poller.
//!
//! - [`form`] - editable run request
//! - [`poller`] - interval-driven status poller and progress indicator
//! - [`state`] - the [`Dashboard`] and its effect/event protocol
//! - [`worker`] - executes effects against an [`crate::api::OrchestratorApi`]

pub mod form;
pub mod poller;
pub mod state;
pub mod worker;

pub use form::{AgentForm, FormField};
pub use poller::{PollerState, RunPoller, RunProgress};
pub use state::{ApiEvent, Dashboard, Effect};
pub use worker::{execute, Worker};
