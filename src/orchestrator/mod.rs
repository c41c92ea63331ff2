//! Channel refresh orchestration: fan-out over versions and measures,
//! generation-tagged fan-in, normalization, and a single publish per refresh.
mod driver;
mod handle;
mod policy;
mod report;
mod state;


pub use driver::OrchestratorConfig;
pub use handle::{OrchestratorHandle, spawn_orchestrator};
pub use policy::JoinPolicy;
pub use report::{BranchFailure, RefreshOutcome, RefreshReport};
pub use state::{Generation, RefreshState};
