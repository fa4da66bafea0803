//! Session orchestration for the tool sandbox

pub mod session;

pub use session::{AutoApprove, AutoReject, Confirmer, SandboxSession};
