//! Request/response boundary for the stockyard engines.
//!
//! Translates JSON scripts into engine requests and engine results (or errors) back
//! into JSON payloads.

pub mod response;
pub mod script;

pub use response::{StepOutcome, error_payload};
pub use script::{Script, Step, replay};
