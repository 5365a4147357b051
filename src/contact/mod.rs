// Contact Module - Simulated Call Workflow
//
// Implements the per-entity call sub-flow (dial, connect, elapsed counter,
// notes) with the initiation seam injected for testability.

pub mod call;
pub mod traits;

pub use call::{CallEvent, CallMachine, CallPhase, CallReport, CallWorkflow};
pub use traits::{CallHandle, CallInitiator, SimulatedCallInitiator};
