//! VoxCart engine: dispatch, session state machine, and the runtime loop.

pub mod dispatch;
pub mod feedback;
pub mod metrics;
pub mod runtime;
pub mod session;
