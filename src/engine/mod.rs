//! Search engine core (pure + async pipeline).
//!
//! Everything that coordinates fetching, merging, and pagination lives
//! here. The only impure piece is [`QueryPipeline`], which awaits the
//! network collaborator; the rest are pure state machines the shell drives
//! with messages.

pub mod accumulator;
pub mod orchestrator;
pub mod pipeline;
pub mod scroll;
pub mod session;
pub mod viewer;

// Re-export for convenience
pub use accumulator::ResultAccumulator;
pub use orchestrator::{Cmd, Msg, Orchestrator};
pub use pipeline::{QueryPipeline, SearchOutcome};
pub use scroll::ScrollTrigger;
pub use session::{SearchSession, SessionStatus};
pub use viewer::{DocumentKey, DocumentStatus, DocumentViewer};
