//! Job-shop encoding domain models.
//!
//! Input types describe the scheduling problem; output types describe the
//! binary constraint model derived from it.
//!
//! # Domain Mappings
//!
//! | Model | Scheduling | Constraint model |
//! |-------|-----------|------------------|
//! | `Job` | Job | Chain of start-once groups |
//! | `Operation` | Operation | One start-once group |
//! | `TimeWindow` | Admissible starts | Group size |
//! | `VarKey` | Start at time t | Binary variable |
//! | `ExclusionPair` | Overlap / order conflict | "not both 1" |

mod assignment;
mod constraint;
mod job;
mod variable;
mod window;

pub use assignment::{Assignment, Violation, ViolationKind};
pub use constraint::{ExclusionOrigin, ExclusionPair, StartOnceGroup};
pub use job::{Job, JobShop, Operation};
pub use variable::VarKey;
pub use window::TimeWindow;
