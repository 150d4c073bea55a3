//! `lift-dispatch`: what a car does next, and how it gets there.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`direction`]   | `Direction`: derived travel direction                      |
//! | [`task`]        | `TransportTask`, `TaskPhase`, `TaskEnv`, `Landings`, `CarMotion` |
//! | [`scheduler`]   | `DispatchScheduler`: ordered task queue + insertion policy |
//! | [`error`]       | `RequestRejection`                                          |
//!
//! # Queue discipline
//!
//! Each car owns one `DispatchScheduler`.  Its queue is only ever reordered
//! at enqueue time: a new floor is slotted into the current leg of travel
//! when it lies on the way, and otherwise joins the end.  The head task is
//! never displaced, so at most one task is in flight at a time and it always
//! runs to completion.
//!
//! A task's life is `NotStarted → Traveling → ArrivedPendingOpen → Dwelling
//! → Completed`.  The owning car calls `TransportTask::process` once per tick
//! and removes the task from the queue (by `TaskId`) when it reports
//! `Completed`.

pub mod direction;
pub mod error;
pub mod scheduler;
pub mod task;

#[cfg(test)]
mod tests;

pub use direction::Direction;
pub use error::RequestRejection;
pub use scheduler::DispatchScheduler;
pub use task::{CarMotion, Landings, REACH_TOLERANCE, TaskEnv, TaskPhase, TransportTask};
