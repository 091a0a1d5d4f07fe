//! Running a duel: sessions, AI, presentation hooks and frame scheduling.
//!
//! ## Key Types
//!
//! - `BattleSession`: explicit context owning one duel
//! - `BattleAi` / `AiBehavior`: battle-card selection for computer sides
//! - `BattleObserver`: notifications for the rendering layer
//! - `FrameScheduler`: frame-delayed tasks with generation-based cancel

pub mod ai;
pub mod hooks;
pub mod scheduler;
pub mod session;

pub use ai::{AiBehavior, BattleAi, SelectionView};
pub use hooks::{BattleObserver, EventLog};
pub use scheduler::{DueTask, FrameScheduler, Task, TaskId};
pub use session::BattleSession;
