//! Tools backed by the external `task-master` command.

pub mod add_task;
pub mod common;
pub mod expand;
pub mod list;
pub mod next;
pub mod research;
pub mod set_status;
pub mod show;

pub use add_task::{TaskAddParams, TaskAddTool};
pub use common::{TaskPriority, TaskStatus};
pub use expand::{TaskExpandParams, TaskExpandTool};
pub use list::{TaskListParams, TaskListTool};
pub use next::TaskNextTool;
pub use research::{TaskResearchParams, TaskResearchTool};
pub use set_status::{TaskSetStatusParams, TaskSetStatusTool};
pub use show::{TaskShowParams, TaskShowTool};
