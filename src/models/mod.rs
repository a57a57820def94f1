pub mod task;
pub mod user;

pub use task::{SortOrder, Task, TaskInput, TaskQuery, TaskStatus, TaskUpdate};
pub use user::{PublicUser, User};
