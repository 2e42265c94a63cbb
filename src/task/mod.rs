mod interval_timer;
pub use interval_timer::{IntervalTimer, TaskState};

mod led_task;
pub use led_task::LedTask;

mod task_set;
pub use task_set::TaskSet;
