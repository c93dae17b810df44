pub mod loaders;
pub mod sort_config;
pub mod task;

pub use loaders::{load_options_file, OptionsFile};
pub use sort_config::{SortConfig, SortMode, SortOptions};
pub use task::{RunResult, Task, TaskResult, TaskStatus};
