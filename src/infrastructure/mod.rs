pub mod directories;
pub mod logging;
pub mod notifier;
pub mod process;
pub mod quiet_hours;
pub mod run_lock;
