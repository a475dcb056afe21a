pub mod dry_run;
pub mod error;
pub mod progress;
