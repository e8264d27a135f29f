pub mod args;
pub mod output;
pub mod report;
mod shell;

pub use args::Args;
pub use shell::run;
