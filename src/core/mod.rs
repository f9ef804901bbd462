pub mod command;
pub mod diagnostics;
pub mod dispatcher;
pub mod report;
pub mod router;
pub mod runner;
