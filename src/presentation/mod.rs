/// Presentation layer: command line and console output
pub mod cli;
pub mod ui;
