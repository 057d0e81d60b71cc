/// Application layer: the use cases driven by the command line
pub mod use_cases;
