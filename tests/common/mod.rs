//! Common test utilities and helpers
#![allow(dead_code)]

pub mod git_fixtures;

pub use git_fixtures::*;

/// Skip the current test when git is not installed
macro_rules! require_git {
    () => {
        if !crate::common::git_available() {
            eprintln!("git not found on PATH, skipping");
            return;
        }
    };
}
