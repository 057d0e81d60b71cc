use colored::Colorize;

/// Status messages printed around a run
pub struct DisplayHelper {
    pub use_color: bool,
}

impl DisplayHelper {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "::".blue().bold(), message);
        } else {
            println!(":: {}", message);
        }
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "Error:".red().bold(), message);
        } else {
            eprintln!("Error: {}", message);
        }
    }
}

/// Colour is used only on a terminal, and never when `NO_COLOR` is set or
/// `--no-color` was given.
pub fn color_enabled(no_color: bool) -> bool {
    !no_color && atty::is(atty::Stream::Stdout) && std::env::var_os("NO_COLOR").is_none()
}

/// Create a display helper with color detection
pub fn auto_display(no_color: bool) -> DisplayHelper {
    DisplayHelper::new(color_enabled(no_color))
}
