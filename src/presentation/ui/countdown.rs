use colored::Colorize;
use console::Term;
use std::io::{self, Write};
use std::time::Duration;

const MESSAGE: &str = "Something above isn't right.";

/// Blocking warning shown after a run with failures, counting down one
/// tick per second before the command returns.
#[derive(Debug, Clone)]
pub struct WarningCountdown {
    seconds: u64,
    tick: Duration,
    use_color: bool,
}

impl WarningCountdown {
    pub fn new(seconds: u64, use_color: bool) -> Self {
        Self {
            seconds,
            tick: Duration::from_secs(1),
            use_color,
        }
    }

    /// Length of one tick
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    fn frame(&self, remaining: u64) -> String {
        let message = if self.use_color {
            MESSAGE.red().to_string()
        } else {
            MESSAGE.to_string()
        };
        format!("{} Pausing {} \r", message, remaining)
    }

    /// Count down on `out`, rewriting a single line.
    pub async fn run_on<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.seconds == 0 {
            return Ok(());
        }

        for remaining in (1..=self.seconds).rev() {
            write!(out, "{}", self.frame(remaining))?;
            out.flush()?;
            tokio::time::sleep(self.tick).await;
        }

        writeln!(out)?;
        out.flush()
    }

    /// Count down on the terminal's stdout.
    pub async fn run(&self) -> io::Result<()> {
        let mut term = Term::stdout();
        self.run_on(&mut term).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_counts_down_to_one() {
        let mut out = Vec::new();
        WarningCountdown::new(3, false)
            .with_tick(Duration::from_millis(1))
            .run_on(&mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Something above isn't right. Pausing 3 \r\
             Something above isn't right. Pausing 2 \r\
             Something above isn't right. Pausing 1 \r\n"
        );
    }

    #[tokio::test]
    async fn test_zero_seconds_is_silent() {
        let mut out = Vec::new();
        WarningCountdown::new(0, false).run_on(&mut out).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_tick_per_second() {
        let start = tokio::time::Instant::now();
        let mut out = Vec::new();
        WarningCountdown::new(10, false).run_on(&mut out).await.unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(10) && elapsed < Duration::from_secs(11));
    }
}
