use anyhow::Result;
use std::io;

use crate::application::use_cases::log_relay::LogRelay;

/// Handler for the logger command: a supervisord event listener on
/// stdin/stdout that reprints process output on stderr.
pub struct LoggerCommand;

impl LoggerCommand {
    pub async fn execute(&self) -> Result<()> {
        tokio::task::spawn_blocking(|| {
            let stdin = io::stdin();
            LogRelay::new(stdin.lock(), io::stdout().lock(), io::stderr().lock()).run()
        })
        .await??;

        Ok(())
    }
}
