use std::collections::HashMap;
use std::io::{BufRead, Read, Write};
use thiserror::Error;
use tracing::debug;

/// Log relay errors
#[derive(Debug, Error)]
pub enum LogRelayError {
    #[error("Malformed header token '{0}'")]
    MalformedHeader(String),

    #[error("Header is missing '{0}'")]
    MissingField(&'static str),

    #[error("Invalid payload length '{0}'")]
    InvalidLength(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

const STDOUT_EVENT: &str = "PROCESS_LOG_STDOUT";
const STDERR_EVENT: &str = "PROCESS_LOG_STDERR";

/// Supervisord event listener that reprints child process output with a
/// per-process prefix.
///
/// `input` and `output` carry the event listener protocol; prefixed log lines
/// go to `log`.
pub struct LogRelay<R, W, L> {
    input: R,
    output: W,
    log: L,
    width: usize,
}

impl<R: BufRead, W: Write, L: Write> LogRelay<R, W, L> {
    pub fn new(input: R, output: W, log: L) -> Self {
        Self {
            input,
            output,
            log,
            width: 0,
        }
    }

    /// Process events until the input closes.
    pub fn run(&mut self) -> Result<(), LogRelayError> {
        loop {
            self.write_protocol("READY\n")?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("Event stream closed");
                return Ok(());
            }

            let header = parse_header(&line)?;
            let len = header.get("len").ok_or(LogRelayError::MissingField("len"))?;
            let expected: u64 = len.parse().map_err(|_| LogRelayError::InvalidLength(len.to_string()))?;

            // the header length is untrusted; never allocate more than arrives
            let mut payload = Vec::new();
            (&mut self.input).take(expected).read_to_end(&mut payload)?;
            if payload.len() as u64 != expected {
                return Err(LogRelayError::InvalidLength(len.to_string()));
            }
            let payload = String::from_utf8_lossy(&payload);

            match header.get("eventname").map(String::as_str) {
                Some(STDOUT_EVENT) => self.log_payload(&payload, false)?,
                Some(STDERR_EVENT) => self.log_payload(&payload, true)?,
                Some(_) => {}
                None => return Err(LogRelayError::MissingField("eventname")),
            }

            self.write_protocol("RESULT 2\nOK")?;
        }
    }

    /// Widest process prefix seen so far.
    pub fn width(&self) -> usize {
        self.width
    }

    fn write_protocol(&mut self, message: &str) -> Result<(), LogRelayError> {
        self.output.write_all(message.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    fn log_payload(&mut self, payload: &str, err: bool) -> Result<(), LogRelayError> {
        let (header_line, data) = payload.split_once('\n').unwrap_or((payload, ""));
        let header = parse_header(header_line)?;
        let process_name = header
            .get("processname")
            .ok_or(LogRelayError::MissingField("processname"))?;

        let name = if err {
            format!("{}:ERR", process_name)
        } else {
            process_name.clone()
        };

        self.width = self.width.max(name.chars().count());
        let prefix = format!("{:<width$} | ", name, width = self.width);

        for line in data.lines() {
            writeln!(self.log, "{}{}", prefix, line)?;
        }
        self.log.flush()?;

        Ok(())
    }
}

/// Parse `key:value key:value ...`.
pub fn parse_header(line: &str) -> Result<HashMap<String, String>, LogRelayError> {
    line.split_whitespace()
        .map(|token| {
            token
                .split_once(':')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| LogRelayError::MalformedHeader(token.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn event(eventname: &str, process: &str, data: &str) -> String {
        let payload = format!("processname:{} groupname:{} pid:1 channel:stdout\n{}", process, process, data);
        format!(
            "ver:3.0 server:supervisor serial:1 pool:logger poolserial:1 eventname:{} len:{}\n{}",
            eventname,
            payload.len(),
            payload
        )
    }

    fn relay(input: &str) -> (String, String) {
        let mut output = Vec::new();
        let mut log = Vec::new();
        LogRelay::new(Cursor::new(input.as_bytes()), &mut output, &mut log)
            .run()
            .unwrap();
        (String::from_utf8(output).unwrap(), String::from_utf8(log).unwrap())
    }

    #[test]
    fn test_empty_input_only_announces_ready() {
        let (output, log) = relay("");
        assert_eq!(output, "READY\n");
        assert_eq!(log, "");
    }

    #[test]
    fn test_stdout_event_is_prefixed() {
        let input = event(STDOUT_EVENT, "web", "Listening at 0.0.0.0:5000\nBooting worker\n");
        let (output, log) = relay(&input);

        assert_eq!(output, "READY\nRESULT 2\nOKREADY\n");
        assert_eq!(log, "web | Listening at 0.0.0.0:5000\nweb | Booting worker\n");
    }

    #[test]
    fn test_prefix_width_grows_with_names() {
        let input = [
            event(STDOUT_EVENT, "web", "one\n"),
            event(STDERR_EVENT, "web", "two\n"),
            event(STDOUT_EVENT, "worker", "three\n"),
            event(STDOUT_EVENT, "web", "four\n"),
        ]
        .concat();

        let (_, log) = relay(&input);

        assert_eq!(
            log,
            "web | one\n\
             web:ERR | two\n\
             worker  | three\n\
             web     | four\n"
        );
    }

    #[test]
    fn test_other_events_are_acknowledged_silently() {
        let input = "ver:3.0 eventname:PROCESS_STATE_RUNNING len:5\nabcde";
        let (output, log) = relay(input);

        assert_eq!(output, "READY\nRESULT 2\nOKREADY\n");
        assert_eq!(log, "");
    }

    #[test]
    fn test_missing_length_is_an_error() {
        let mut output = Vec::new();
        let mut log = Vec::new();
        let result = LogRelay::new(Cursor::new("eventname:PROCESS_LOG_STDOUT\n"), &mut output, &mut log).run();

        assert!(matches!(result, Err(LogRelayError::MissingField("len"))));
    }

    #[test]
    fn test_bad_length_is_an_error() {
        let mut output = Vec::new();
        let mut log = Vec::new();
        let result = LogRelay::new(Cursor::new("eventname:X len:many\n"), &mut output, &mut log).run();

        assert!(matches!(result, Err(LogRelayError::InvalidLength(_))));
    }

    #[test]
    fn test_oversized_length_is_an_error() {
        let mut output = Vec::new();
        let mut log = Vec::new();
        let result = LogRelay::new(
            Cursor::new("eventname:PROCESS_LOG_STDOUT len:18446744073709551615\nabc"),
            &mut output,
            &mut log,
        )
        .run();

        assert!(matches!(result, Err(LogRelayError::InvalidLength(_))));
        assert!(log.is_empty());
    }

    #[test]
    fn test_truncated_payload_is_an_error() {
        let mut output = Vec::new();
        let mut log = Vec::new();
        let result = LogRelay::new(Cursor::new("eventname:PROCESS_LOG_STDOUT len:50\nshort"), &mut output, &mut log).run();

        assert!(matches!(result, Err(LogRelayError::InvalidLength(_))));
    }

    #[test]
    fn test_parse_header() {
        let header = parse_header("processname:web groupname:web pid:42\n").unwrap();
        assert_eq!(header.get("processname").map(String::as_str), Some("web"));
        assert_eq!(header.get("pid").map(String::as_str), Some("42"));

        assert!(matches!(parse_header("novalue"), Err(LogRelayError::MalformedHeader(_))));
    }
}
