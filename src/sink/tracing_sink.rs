use super::LogSink;
use crate::context::CorrelationContext;

/// Target used for every line emitted through [`TracingSink`].
pub const LOG_TARGET: &str = "logprint";

/// Forwards log lines to the `tracing` facade.
///
/// Each event carries the caller's request id (empty when none is bound) in a
/// `req_id` field, so subscribers can filter or index by it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Sink writing under the [`LOG_TARGET`] target.
    pub fn new() -> Self {
        Self
    }
}

fn current_request_id() -> String {
    CorrelationContext::current().request_id().unwrap_or_default()
}

impl LogSink for TracingSink {
    fn trace(&self, message: &str) {
        tracing::trace!(target: LOG_TARGET, req_id = %current_request_id(), "{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: LOG_TARGET, req_id = %current_request_id(), "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: LOG_TARGET, req_id = %current_request_id(), "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: LOG_TARGET, req_id = %current_request_id(), "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: LOG_TARGET, req_id = %current_request_id(), "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.text()
    }

    #[test]
    fn test_lines_carry_level_target_and_request_id() {
        let ctx = CorrelationContext::new();
        ctx.set_request_id("req-9");

        let output = capture(|| {
            ctx.sync_scope(|| {
                let sink = TracingSink::new();
                sink.debug("UserDao.find--[@@START@@],args:[7]");
                sink.error("UserDao.find-[@@END@@],args:[7],elapsedMs:[1]");
            })
        });

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2, "{}", output);
        assert!(lines[0].contains("DEBUG"));
        assert!(lines[0].contains(LOG_TARGET));
        assert!(lines[0].contains("req_id=req-9"));
        assert!(lines[0].contains("UserDao.find--[@@START@@],args:[7]"));
        assert!(lines[1].contains("ERROR"));
        assert!(lines[1].contains("[@@END@@]"));
    }

    #[test]
    fn test_every_channel_reaches_the_subscriber() {
        let output = capture(|| {
            let sink = TracingSink::new();
            sink.trace("t-line");
            sink.debug("d-line");
            sink.info("i-line");
            sink.warn("w-line");
            sink.error("e-line");
        });

        for (level, message) in [("TRACE", "t-line"), ("DEBUG", "d-line"), ("INFO", "i-line"), ("WARN", "w-line"), ("ERROR", "e-line")] {
            let line = output.lines().find(|l| l.contains(message)).unwrap();
            assert!(line.contains(level), "{}", line);
        }
    }

    #[test]
    fn test_current_request_id_defaults_to_empty() {
        let id = CorrelationContext::new().sync_scope(current_request_id);
        assert_eq!(id, "");
    }
}
