use std::io::Write;
use std::sync::{Mutex, PoisonError};

use quillpost_core::{Notification, NotificationKind, NotificationSink};

/// Prints notifications to the terminal: errors to stderr, the rest to stdout.
pub struct ConsoleNotifier {
    out: Mutex<Box<dyn Write + Send>>,
    err: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleNotifier {
    pub fn stdio() -> Self {
        Self::with_writers(Box::new(std::io::stdout()), Box::new(std::io::stderr()))
    }

    pub fn with_writers(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }
}

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        log::debug!(
            "Notification ({}): {} - {}",
            notification.kind.as_str(),
            notification.title,
            notification.message
        );

        let target = match notification.kind {
            NotificationKind::Error => &self.err,
            NotificationKind::Success | NotificationKind::Info => &self.out,
        };
        let mut writer = target.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "{}", render(notification));
        let _ = writer.flush();
    }
}

fn render(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Info => "info",
        NotificationKind::Error => "error",
    };
    format!(
        "[{marker}] {}: {}",
        notification.title, notification.message
    )
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use quillpost_core::{Notification, NotificationKind, NotificationSink};

    use super::ConsoleNotifier;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().expect("buffer lock").clone())
                .expect("output should be utf-8")
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("buffer lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn errors_go_to_stderr_and_the_rest_to_stdout() {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let notifier = ConsoleNotifier::with_writers(Box::new(out.clone()), Box::new(err.clone()));

        notifier.notify(&Notification::new(
            NotificationKind::Success,
            "Already up to date",
            "You are running the latest version 2.0.0.",
        ));
        notifier.notify(&Notification::new(
            NotificationKind::Error,
            "Failed to check for updates",
            "The release server answered with HTTP 404 (Not Found).",
        ));

        assert_eq!(
            out.contents(),
            "[ok] Already up to date: You are running the latest version 2.0.0.\n"
        );
        assert_eq!(
            err.contents(),
            "[error] Failed to check for updates: The release server answered with HTTP 404 (Not Found).\n"
        );
    }
}
