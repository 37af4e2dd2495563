//! Severity-routed logging for run narration
//!
//! Two output channels exist in this tool: resource listings and copy-paste
//! guidance go straight to stdout via `println!`, while everything narrating
//! the run itself (applies, waits, probe outcomes, failures) goes through
//! `tracing` with a severity so `-v` can widen it. This module is the seam
//! for the second channel; there is one sink and no global color state.

use std::fmt::Display;

/// Route an info-level narration message to the tracing sink
pub fn log_info<T: Display>(msg: T) {
    tracing::info!("{}", msg);
}

/// Route a warning (advisory prerequisite misses, best-effort failures)
pub fn log_warn<T: Display>(msg: T) {
    tracing::warn!("{}", msg);
}

/// Route a fatal diagnostic; the caller decides whether the run ends
pub fn log_error<T: Display>(msg: T) {
    tracing::error!("{}", msg);
}

/// Macro for convenient info logging
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::utils::logger::log_info(format!($($arg)*))
    };
}

/// Macro for convenient warning logging
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::utils::logger::log_warn(format!($($arg)*))
    };
}

/// Macro for convenient error logging
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::utils::logger::log_error(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl CaptureWriter {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CaptureWriter {
        type Writer = CaptureWriter;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_macros_format_through_the_tracing_sink() {
        let writer = CaptureWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            crate::log_info!("Applying {} of {} manifests", 3, 10);
            crate::log_warn!("metrics-server not found in {}", "kube-system");
            crate::log_error!("rollout deadline exceeded");
        });

        let out = writer.contents();
        assert!(out.contains("Applying 3 of 10 manifests"));
        assert!(out.contains("metrics-server not found in kube-system"));
        assert!(out.contains("rollout deadline exceeded"));
        assert!(out.contains("WARN"));
        assert!(out.contains("ERROR"));
    }
}
