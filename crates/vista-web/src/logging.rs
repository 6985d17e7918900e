#![forbid(unsafe_code)]

//! `tracing` output for the browser console.
//!
//! Each formatted event is buffered and written with the console method
//! matching its level, so the browser's own level filter works. There are no
//! timestamps: the console adds its own.

use tracing_subscriber::EnvFilter;

/// Level directive used when the configured one is blank or invalid.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Build the subscriber filter for a configured `log_level`.
#[must_use]
pub fn env_filter(level: &str) -> EnvFilter {
    let level = level.trim();
    if level.is_empty() {
        return EnvFilter::new(DEFAULT_DIRECTIVE);
    }
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(target_arch = "wasm32")]
pub use console::init;

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;
    use web_sys::console;

    use super::env_filter;

    /// Install the console subscriber and the panic hook. Safe to call twice;
    /// the second call keeps the first subscriber.
    pub fn init(level: &str) {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(ConsoleMakeWriter)
            .with_env_filter(env_filter(level))
            .with_ansi(false)
            .without_time()
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            tracing::debug!("log subscriber already installed");
            return;
        }
        std::panic::set_hook(Box::new(|info| {
            tracing::error!(%info, "panic");
        }));
    }

    struct ConsoleMakeWriter;

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter::new(Level::INFO)
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter::new(*meta.level())
        }
    }

    /// Buffers one formatted event; emits it on drop.
    struct ConsoleWriter {
        level: Level,
        buf: Vec<u8>,
    }

    impl ConsoleWriter {
        fn new(level: Level) -> Self {
            Self {
                level,
                buf: Vec::new(),
            }
        }
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let text = String::from_utf8_lossy(&self.buf);
            let text = text.trim_end();
            if text.is_empty() {
                return;
            }
            let line = JsValue::from_str(text);
            match self.level {
                Level::ERROR => console::error_1(&line),
                Level::WARN => console::warn_1(&line),
                Level::INFO => console::info_1(&line),
                _ => console::debug_1(&line),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_level_uses_default() {
        assert_eq!(env_filter("  ").to_string(), DEFAULT_DIRECTIVE);
    }

    #[test]
    fn per_target_directives_are_kept() {
        let filter = env_filter("warn,vista_widgets=debug").to_string();
        assert!(filter.contains("vista_widgets=debug"), "{filter}");
        assert!(filter.contains("warn"), "{filter}");
    }
}
