//! Logging setup.

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Setup logging with the given level.
///
/// Console output goes to stderr so command output on stdout stays clean. When `file`
/// is given, events are also appended to it; keep the returned guard alive until exit
/// so buffered lines get flushed.
pub fn setup_logging(
    level: &str,
    json: bool,
    file: Option<&Path>,
) -> io::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let mut guard = None;
    let file_layer = match file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path.file_name().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "log file path has no file name")
            })?;
            fs::create_dir_all(dir)?;
            let (writer, g) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            guard = Some(g);
            Some(fmt::layer().with_writer(writer).with_ansi(false))
        }
        None => None,
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if json {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().pretty().with_writer(io::stderr))
            .init();
    }

    Ok(guard)
}
