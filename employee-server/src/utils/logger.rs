//! Logging Infrastructure
//!
//! `tracing` subscriber setup: env-filter driven, stdout by default, a daily
//! rolling file when a log directory is configured.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the global logger
///
/// `RUST_LOG` wins when set; otherwise `log_level` applies to this crate and
/// to `tower_http`.
pub fn init_logger(log_level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(log_level).into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "employee-server");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
        eprintln!("Log directory {dir} does not exist, logging to stdout");
    }

    subscriber.init();
}

fn default_filter(log_level: &str) -> String {
    format!("employee_server={log_level},tower_http={log_level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(
            default_filter("debug"),
            "employee_server=debug,tower_http=debug"
        );
    }
}
