//! Logging setup for the Hiroba binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events are shown at the default level when `RUST_LOG` is unset.
const WORKSPACE_TARGETS: [&str; 3] = ["hiroba_server", "hiroba_shared", "tower_http"];

/// Build the default filter directive, e.g.
/// `hiroba_server=debug,hiroba_shared=debug,tower_http=debug,hiroba_server=debug`.
fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    WORKSPACE_TARGETS
        .iter()
        .copied()
        .chain(std::iter::once(binary_name))
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "hiroba-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use hiroba_shared::logger::setup_logger;
///
/// setup_logger("hiroba-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_covers_workspace_and_binary() {
        // テスト項目: デフォルトのフィルタがワークスペースのクレートとバイナリを含む
        // given (前提条件):
        let binary_name = "hiroba-server";

        // when (操作):
        let directive = default_directive(binary_name, "info");

        // then (期待する結果):
        assert!(directive.contains("hiroba_server=info"));
        assert!(directive.contains("hiroba_shared=info"));
        assert!(directive.contains("tower_http=info"));
        assert!(!directive.contains('-'));
    }
}
