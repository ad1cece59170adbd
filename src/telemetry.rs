use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "userstore=debug,sqlx=warn";

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter
/// and `LOG_FORMAT=json` switches to JSON lines. Fails if a global subscriber
/// is already set.
pub fn init_tracing() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    let installed = if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).try_init()
    };
    installed.map_err(|e| anyhow::anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails_without_panicking() {
        let _ = init_tracing();
        assert!(init_tracing().is_err());
    }
}
