use tracing_subscriber::EnvFilter;

/// Logy jdou na stderr; stdout patří jen řádkům `ready` a `shutting down`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[macro_export]
macro_rules! log_anyhow_with_source {
    ($err:expr, $($rest:tt)+) => {{
        let err: &anyhow::Error = &$err;

        // nejnižší příčina (root cause), např. "capacity overflow"
        let root = err.root_cause();

        ::tracing::error!(
            error = %err,
            root_cause = %root,
            $($rest)+
        );
    }};
}

#[macro_export]
macro_rules! log_warn_display {
    ($err:expr, $($rest:tt)+) => {{
        ::tracing::warn!(
            error = %$err,
            $($rest)+
        );
    }};
}
