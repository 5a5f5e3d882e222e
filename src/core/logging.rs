use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "gesture_control=info,gesture_control_lib=info";
const VERBOSE_FILTER: &str = "gesture_control=debug,gesture_control_lib=debug";

/// Install the fmt subscriber. `RUST_LOG` wins over `verbose` when set.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // A subscriber may already be installed (tests, embedding callers)
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}
