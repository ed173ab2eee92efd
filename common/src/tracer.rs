use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Create this object to initialise the fmt tracing subscriber.
///
/// The filter is taken from `RUST_LOG` when set, otherwise from the given
/// default directive. Safe to call more than once; subsequent calls are
/// no-ops, so tests may initialise it freely.
pub struct Tracer;

impl Tracer {
    pub fn new(default_directive: &str) -> Self {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .ok();

        Self
    }
}
