pub mod build_info;

use std::{io, sync::Once};

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber. Logs go to stderr so stdout
/// carries only the run report.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "paperwork_core=info".parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    });
}
