use tracing::Level;
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

/// Extra directives, comma separated, e.g. `MEDIADL_LOG=mediadl=trace`.
const LOG_ENV: &str = "MEDIADL_LOG";

/// Installs the stderr subscriber. Stdout is reserved for reports.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let mut filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .parse_lossy(format!("mediadl={}", level));

    for directive in std::env::var(LOG_ENV)
        .unwrap_or_default()
        .split(',')
        .filter(|s| !s.is_empty())
    {
        match directive.parse::<Directive>() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Ignoring log directive {directive:?}: {e}"),
        }
    }

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
