use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const QUIET_DIRECTIVES: &str = "swot_advisor=info,tower_http=info,hyper=warn,reqwest=warn";
const VERBOSE_DIRECTIVES: &str = "swot_advisor=debug,tower_http=debug,hyper=info,reqwest=info";

/// `RUST_LOG` wins over the built-in directives.
fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        VERBOSE_DIRECTIVES
    } else {
        QUIET_DIRECTIVES
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Human-readable logs on stderr; stdout is reserved for the report.
pub fn init_cli_logger(verbose: bool) {
    let result = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();

    // 已有全域 subscriber 時略過
    if result.is_err() {
        tracing::debug!("Logger already initialised");
    }
}

pub fn init_lambda_logger() {
    let result = tracing_subscriber::registry()
        .with(env_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .json() // CloudWatch 以 JSON 格式解析
                .with_current_span(false),
        )
        .try_init();

    if result.is_err() {
        tracing::debug!("Logger already initialised");
    }
}
