use env_logger::{Builder, DEFAULT_FILTER_ENV};
use log::{LevelFilter, debug};

pub fn init_logger(verbose: bool, quiet: bool) {
    let env_filters = std::env::var(DEFAULT_FILTER_ENV).ok();
    // A second init in the same process keeps the first logger.
    let _ = logger_builder(verbose, quiet, env_filters.as_deref()).try_init();

    debug!("Logger initialized");
}

/// `--quiet` wins over everything, including module directives in `RUST_LOG`.
/// Otherwise `RUST_LOG` is applied on top of a warn default and `--verbose`
/// raises the default to debug.
fn logger_builder(verbose: bool, quiet: bool, env_filters: Option<&str>) -> Builder {
    let mut builder = Builder::new();
    builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if quiet {
        builder.filter_level(LevelFilter::Off);
        return builder;
    }

    builder.filter_level(LevelFilter::Warn);
    if let Some(filters) = env_filters {
        builder.parse_filters(filters);
    }
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_level(verbose: bool, quiet: bool, env_filters: Option<&str>) -> LevelFilter {
        logger_builder(verbose, quiet, env_filters).build().filter()
    }

    #[test]
    fn quiet_ignores_module_directives() {
        assert_eq!(max_level(false, true, Some("volreport=debug")), LevelFilter::Off);
        assert_eq!(max_level(false, true, Some("trace")), LevelFilter::Off);
    }

    #[test]
    fn verbose_raises_default_to_debug() {
        assert_eq!(max_level(true, false, None), LevelFilter::Debug);
    }

    #[test]
    fn environment_applies_without_flags() {
        assert_eq!(max_level(false, false, None), LevelFilter::Warn);
        assert_eq!(max_level(false, false, Some("volreport=info")), LevelFilter::Info);
    }
}
