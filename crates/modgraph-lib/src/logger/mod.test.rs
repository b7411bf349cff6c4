use super::*;

#[test]
fn test_filter_directives_scope_to_our_crates() {
    assert_eq!(
        filter_directives(LogLevel::Debug),
        "modgraph=debug,modgraph_lib=debug,warn"
    );
    assert_eq!(
        filter_directives(LogLevel::Error),
        "modgraph=error,modgraph_lib=error,warn"
    );
}

#[test]
fn test_filter_directives_parse() {
    for level in [LogLevel::Error, LogLevel::Info, LogLevel::Trace] {
        assert!(EnvFilter::try_new(filter_directives(level)).is_ok());
    }
}

#[test]
fn test_global_logger_consistent_with_flag() {
    assert_eq!(Logger::is_initialized(), Logger::global().is_some());
}

#[test]
fn test_progress_span_macro_builds_span() {
    let span = crate::progress_span!("load", total = 3u64);
    // No subscriber in unit tests, so the span is disabled but constructible
    let _enter = span.enter();
}
