use super::*;
use std::error::Error;

/// Every variant's primary clap name must parse back to the same variant
macro_rules! assert_names_round_trip {
    ($($enum_type:ty),+ $(,)?) => {
        $(
            for variant in <$enum_type>::value_variants() {
                let value = variant
                    .to_possible_value()
                    .expect("no skipped variants");
                let parsed: $enum_type = value.get_name().parse().unwrap_or_else(|e| {
                    panic!("{} failed to parse: {e}", value.get_name())
                });
                assert_eq!(parsed, *variant);
            }
        )+
    };
}

fn assert_parses<T>(cases: &[(&str, T)])
where
    T: FromStr<Err = ConfigError> + PartialEq + std::fmt::Debug,
{
    for (input, expected) in cases {
        match input.parse::<T>() {
            Ok(parsed) => assert_eq!(&parsed, expected, "input '{input}'"),
            Err(e) => panic!("input '{input}' rejected: {e}"),
        }
    }
}

#[test]
fn test_primary_names_round_trip() {
    assert_names_round_trip!(
        LogLevel,
        LogFormat,
        LogOutput,
        ColorIntent,
        ModuleStatus,
        ModuleType,
        Layout,
    );
}

#[test]
fn test_log_level_aliases() {
    assert_parses(&[
        ("error", LogLevel::Error),
        ("fatal", LogLevel::Error),
        ("warn", LogLevel::Warning),
        ("warning", LogLevel::Warning),
        ("information", LogLevel::Info),
        ("debugging", LogLevel::Debug),
        ("verbose", LogLevel::Trace),
    ]);
}

#[test]
fn test_log_format_aliases() {
    assert_parses(&[
        ("txt", LogFormat::Text),
        ("plain", LogFormat::Text),
        ("json", LogFormat::Json),
        ("yml", LogFormat::Yaml),
    ]);
}

#[test]
fn test_color_intent_aliases() {
    assert_parses(&[
        ("detect", ColorIntent::Auto),
        ("default", ColorIntent::Auto),
        ("force", ColorIntent::Always),
        ("on", ColorIntent::Always),
        ("off", ColorIntent::Never),
    ]);
}

#[test]
fn test_module_enums_parse_lowercase_names() {
    assert_parses(&[
        ("placeholder", ModuleStatus::Placeholder),
        ("surrogate", ModuleStatus::Surrogate),
        ("implemented", ModuleStatus::Implemented),
    ]);
    assert_parses(&[
        ("interface", ModuleType::Interface),
        ("data", ModuleType::Data),
    ]);
    assert_parses(&[("hierarchical", Layout::Hierarchical)]);
}

#[test]
fn test_verbosity_saturates_at_trace() {
    let levels: Vec<LogLevel> = (0..=6).map(LogLevel::from_verbosity).collect();
    assert_eq!(
        levels,
        vec![
            LogLevel::Error,
            LogLevel::Warning,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
            LogLevel::Trace,
            LogLevel::Trace,
        ]
    );
    assert_eq!(LogLevel::from_verbosity(u8::MAX), LogLevel::Trace);
}

#[test]
fn test_log_levels_are_ordered_by_noise() {
    assert!(LogLevel::Error < LogLevel::Warning);
    assert!(LogLevel::Debug < LogLevel::Trace);
}

#[test]
fn test_log_level_directives() {
    assert_eq!(LogLevel::Error.as_directive(), "error");
    assert_eq!(LogLevel::Warning.as_directive(), "warn");
    assert_eq!(LogLevel::Trace.as_directive(), "trace");
}

#[test]
fn test_color_intent_explicit_values() {
    assert!(ColorIntent::Always.enabled());
    assert!(!ColorIntent::Never.enabled());
}

#[test]
fn test_invalid_value_reports_parse_error() {
    let err = "sometimes".parse::<ColorIntent>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "sometimes");
            assert_eq!(reason, "invalid color intent");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Matching is exact, not case-folded
    assert!("Implemented".parse::<ModuleStatus>().is_err());
    assert!("finished".parse::<ModuleStatus>().is_err());
}

#[test]
fn test_config_error_display() {
    let error = ConfigError::InvalidModulesDir {
        path: "/invalid/path".to_string(),
    };
    assert_eq!(error.to_string(), "Invalid modules directory: /invalid/path");
    assert!(error.source().is_none());

    let error = ConfigError::from(std::io::Error::other("gone"));
    assert!(error.to_string().starts_with("Failed to get current directory"));
    assert!(error.source().is_some());
}
