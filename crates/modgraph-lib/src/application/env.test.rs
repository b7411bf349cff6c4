use super::*;

fn env_with(f: impl FnOnce(&mut EnvironmentConfig)) -> EnvironmentConfig {
    let mut env = EnvironmentConfig::default();
    f(&mut env);
    env
}

#[test]
fn test_no_environment_keeps_intent() {
    let env = EnvironmentConfig::default();
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
    assert_eq!(
        env.apply_color_config(ColorIntent::Always),
        ColorIntent::Always
    );
}

#[test]
fn test_no_color_disables() {
    let env = env_with(|e| e.no_color = Some("1".to_string()));
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let env = env_with(|e| e.no_color = Some(String::new()));
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
}

#[test]
fn test_clicolor_zero_disables() {
    let env = env_with(|e| e.clicolor = Some("0".to_string()));
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}

#[test]
fn test_force_color_beats_no_color() {
    let env = env_with(|e| {
        e.clicolor = Some("0".to_string());
        e.no_color = Some("1".to_string());
        e.force_color = Some("1".to_string());
    });
    assert_eq!(
        env.apply_color_config(ColorIntent::Auto),
        ColorIntent::Always
    );
}

#[test]
fn test_force_color_false_disables() {
    let env = env_with(|e| e.force_color = Some("false".to_string()));
    assert_eq!(
        env.apply_color_config(ColorIntent::Always),
        ColorIntent::Never
    );
}

#[test]
fn test_ci_disables_everything() {
    let env = env_with(|e| {
        e.ci = Some("true".to_string());
        e.force_color = Some("1".to_string());
    });
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}

#[test]
fn test_load_reads_from_process_environment() {
    // Only checks that deserialization succeeds against the live environment
    assert!(EnvironmentConfig::load().is_ok());
}
