// tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use gitscrub_core::config::{merge_rules, ScrubConfig, ScrubRule};
use gitscrub_core::scrub_blob_bytes;

#[test]
fn test_load_default_rules() {
    let config = ScrubConfig::load_default_rules().unwrap();
    assert!(!config.rules.is_empty());
    assert!(config
        .rules
        .iter()
        .any(|r| r.name == "aws_access_key_id_literal"));
    // Only the literal rule folds case; assignment rules match their spelling.
    let literal = config
        .rules
        .iter()
        .find(|r| r.name == "aws_access_key_id_literal")
        .unwrap();
    assert!(literal.case_insensitive);
    assert!(config
        .rules
        .iter()
        .filter(|r| r.name != "aws_access_key_id_literal")
        .all(|r| !r.case_insensitive));
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: test_rule
    pattern: "test"
    replace_with: "[TEST]"
    description: "A test rule"
    case_insensitive: true
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = ScrubConfig::load_from_file(file.path())?;
    assert_eq!(config.rules.len(), 1);
    assert_eq!(config.rules[0].name, "test_rule");
    assert!(config.rules[0].case_insensitive);
    assert_eq!(config.rules[0].pattern, "test");
    Ok(())
}

#[test]
fn test_load_from_file_case_insensitive_default() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: another_rule
    pattern: "another"
    replace_with: "[ANOTHER]"
    # case_insensitive is omitted, so it should default to false
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = ScrubConfig::load_from_file(file.path())?;
    assert_eq!(config.rules.len(), 1);
    assert!(!config.rules[0].case_insensitive);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_pattern() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: broken
    pattern: "("
    replace_with: "[X]"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let err = ScrubConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("broken"));
    Ok(())
}

#[test]
fn test_enable_list_activates_opt_in_rule() -> Result<()> {
    // A rule shipped with `enabled: false` must actually fire once it is
    // named in the enable list, all the way through compilation.
    let mut config = ScrubConfig {
        rules: vec![ScrubRule {
            name: "off_by_default".to_string(),
            pattern: "SECRET".to_string(),
            replace_with: "[TOKEN]".to_string(),
            enabled: Some(false),
            ..Default::default()
        }],
    };
    config.set_active_rules(&["off_by_default".to_string()], &[]);
    assert_eq!(config.rules.len(), 1);

    let scrubbed = scrub_blob_bytes(config, b"a SECRET b", "test_blob")?;
    assert_eq!(scrubbed, b"a [TOKEN] b");
    Ok(())
}

#[test]
fn test_merge_rules_user_override_keeps_position() {
    let default_config = ScrubConfig::load_default_rules().unwrap();
    let position = default_config
        .rules
        .iter()
        .position(|r| r.name == "aws_secret_access_key_assignment")
        .unwrap();

    let user_config = ScrubConfig {
        rules: vec![ScrubRule {
            name: "aws_secret_access_key_assignment".to_string(),
            pattern: "aws_secret_access_key\\s*=\\s*\\S+".to_string(),
            replace_with: "aws_secret_access_key = <redacted>".to_string(),
            ..Default::default()
        }],
    };

    let merged = merge_rules(default_config, Some(user_config));
    assert_eq!(merged.rules[position].name, "aws_secret_access_key_assignment");
    assert_eq!(
        merged.rules[position].replace_with,
        "aws_secret_access_key = <redacted>"
    );
}

#[test]
fn test_merge_rules_no_user_config() {
    let default_config = ScrubConfig::load_default_rules().unwrap();
    let expected = default_config.clone();
    let merged = merge_rules(default_config, None);
    assert_eq!(merged, expected);
}
