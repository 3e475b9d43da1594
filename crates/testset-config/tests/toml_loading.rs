//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for sandboxed working directories and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use testset_config::{ConfigError, OutputFormat, TestSetConfig};

#[test]
fn loads_layout_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[layout]
metadata_file = "meta.yml"
question_extension = "yml"

[general]
output_format = "json"
"#,
        )?;

        let config: TestSetConfig = Figment::from(Serialized::defaults(TestSetConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.layout.metadata_file, "meta.yml");
        assert_eq!(config.layout.question_extension, "yml");
        assert_eq!(config.general.output_format, OutputFormat::Json);
        assert_eq!(config.legacy.description_file, "description");
        Ok(())
    });
}

#[test]
fn partial_section_keeps_other_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[legacy]
quota_file = "quota"
"#,
        )?;

        let config: TestSetConfig = Figment::from(Serialized::defaults(TestSetConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.legacy.quota_file, "quota");
        assert_eq!(config.legacy.question_config, "config");
        assert_eq!(config.legacy.question_section, "question");
        assert_eq!(config.layout.metadata_file, "metadata.yaml");
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".testset")?;
        jail.create_file(
            ".testset/config.toml",
            r#"
[legacy]
description_file = "README"
"#,
        )?;

        let config = TestSetConfig::load().expect("config loads");
        assert_eq!(config.legacy.description_file, "README");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".testset")?;
        jail.create_file(
            ".testset/config.toml",
            r#"
[general]
output_format = "text"
"#,
        )?;
        jail.set_env("TESTSET_GENERAL__OUTPUT_FORMAT", "json");
        jail.set_env("TESTSET_LAYOUT__QUESTION_EXTENSION", "yml");

        let config = TestSetConfig::load().expect("config loads");
        assert_eq!(config.general.output_format, OutputFormat::Json);
        assert_eq!(config.layout.question_extension, "yml");
        Ok(())
    });
}

#[test]
fn invalid_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("TESTSET_LAYOUT__QUESTION_EXTENSION", "tar.gz");

        let error = TestSetConfig::load().unwrap_err();
        assert!(matches!(error, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn unknown_output_format_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("TESTSET_GENERAL__OUTPUT_FORMAT", "xml");

        let error = TestSetConfig::load().unwrap_err();
        assert!(matches!(error, ConfigError::Figment(_)));
        Ok(())
    });
}
