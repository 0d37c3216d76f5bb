use miniform::config::{ConventionKind, Settings};
use miniform::PropsConvention;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_without_config_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let settings = Settings::from_root(temp_dir.path().to_str().unwrap())?;

    assert_eq!(settings.log.level, "info");
    assert_eq!(settings.props.convention, ConventionKind::Nested);
    assert_eq!(
        settings.props.convention(),
        PropsConvention::Nested {
            key: "data".to_string()
        }
    );
    Ok(())
}

#[test]
fn test_load_toml_config() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let miniform_toml = r#"
[log]
level = "debug"

[props]
convention = "nested"
data_key = "form"
"#;
    fs::write(root.join("miniform.toml"), miniform_toml)?;

    let settings = Settings::from_root(root.to_str().unwrap())?;

    assert_eq!(settings.log.level()?, tracing::Level::DEBUG);
    assert_eq!(
        settings.props.convention(),
        PropsConvention::Nested {
            key: "form".to_string()
        }
    );
    Ok(())
}

#[test]
fn test_flat_convention_from_yaml() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::write(root.join("miniform.yaml"), "props:\n  convention: flat\n")?;

    let settings = Settings::from_root(root.to_str().unwrap())?;
    assert_eq!(settings.props.convention(), PropsConvention::Flat);
    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::write(root.join("miniform.toml"), "[log]\nlevel = \"chatty\"\n")?;

    let err = Settings::from_root(root.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("log.level"));
    Ok(())
}
