// tests/integration_tests/conversion_test.rs
use super::common::run_cli;
use anyhow::Result;
use tempfile::TempDir;
use utilbox::{Category, ConversionError, ConversionOutcome, convert, convert_input};

#[test]
fn test_length_and_temperature_conversions() -> Result<()> {
    let km_to_mi = convert(1.0, "km", "mi", Category::Length)?;
    assert!((km_to_mi - 0.621_371).abs() < 1e-6);

    let boiling = convert(100.0, "c", "f", Category::Temperature)?;
    assert!((boiling - 212.0).abs() < 1e-9);

    let outcome = convert_input("-40", "f", "c", Category::Temperature)?;
    assert_eq!(outcome.display(), Some("-40"));
    Ok(())
}

#[test]
fn test_invalid_input_and_unknown_units() -> Result<()> {
    assert_eq!(
        convert_input("abc", "m", "ft", Category::Length)?,
        ConversionOutcome::InvalidInput
    );
    assert!(matches!(
        convert_input("1", "m", "parsec", Category::Length),
        Err(ConversionError::InvalidUnit { .. })
    ));
    Ok(())
}

#[test]
fn test_convert_command_infers_category() -> Result<()> {
    let config = TempDir::new()?;
    let output = run_cli(config.path(), &["convert", "5", "km", "m"])?;
    assert_eq!(output, "5 km = 5000 m");

    let swapped = run_cli(config.path(), &["convert", "--swap", "5000", "km", "m"])?;
    assert_eq!(swapped, "5000 m = 5 km");
    Ok(())
}

#[test]
fn test_convert_command_negative_value_and_all() -> Result<()> {
    let config = TempDir::new()?;
    let output = run_cli(config.path(), &["convert", "-40", "c", "f"])?;
    assert_eq!(output, "-40 c = -40 f");

    let all = run_cli(config.path(), &["convert", "--all", "1", "h", "min"])?;
    assert!(all.starts_with("1 h in Time:"));
    assert!(all.contains("3600  s"));
    assert!(all.contains("60  min"));
    Ok(())
}

#[test]
fn test_convert_command_rejects_bad_number() -> Result<()> {
    let config = TempDir::new()?;
    let err = run_cli(config.path(), &["convert", "ten", "m", "ft"]);
    assert!(err.is_err());
    Ok(())
}

#[test]
fn test_units_command_lists_categories() -> Result<()> {
    let config = TempDir::new()?;
    let output = run_cli(config.path(), &["units"])?;
    assert_eq!(output.lines().count(), 8);
    let speed = run_cli(config.path(), &["units", "speed"])?;
    assert!(speed.lines().any(|line| line.starts_with("knot")));
    Ok(())
}
