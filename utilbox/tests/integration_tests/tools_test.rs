// tests/integration_tests/tools_test.rs
use super::common::{create_test_file, run_cli};
use anyhow::Result;
use tempfile::TempDir;
use utilbox::{CalcError, evaluate_keys};

#[test]
fn test_calc_command() -> Result<()> {
    let config = TempDir::new()?;
    assert_eq!(run_cli(config.path(), &["calc", "12", "×", "3", "="])?, "36");
    assert_eq!(run_cli(config.path(), &["calc", "2 + 3 * 4 ="])?, "20");
    assert_eq!(run_cli(config.path(), &["calc", "-8", "-", "2", "="])?, "-10");
    assert!(run_cli(config.path(), &["calc", "1", "/", "0", "="]).is_err());
    Ok(())
}

#[test]
fn test_evaluate_keys_errors_are_typed() {
    assert_eq!(evaluate_keys(&["9", "÷", "0", "="]), Err(CalcError::DivisionByZero));
}

#[test]
fn test_json_command_formats_with_preferences() -> Result<()> {
    let config = TempDir::new()?;
    create_test_file(config.path(), "config.toml", "[json]\nindent = \"4\"\nsort_keys = true\n")?;

    let output = run_cli(config.path(), &["json", r#"{"b":1,"a":2}"#])?;
    assert_eq!(output, "{\n    \"a\": 2,\n    \"b\": 1\n}");

    let minified = run_cli(config.path(), &["json", "--minify", "{ \"b\" : [1, 2] }"])?;
    assert_eq!(minified, r#"{"b":[1,2]}"#);
    Ok(())
}

#[test]
fn test_json_command_validate_and_stats() -> Result<()> {
    let config = TempDir::new()?;
    assert_eq!(run_cli(config.path(), &["json", "--validate", "[1, 2]"])?, "Valid JSON");
    assert!(run_cli(config.path(), &["json", "--validate", "{oops}"]).is_err());

    let output = run_cli(config.path(), &["json", "--stats", r#"{"a":[true,null,"x"]}"#])?;
    assert!(output.contains("Objects: 1, arrays: 1, strings: 1, numbers: 0, booleans: 1, nulls: 1"));
    Ok(())
}

#[test]
fn test_password_command_is_reproducible_with_seed() -> Result<()> {
    let config = TempDir::new()?;
    let args = ["password", "--seed", "11", "--length", "20", "--count", "3"];
    let first = run_cli(config.path(), &args)?;
    let second = run_cli(config.path(), &args)?;
    assert_eq!(first, second);
    assert_eq!(first.lines().count(), 3);
    for line in first.lines() {
        let password = line.split_whitespace().next().unwrap_or_default();
        assert_eq!(password.chars().count(), 20);
    }
    Ok(())
}

#[test]
fn test_password_command_history_keeps_five() -> Result<()> {
    let config = TempDir::new()?;
    let output = run_cli(config.path(), &["password", "--seed", "1", "-n", "8"])?;
    assert_eq!(output.lines().count(), 5);
    Ok(())
}

#[test]
fn test_password_check_and_empty_charset() -> Result<()> {
    let config = TempDir::new()?;
    assert_eq!(
        run_cli(config.path(), &["password", "--check", "abcd1234"])?,
        "Very Weak (20/100)"
    );
    let err = run_cli(
        config.path(),
        &["password", "--no-uppercase", "--no-lowercase", "--no-numbers", "--no-symbols"],
    );
    assert!(err.is_err_and(|e| e.to_string() == "please select at least one character type"));
    Ok(())
}

#[test]
fn test_color_command() -> Result<()> {
    let config = TempDir::new()?;
    let output = run_cli(config.path(), &["color", "#3b82f6"])?;
    assert!(output.starts_with("HEX   #3B82F6\nRGB   rgb(59, 130, 246)\nHSL   hsl(217, 91%, 60%)"));
    assert_eq!(output.lines().filter(|l| l.starts_with("  #")).count(), 8);

    assert_eq!(run_cli(config.path(), &["color", "ff0000", "--format", "hsl"])?, "hsl(0, 100%, 50%)");
    assert!(run_cli(config.path(), &["color", "#12345"]).is_err());
    Ok(())
}

#[test]
fn test_qr_command_builds_url() -> Result<()> {
    let config = TempDir::new()?;
    let url = run_cli(config.path(), &["qr", "--size", "512", "--level", "h", "url", "example.com"])?;
    assert_eq!(
        url,
        "https://api.qrserver.com/v1/create-qr-code/?size=512x512&data=https%3A%2F%2Fexample.com&ecc=H"
    );

    let wifi = run_cli(config.path(), &["qr", "wifi", "home", "--password", "pw"])?;
    assert!(wifi.contains("size=256x256"));
    assert!(wifi.contains("data=WIFI%3AT%3AWPA%3BS%3Ahome%3BP%3Apw%3BH%3Afalse%3B%3B"));
    assert!(wifi.ends_with("&ecc=M"));

    assert!(run_cli(config.path(), &["qr", "--size", "300", "text", "hi"]).is_err());
    assert!(run_cli(config.path(), &["qr", "text", "   "]).is_err());
    Ok(())
}
