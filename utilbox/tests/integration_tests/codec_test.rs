// tests/integration_tests/codec_test.rs
use super::common::{create_test_file, run_cli};
use anyhow::Result;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_base64_command_round_trip() -> Result<()> {
    let config = TempDir::new()?;
    let encoded = run_cli(config.path(), &["base64", "Hello, World!"])?;
    assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");

    let decoded = run_cli(config.path(), &["base64", "--decode", &encoded])?;
    assert_eq!(decoded, "Hello, World!");
    Ok(())
}

#[test]
fn test_base64_command_reads_file() -> Result<()> {
    let config = TempDir::new()?;
    let input_dir = TempDir::new()?;
    create_test_file(input_dir.path(), "payload.txt", "aGk=")?;
    let path = input_dir.path().join("payload.txt");
    let path = path.to_string_lossy();

    assert_eq!(run_cli(config.path(), &["base64", "-d", "--file", &path])?, "hi");
    Ok(())
}

#[test]
fn test_base64_command_encodes_binary_file() -> Result<()> {
    let config = TempDir::new()?;
    let input_dir = TempDir::new()?;
    let path = input_dir.path().join("image.png");
    fs::write(&path, [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0xff, 0x00])?;
    let path = path.to_string_lossy();

    assert_eq!(
        run_cli(config.path(), &["base64", "--file", &path])?,
        "iVBORw0KGgr/AA=="
    );
    Ok(())
}

#[test]
fn test_base64_command_decodes_wrapped_input() -> Result<()> {
    let config = TempDir::new()?;
    assert_eq!(run_cli(config.path(), &["base64", "-d", "SGVs\nbG8"])?, "Hello");
    Ok(())
}

#[test]
fn test_base64_command_reports_invalid_input() -> Result<()> {
    let config = TempDir::new()?;
    let err = run_cli(config.path(), &["base64", "--decode", "%%%"]);
    assert!(err.is_err_and(|e| e.to_string().starts_with("invalid Base64 string")));
    Ok(())
}

#[test]
fn test_url_command() -> Result<()> {
    let config = TempDir::new()?;
    assert_eq!(
        run_cli(config.path(), &["url", "name=John Doe&age=30"])?,
        "name%3DJohn%20Doe%26age%3D30"
    );
    assert_eq!(run_cli(config.path(), &["url", "-d", "caf%C3%A9"])?, "café");
    assert!(run_cli(config.path(), &["url", "-d", "50%"]).is_err());
    Ok(())
}

#[test]
fn test_hash_command() -> Result<()> {
    let config = TempDir::new()?;
    let all = run_cli(config.path(), &["hash", "abc"])?;
    assert_eq!(all.lines().count(), 5);
    assert!(all.starts_with("MD5      900150983cd24fb0d6963f7d28e17f72"));

    let sha256 = run_cli(config.path(), &["hash", "abc", "--algorithm", "sha-256"])?;
    assert_eq!(
        sha256,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    Ok(())
}
