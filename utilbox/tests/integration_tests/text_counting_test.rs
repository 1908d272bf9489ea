// tests/integration_tests/text_counting_test.rs
use super::common::{create_test_file, run_cli, setup_test_directory};
use anyhow::Result;
use tempfile::TempDir;
use utilbox::{analyze, scan_directory, word_frequency};

#[test]
fn test_scan_directory_skips_hidden_and_git() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let files = scan_directory(temp_dir.path(), &[".git"])?;

    assert_eq!(files.len(), 3, "hidden files and .git contents are skipped");
    let words: Vec<usize> = files.iter().map(|f| f.stats.words).collect();
    assert_eq!(words, vec![13, 11, 2]);
    assert!(
        files
            .first()
            .is_some_and(|f| f.path.ends_with("chapters/one.md"))
    );
    Ok(())
}

#[test]
fn test_count_command_lists_files_and_totals() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = TempDir::new()?;
    let dir = temp_dir.path().to_string_lossy().into_owned();

    let output = run_cli(config.path(), &["count", &dir, "--top", "2"])?;
    let listed: Vec<&str> = output.lines().take_while(|l| l.contains("words  ")).collect();
    assert_eq!(listed.len(), 2);
    assert!(listed.first().is_some_and(|l| l.trim_start().starts_with("13 words")));
    assert!(output.contains("Words:                  26"));
    Ok(())
}

#[test]
fn test_count_command_json_report() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = TempDir::new()?;
    let dir = temp_dir.path().to_string_lossy().into_owned();

    let output = run_cli(config.path(), &["count", &dir, "--json"])?;
    let report: serde_json::Value = serde_json::from_str(&output)?;
    assert_eq!(report["total"]["words"], 26);
    assert_eq!(report["files"].as_array().map(Vec::len), Some(3));
    assert!(report.get("top_words").is_none());
    Ok(())
}

#[test]
fn test_count_inline_text_with_frequency_and_target() -> Result<()> {
    let config = TempDir::new()?;
    let output = run_cli(
        config.path(),
        &[
            "count",
            "--text",
            "The cat saw the other cat. The end.",
            "--frequency",
            "--word-target",
            "16",
        ],
    )?;

    assert!(output.contains("Words:                  8"));
    assert!(output.contains("Sentences:              2"));
    assert!(output.contains("Word goal: 8/16 (50%)"));
    let frequent: Vec<&str> = output
        .lines()
        .skip_while(|l| !l.starts_with("Most frequent words"))
        .skip(1)
        .collect();
    assert_eq!(frequent.first().map(|l| l.trim()), Some("3  the"));
    assert_eq!(frequent.get(1).map(|l| l.trim()), Some("2  cat"));
    Ok(())
}

#[test]
fn test_word_target_from_preferences() -> Result<()> {
    let config = TempDir::new()?;
    create_test_file(
        config.path(),
        "config.toml",
        "[text]\nword_target = 4\ncharacter_target = 1000\n",
    )?;

    let output = run_cli(config.path(), &["count", "--text", "one two three four five"])?;
    assert!(output.contains("Word goal: 5/4 (100%)  reached"));
    assert!(output.contains("Character goal: 23/1000 (2%)"));
    Ok(())
}

#[test]
fn test_analyze_and_frequency_agree_on_empty_text() {
    let stats = analyze("   ");
    assert!(stats.is_empty());
    assert!(word_frequency("   ", 10).is_empty());
}
