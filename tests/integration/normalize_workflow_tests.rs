/*!
 * Integration tests for the normalize workflow
 */

use anyhow::Result;
use locsmith::app_config::Config;
use locsmith::app_controller::Controller;
use locsmith::file_utils::FileManager;
use locsmith::strings_file::StringsDocument;
use crate::common;

fn config_for(path: &std::path::Path) -> Config {
    Config {
        path: path.to_string_lossy().to_string(),
        ..Config::default()
    }
}

/// Test the normalize workflow against a missing project path
#[test]
fn test_run_normalize_withMissingPath_shouldFail() -> Result<()> {
    let config = config_for(std::path::Path::new("/nonexistent/project"));
    let controller = Controller::with_config(config)?;
    assert!(controller.run_normalize().is_err());
    Ok(())
}

/// Test the normalize workflow on a project without source locale files
#[test]
fn test_run_normalize_withoutSourceFiles_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_strings_file(temp_dir.path(), "de", "Localizable", "\"a\" = \"A\";\n")?;

    let controller = Controller::with_config(config_for(temp_dir.path()))?;
    assert!(controller.run_normalize().is_ok());
    Ok(())
}

/// Test harmonization of sibling locales with the source locale
#[test]
fn test_run_normalize_withKeyDrift_shouldHarmonizeSiblings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_strings_file(
        temp_dir.path(),
        "en",
        "Localizable",
        "/* Title */\n\"Welcome.Title\" = \"Welcome\";\n\n\"Welcome.Subtitle\" = \"Hi\";\n",
    )?;
    let de_path = common::create_strings_file(
        temp_dir.path(),
        "de",
        "Localizable",
        "\"welcome.title\" = \"Willkommen\";\n\n\"Obsolete\" = \"Alt\";\n",
    )?;

    let controller = Controller::with_config(config_for(temp_dir.path()))?;
    controller.run_normalize()?;

    let de = StringsDocument::from_text(&FileManager::read_to_string(&de_path)?);
    let keys: Vec<&str> = de.entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["Welcome.Title", "Welcome.Subtitle"]);

    // The drifted key keeps its translation; the missing one arrives empty
    assert_eq!(de.entries[0].value, "Willkommen");
    assert_eq!(de.entries[1].value, "");

    Ok(())
}

/// Test duplicate removal during normalization
#[test]
fn test_run_normalize_withDuplicateKeys_shouldKeepFirstEntry() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let en_path = common::create_strings_file(
        temp_dir.path(),
        "en",
        "Localizable",
        "\"a\" = \"first\";\n\n\"a\" = \"second\";\n\n\"b\" = \"B\";\n",
    )?;

    let controller = Controller::with_config(config_for(temp_dir.path()))?;
    controller.run_normalize()?;

    assert_eq!(
        FileManager::read_to_string(&en_path)?,
        "\"a\" = \"first\";\n\n\"b\" = \"B\";\n"
    );
    Ok(())
}

/// Test sorting during normalization when enabled
#[test]
fn test_run_normalize_withSortEnabled_shouldOrderByKey() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let en_path = common::create_strings_file(
        temp_dir.path(),
        "en",
        "Localizable",
        "\"b\" = \"2\";\n\n\"a\" = \"1\";\n",
    )?;

    let mut config = config_for(temp_dir.path());
    config.normalize.sort_by_keys = true;
    let controller = Controller::with_config(config)?;
    controller.run_normalize()?;

    assert_eq!(
        FileManager::read_to_string(&en_path)?,
        "\"a\" = \"1\";\n\n\"b\" = \"2\";\n"
    );
    Ok(())
}

/// Test that disabling harmonization preserves target-only keys
#[test]
fn test_run_normalize_withoutHarmonization_shouldKeepTargetOnlyKeys() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_strings_file(temp_dir.path(), "en", "Localizable", "\"a\" = \"A\";\n")?;
    let de_path = common::create_strings_file(
        temp_dir.path(),
        "de",
        "Localizable",
        "\"a\" = \"A1\";\n\n\"extra\" = \"Extra\";\n",
    )?;

    let mut config = config_for(temp_dir.path());
    config.normalize.harmonize_with_source = false;
    let controller = Controller::with_config(config)?;
    controller.run_normalize()?;

    let de = StringsDocument::from_text(&FileManager::read_to_string(&de_path)?);
    let keys: Vec<&str> = de.entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["a", "extra"]);
    Ok(())
}

/// Test that an already canonical file is left byte-identical
#[test]
fn test_run_normalize_withCanonicalFile_shouldNotRewrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let canonical = "/* Title */\n\"a\" = \"A\";\n\n\"b\" = \"B\";\n";
    let en_path = common::create_strings_file(temp_dir.path(), "en", "Localizable", canonical)?;

    let controller = Controller::with_config(config_for(temp_dir.path()))?;
    controller.run_normalize()?;

    assert_eq!(FileManager::read_to_string(&en_path)?, canonical);
    Ok(())
}

/// Test the failure report for an unusable harmonization source
#[test]
fn test_run_normalize_withEmptySource_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_strings_file(temp_dir.path(), "en", "Localizable", "/* no entries here */\n")?;
    common::create_strings_file(temp_dir.path(), "de", "Localizable", "\"a\" = \"A\";\n")?;

    let controller = Controller::with_config(config_for(temp_dir.path()))?;
    assert!(controller.run_normalize().is_err());
    Ok(())
}
