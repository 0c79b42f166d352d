/*!
 * Integration tests for the code update workflow
 */

use anyhow::Result;
use locsmith::app_config::Config;
use locsmith::app_controller::Controller;
use locsmith::file_utils::FileManager;
use locsmith::strings_file::StringsDocument;
use locsmith::update_engine::{UpdateEngine, UpdatePolicy};
use crate::common;

fn controller_for(path: &std::path::Path) -> Result<Controller> {
    let config = Config {
        path: path.to_string_lossy().to_string(),
        ..Config::default()
    };
    Controller::with_config(config)
}

/// Test controller creation with the default configuration
#[test]
fn test_controller_creation_withDefaultConfig_shouldBeInitialized() {
    let controller = Controller::new_for_test().unwrap();
    assert!(controller.is_initialized());
}

/// Test the initialization check with an incomplete configuration
#[test]
fn test_controller_creation_withBlankSourceLocale_shouldNotBeInitialized() {
    let config = Config {
        source_locale: String::new(),
        ..Config::default()
    };
    let controller = Controller::with_config(config).unwrap();
    assert!(!controller.is_initialized());
}

/// Test the code workflow against a missing project path
#[test]
fn test_run_code_withMissingPath_shouldFail() -> Result<()> {
    let controller = controller_for(std::path::Path::new("/nonexistent/project"))?;
    let result = tokio_test::block_on(async { controller.run_code().await });
    assert!(result.is_err());
    Ok(())
}

/// Test the code workflow on a project without localization targets
#[test]
fn test_run_code_withoutTargetFiles_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "main.swift", "let x = 1")?;

    let controller = controller_for(temp_dir.path())?;
    let result = tokio_test::block_on(async { controller.run_code().await });

    assert!(result.is_ok());
    Ok(())
}

/// Test that targets stay untouched when no source files exist
#[test]
fn test_run_code_withoutSourceFiles_shouldLeaveTargetsAlone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "\"hello\" = \"Hello\";\n";
    let target = common::create_strings_file(temp_dir.path(), "en", "Localizable", content)?;

    let controller = controller_for(temp_dir.path())?;
    let result = tokio_test::block_on(async { controller.run_code().await });

    assert!(result.is_ok());
    assert_eq!(FileManager::read_to_string(&target)?, content);
    Ok(())
}

/// Test that a sort request is honored even without extraction output
#[test]
fn test_run_code_withSortRequest_shouldSortTargetsWithoutSources() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = common::create_strings_file(
        temp_dir.path(),
        "en",
        "Localizable",
        "\"b\" = \"2\";\n\n\"a\" = \"1\";\n",
    )?;

    let mut config = Config {
        path: temp_dir.path().to_string_lossy().to_string(),
        ..Config::default()
    };
    config.code.sort_by_keys = true;
    let controller = Controller::with_config(config)?;

    let result = tokio_test::block_on(async { controller.run_code().await });
    assert!(result.is_ok());

    assert_eq!(
        FileManager::read_to_string(&target)?,
        "\"a\" = \"1\";\n\n\"b\" = \"2\";\n"
    );
    Ok(())
}

/// Test the interfaces workflow on a project without Base interface files
#[test]
fn test_run_interfaces_withoutInterfaceFiles_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_strings_file(temp_dir.path(), "de", "Main", "\"id.text\" = \"Hallo\";\n")?;

    let controller = controller_for(temp_dir.path())?;
    let result = tokio_test::block_on(async { controller.run_interfaces().await });

    assert!(result.is_ok());
    Ok(())
}

/// Test the interfaces workflow against a missing project path
#[test]
fn test_run_interfaces_withMissingPath_shouldFail() -> Result<()> {
    let controller = controller_for(std::path::Path::new("/nonexistent/project"))?;
    let result = tokio_test::block_on(async { controller.run_interfaces().await });
    assert!(result.is_err());
    Ok(())
}

/// Test a full merge round trip through files on disk
#[test]
fn test_merge_withExtractedSource_shouldRoundTripThroughDisk() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target_path = common::create_strings_file(
        temp_dir.path(),
        "en",
        "Localizable",
        "/* Old greeting */\n\"hello\" = \"Hello\";\n\n\"obsolete\" = \"Gone\";\n",
    )?;

    // The shape genstrings produces: comment, key repeated as value
    let extracted = "/* Greeting shown on launch */\n\"hello\" = \"hello\";\n\n/* Farewell */\n\"goodbye\" = \"goodbye\";\n";

    let original = FileManager::read_to_string(&target_path)?;
    let mut document = StringsDocument::from_text(&original);

    let policy = UpdatePolicy::default();
    let stats = UpdateEngine::incrementally_update_keys(&mut document, extracted, &policy);

    assert_eq!(stats.added, 1);
    assert_eq!(stats.removed, 1);

    FileManager::write_to_file(&target_path, &document.render(policy.keep_whitespace_surroundings))?;

    let reloaded = StringsDocument::from_text(&FileManager::read_to_string(&target_path)?);
    let keys: Vec<&str> = reloaded.entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["hello", "goodbye"]);

    // The existing translation survives, the new key arrives empty
    assert_eq!(reloaded.entries[0].value, "Hello");
    assert_eq!(reloaded.entries[1].value, "");
    assert_eq!(reloaded.entries[1].comment.as_deref(), Some("Farewell"));

    Ok(())
}
