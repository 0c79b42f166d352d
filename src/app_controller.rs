use anyhow::{Result, anyhow};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::{ExtractionError, HarmonizationError};
use crate::extractors::{CodeExtractor, InterfaceExtractor};
use crate::file_utils::{FileManager, StringsFileSearch};
use crate::language_utils;
use crate::providers::{self, Translator};
use crate::strings_file::StringsDocument;
use crate::update_engine::{UpdateEngine, UpdatePolicy};

// @module: Application controller for strings file maintenance

/// Outcome of a lint run, mapped to an exit code by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintSummary {
    /// Total findings across all files
    pub total_issues: usize,

    /// Files with at least one finding
    pub files_with_issues: usize,

    /// Files scanned
    pub files_checked: usize,

    /// Checks that were enabled for the run
    pub checks_run: usize,
}

/// Main application controller driving the subcommand workflows
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let controller = Self { config };

        Ok(controller)
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.source_locale.is_empty() && !self.config.localizable_name.is_empty()
    }

    fn code_policy(&self) -> UpdatePolicy {
        UpdatePolicy {
            add_new_values_as_empty: !self.config.code.default_to_keys,
            override_values: self.config.override_values,
            keep_existing_keys: self.config.code.additive,
            override_comments: self.config.code.override_comments,
            ignore_empty_values: false,
            sort_by_keys: self.config.code.sort_by_keys,
            keep_whitespace_surroundings: self.config.code.unstripped,
        }
    }

    fn interfaces_policy(&self) -> UpdatePolicy {
        UpdatePolicy {
            add_new_values_as_empty: !self.config.interfaces.default_to_base,
            override_values: self.config.override_values,
            keep_existing_keys: false,
            override_comments: false,
            ignore_empty_values: self.config.interfaces.ignore_empty_values,
            sort_by_keys: false,
            keep_whitespace_surroundings: self.config.interfaces.unstripped,
        }
    }

    /// Update all main strings files from the keys referenced in source code
    pub async fn run_code(&self) -> Result<()> {
        let root = Path::new(&self.config.path);
        if !FileManager::dir_exists(root) {
            return Err(anyhow!("Project path does not exist: {:?}", root));
        }

        let targets = StringsFileSearch::find_strings_files(root, &self.config.localizable_name)?;
        if targets.is_empty() {
            warn!(
                "No {}.strings files found under {:?}",
                self.config.localizable_name, root
            );
            return Ok(());
        }

        let extractor = CodeExtractor::new(&self.config.code);
        let source_text = match extractor.extract(root).await {
            Ok(text) => text,
            Err(ExtractionError::NoOutput { tool }) => {
                warn!("No localizable strings were extracted by {}", tool);
                // Nothing to merge; the sort request still applies
                if self.config.code.sort_by_keys {
                    self.sort_files(&targets, self.config.code.unstripped)?;
                }
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let policy = self.code_policy();
        let mut updated_files = 0usize;
        let mut error_count = 0usize;

        for target in &targets {
            match self.merge_into_file(target, &source_text, &policy) {
                Ok(true) => updated_files += 1,
                Ok(false) => {}
                Err(e) => {
                    error!("Error updating {:?}: {}", target, e);
                    error_count += 1;
                }
            }
        }

        info!(
            "Updated {} of {} strings files from code",
            updated_files,
            targets.len()
        );

        if error_count > 0 {
            return Err(anyhow!("{} file(s) could not be updated", error_count));
        }
        Ok(())
    }

    /// Update the sibling strings files of every Base interface file
    pub async fn run_interfaces(&self) -> Result<()> {
        let root = Path::new(&self.config.path);
        if !FileManager::dir_exists(root) {
            return Err(anyhow!("Project path does not exist: {:?}", root));
        }

        let interface_files = StringsFileSearch::find_interface_files(root)?;
        if interface_files.is_empty() {
            warn!("No Base interface files found under {:?}", root);
            return Ok(());
        }

        let extractor = InterfaceExtractor::new(&self.config.interfaces);
        let policy = self.interfaces_policy();
        let mut updated_files = 0usize;
        let mut error_count = 0usize;

        for interface_file in &interface_files {
            let source_text = match extractor.extract(interface_file).await {
                Ok(text) => text,
                Err(e) => {
                    error!("Error extracting {:?}: {}", interface_file, e);
                    error_count += 1;
                    continue;
                }
            };

            let siblings = match StringsFileSearch::find_sibling_locales(interface_file) {
                Ok(siblings) => siblings,
                Err(e) => {
                    error!("Error finding siblings of {:?}: {}", interface_file, e);
                    error_count += 1;
                    continue;
                }
            };
            if siblings.is_empty() {
                debug!("No sibling strings files for {:?}", interface_file);
                continue;
            }

            for (locale, target) in &siblings {
                match self.merge_into_file(target, &source_text, &policy) {
                    Ok(true) => {
                        debug!(
                            "Updated {} strings for {:?}",
                            language_utils::describe_locale(locale),
                            interface_file
                        );
                        updated_files += 1;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        error!("Error updating {:?}: {}", target, e);
                        error_count += 1;
                    }
                }
            }
        }

        info!("Updated {} interface strings files", updated_files);

        if error_count > 0 {
            return Err(anyhow!("{} file(s) could not be updated", error_count));
        }
        Ok(())
    }

    /// Fill empty values in all sibling locales through the configured provider
    pub async fn run_translate(&self) -> Result<()> {
        let translator = providers::create_translator(&self.config.translation)?;
        self.run_translate_with(translator.as_ref()).await
    }

    /// Translation workflow with an injected translator, also used by tests
    pub async fn run_translate_with(&self, translator: &dyn Translator) -> Result<()> {
        let start_time = std::time::Instant::now();

        let root = Path::new(&self.config.path);
        if !FileManager::dir_exists(root) {
            return Err(anyhow!("Project path does not exist: {:?}", root));
        }

        let source_files =
            StringsFileSearch::find_strings_files_for_locale(root, &self.config.source_locale)?;
        if source_files.is_empty() {
            warn!(
                "No {} strings files found under {:?}",
                language_utils::describe_locale(&self.config.source_locale),
                root
            );
            return Ok(());
        }

        info!("🌐 locsmith: {}", translator.name());

        // Progress across source files; each one may fan out to several locales
        let progress_bar = ProgressBar::new(source_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let mut total_translated = 0usize;
        let mut translated_files = 0usize;
        let mut error_count = 0usize;

        for source_file in &source_files {
            let file_name = source_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress_bar.set_message(format!("Translating: {}", file_name));

            let reference_text = match FileManager::read_to_string(source_file) {
                Ok(text) => text,
                Err(e) => {
                    error!("Error reading {:?}: {}", source_file, e);
                    error_count += 1;
                    progress_bar.inc(1);
                    continue;
                }
            };

            let siblings = match StringsFileSearch::find_sibling_locales(source_file) {
                Ok(siblings) => siblings,
                Err(e) => {
                    error!("Error finding siblings of {:?}: {}", source_file, e);
                    error_count += 1;
                    progress_bar.inc(1);
                    continue;
                }
            };

            for (locale, target) in &siblings {
                match self
                    .translate_file(target, &reference_text, locale, translator)
                    .await
                {
                    Ok(0) => {}
                    Ok(count) => {
                        total_translated += count;
                        translated_files += 1;
                    }
                    Err(e) => {
                        error!("Error translating {:?}: {}", target, e);
                        error_count += 1;
                    }
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        info!(
            "Successfully translated {} values in {} files",
            total_translated, translated_files
        );
        info!(
            "Translation completed in {}",
            Self::format_duration(start_time.elapsed())
        );

        if error_count > 0 {
            return Err(anyhow!("{} file(s) could not be translated", error_count));
        }
        Ok(())
    }

    /// Harmonize sibling locales with the source, then clean every file up
    pub fn run_normalize(&self) -> Result<()> {
        let root = Path::new(&self.config.path);
        if !FileManager::dir_exists(root) {
            return Err(anyhow!("Project path does not exist: {:?}", root));
        }

        let source_files =
            StringsFileSearch::find_strings_files_for_locale(root, &self.config.source_locale)?;
        if source_files.is_empty() {
            warn!(
                "No {} strings files found under {:?}",
                language_utils::describe_locale(&self.config.source_locale),
                root
            );
            return Ok(());
        }

        let mut processed = 0usize;
        let mut error_count = 0usize;

        for source_file in &source_files {
            let siblings = match StringsFileSearch::find_sibling_locales(source_file) {
                Ok(siblings) => siblings,
                Err(e) => {
                    error!("Error finding siblings of {:?}: {}", source_file, e);
                    error_count += 1;
                    continue;
                }
            };

            if self.config.normalize.harmonize_with_source {
                match FileManager::read_to_string(source_file) {
                    Ok(source_text) => {
                        for (_locale, target) in &siblings {
                            if let Err(e) = self.harmonize_file(target, &source_text) {
                                error!("Error harmonizing {:?}: {}", target, e);
                                error_count += 1;
                            }
                        }
                    }
                    Err(e) => {
                        let err = HarmonizationError::SourceUnreadable {
                            path: source_file.display().to_string(),
                            message: e.to_string(),
                        };
                        error!("{}", err);
                        error_count += 1;
                    }
                }
            }

            // The source file itself takes part in the cleanup passes
            let mut cleanup_targets: Vec<PathBuf> = vec![source_file.clone()];
            cleanup_targets.extend(siblings.iter().map(|(_, path)| path.clone()));

            for target in &cleanup_targets {
                match self.cleanup_file(target) {
                    Ok(()) => processed += 1,
                    Err(e) => {
                        error!("Error normalizing {:?}: {}", target, e);
                        error_count += 1;
                    }
                }
            }
        }

        info!("Normalized {} strings files", processed);

        if error_count > 0 {
            return Err(anyhow!("{} file(s) could not be normalized", error_count));
        }
        Ok(())
    }

    /// Check all strings files for duplicate keys and empty values
    pub fn run_lint(&self) -> Result<LintSummary> {
        let root = Path::new(&self.config.path);
        if !FileManager::dir_exists(root) {
            return Err(anyhow!("Project path does not exist: {:?}", root));
        }

        let check_duplicates = self.config.lint.duplicate_keys;
        let check_empty = self.config.lint.empty_values;
        let checks_run = [check_duplicates, check_empty]
            .iter()
            .filter(|&&enabled| enabled)
            .count();

        let mut summary = LintSummary {
            checks_run,
            ..Default::default()
        };
        if checks_run == 0 {
            warn!("All lint checks are disabled");
            return Ok(summary);
        }

        let files = StringsFileSearch::find_all_strings_files(root)?;
        summary.files_checked = files.len();

        for file in &files {
            let text = match FileManager::read_to_string(file) {
                Ok(text) => text,
                Err(e) => {
                    error!("Error reading {:?}: {}", file, e);
                    continue;
                }
            };
            let document = StringsDocument::from_text(&text);
            let mut file_issues = 0usize;

            if check_duplicates {
                let duplicates = document.find_duplicate_entries();
                for (key, group) in &duplicates {
                    warn!(
                        "Duplicate key '{}' appears {} times in {:?}",
                        key,
                        group.len(),
                        file
                    );
                }
                // One finding per duplicated key, not per occurrence
                file_issues += duplicates.len();
            }

            if check_empty {
                let empty_entries = document.find_empty_value_entries();
                for entry in &empty_entries {
                    warn!("Empty value for key '{}' in {:?}", entry.key, file);
                }
                file_issues += empty_entries.len();
            }

            if file_issues > 0 {
                summary.files_with_issues += 1;
                summary.total_issues += file_issues;
            }
        }

        if summary.total_issues > 0 {
            warn!(
                "{} issue(s) found in {} of {} files",
                summary.total_issues, summary.files_with_issues, summary.files_checked
            );
        } else {
            info!("No issues found in {} files", summary.files_checked);
        }

        Ok(summary)
    }

    /// Merge extracted source text into one strings file, writing only on change
    fn merge_into_file(&self, path: &Path, source_text: &str, policy: &UpdatePolicy) -> Result<bool> {
        let original = FileManager::read_to_string(path)?;
        let mut document = StringsDocument::from_text(&original);

        let stats = UpdateEngine::incrementally_update_keys(&mut document, source_text, policy);

        let rendered = document.render(policy.keep_whitespace_surroundings);
        if rendered == original {
            return Ok(false);
        }

        FileManager::write_to_file(path, &rendered)?;
        debug!(
            "Updated {:?} ({} added, {} updated, {} removed)",
            path, stats.added, stats.updated, stats.removed
        );
        Ok(true)
    }

    fn harmonize_file(&self, path: &Path, source_text: &str) -> Result<()> {
        let original = FileManager::read_to_string(path)?;
        let mut document = StringsDocument::from_text(&original);

        UpdateEngine::harmonize_keys(&mut document, source_text)?;

        let rendered = document.render(self.config.normalize.unstripped);
        if rendered != original {
            FileManager::write_to_file(path, &rendered)?;
            debug!("Harmonized {:?}", path);
        }
        Ok(())
    }

    fn cleanup_file(&self, path: &Path) -> Result<()> {
        let original = FileManager::read_to_string(path)?;
        let mut document = StringsDocument::from_text(&original);

        if self.config.normalize.prevent_duplicate_keys {
            let removed = UpdateEngine::prevent_duplicate_entries(&mut document);
            if removed > 0 {
                warn!("Removed {} duplicate entries from {:?}", removed, path);
            }
        }

        if self.config.normalize.sort_by_keys {
            UpdateEngine::sort_by_keys(&mut document);
        }

        if self.config.normalize.warn_empty_values {
            for entry in document.find_empty_value_entries() {
                warn!("Empty value for key '{}' in {:?}", entry.key, path);
            }
        }

        let rendered = document.render(self.config.normalize.unstripped);
        if rendered != original {
            FileManager::write_to_file(path, &rendered)?;
            debug!("Normalized {:?}", path);
        }
        Ok(())
    }

    /// Backfill one sibling file, returning the number of values changed
    async fn translate_file(
        &self,
        path: &Path,
        reference_text: &str,
        locale: &str,
        translator: &dyn Translator,
    ) -> Result<usize> {
        let original = FileManager::read_to_string(path)?;
        let mut document = StringsDocument::from_text(&original);

        debug!(
            "Backfilling {} empty values for {}",
            document.find_empty_value_entries().len(),
            language_utils::describe_locale(locale)
        );

        let changed = UpdateEngine::translate_empty_values(
            &mut document,
            reference_text,
            locale,
            translator,
            self.config.override_values,
        )
        .await;

        if changed > 0 {
            // Only values changed; keep the file's formatting intact
            let rendered = document.render(true);
            FileManager::write_to_file(path, &rendered)?;
            info!("Translated {} values in {:?}", changed, path);
        }
        Ok(changed)
    }

    /// Sort a set of strings files without merging anything into them
    fn sort_files(&self, targets: &[PathBuf], unstripped: bool) -> Result<()> {
        let mut error_count = 0usize;

        for target in targets {
            match self.sort_file(target, unstripped) {
                Ok(true) => debug!("Sorted {:?}", target),
                Ok(false) => {}
                Err(e) => {
                    error!("Error sorting {:?}: {}", target, e);
                    error_count += 1;
                }
            }
        }

        if error_count > 0 {
            return Err(anyhow!("{} file(s) could not be sorted", error_count));
        }
        Ok(())
    }

    fn sort_file(&self, path: &Path, unstripped: bool) -> Result<bool> {
        let original = FileManager::read_to_string(path)?;
        let mut document = StringsDocument::from_text(&original);

        UpdateEngine::sort_by_keys(&mut document);

        let rendered = document.render(unstripped);
        if rendered == original {
            return Ok(false);
        }
        FileManager::write_to_file(path, &rendered)?;
        Ok(true)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
