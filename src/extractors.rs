use std::path::Path;
use std::time::Duration;
use log::{debug, error};
use tempfile::TempDir;
use tokio::process::Command;

use crate::app_config::{CodeConfig, InterfacesConfig};
use crate::errors::ExtractionError;
use crate::file_utils::FileManager;

// @module: Wrappers around the platform string extraction tools

/// Runs the source-code string extractor over a project tree
pub struct CodeExtractor {
    /// Use `xcrun extractLocStrings` instead of `genstrings`
    use_extract_loc_strings: bool,
    /// Custom localization routine name passed as `-s`
    custom_function: Option<String>,
    /// Tool timeout in seconds
    timeout_secs: u64,
}

impl CodeExtractor {
    /// Create an extractor from the code command settings
    pub fn new(config: &CodeConfig) -> Self {
        Self {
            use_extract_loc_strings: config.use_extract_loc_strings,
            custom_function: config.custom_function.clone(),
            timeout_secs: config.extractor_timeout_secs,
        }
    }

    fn tool_name(&self) -> &'static str {
        if self.use_extract_loc_strings {
            "extractLocStrings"
        } else {
            "genstrings"
        }
    }

    /// Extract localizable strings from the source files under a path.
    ///
    /// The extractor writes `Localizable.strings` into a temporary directory;
    /// its decoded text is returned. A missing or empty output file reports
    /// `NoOutput` so the caller can warn and skip instead of aborting.
    pub async fn extract<P: AsRef<Path>>(&self, path: P) -> Result<String, ExtractionError> {
        let tool = self.tool_name();

        let source_files = FileManager::find_files(path.as_ref(), &["swift", "m", "mm"])
            .map_err(|e| ExtractionError::Launch {
                tool: tool.to_string(),
                message: format!("failed to collect source files: {}", e),
            })?;

        if source_files.is_empty() {
            return Err(ExtractionError::NoOutput { tool: tool.to_string() });
        }

        let temp_dir = TempDir::new().map_err(|e| ExtractionError::Launch {
            tool: tool.to_string(),
            message: format!("failed to create temporary directory: {}", e),
        })?;

        debug!(
            "Running {} over {} source files",
            tool,
            source_files.len()
        );

        let mut command = if self.use_extract_loc_strings {
            let mut command = Command::new("xcrun");
            command.arg("extractLocStrings");
            command
        } else {
            Command::new("genstrings")
        };

        command.arg("-o").arg(temp_dir.path());
        if let Some(function) = &self.custom_function {
            command.arg("-s").arg(function);
        }
        command.args(&source_files);

        let extract_future = command.output();
        let output = tokio::select! {
            result = extract_future => {
                result.map_err(|e| ExtractionError::Launch {
                    tool: tool.to_string(),
                    message: e.to_string(),
                })?
            },
            _ = tokio::time::sleep(Duration::from_secs(self.timeout_secs)) => {
                return Err(ExtractionError::Timeout {
                    tool: tool.to_string(),
                    seconds: self.timeout_secs,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("{} failed: {}", tool, stderr.trim());
            return Err(ExtractionError::CommandFailed {
                tool: tool.to_string(),
                message: stderr.trim().to_string(),
            });
        }

        // The extractors write the default table only
        let extracted_path = temp_dir.path().join("Localizable.strings");
        if !FileManager::file_exists(&extracted_path) {
            return Err(ExtractionError::NoOutput { tool: tool.to_string() });
        }

        let text = FileManager::read_to_string(&extracted_path).map_err(|e| {
            ExtractionError::CommandFailed {
                tool: tool.to_string(),
                message: format!("unreadable output file: {}", e),
            }
        })?;

        if text.trim().is_empty() {
            return Err(ExtractionError::NoOutput { tool: tool.to_string() });
        }

        Ok(text)
    }
}

/// Runs the interface-file string extractor for one storyboard or xib
pub struct InterfaceExtractor {
    /// Tool timeout in seconds
    timeout_secs: u64,
}

impl InterfaceExtractor {
    /// Create an extractor from the interfaces command settings
    pub fn new(config: &InterfacesConfig) -> Self {
        Self {
            timeout_secs: config.extractor_timeout_secs,
        }
    }

    /// Export the localizable strings of one interface file.
    ///
    /// Empty output text is legitimate here: an interface without any
    /// localizable strings exports an empty table, and merging that table
    /// drops all of the target's keys.
    pub async fn extract<P: AsRef<Path>>(&self, interface_file: P) -> Result<String, ExtractionError> {
        let interface_file = interface_file.as_ref();
        let tool = "ibtool";

        let temp_dir = TempDir::new().map_err(|e| ExtractionError::Launch {
            tool: tool.to_string(),
            message: format!("failed to create temporary directory: {}", e),
        })?;

        let stem = interface_file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Interface");
        let output_path = temp_dir.path().join(format!("{}.strings", stem));

        debug!("Exporting strings from {:?}", interface_file);

        let extract_future = Command::new("ibtool")
            .arg("--export-strings-file")
            .arg(&output_path)
            .arg(interface_file)
            .output();

        let output = tokio::select! {
            result = extract_future => {
                result.map_err(|e| ExtractionError::Launch {
                    tool: tool.to_string(),
                    message: e.to_string(),
                })?
            },
            _ = tokio::time::sleep(Duration::from_secs(self.timeout_secs)) => {
                return Err(ExtractionError::Timeout {
                    tool: tool.to_string(),
                    seconds: self.timeout_secs,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("{} failed: {}", tool, stderr.trim());
            return Err(ExtractionError::CommandFailed {
                tool: tool.to_string(),
                message: stderr.trim().to_string(),
            });
        }

        if !FileManager::file_exists(&output_path) {
            return Err(ExtractionError::NoOutput { tool: tool.to_string() });
        }

        FileManager::read_to_string(&output_path).map_err(|e| {
            ExtractionError::CommandFailed {
                tool: tool.to_string(),
                message: format!("unreadable output file: {}", e),
            }
        })
    }
}
