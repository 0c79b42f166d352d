use anyhow::{Result, Context, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::language_utils;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a text file to a string, accepting UTF-8 and BOM-marked UTF-16.
    ///
    /// The platform string extractors emit UTF-16, while hand-maintained
    /// strings files are usually UTF-8; both decode to the same `String`.
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;

        Self::decode_text(&bytes)
            .with_context(|| format!("Failed to decode file: {:?}", path.as_ref()))
    }

    /// Decode raw bytes by BOM sniffing: UTF-16LE, UTF-16BE, else UTF-8
    pub fn decode_text(bytes: &[u8]) -> Result<String> {
        if bytes.starts_with(&[0xFF, 0xFE]) {
            return Self::decode_utf16(&bytes[2..], u16::from_le_bytes);
        }
        if bytes.starts_with(&[0xFE, 0xFF]) {
            return Self::decode_utf16(&bytes[2..], u16::from_be_bytes);
        }

        let without_bom = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF][..]).unwrap_or(bytes);
        String::from_utf8(without_bom.to_vec())
            .map_err(|e| anyhow!("Invalid UTF-8 content: {}", e))
    }

    fn decode_utf16(bytes: &[u8], combine: fn([u8; 2]) -> u16) -> Result<String> {
        if bytes.len() % 2 != 0 {
            return Err(anyhow!("UTF-16 content has an odd byte length"));
        }

        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| combine([pair[0], pair[1]]))
            .collect();

        String::from_utf16(&units).map_err(|e| anyhow!("Invalid UTF-16 content: {}", e))
    }

    /// Write a string to a file as UTF-8
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Find files with one of the given extensions under a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                    if extensions.iter().any(|candidate| ext.eq_ignore_ascii_case(candidate)) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }
}

// @struct: Discovery of strings and interface files in an Xcode-style tree
pub struct StringsFileSearch;

impl StringsFileSearch {
    /// Find every `<file_name>.strings` inside any `*.lproj` folder under root
    pub fn find_strings_files<P: AsRef<Path>>(root: P, file_name: &str) -> Result<Vec<PathBuf>> {
        let target = format!("{}.strings", file_name);
        let mut result = Vec::new();

        for entry in WalkDir::new(root.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            if path.file_name().and_then(|name| name.to_str()) != Some(target.as_str()) {
                continue;
            }
            if language_utils::locale_from_path(path).is_some() {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Find every `.strings` file inside any `*.lproj` folder under root
    pub fn find_all_strings_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(root.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("strings") {
                continue;
            }
            if language_utils::locale_from_path(path).is_some() {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Find every `.strings` file inside `<locale>.lproj` folders of one locale
    pub fn find_strings_files_for_locale<P: AsRef<Path>>(root: P, locale: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(root.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("strings") {
                continue;
            }
            match language_utils::locale_from_path(path) {
                Some(found) if found == locale => result.push(path.to_path_buf()),
                _ => {}
            }
        }

        result.sort();
        Ok(result)
    }

    /// Find Base.lproj interface files (`.storyboard`, `.xib`) under root
    pub fn find_interface_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(root.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            let is_interface = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("storyboard") | Some("xib")
            );
            if !is_interface {
                continue;
            }

            let in_base = language_utils::locale_from_path(path)
                .map_or(false, |locale| language_utils::is_base_locale(&locale));
            if in_base {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Locate the same-named `.strings` files in sibling `*.lproj` folders.
    ///
    /// Given `<dir>/<locale>.lproj/<stem>.<ext>`, returns `(locale, path)`
    /// pairs for every existing `<dir>/<other>.lproj/<stem>.strings`, the
    /// file's own locale and the Base folder excluded, sorted by locale.
    pub fn find_sibling_locales<P: AsRef<Path>>(strings_file: P) -> Result<Vec<(String, PathBuf)>> {
        let strings_file = strings_file.as_ref();

        let own_locale = language_utils::locale_from_path(strings_file)
            .ok_or_else(|| anyhow!("Not inside an .lproj folder: {:?}", strings_file))?;
        let stem = strings_file
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow!("No file name in path: {:?}", strings_file))?;
        let container = strings_file
            .parent()
            .and_then(|lproj| lproj.parent())
            .ok_or_else(|| anyhow!("No containing folder: {:?}", strings_file))?;

        let mut result = Vec::new();
        let listing = fs::read_dir(container)
            .with_context(|| format!("Failed to list directory: {:?}", container))?;

        for entry in listing {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let locale = match language_utils::locale_from_path(&path) {
                Some(locale) => locale,
                None => continue,
            };
            if locale == own_locale || language_utils::is_base_locale(&locale) {
                continue;
            }

            let sibling = path.join(format!("{}.strings", stem));
            if FileManager::file_exists(&sibling) {
                result.push((locale, sibling));
            }
        }

        result.sort();
        Ok(result)
    }
}
