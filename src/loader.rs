//! This module provides the `ProgramLoader` struct, responsible for loading programs
//! from JSON files, strings, and directories.

use crate::program::Program;
use crate::types::{TapeMachineError, MAX_PROGRAM_SIZE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `ProgramLoader` is a utility struct for loading programs.
/// It provides methods to load programs from individual files, from string content,
/// and to discover and load all `.json` files within a specified directory.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single program from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is successfully read and decoded.
    /// * `Err(TapeMachineError::FileError)` if the file cannot be read.
    /// * `Err(TapeMachineError::ParseError)` if the file content is not a valid program.
    pub fn load_program(path: &Path) -> Result<Program, TapeMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TapeMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), bytes = content.len(), "loading program");
        Self::load_program_from_string(&content)
    }

    /// Loads a single program from the provided string content.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the content is successfully decoded.
    /// * `Err(TapeMachineError::ValidationError)` if the content exceeds `MAX_PROGRAM_SIZE`.
    /// * `Err(TapeMachineError::ParseError)` if the content is not a valid program.
    pub fn load_program_from_string(content: &str) -> Result<Program, TapeMachineError> {
        if content.len() > MAX_PROGRAM_SIZE {
            return Err(TapeMachineError::ValidationError(format!(
                "Program is {} bytes, the limit is {} bytes",
                content.len(),
                MAX_PROGRAM_SIZE
            )));
        }

        Program::from_json(content)
    }

    /// Loads all program files (`.json` extension) from a given directory.
    ///
    /// Directories and non-`.json` files are skipped. Each loaded file yields either its
    /// path and program, or the error that prevented loading it.
    pub fn load_programs(directory: &Path) -> Vec<Result<(PathBuf, Program), TapeMachineError>> {
        if !directory.exists() {
            return vec![Err(TapeMachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TapeMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(TapeMachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                    return None;
                }

                match Self::load_program(&path) {
                    Ok(program) => Some(Ok((path, program))),
                    Err(e) => Some(Err(TapeMachineError::FileError(format!(
                        "Failed to load program from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const VALID: &str = r#"{
        "name": "Test Program",
        "initial_state": "start",
        "tape": "a",
        "rules": { "start": { "a": ["b", "R", "stop"] } }
    }"#;

    fn write_file(path: &Path, content: &str) {
        let mut file = File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_valid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.json");
        write_file(&file_path, VALID);

        let program = ProgramLoader::load_program(&file_path).unwrap();
        assert_eq!(program.name, "Test Program");
        assert_eq!(program.tape, "a");
        assert!(program.rules.contains_state("start"));
        assert!(!program.rules.contains_state("stop"));
    }

    #[test]
    fn test_load_invalid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.json");
        write_file(&file_path, "This is not a valid program");

        let result = ProgramLoader::load_program(&file_path);
        assert!(matches!(result, Err(TapeMachineError::ParseError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = ProgramLoader::load_program(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(TapeMachineError::FileError(_))));
    }

    #[test]
    fn test_load_oversized_program() {
        let content = " ".repeat(MAX_PROGRAM_SIZE + 1);
        let result = ProgramLoader::load_program_from_string(&content);

        assert!(matches!(result, Err(TapeMachineError::ValidationError(_))));
    }

    #[test]
    fn test_load_programs_from_directory() {
        let dir = tempdir().unwrap();

        write_file(&dir.path().join("valid.json"), VALID);
        write_file(&dir.path().join("invalid.json"), "{}");
        // Not a program file, should be ignored
        write_file(&dir.path().join("ignored.txt"), "This file should be ignored");

        let results = ProgramLoader::load_programs(dir.path());

        assert_eq!(results.len(), 2);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    }

    #[test]
    fn test_load_programs_missing_directory() {
        let dir = tempdir().unwrap();
        let results = ProgramLoader::load_programs(&dir.path().join("nope"));

        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
