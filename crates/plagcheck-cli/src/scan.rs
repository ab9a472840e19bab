use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plagcheck_lex::SUPPORTED_EXTENSIONS;

use plagcheck_core::InputFile;

/// Resolve the CLI's `paths` argument to a flat list of files to submit.
/// A file path is taken as-is; a directory is scanned non-recursively for
/// files whose extension `SUPPORTED_EXTENSIONS` maps to `language`.
pub fn collect_input_files(paths: &[PathBuf], language: &str) -> Result<Vec<InputFile>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_from_directory(path, language, &mut files)?;
        } else {
            files.push(read_input_file(path)?);
        }
    }
    Ok(files)
}

fn collect_from_directory(dir: &Path, language: &str, files: &mut Vec<InputFile>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("reading an entry of {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches_language = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|(e, lang)| *e == ext && lang.as_str() == language)
            });
        if matches_language {
            files.push(read_input_file(&path)?);
        }
    }
    Ok(())
}

fn read_input_file(path: &Path) -> Result<InputFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(InputFile::new(path.display().to_string(), content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn collects_files_matching_the_language_extension() {
        let dir = tempdir().unwrap();
        let java_path = dir.path().join("A.java");
        let mut f = fs::File::create(&java_path).unwrap();
        writeln!(f, "class A {{}}").unwrap();
        let txt_path = dir.path().join("notes.txt");
        fs::write(&txt_path, "ignored").unwrap();

        let files = collect_input_files(&[dir.path().to_path_buf()], "java").unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("A.java"));
    }

    #[test]
    fn explicit_file_paths_are_read_regardless_of_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weird.src");
        fs::write(&path, "x = 1").unwrap();
        let files = collect_input_files(&[path], "python").unwrap();
        assert_eq!(files.len(), 1);
    }
}
