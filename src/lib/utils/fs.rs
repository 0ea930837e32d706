use std::{
    fs::{DirBuilder, File},
    io::Write,
    path::{Path, PathBuf},
};

use color_eyre::{eyre::Context, Result};

pub fn create_file<'a>(path: &Path, filename: &'a str, buff_write: &'a [u8]) -> Result<()> {
    let file_path = path.join(filename);

    File::create(&file_path)
        .with_context(|| format!("Could not create file {file_path:?}"))?
        .write_all(buff_write)
        .with_context(|| format!("Could not write to file {file_path:?}"))
}

pub fn create_directory(path_create: &Path) -> Result<()> {
    DirBuilder::new()
        .recursive(true)
        .create(path_create)
        .with_context(|| format!("Could not create directory {path_create:?}"))
}

/// Resolves `root` against the current working directory, without requiring it to exist
pub fn get_absolute_path(root: &Path) -> Result<PathBuf> {
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_file_inside_new_directory() -> Result<()> {
        let temp = tempdir()?;
        let nested = temp.path().join("a").join("b");

        create_directory(&nested)?;
        create_file(&nested, "demo.toml", b"[program]")?;

        assert_eq!(std::fs::read_to_string(nested.join("demo.toml"))?, "[program]");
        Ok(())
    }

    #[test]
    fn test_absolute_paths_are_kept() -> Result<()> {
        let temp = tempdir()?;
        assert_eq!(get_absolute_path(temp.path())?, temp.path());
        assert!(get_absolute_path(Path::new("relative"))?.is_absolute());
        Ok(())
    }
}
