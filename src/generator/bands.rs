use std::{fmt, io, path::Path, path::PathBuf};

#[derive(Debug)]
pub enum BandFileError {
    NotFound(PathBuf),
    IoError(PathBuf, io::Error),
}

impl fmt::Display for BandFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandFileError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            BandFileError::IoError(path, e) => {
                write!(f, "Cannot read {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for BandFileError {}

/// Splits `content` into band names: one per line, trimmed, blank lines
/// dropped, file order kept. Duplicates are kept as well.
pub fn parse_bands(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Reads the band list at `path` as UTF-8.
pub async fn load_bands(path: &Path) -> Result<Vec<String>, BandFileError> {
    let content = async_fs::read_to_string(path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BandFileError::NotFound(path.to_path_buf()),
        _ => BandFileError::IoError(path.to_path_buf(), e),
    })?;

    Ok(parse_bands(&content))
}
