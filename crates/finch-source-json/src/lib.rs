use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use finch_core::{CategorySource, SourceError};
use finch_domain::{Category, CategoryResponse};

const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed taxonomy stored as JSON.
///
/// The file holds either a full fetch payload (`categories` plus optional
/// `hierarchy`) or a bare array of categories.
#[derive(Debug, Clone)]
pub struct JsonCategorySource {
    path: PathBuf,
}

impl JsonCategorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `response` to the source file, replacing it atomically.
    pub fn save(&self, response: &CategoryResponse) -> Result<(), SourceError> {
        let json = serde_json::to_string_pretty(response).map_err(serde_error)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CategorySource for JsonCategorySource {
    fn fetch(&self) -> Result<CategoryResponse, SourceError> {
        load_response_from_path(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub fn load_response_from_path(path: &Path) -> Result<CategoryResponse, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.display().to_string()));
    }
    let data = fs::read_to_string(path)?;
    parse_response(&data)
}

/// Parses either payload shape, picked by the first JSON token so a broken
/// record reports serde's own field and line instead of a generic mismatch.
pub fn parse_response(data: &str) -> Result<CategoryResponse, SourceError> {
    if data.trim_start().starts_with('[') {
        let categories: Vec<Category> = serde_json::from_str(data).map_err(serde_error)?;
        Ok(CategoryResponse::new(categories))
    } else {
        serde_json::from_str(data).map_err(serde_error)
    }
}

fn serde_error(err: serde_json::Error) -> SourceError {
    SourceError::Serde(err.to_string())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), SourceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
