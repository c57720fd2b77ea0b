use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Metadata of an uploaded MRI scan. The image itself is never inspected or
/// kept; nothing downstream reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: u64,
}

impl ScanUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        size_bytes: u64,
    ) -> Result<Self, CoreError> {
        let file_name = file_name.into();
        if !has_accepted_extension(&file_name) {
            return Err(CoreError::UnsupportedScanType(file_name));
        }
        Ok(Self {
            file_name,
            content_type,
            size_bytes,
        })
    }
}

fn has_accepted_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
}
