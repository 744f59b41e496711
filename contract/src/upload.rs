//! CSV upload value shared by the browser and native transports.
//!
//! The service only accepts CSV. Acceptance is decided from the file name or
//! declared media type, never from content; row counting is a display aid.

use crate::service::ApiError;

/// Media type attached to uploaded parts.
pub const CSV_MEDIA_TYPE: &str = "text/csv";

/// A CSV file ready to be sent as a multipart part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CsvUpload {
    /// Wrap raw bytes after checking the file is a CSV.
    ///
    /// `media_type` is the browser-reported type and may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUpload`] when neither the name nor the media
    /// type identifies a CSV file.
    pub fn new(file_name: impl Into<String>, media_type: &str, bytes: Vec<u8>) -> Result<Self, ApiError> {
        let file_name = file_name.into();
        if !is_csv(&file_name, media_type) {
            return Err(ApiError::InvalidUpload(format!("{file_name} is not a CSV file")));
        }
        Ok(Self { file_name, bytes })
    }

    /// Number of data rows: non-blank lines after the header line.
    #[must_use]
    pub fn data_row_count(&self) -> usize {
        String::from_utf8_lossy(&self.bytes)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .skip(1)
            .count()
    }
}

/// True when a file is acceptable for upload.
#[must_use]
pub fn is_csv(file_name: &str, media_type: &str) -> bool {
    let has_extension = std::path::Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    has_extension || media_type.eq_ignore_ascii_case(CSV_MEDIA_TYPE)
}

#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;
