//! Browser file access for CSV uploads.
//!
//! Turns a `File` from a drop or file input into a [`CsvUpload`]. Non-CSV
//! files are refused from their name and media type before any bytes are
//! read.

#[cfg(feature = "hydrate")]
use contract::{ApiError, CsvUpload};

/// First file carried by a drop event.
#[cfg(feature = "hydrate")]
pub fn dropped_file(ev: &web_sys::DragEvent) -> Option<web_sys::File> {
    ev.data_transfer()?.files()?.get(0)
}

/// First file chosen in a file input.
#[cfg(feature = "hydrate")]
pub fn selected_file(input: &web_sys::HtmlInputElement) -> Option<web_sys::File> {
    input.files()?.get(0)
}

/// Read a browser file into an upload.
///
/// # Errors
///
/// Returns [`ApiError::InvalidUpload`] if the file is not CSV or cannot be read.
#[cfg(feature = "hydrate")]
pub async fn read_csv(file: web_sys::File) -> Result<CsvUpload, ApiError> {
    let name = file.name();
    let media_type = file.type_();
    if !contract::upload::is_csv(&name, &media_type) {
        return Err(ApiError::InvalidUpload(format!("{name} is not a CSV file")));
    }
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::InvalidUpload(format!("could not read {name}: {e:?}")))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    CsvUpload::new(name, &media_type, bytes)
}
