//! Multipart form reading.

use std::collections::HashMap;

use axum::extract::Multipart;
use obf_common::{AppError, AppResult};
use obf_core::NewUpload;

/// Text fields and files of a multipart form.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, NewUpload>,
}

impl FormData {
    /// Read the whole form.
    ///
    /// File inputs left empty by the browser arrive with no bytes and are
    /// dropped.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(file_name) = field.file_name().map(ToString::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec();
                if data.is_empty() {
                    continue;
                }
                form.files.insert(
                    name,
                    NewUpload {
                        original_name: if file_name.is_empty() {
                            "unnamed".to_string()
                        } else {
                            file_name
                        },
                        content_type,
                        data,
                        alt: None,
                    },
                );
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// A text field, empty when absent.
    pub fn text(&mut self, name: &str) -> String {
        self.fields.remove(name).unwrap_or_default()
    }

    /// A text field that is present and not blank.
    pub fn optional(&mut self, name: &str) -> Option<String> {
        self.fields
            .remove(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty() && value != "null")
    }

    /// A file field.
    pub fn file(&mut self, name: &str) -> Option<NewUpload> {
        self.files.remove(name)
    }
}
