//! Multipart form bodies of the store and menu creation routes.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;
use models::FoodCategory;
use service::upload::UploadFile;

use crate::errors::AppError;

#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadFile>,
}

impl MultipartForm {
    /// Drain the multipart stream; any single file over `max_file_bytes` is refused.
    pub async fn read(mut multipart: Multipart, max_file_bytes: usize) -> Result<Self, AppError> {
        let mut form = MultipartForm::default();
        while let Some(field) = multipart.next_field().await.map_err(|e| AppError::BadRequest(e.body_text()))? {
            let Some(name) = field.name().map(str::to_string) else { continue };
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(|e| AppError::BadRequest(e.body_text()))?;
                    if bytes.len() > max_file_bytes {
                        return Err(AppError::PayloadTooLarge { limit: max_file_bytes });
                    }
                    form.files.insert(name, UploadFile::new(file_name, content_type, bytes.to_vec()));
                }
                None => {
                    let text = field.text().await.map_err(|e| AppError::BadRequest(e.body_text()))?;
                    form.fields.insert(name, text);
                }
            }
        }
        Ok(form)
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    pub fn required(&self, name: &str) -> Result<&str, AppError> {
        self.text(name).ok_or_else(|| AppError::BadRequest(format!("{name} is required")))
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T, AppError> {
        self.required(name)?
            .parse()
            .map_err(|_| AppError::BadRequest(format!("{name} is not valid")))
    }

    pub fn category(&self, name: &str) -> Result<FoodCategory, AppError> {
        self.parse(name)
    }

    /// The named file, unless it was omitted or sent empty.
    pub fn take_file(&mut self, name: &str) -> Option<UploadFile> {
        self.files.remove(name).filter(|f| !f.is_empty())
    }
}

#[cfg(test)]
impl MultipartForm {
    pub fn with_fields(fields: &[(&str, &str)]) -> Self {
        Self {
            fields: fields.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            files: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        let form = MultipartForm::with_fields(&[("convX", "126.97"), ("price", "abc"), ("address", "  "), ("category", "cafe")]);
        assert_eq!(form.parse::<f64>("convX").unwrap(), 126.97);
        assert!(matches!(form.parse::<i32>("price"), Err(AppError::BadRequest(_))));
        assert_eq!(form.text("address"), None);
        assert!(form.required("name").is_err());
        assert_eq!(form.category("category").unwrap(), FoodCategory::Cafe);
    }

    #[test]
    fn empty_file_counts_as_absent() {
        let mut form = MultipartForm::default();
        form.files.insert("storeImg".into(), UploadFile::new("a.png", None, vec![]));
        assert!(form.take_file("storeImg").is_none());
    }
}
