use serde::{Serialize, Serializer};
use url::Url;
use uuid::Uuid;

/// An image file picked from disk, waiting to be uploaded.
#[derive(Clone, PartialEq)]
pub struct LocalImage {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl LocalImage {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

impl std::fmt::Debug for LocalImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalImage")
            .field("id", &self.id)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl Serialize for LocalImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("LocalImage", 4)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("file_name", &self.file_name)?;
        s.serialize_field("content_type", &self.content_type)?;
        s.serialize_field("size", &self.bytes.len())?;
        s.end()
    }
}

/// One slot in a profile's ordered image list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageRef {
    /// Already stored by the backend. `reference` is what the server sent,
    /// `url` is where it can be fetched from.
    Existing { reference: String, url: String },
    Attached(LocalImage),
}

/// Absolute URL for a server image reference. Absolute references pass
/// through; relative ones are placed under the backend origin.
pub fn resolve_image_url(base_url: &Url, reference: &str) -> String {
    if reference.starts_with("http") {
        return reference.to_string();
    }
    let base = base_url.as_str().trim_end_matches('/');
    if reference.starts_with('/') {
        format!("{}{}", base, reference)
    } else {
        format!("{}/{}", base, reference)
    }
}
