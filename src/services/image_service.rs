use std::path::Path;

use futures::future::join_all;
use log::warn;

use crate::error::ImageError;
use crate::models::image::LocalImage;

pub struct ImageService;

impl ImageService {
    /// Reads an image from disk for upload.
    pub async fn load(path: impl AsRef<Path>) -> Result<LocalImage, ImageError> {
        let path = path.as_ref();
        let content_type = Self::content_type(path)?;
        let bytes = tokio::fs::read(path).await.map_err(|source| ImageError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(LocalImage::new(file_name, content_type, bytes))
    }

    /// Reads several images concurrently, keeping the input order. Files
    /// that cannot be read are logged and left out.
    pub async fn load_all<P: AsRef<Path>>(paths: &[P]) -> Vec<LocalImage> {
        join_all(paths.iter().map(|p| Self::load(p)))
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(image) => Some(image),
                Err(err) => {
                    warn!("Skipping image: {}", err);
                    None
                }
            })
            .collect()
    }

    fn content_type(path: &Path) -> Result<&'static str, ImageError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "jpg" | "jpeg" => Ok("image/jpeg"),
            "png" => Ok("image/png"),
            "gif" => Ok("image/gif"),
            "webp" => Ok("image/webp"),
            _ => Err(ImageError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(ImageService::content_type(Path::new("a.JPG")).unwrap(), "image/jpeg");
        assert_eq!(ImageService::content_type(Path::new("dir/b.webp")).unwrap(), "image/webp");
        assert!(matches!(
            ImageService::content_type(Path::new("notes.txt")),
            Err(ImageError::UnsupportedFormat(_))
        ));
        assert!(ImageService::content_type(Path::new("README")).is_err());
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!("hlopg-{}.png", uuid::Uuid::new_v4()));
        std::fs::write(&path, [137, 80, 78, 71]).unwrap();

        let image = tokio_test::block_on(ImageService::load(&path)).unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.bytes, vec![137, 80, 78, 71]);
        assert!(image.file_name.ends_with(".png"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_all_skips_unreadable_files() {
        let good = std::env::temp_dir().join(format!("hlopg-{}.jpg", uuid::Uuid::new_v4()));
        std::fs::write(&good, [255, 216]).unwrap();
        let missing = std::env::temp_dir().join("hlopg-does-not-exist.jpg");

        let images = tokio_test::block_on(ImageService::load_all(&[
            missing.as_path(),
            good.as_path(),
            Path::new("plain.txt"),
        ]));
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].content_type, "image/jpeg");
        assert_eq!(images[0].bytes, vec![255, 216]);

        std::fs::remove_file(&good).unwrap();
    }
}
