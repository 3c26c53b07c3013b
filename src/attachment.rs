//! Uploaded files and their transport encoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::{Path, PathBuf};

pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How an attachment travels in a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Pdf,
    /// Anything else is decoded as UTF-8 and sent as text.
    Text,
}

impl MediaKind {
    pub fn classify(media_type: &str) -> Self {
        if media_type.starts_with("image/") {
            MediaKind::Image
        } else if media_type == "application/pdf" {
            MediaKind::Pdf
        } else {
            MediaKind::Text
        }
    }

    pub fn is_binary(self) -> bool {
        matches!(self, MediaKind::Image | MediaKind::Pdf)
    }
}

/// A file selected by the user, held for the lifetime of the session.
#[derive(Clone, Debug, PartialEq)]
pub struct Attachment {
    name: String,
    media_type: String,
    data: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        let media_type = media_type.into();
        let media_type = if media_type.trim().is_empty() {
            DEFAULT_MEDIA_TYPE.to_string()
        } else {
            media_type
        };
        Self {
            name: name.into(),
            media_type,
            data,
        }
    }

    /// Builds an attachment whose media type is guessed from the file name.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = mime_guess::from_path(&name)
            .first_raw()
            .unwrap_or(DEFAULT_MEDIA_TYPE)
            .to_string();
        Self::new(name, media_type, data)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AttachmentError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| AttachmentError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("untitled")
            .to_string();
        Ok(Self::from_bytes(name, data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::classify(&self.media_type)
    }

    pub fn base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

/// Loads several files, keeping the order they were given in.
pub async fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Attachment>, AttachmentError> {
    futures::future::try_join_all(paths.iter().map(Attachment::load)).await
}

pub fn format_file_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let size = bytes as f64;
    if size < KB {
        format!("{bytes} B")
    } else if size < MB {
        format!("{:.1} KB", size / KB)
    } else {
        format!("{:.1} MB", size / MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_declared_media_type() {
        assert_eq!(MediaKind::classify("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::classify("application/pdf"), MediaKind::Pdf);
        assert_eq!(MediaKind::classify("text/csv"), MediaKind::Text);
        assert_eq!(MediaKind::classify(DEFAULT_MEDIA_TYPE), MediaKind::Text);
    }

    #[test]
    fn missing_media_type_falls_back_to_octet_stream() {
        let file = Attachment::new("blob", "", vec![1, 2, 3]);
        assert_eq!(file.media_type(), DEFAULT_MEDIA_TYPE);
    }

    #[test]
    fn guesses_media_type_from_name() {
        assert_eq!(
            Attachment::from_bytes("q3.pdf", Vec::new()).media_type(),
            "application/pdf"
        );
        assert_eq!(
            Attachment::from_bytes("chart.png", Vec::new()).kind(),
            MediaKind::Image
        );
        assert_eq!(
            Attachment::from_bytes("notes", Vec::new()).media_type(),
            DEFAULT_MEDIA_TYPE
        );
    }

    #[test]
    fn encodes_and_decodes_content() {
        let file = Attachment::new("memo.txt", "text/plain", b"Revenue up 12%".to_vec());
        assert_eq!(file.base64(), "UmV2ZW51ZSB1cCAxMiU=");
        assert_eq!(file.text(), "Revenue up 12%");
        assert_eq!(file.size(), 14);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let file = Attachment::new("export.txt", "text/plain", vec![b'a', 0xff, b'b']);
        assert_eq!(file.kind(), MediaKind::Text);
        assert_eq!(file.text(), "a\u{FFFD}b");
    }

    #[test]
    fn formats_file_sizes() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[tokio::test]
    async fn loads_files_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = dir.path().join("a.txt");
        let second = dir.path().join("b.md");
        std::fs::write(&first, "alpha").expect("write a");
        std::fs::write(&second, "beta").expect("write b");

        let files = load_all(&[&first, &second]).await.expect("load");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name(), "a.txt");
        assert_eq!(files[0].media_type(), "text/plain");
        assert_eq!(files[1].text(), "beta");
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let err = Attachment::load("/definitely/not/here.txt")
            .await
            .expect_err("missing file");
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
