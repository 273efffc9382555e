use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::media::mime;

/// Suffix of generated video thumbnails, stored next to their source file.
/// Thumb files are derived artifacts: hidden from listings, deleted with
/// their source.
pub const THUMB_SUFFIX: &str = ".thumb.jpg";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid filename")]
    InvalidFilename,
    #[error("file type not allowed")]
    TypeNotAllowed,
    #[error("file not found")]
    NotFound,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Flat directory of media files, keyed by filename.
///
/// No index, no metadata, no lifecycle — the directory listing is the state.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: PathBuf) -> Self {
        MediaStore { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reduce a client-supplied upload name to a safe flat filename: final
    /// path component only, non-portable characters replaced, no leading or
    /// trailing dots. Returns None if nothing usable remains.
    pub fn sanitize_filename(name: &str) -> Option<String> {
        let base = Path::new(name).file_name()?.to_str()?;
        let cleaned: String = base
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let cleaned = cleaned.trim_matches('.');
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned.to_string())
        }
    }

    /// Resolve a stored filename to its path, rejecting anything that could
    /// escape the media root. With separators refused, the only dangerous
    /// dot form left is a bare `.`/`..` component — interior dots (as in
    /// `a..b.mp4`) are ordinary filename characters and stay resolvable.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, StoreError> {
        if filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(StoreError::InvalidFilename);
        }
        Ok(self.root.join(filename))
    }

    /// List stored media filenames, sorted. Thumbnail siblings and files of
    /// unrecognized type are skipped.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = dir.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.ends_with(THUMB_SUFFIX) || mime::classify(&name).is_none() {
                continue;
            }
            match entry.file_type().await {
                Ok(t) if t.is_file() => names.push(name),
                _ => {}
            }
        }
        names.sort();
        Ok(names)
    }

    /// Open a destination file for a streamed upload. Validates and
    /// sanitizes the name up front, then hands back the file handle so the
    /// caller can write the body chunk by chunk instead of buffering it.
    /// Returns the name actually used. An existing file of the same name is
    /// overwritten, matching re-upload semantics.
    pub async fn create(&self, filename: &str) -> Result<(String, tokio::fs::File), StoreError> {
        let name = Self::sanitize_filename(filename).ok_or(StoreError::InvalidFilename)?;
        if mime::classify(&name).is_none() {
            return Err(StoreError::TypeNotAllowed);
        }
        let file = tokio::fs::File::create(self.root.join(&name)).await?;
        Ok((name, file))
    }

    /// Remove a half-written upload after a failed transfer. Best effort —
    /// a leftover partial file is a nuisance, not an error.
    pub async fn discard_partial(&self, name: &str) {
        if let Ok(path) = self.resolve(name) {
            if tokio::fs::remove_file(&path).await.is_ok() {
                tracing::debug!("discarded partial upload {}", name);
            }
        }
    }

    /// Store uploaded bytes under a sanitized version of `filename` in one
    /// go. Convenience over [`MediaStore::create`] for bodies already in
    /// memory.
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<String, StoreError> {
        let (name, mut file) = self.create(filename).await?;
        file.write_all(data).await?;
        file.flush().await?;
        tracing::info!("stored {} ({} bytes)", name, data.len());
        Ok(name)
    }

    /// Delete a stored file and its thumbnail, if any.
    pub async fn delete(&self, filename: &str) -> Result<(), StoreError> {
        let path = self.resolve(filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound)
            }
            Err(e) => return Err(e.into()),
        }
        tracing::info!("deleted {}", filename);

        // Best-effort thumbnail cleanup.
        let thumb = self.root.join(thumb_name(filename));
        if tokio::fs::remove_file(&thumb).await.is_ok() {
            tracing::debug!("deleted thumbnail for {}", filename);
        }
        Ok(())
    }
}

/// Thumbnail filename for a stored media file.
pub fn thumb_name(filename: &str) -> String {
    format!("{filename}{THUMB_SUFFIX}")
}
