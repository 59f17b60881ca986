use rand::{distributions::Alphanumeric, Rng};
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

const FALLBACK_NAME: &str = "resume";
const SUFFIX_LEN: usize = 7;
/// Longest stored relative path, suffix included
const MAX_PATH_LEN: usize = 100;

/// Relative path a resume is stored under, namespaced by the owning user
pub fn upload_path(user_id: i32, filename: &str) -> String {
    format!("documents/user_{}/{}", user_id, filename)
}

/// Reduce an uploaded file name to something safe to put on disk.
///
/// Only the last path component survives, spaces become underscores and
/// anything outside `[-A-Za-z0-9_.]` is removed.
pub fn valid_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '-' | '_' | '.'))
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => FALLBACK_NAME.to_string(),
        _ => cleaned,
    }
}

/// Shorten a sanitized (ASCII) name to `max_len` bytes, cutting the stem and
/// keeping the extension when it fits
fn truncate_name(filename: &str, max_len: usize) -> String {
    if filename.len() <= max_len {
        return filename.to_string();
    }
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.len() + 1 < max_len => {
            format!("{}.{}", &stem[..max_len - ext.len() - 1], ext)
        }
        _ => filename[..max_len].to_string(),
    }
}

/// Insert `_<suffix>` between the stem and the extension
fn with_suffix(filename: &str, suffix: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}_{}.{}", stem, suffix, ext),
        _ => format!("{}_{}", filename, suffix),
    }
}

fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect()
}

/// Local media directory holding uploaded resumes
#[derive(Clone, Debug)]
pub struct ResumeStorage {
    media_root: PathBuf,
}

impl ResumeStorage {
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }

    /// Copy `source` into the user's document folder and return the stored
    /// relative path, at most 100 characters long. An existing file is never
    /// overwritten: the target is created exclusively and a random suffix is
    /// tried whenever the name is taken.
    pub async fn save(&self, user_id: i32, original_name: &str, source: &Path) -> io::Result<String> {
        let budget = MAX_PATH_LEN
            .saturating_sub(upload_path(user_id, "").len())
            .saturating_sub(SUFFIX_LEN + 1)
            .max(1);
        let filename = truncate_name(&valid_filename(original_name), budget);

        let folder = self.media_root.join(upload_path(user_id, ""));
        tokio::fs::create_dir_all(&folder).await?;

        let mut relative = upload_path(user_id, &filename);
        let mut target = loop {
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.media_root.join(&relative))
                .await;
            match opened {
                Ok(file) => break file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    relative = upload_path(user_id, &with_suffix(&filename, &random_suffix()));
                }
                Err(e) => return Err(e),
            }
        };

        let written = async {
            let mut source = tokio::fs::File::open(source).await?;
            tokio::io::copy(&mut source, &mut target).await?;
            target.flush().await
        }
        .await;

        if let Err(e) = written {
            drop(target);
            if let Err(cleanup) = self.remove(&relative).await {
                warn!("Failed to remove partial upload {}: {}", relative, cleanup);
            }
            return Err(e);
        }

        debug!("Stored resume for user {} at {}", user_id, relative);
        Ok(relative)
    }

    /// Remove a stored file; a file that is already gone is not an error
    pub async fn remove(&self, relative: &str) -> io::Result<()> {
        match tokio::fs::remove_file(self.media_root.join(relative)).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
