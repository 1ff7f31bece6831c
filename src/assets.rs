//! File-backed asset cache
//!
//! Each source unit (for example `components/Button.tsx`) caches its CSS in a
//! flat file inside the asset directory. The on-disk name is derived from the
//! source key by [`AssetStore::normalize`]:
//!
//! ```text
//! components/Button.tsx  ->  <asset dir>/components__Button.css
//! ```
//!
//! Normalization is one-way. Two keys that normalize to the same name share a
//! file, and the last write wins.
//!
//! None of these operations create the asset directory; run the bootstrap step
//! ([`crate::context::BuildContext::ensure_dirs`]) first.

use std::fs;
use std::io;
use std::path::{is_separator, Path, PathBuf};
use thiserror::Error;

/// Replaces each path separator in a normalized asset name.
pub const SEPARATOR_DELIMITER: &str = "__";

/// Extension every cached asset carries.
pub const ASSET_EXTENSION: &str = "css";

/// Asset store error
#[derive(Debug, Error)]
pub enum AssetError {
    /// The asset file does not exist
    #[error("Asset not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Any other I/O failure
    #[error("Asset I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A file in the asset directory has a name that is not valid UTF-8
    #[error("Asset name is not valid UTF-8: {}", .0.display())]
    InvalidName(PathBuf),
    /// The asset glob could not be compiled
    #[error("Invalid asset glob '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl AssetError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            AssetError::NotFound(path.to_path_buf())
        } else {
            AssetError::Io { path: path.to_path_buf(), source }
        }
    }

    /// Whether this is a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AssetError::NotFound(_))
    }
}

/// Store of cached CSS artifacts keyed by source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStore {
    dir: PathBuf,
}

impl AssetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The asset directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Flat file name for a source key.
    ///
    /// The extension of the key's last component is replaced with `.css` (a
    /// key without one gets `.css` appended), then every path separator
    /// becomes `__`. Dots in directory names are kept.
    pub fn normalize(key: &str) -> String {
        let stem = Path::new(key)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| key.strip_suffix(ext))
            .and_then(|rest| rest.strip_suffix('.'))
            .unwrap_or(key);

        let mut flat = String::with_capacity(stem.len() + ASSET_EXTENSION.len() + 1);
        for c in stem.chars() {
            if is_separator(c) {
                flat.push_str(SEPARATOR_DELIMITER);
            } else {
                flat.push(c);
            }
        }
        flat.push('.');
        flat.push_str(ASSET_EXTENSION);
        flat
    }

    /// Location of the asset for `key`. Does not touch the disk.
    pub fn get_path(&self, key: &str) -> PathBuf {
        self.dir.join(Self::normalize(key))
    }

    /// Write `css` for `key`, replacing any previous content.
    ///
    /// Returns the written file's path.
    pub fn write(&self, key: &str, css: &str) -> Result<PathBuf, AssetError> {
        let path = self.get_path(key);
        fs::write(&path, css).map_err(|e| AssetError::from_io(&path, e))?;
        tracing::debug!(key, path = %path.display(), bytes = css.len(), "wrote asset");
        Ok(path)
    }

    /// Read an asset by its file name inside the asset directory.
    ///
    /// `file` is joined as-is, without normalization, so pass names obtained
    /// from [`get_files`](Self::get_files) or [`normalize`](Self::normalize).
    pub fn read_file(&self, file: &str) -> Result<String, AssetError> {
        let path = self.dir.join(file);
        fs::read_to_string(&path).map_err(|e| AssetError::from_io(&path, e))
    }

    /// Awaitable form of [`read_file`](Self::read_file).
    #[cfg(feature = "async")]
    pub async fn read_file_async(&self, file: &str) -> Result<String, AssetError> {
        let path = self.dir.join(file);
        tokio::fs::read_to_string(&path).await.map_err(|e| AssetError::from_io(&path, e))
    }

    /// Delete the asset for `key`.
    pub fn rm(&self, key: &str) -> Result<(), AssetError> {
        let path = self.get_path(key);
        fs::remove_file(&path).map_err(|e| AssetError::from_io(&path, e))?;
        tracing::debug!(key, path = %path.display(), "removed asset");
        Ok(())
    }

    /// Names of every entry in the asset directory, sorted.
    ///
    /// A name that is not valid UTF-8 fails with [`AssetError::InvalidName`]
    /// instead of being rewritten, so every returned name can be passed back
    /// to [`read_file`](Self::read_file).
    pub fn get_files(&self) -> Result<Vec<String>, AssetError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| AssetError::from_io(&self.dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AssetError::from_io(&self.dir, e))?;
            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(_) => return Err(AssetError::InvalidName(entry.path())),
            }
        }
        files.sort();
        Ok(files)
    }

    /// Glob pattern matching every cached asset, recursively.
    pub fn glob(&self) -> String {
        format!("{}/**/*.{}", self.dir.display(), ASSET_EXTENSION)
    }

    /// Expand [`glob`](Self::glob) against the file system, sorted.
    ///
    /// Glob metacharacters in the asset directory itself are matched
    /// literally.
    pub fn matching_files(&self) -> Result<Vec<PathBuf>, AssetError> {
        let pattern =
            format!("{}/**/*.{}", glob::Pattern::escape(&self.dir.to_string_lossy()), ASSET_EXTENSION);
        let paths = glob::glob(&pattern).map_err(|source| AssetError::Pattern { pattern: pattern.clone(), source })?;

        let mut files = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                AssetError::from_io(&path, e.into_error())
            })?;
            files.push(path);
        }
        files.sort();
        Ok(files)
    }
}

/// The aggregate stylesheet file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCss {
    path: PathBuf,
}

impl OutputCss {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the aggregate stylesheet with `css`.
    pub fn write(&self, css: &str) -> Result<(), AssetError> {
        fs::write(&self.path, css).map_err(|e| AssetError::from_io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_nested_key() {
        assert_eq!(AssetStore::normalize("components/Button.tsx"), "components__Button.css");
        assert_eq!(AssetStore::normalize("a/b/c.jsx"), "a__b__c.css");
    }

    #[test]
    fn test_normalize_without_extension() {
        assert_eq!(AssetStore::normalize("src/index"), "src__index.css");
    }

    #[test]
    fn test_normalize_only_last_extension() {
        assert_eq!(AssetStore::normalize("pages/home.page.tsx"), "pages__home.page.css");
    }

    #[test]
    fn test_normalize_dotted_directory_without_extension() {
        let button = AssetStore::normalize("pkg.v1/Button");
        let card = AssetStore::normalize("pkg.v1/Card");
        assert_eq!(button, "pkg.v1__Button.css");
        assert_eq!(card, "pkg.v1__Card.css");
        assert_ne!(button, card);
    }

    #[test]
    fn test_normalize_dotted_directory_with_extension() {
        assert_eq!(AssetStore::normalize("pkg.v1/Card.tsx"), "pkg.v1__Card.css");
    }

    #[test]
    fn test_normalize_dotfile() {
        assert_eq!(AssetStore::normalize(".hidden"), ".hidden.css");
        assert_eq!(AssetStore::normalize("src/.hidden"), "src__.hidden.css");
    }

    #[test]
    fn test_normalize_idempotent() {
        for key in [
            "components/Button.tsx",
            "x.css",
            "deep/nested/file.vue",
            "plain",
            "pkg.v1/Card",
            ".hidden",
            "pages/home.page.tsx",
        ] {
            let once = AssetStore::normalize(key);
            assert_eq!(AssetStore::normalize(&once), once);
            assert_eq!(AssetStore::normalize(key), once);
        }
    }

    #[test]
    fn test_get_path() {
        let store = AssetStore::new("/proj/styled-system/assets");
        assert_eq!(
            store.get_path("components/Button.tsx"),
            PathBuf::from("/proj/styled-system/assets/components__Button.css")
        );
    }

    #[test]
    fn test_glob_pattern() {
        let store = AssetStore::new("/proj/out/assets");
        assert_eq!(store.glob(), "/proj/out/assets/**/*.css");
    }

    #[test]
    fn test_write_read_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = AssetStore::new(temp.path());

        let css = ".a { color: red; }\n";
        let path = store.write("src/a.tsx", css).unwrap();
        assert_eq!(path, temp.path().join("src__a.css"));

        let name = AssetStore::normalize("src/a.tsx");
        assert_eq!(store.read_file(&name).unwrap(), css);
    }

    #[test]
    fn test_write_overwrites() {
        let temp = TempDir::new().unwrap();
        let store = AssetStore::new(temp.path());

        store.write("a.tsx", "one").unwrap();
        store.write("a.tsx", "two").unwrap();
        assert_eq!(store.read_file("a.css").unwrap(), "two");
    }

    #[test]
    fn test_write_without_directory_fails() {
        let temp = TempDir::new().unwrap();
        let store = AssetStore::new(temp.path().join("missing"));
        let err = store.write("a.tsx", "x").unwrap_err();
        assert!(err.is_not_found());
        assert!(!temp.path().join("missing").exists());
    }

    #[test]
    fn test_rm_missing_fails() {
        let temp = TempDir::new().unwrap();
        let store = AssetStore::new(temp.path());
        let err = store.rm("never/written.tsx").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(ref p) if p.ends_with("never__written.css")));
    }

    #[test]
    fn test_rm_removes_file() {
        let temp = TempDir::new().unwrap();
        let store = AssetStore::new(temp.path());
        let path = store.write("a/b.tsx", "x").unwrap();
        store.rm("a/b.tsx").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_read_missing_fails() {
        let temp = TempDir::new().unwrap();
        let store = AssetStore::new(temp.path());
        assert!(store.read_file("nope.css").unwrap_err().is_not_found());
    }

    #[test]
    fn test_get_files_unfiltered_sorted() {
        let temp = TempDir::new().unwrap();
        let store = AssetStore::new(temp.path());
        store.write("b.tsx", "").unwrap();
        store.write("a.tsx", "").unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();

        assert_eq!(store.get_files().unwrap(), vec!["a.css", "b.css", "notes.txt"]);
    }

    #[test]
    fn test_matching_files_in_bracketed_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("[build]*");
        fs::create_dir(&dir).unwrap();
        let store = AssetStore::new(&dir);

        store.write("a.tsx", "").unwrap();
        store.write("b/c.tsx", "").unwrap();

        assert_eq!(store.matching_files().unwrap(), vec![dir.join("a.css"), dir.join("b__c.css")]);
    }

    #[test]
    fn test_matching_files_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = AssetStore::new(temp.path().join("missing"));
        assert!(store.matching_files().unwrap().is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_get_files_rejects_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let store = AssetStore::new(temp.path());
        fs::write(temp.path().join(OsStr::from_bytes(b"bad\xff.css")), "").unwrap();

        let err = store.get_files().unwrap_err();
        assert!(matches!(err, AssetError::InvalidName(ref p) if p.starts_with(temp.path())));
    }

    #[test]
    fn test_output_css_write() {
        let temp = TempDir::new().unwrap();
        let out = OutputCss::new(temp.path().join("styles.css"));
        out.write("body{}").unwrap();
        assert_eq!(fs::read_to_string(out.path()).unwrap(), "body{}");
    }
}
