//! Local key-value cache used as a fallback seed by the blended sync mode.
//!
//! The cache file is a JSON object mapping keys to string values, the same
//! layout a browser's local storage uses. The review list lives under
//! [`CACHE_KEY`] as a JSON-serialised string. Other keys are preserved on
//! write.

use std::collections::BTreeMap;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use super::error::FeedError;
use super::models::Review;

/// Key under which the review list is stored.
pub const CACHE_KEY: &str = "reviews_v1";

type Entries = BTreeMap<String, String>;

/// File-backed review cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalReviewCache {
    path: Utf8PathBuf,
}

impl LocalReviewCache {
    /// Creates a cache backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the cache file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Reads the cached review list.
    ///
    /// Returns `Ok(None)` when the file or the key does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Io`] when the file cannot be read and
    /// [`FeedError::Decode`] when its contents are not a valid cache.
    pub fn load(&self) -> Result<Option<Vec<Review>>, FeedError> {
        let Some(entries) = self.read_entries()? else {
            return Ok(None);
        };
        let Some(serialised) = entries.get(CACHE_KEY) else {
            return Ok(None);
        };

        serde_json::from_str(serialised)
            .map(Some)
            .map_err(|error| FeedError::Decode {
                message: format!("cached reviews in '{}' are invalid: {error}", self.path),
            })
    }

    /// Writes the review list under [`CACHE_KEY`], creating the file and its
    /// parent directory if needed.
    ///
    /// An unreadable existing file is replaced rather than merged.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Io`] when the file cannot be written.
    pub fn store(&self, reviews: &[Review]) -> Result<(), FeedError> {
        let (parent, file_name) = self.split_path()?;
        let mut entries = self.read_entries().ok().flatten().unwrap_or_default();

        let serialised = serde_json::to_string(reviews).map_err(|error| FeedError::Decode {
            message: format!("failed to serialise reviews: {error}"),
        })?;
        entries.insert(CACHE_KEY.to_owned(), serialised);
        let document = serde_json::to_string_pretty(&entries).map_err(|error| FeedError::Decode {
            message: format!("failed to serialise cache file: {error}"),
        })?;

        Dir::create_ambient_dir_all(parent, ambient_authority()).map_err(|error| {
            FeedError::Io {
                message: format!("failed to create cache directory '{parent}': {error}"),
            }
        })?;
        let dir = open_dir(parent)?;
        dir.write(file_name, document).map_err(|error| FeedError::Io {
            message: format!("failed to write review cache '{}': {error}", self.path),
        })
    }

    fn read_entries(&self) -> Result<Option<Entries>, FeedError> {
        let (parent, file_name) = self.split_path()?;

        let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
            Ok(dir) => dir,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(dir_error(parent, &error)),
        };
        let content = match dir.read_to_string(file_name) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(FeedError::Io {
                    message: format!("failed to read review cache '{}': {error}", self.path),
                });
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|error| FeedError::Decode {
                message: format!("review cache '{}' is not a key-value file: {error}", self.path),
            })
    }

    fn split_path(&self) -> Result<(&Utf8Path, &str), FeedError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let file_name = self.path.file_name().ok_or_else(|| FeedError::Io {
            message: format!("invalid review cache path '{}': no file name", self.path),
        })?;
        Ok((parent, file_name))
    }
}

fn open_dir(path: &Utf8Path) -> Result<Dir, FeedError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|error| dir_error(path, &error))
}

fn dir_error(path: &Utf8Path, error: &io::Error) -> FeedError {
    FeedError::Io {
        message: format!("failed to open cache directory '{path}': {error}"),
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::{CACHE_KEY, LocalReviewCache};
    use crate::feed::error::FeedError;
    use crate::feed::models::Review;

    struct CacheFixture {
        _dir: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn cache_dir() -> CacheFixture {
        let dir = TempDir::new().expect("temp dir should be created");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .expect("temp dir should be UTF-8");
        CacheFixture { _dir: dir, root }
    }

    fn sample() -> Vec<Review> {
        vec![Review {
            id: "1755221400000".to_owned(),
            author: "Jane".to_owned(),
            date: Some("2025-08-15".to_owned()),
            rating: 5,
            text: "Great work, thanks!".to_owned(),
        }]
    }

    #[rstest]
    fn missing_file_loads_as_none(cache_dir: CacheFixture) {
        let cache = LocalReviewCache::new(cache_dir.root.join("absent.json"));

        assert_eq!(cache.load().expect("load should succeed"), None);
    }

    #[rstest]
    fn missing_directory_loads_as_none(cache_dir: CacheFixture) {
        let cache = LocalReviewCache::new(cache_dir.root.join("nested/dir/cache.json"));

        assert_eq!(cache.load().expect("load should succeed"), None);
    }

    #[rstest]
    fn stored_reviews_load_back(cache_dir: CacheFixture) {
        let cache = LocalReviewCache::new(cache_dir.root.join("state/cache.json"));

        cache.store(&sample()).expect("store should succeed");

        assert_eq!(cache.load().expect("load should succeed"), Some(sample()));
    }

    #[rstest]
    fn store_preserves_unrelated_keys(cache_dir: CacheFixture) {
        let path = cache_dir.root.join("cache.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).expect("seed file should be written");
        let cache = LocalReviewCache::new(path.clone());

        cache.store(&sample()).expect("store should succeed");

        let raw = std::fs::read_to_string(&path).expect("cache should be readable");
        let entries: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&raw).expect("cache should be a JSON object");
        assert_eq!(entries.get("theme").and_then(|v| v.as_str()), Some("dark"));
        assert!(
            entries.get(CACHE_KEY).is_some_and(serde_json::Value::is_string),
            "reviews should be stored as a JSON string value"
        );
    }

    #[rstest]
    fn corrupt_file_is_a_decode_error(cache_dir: CacheFixture) {
        let path = cache_dir.root.join("cache.json");
        std::fs::write(&path, "not json").expect("seed file should be written");

        let error = LocalReviewCache::new(path)
            .load()
            .expect_err("corrupt cache should fail");

        assert!(
            matches!(error, FeedError::Decode { .. }),
            "expected Decode error, got {error:?}"
        );
    }
}
