use crate::error::FlagError;
use chrono::{DateTime, Local};
use flag_quantize::EncodedFlag;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Extension of saved flag files
pub const FLAG_EXTENSION: &str = "txt";

/// A flag file found in the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedFlag {
    /// File stem, which is the source image's base name
    pub name: String,
    pub path: PathBuf,
    pub modified: DateTime<Local>,
}

/// Directory of saved flags, one text file per generated flag
#[derive(Debug, Clone)]
pub struct FlagStore {
    dir: PathBuf,
    excluded: Option<PathBuf>,
}

impl FlagStore {
    /// Open the store, creating the directory if it does not exist
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, FlagError> {
        let dir = dir.into();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
            tracing::info!(dir = %dir.display(), "Created saved flags directory");
        }
        Ok(Self {
            dir,
            excluded: None,
        })
    }

    /// Leave `path` out of listings; the active flag file may live in the
    /// same directory
    pub fn excluding(mut self, path: impl Into<PathBuf>) -> Self {
        self.excluded = Some(path.into());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a flag generated from `source` is saved to
    pub fn path_for_source(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "flag".to_string());
        self.dir.join(format!("{stem}.{FLAG_EXTENSION}"))
    }

    /// Write `flag` under the source's base name, replacing any earlier save.
    ///
    /// Refuses a source whose flag file would land on the excluded file.
    pub async fn save(&self, source: &Path, flag: &EncodedFlag) -> Result<PathBuf, FlagError> {
        let path = self.path_for_source(source);
        if self.is_excluded(&path) {
            return Err(FlagError::Persist(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} would overwrite the active flag file", path.display()),
            )));
        }
        tokio::fs::write(&path, flag.as_str()).await?;
        tracing::info!(
            path = %path.display(),
            tokens = flag.token_count(),
            "Saved flag"
        );
        Ok(path)
    }

    /// All saved flags, sorted by name
    pub async fn list(&self) -> Result<Vec<SavedFlag>, FlagError> {
        let mut flags = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_flag = path
                .extension()
                .map(|ext| ext == FLAG_EXTENSION)
                .unwrap_or(false);
            if !is_flag || self.is_excluded(&path) {
                continue;
            }
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let name = match path.file_stem() {
                Some(stem) => stem.to_string_lossy().into_owned(),
                None => continue,
            };
            let modified = metadata
                .modified()
                .map(DateTime::<Local>::from)
                .unwrap_or_else(|_| Local::now());
            flags.push(SavedFlag {
                name,
                path,
                modified,
            });
        }
        flags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(flags)
    }

    /// Resolve a saved flag by name (file stem) or by path.
    ///
    /// A bare name is looked up in the store first, so listed names with
    /// dots (`sunset.final`) resolve to their saved file.
    pub fn resolve(&self, name_or_path: &str) -> PathBuf {
        let as_path = Path::new(name_or_path);
        if as_path.components().count() > 1 {
            return as_path.to_path_buf();
        }
        let named = self.dir.join(format!("{name_or_path}.{FLAG_EXTENSION}"));
        if as_path.extension().is_some() && !named.exists() {
            as_path.to_path_buf()
        } else {
            named
        }
    }

    /// Whether `path` is the excluded file, however either path is spelled
    fn is_excluded(&self, path: &Path) -> bool {
        let Some(excluded) = &self.excluded else {
            return false;
        };
        if excluded == path {
            return true;
        }
        if excluded.file_name() != path.file_name() {
            return false;
        }
        match (canonical_parent(excluded), canonical_parent(path)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Read and validate a saved flag
    pub async fn load(&self, name_or_path: &str) -> Result<EncodedFlag, FlagError> {
        let path = self.resolve(name_or_path);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FlagError::FlagNotFound(name_or_path.to_string()));
            }
            Err(e) => return Err(FlagError::Persist(e)),
        };
        let flag: EncodedFlag = content.parse()?;
        tracing::debug!(path = %path.display(), tokens = flag.token_count(), "Loaded flag");
        Ok(flag)
    }
}

fn canonical_parent(path: &Path) -> Option<PathBuf> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::canonicalize(parent).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flag_quantize::Uv;

    fn sample_flag() -> EncodedFlag {
        EncodedFlag::encode(&[Uv::new(0.0, 1.0), Uv::new(0.5, 0.25)])
    }

    #[test]
    fn test_new_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().join("FlagMaker_SavedFlags");
        assert!(!store_dir.exists());

        let store = FlagStore::new(&store_dir).unwrap();
        assert!(store_dir.is_dir());
        assert_eq!(store.dir(), store_dir.as_path());
    }

    #[test]
    fn test_path_for_source_replaces_extension() {
        let store = FlagStore {
            dir: PathBuf::from("saved"),
            excluded: None,
        };
        assert_eq!(
            store.path_for_source(Path::new("images/sunset.final.jpg")),
            PathBuf::from("saved/sunset.final.txt")
        );
        assert_eq!(
            store.path_for_source(Path::new("source.png")),
            PathBuf::from("saved/source.txt")
        );
    }

    #[test]
    fn test_resolve_name_or_path() {
        let store = FlagStore {
            dir: PathBuf::from("saved"),
            excluded: None,
        };
        assert_eq!(store.resolve("sunset"), PathBuf::from("saved/sunset.txt"));
        assert_eq!(store.resolve("a.b"), PathBuf::from("a.b"));
        assert_eq!(store.resolve("other.txt"), PathBuf::from("other.txt"));
        assert_eq!(store.resolve("a/b"), PathBuf::from("a/b"));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlagStore::new(dir.path()).unwrap();

        let saved = store.save(Path::new("beach.png"), &sample_flag()).await.unwrap();
        assert_eq!(saved, dir.path().join("beach.txt"));

        let loaded = store.load("beach").await.unwrap();
        assert_eq!(loaded, sample_flag());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlagStore::new(dir.path()).unwrap();

        store.save(Path::new("x.png"), &sample_flag()).await.unwrap();
        let second = EncodedFlag::encode(&[Uv::ZERO]);
        store.save(Path::new("other/x.jpg"), &second).await.unwrap();

        assert_eq!(store.load("x").await.unwrap(), second);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlagStore::new(dir.path()).unwrap();

        match store.load("nothing").await {
            Err(FlagError::FlagNotFound(name)) => assert_eq!(name, "nothing"),
            other => panic!("Expected FlagNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_invalid_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlagStore::new(dir.path()).unwrap();
        std::fs::write(dir.path().join("bad.txt"), "0.1:0.2,zzz").unwrap();

        assert!(matches!(
            store.load("bad").await,
            Err(FlagError::InvalidFlag(_))
        ));
    }

    #[tokio::test]
    async fn test_list_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlagStore::new(dir.path()).unwrap();

        store.save(Path::new("zebra.png"), &sample_flag()).await.unwrap();
        store.save(Path::new("apple.png"), &sample_flag()).await.unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignore me").unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["apple".to_string(), "zebra".to_string()]);
    }

    #[tokio::test]
    async fn test_dotted_name_loads_by_listed_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlagStore::new(dir.path()).unwrap();
        store.save(Path::new("a.b.png"), &sample_flag()).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].name, "a.b");
        assert_eq!(store.resolve(&listed[0].name), dir.path().join("a.b.txt"));
        assert_eq!(store.load(&listed[0].name).await.unwrap(), sample_flag());
    }

    #[tokio::test]
    async fn test_excluded_file_matched_through_other_spelling() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let store = FlagStore::new(dir.path())
            .unwrap()
            .excluding(dir.path().join("sub/../active_flag.txt"));

        store.save(Path::new("kept.png"), &sample_flag()).await.unwrap();
        std::fs::write(dir.path().join("active_flag.txt"), "0:0").unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["kept".to_string()]);
    }

    #[tokio::test]
    async fn test_save_refuses_to_overwrite_excluded_file() {
        let dir = tempfile::tempdir().unwrap();
        let active = dir.path().join("active_flag.txt");
        std::fs::write(&active, "0.5:0.5").unwrap();
        let store = FlagStore::new(dir.path()).unwrap().excluding(&active);

        let result = store
            .save(Path::new("photos/active_flag.png"), &sample_flag())
            .await;
        assert!(matches!(result, Err(FlagError::Persist(_))));
        assert_eq!(std::fs::read_to_string(&active).unwrap(), "0.5:0.5");
    }

    #[tokio::test]
    async fn test_list_skips_excluded_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlagStore::new(dir.path())
            .unwrap()
            .excluding(dir.path().join("active_flag.txt"));

        store.save(Path::new("kept.png"), &sample_flag()).await.unwrap();
        std::fs::write(dir.path().join("active_flag.txt"), "0:0").unwrap();

        let flags = store.list().await.unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].name, "kept");
    }
}
