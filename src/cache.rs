//! On-disk forecast cache
//!
//! Provides a `CacheStore` that persists raw API payloads as pretty-printed
//! JSON files under the per-user cache directory, one file per normalized
//! location query. Entries are invalidated by file age rather than an
//! embedded expiry stamp: a stale file is simply deleted and the next access
//! re-fetches. The store also keeps the persisted API key and the generated
//! click-action script.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde_json::Value;
use tracing::debug;

/// File under the cache directory holding the persisted API key
const KEY_FILE: &str = "API.key";

/// File under the cache directory holding the generated click-action script
const CLICK_ACTION_FILE: &str = "clickaction";

/// Manages the on-disk forecast cache and its sibling files
///
/// The store writes to an XDG-compliant cache directory (`~/.cache/wxpop/` on
/// Linux). Reads never fail loudly: a missing or corrupt entry reads as
/// absent, which callers treat as a cache miss and resolve with a live fetch.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheStore {
    /// Creates a new CacheStore using the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no
    /// home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "wxpop")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheStore with a custom cache directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Ensures the cache directory exists
    ///
    /// A pre-existing directory is a no-op.
    pub fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Returns the cache file path for the given location query
    ///
    /// The mapping is a pure function of the query: every non-alphanumeric
    /// character is replaced with `_`. Queries that normalize to the same
    /// string share a cache file; that collision is accepted, not remediated.
    pub fn entry_path(&self, query: &str) -> PathBuf {
        let normalized: String = query
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.cache_dir.join(format!("{normalized}.json"))
    }

    /// Deletes the cache file if it is older than the freshness threshold
    ///
    /// A missing file, unreadable metadata, or a failed delete are all
    /// silent no-ops; the caller proceeds to the read-or-fetch step either
    /// way.
    pub fn invalidate_if_stale(&self, path: &Path, freshness_minutes: u64) {
        let modified: Option<DateTime<Utc>> = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .ok()
            .map(DateTime::from);
        let Some(modified) = modified else {
            return;
        };
        let age = Utc::now().signed_duration_since(modified);
        if age > Duration::minutes(freshness_minutes as i64) {
            if let Err(err) = fs::remove_file(path) {
                debug!(path = %path.display(), %err, "could not remove stale cache entry");
            }
        }
    }

    /// Reads a cached payload
    ///
    /// Returns `None` if the file does not exist or does not parse as JSON;
    /// both cases count as a cache miss.
    pub fn read_payload(&self, path: &Path) -> Option<Value> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Persists a payload as pretty-printed JSON with sorted keys
    ///
    /// The write goes through a temp file and an atomic rename, so a
    /// concurrent reader observes either the previous entry or the complete
    /// new one, never a partial write.
    pub fn write_payload(&self, path: &Path, payload: &Value) -> io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(payload)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)
    }

    /// Reads the persisted API key, if any
    ///
    /// Only the first line of the key file is considered; a missing file or
    /// an empty first line reads as no key.
    pub fn load_api_key(&self) -> Option<String> {
        let content = fs::read_to_string(self.cache_dir.join(KEY_FILE)).ok()?;
        let key = content.lines().next()?.trim().to_string();
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    /// Persists the API key for future invocations (last-write-wins)
    pub fn store_api_key(&self, key: &str) -> io::Result<()> {
        self.ensure_dir()?;
        fs::write(self.cache_dir.join(KEY_FILE), format!("{key}\n"))
    }

    /// Returns the path of the generated click-action script
    pub fn click_action_path(&self) -> PathBuf {
        self.cache_dir.join(CLICK_ACTION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::{Duration as StdDuration, SystemTime};
    use tempfile::TempDir;

    fn create_test_store() -> (CacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CacheStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    /// Backdates a file's mtime by the given number of seconds
    fn backdate(path: &Path, seconds: u64) {
        let mtime = SystemTime::now() - StdDuration::from_secs(seconds);
        let file = fs::File::options()
            .write(true)
            .open(path)
            .expect("Should open file");
        file.set_modified(mtime).expect("Should set mtime");
    }

    #[test]
    fn test_entry_path_is_deterministic() {
        let (store, _temp_dir) = create_test_store();
        assert_eq!(store.entry_path("Boston"), store.entry_path("Boston"));
    }

    #[test]
    fn test_entry_path_normalizes_non_alphanumerics() {
        let (store, temp_dir) = create_test_store();
        let path = store.entry_path("CA/San Francisco");
        assert_eq!(
            path,
            temp_dir.path().join("CA_San_Francisco.json"),
            "slashes and spaces become underscores"
        );
    }

    #[test]
    fn test_entry_path_collides_by_design() {
        // "New York" and "New_York" normalize to the same file; the collision
        // is accepted behavior, not a defect.
        let (store, _temp_dir) = create_test_store();
        assert_eq!(store.entry_path("New York"), store.entry_path("New_York"));
    }

    #[test]
    fn test_read_payload_returns_none_for_missing_file() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.read_payload(&store.entry_path("nowhere")).is_none());
    }

    #[test]
    fn test_read_payload_returns_none_for_corrupt_file() {
        let (store, _temp_dir) = create_test_store();
        let path = store.entry_path("corrupt");
        store.ensure_dir().expect("Should create dir");
        fs::write(&path, "{ not json }").expect("Should write file");

        assert!(
            store.read_payload(&path).is_none(),
            "corrupt entry reads as a cache miss"
        );
    }

    #[test]
    fn test_write_then_read_roundtrips_payload() {
        let (store, _temp_dir) = create_test_store();
        let path = store.entry_path("roundtrip");
        let payload = json!({
            "current_observation": {"temp_c": 22.5, "weather": "Clear"},
            "hourly_forecast": [{"pop": "10"}]
        });

        store.write_payload(&path, &payload).expect("Write should succeed");
        let reread = store.read_payload(&path).expect("Should read back");

        assert_eq!(reread, payload, "structured data survives the roundtrip");
    }

    #[test]
    fn test_write_payload_is_pretty_printed_with_sorted_keys() {
        let (store, _temp_dir) = create_test_store();
        let path = store.entry_path("pretty");
        let payload = json!({"zebra": 1, "apple": 2});

        store.write_payload(&path, &payload).expect("Write should succeed");
        let content = fs::read_to_string(&path).expect("Should read file");

        assert!(content.contains('\n'), "output is pretty-printed");
        let apple = content.find("apple").expect("apple key present");
        let zebra = content.find("zebra").expect("zebra key present");
        assert!(apple < zebra, "keys are written in deterministic order");
    }

    #[test]
    fn test_write_payload_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested").join("cache");
        let store = CacheStore::with_dir(nested.clone());

        store
            .write_payload(&store.entry_path("x"), &json!({}))
            .expect("Write should succeed");

        assert!(nested.exists(), "nested directory should be created");
    }

    #[test]
    fn test_write_payload_leaves_no_temp_file() {
        let (store, temp_dir) = create_test_store();
        let path = store.entry_path("clean");

        store.write_payload(&path, &json!({"a": 1})).expect("Write should succeed");

        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .expect("Should list dir")
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp file should be renamed away");
    }

    #[test]
    fn test_invalidate_if_stale_removes_old_entry() {
        let (store, _temp_dir) = create_test_store();
        let path = store.entry_path("old");
        store.write_payload(&path, &json!({})).expect("Write should succeed");
        backdate(&path, 6 * 60);

        store.invalidate_if_stale(&path, 5);

        assert!(!path.exists(), "entry older than threshold is deleted");
    }

    #[test]
    fn test_invalidate_if_stale_keeps_fresh_entry() {
        let (store, _temp_dir) = create_test_store();
        let path = store.entry_path("fresh");
        store.write_payload(&path, &json!({})).expect("Write should succeed");

        store.invalidate_if_stale(&path, 5);

        assert!(path.exists(), "entry within threshold is kept");
    }

    #[test]
    fn test_invalidate_if_stale_is_noop_for_missing_file() {
        let (store, _temp_dir) = create_test_store();
        // Must not panic or error.
        store.invalidate_if_stale(&store.entry_path("missing"), 5);
    }

    #[test]
    fn test_api_key_roundtrip() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.load_api_key().is_none());

        store.store_api_key("abc123").expect("Store should succeed");
        assert_eq!(store.load_api_key().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_api_key_last_write_wins() {
        let (store, _temp_dir) = create_test_store();
        store.store_api_key("first").expect("Store should succeed");
        store.store_api_key("second").expect("Store should succeed");

        assert_eq!(store.load_api_key().as_deref(), Some("second"));
    }

    #[test]
    fn test_api_key_only_first_line_is_read() {
        let (store, temp_dir) = create_test_store();
        store.ensure_dir().expect("Should create dir");
        fs::write(temp_dir.path().join("API.key"), "topline\nsecondline\n")
            .expect("Should write file");

        assert_eq!(store.load_api_key().as_deref(), Some("topline"));
    }

    #[test]
    fn test_empty_key_file_reads_as_no_key() {
        let (store, temp_dir) = create_test_store();
        store.ensure_dir().expect("Should create dir");
        fs::write(temp_dir.path().join("API.key"), "\n").expect("Should write file");

        assert!(store.load_api_key().is_none());
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(store) = CacheStore::new() {
            let path_str = store.cache_dir.to_string_lossy();
            assert!(
                path_str.contains("wxpop"),
                "Cache path should contain project name"
            );
        }
        // Test passes if new() returns None (e.g., no home directory in CI)
    }

    #[test]
    fn test_click_action_path_is_under_cache_dir() {
        let (store, temp_dir) = create_test_store();
        assert_eq!(
            store.click_action_path(),
            temp_dir.path().join("clickaction")
        );
    }
}
