#[cfg(test)]
mod cache_store_tests {
    use crate::cache::CacheStore;
    use std::fs;
    use std::time::Duration;

    fn store() -> (tempfile::TempDir, CacheStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path());
        store.ensure_directory();
        (dir, store)
    }

    #[test]
    fn write_then_exists_roundtrip() {
        let (_dir, store) = store();
        let path = store.entry_path("abc-dark.svg");

        assert!(!store.exists(&path));
        store.write(&path, b"<svg/>").expect("write");
        assert!(store.exists(&path));
        assert_eq!(fs::read(&path).expect("read"), b"<svg/>");
    }

    #[test]
    fn write_overwrites_existing_entries() {
        let (_dir, store) = store();
        let path = store.entry_path("abc-dark.svg");

        store.write(&path, b"one").expect("write");
        store.write(&path, b"two").expect("overwrite");
        assert_eq!(fs::read(&path).expect("read"), b"two");
    }

    #[test]
    fn write_leaves_no_staging_file_behind() {
        let (dir, store) = store();
        let path = store.entry_path("abc-dark.svg");
        store.write(&path, b"bytes").expect("write");

        let names: Vec<String> = fs::read_dir(dir.path())
            .expect("list")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["abc-dark.svg"]);
    }

    #[test]
    fn ensure_directory_tolerates_existing_directory() {
        let (_dir, store) = store();
        store.ensure_directory();
        store.ensure_directory();
    }

    // Entries age out strictly past the threshold: 1ms over is deleted, 1ms
    // under is retained.
    #[test]
    fn eviction_boundary_is_exact() {
        let (_dir, store) = store();
        let path = store.entry_path("old-dark.svg");
        store.write(&path, b"x").expect("write");

        let max_age = Duration::from_secs(7 * 86_400);
        let modified = fs::metadata(&path)
            .expect("metadata")
            .modified()
            .expect("mtime");

        let deleted = store.evict_older_than_at(max_age, modified + max_age - Duration::from_millis(1));
        assert_eq!(deleted, 0);
        assert!(store.exists(&path));

        let deleted = store.evict_older_than_at(max_age, modified + max_age + Duration::from_millis(1));
        assert_eq!(deleted, 1);
        assert!(!store.exists(&path));
    }

    #[test]
    fn eviction_reports_zero_for_missing_directory() {
        let store = CacheStore::new("/nonexistent/glimpse-test-cache");
        assert_eq!(store.evict_older_than(Duration::from_secs(1)), 0);
    }
}
