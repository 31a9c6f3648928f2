fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use crowdnfo_catalog::{FileListRequest, FileType};
    use crowdnfo_release::{Category, FileListEntry};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into `T`, re-serializes it, and checks that the
    /// JSON is unchanged.
    fn roundtrip_test<T>(fixture_name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let original = load_fixture(fixture_name);
        let parsed: T = serde_json::from_value(original.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {fixture_name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {fixture_name}: {e}"));

        assert_eq!(
            original, reserialized,
            "roundtrip mismatch for {fixture_name}"
        );
        parsed
    }

    // --- File list requests ---

    #[test]
    fn fixture_filelist_request() {
        let req: FileListRequest = roundtrip_test("filelist_request.json");
        assert_eq!(req.category, Category::Movies);
        assert_eq!(req.entries.len(), 3);
        assert_eq!(req.entries[0].file_path, "Sample/movie-sample.mkv");
        assert_eq!(req.entries[2].file_size_bytes, 9_663_676_416);
    }

    #[test]
    fn fixture_filelist_request_episode() {
        let req: FileListRequest = roundtrip_test("filelist_request_episode.json");
        assert_eq!(req.category, Category::Tv);
        assert_eq!(req.release_name, "Show.S01E02.1080p.WEB.h264-GRP");
    }

    #[test]
    fn fixture_filelist_request_empty() {
        let req: FileListRequest = roundtrip_test("filelist_request_empty.json");
        assert!(req.entries.is_empty());
    }

    #[test]
    fn filelist_entry_uses_camel_case() {
        let entry = FileListEntry {
            file_path: "CD1/track01.flac".into(),
            file_size_bytes: 31_457_280,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "filePath": "CD1/track01.flac", "fileSizeBytes": 31457280 })
        );
    }

    // --- Enumerations ---

    #[test]
    fn fixture_categories() {
        let categories: Vec<Category> = roundtrip_test("categories.json");
        assert_eq!(categories.len(), 8);
        assert_eq!(categories[1], Category::Tv);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(serde_json::from_str::<Category>(r#""Anime""#).is_err());
        assert!(serde_json::from_str::<Category>(r#""tv""#).is_err());
    }

    #[test]
    fn file_type_wire_names() {
        assert_eq!(
            serde_json::to_value(FileType::MediaInfo).unwrap(),
            serde_json::json!("MediaInfo")
        );
        assert_eq!(
            serde_json::to_value(FileType::Nfo).unwrap(),
            serde_json::json!("NFO")
        );
        assert_eq!(FileType::Nfo.as_str(), "NFO");
    }
}
