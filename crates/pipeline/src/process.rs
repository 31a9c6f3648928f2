//! Top-level release processing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crowdnfo_catalog::{
    CatalogApi, CatalogClient, CatalogConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
use crowdnfo_mediainfo::MediaInfo;
use crowdnfo_release::{
    Category, EpisodeInfo, ReleaseError, calculate_sha256, extract_episodes, is_season_pack,
    release_name, resolve_category, scanner, should_hash,
};
use tracing::{debug, info};

use crate::archive::Archive;
use crate::error::ProcessError;
use crate::progress::{ProgressEvent, ProgressObserver, Stage};
use crate::result::{ProcessResult, WarningKind};
use crate::upload::{AssetBundle, AssetUploader, NfoAsset, UploadTarget};

/// Per-run settings.
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// Release directory or single release file.
    pub release_path: PathBuf,
    /// Explicit catalog category; empty or `None` derives it from the name.
    pub category: Option<String>,
    pub api_key: String,
    pub api_base_url: String,
    pub timeout: Duration,
    /// Where accepted uploads are copied; `None` disables archiving.
    pub archive_dir: Option<PathBuf>,
    /// Hash size threshold: `0` always hashes, negative never, positive is a byte limit.
    pub max_hash_file_size: i64,
    /// MediaInfo executable; `None` looks up `mediainfo` on `PATH`.
    pub media_info_path: Option<PathBuf>,
    /// Ready-made MediaInfo JSON for a single release. Skips running the tool.
    pub media_info_json: Option<Vec<u8>>,
    /// NFO to upload for a single release instead of the discovered one.
    pub nfo_file: Option<PathBuf>,
}

impl ReleaseOptions {
    pub fn new(release_path: impl Into<PathBuf>, api_key: impl Into<String>) -> Self {
        Self {
            release_path: release_path.into(),
            category: None,
            api_key: api_key.into(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            archive_dir: None,
            max_hash_file_size: 0,
            media_info_path: None,
            media_info_json: None,
            nfo_file: None,
        }
    }

    /// Client settings derived from these options.
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.api_base_url.clone(),
            api_key: self.api_key.clone(),
            timeout: self.timeout,
        }
    }
}

/// Processes a release against the live catalog.
///
/// Returns the accumulated warnings, or the precondition that stopped the run.
pub async fn process_release(
    options: &ReleaseOptions,
    observer: Option<&dyn ProgressObserver>,
) -> Result<ProcessResult, ProcessError> {
    if options.api_key.is_empty() {
        return Err(ProcessError::MissingApiKey);
    }
    let client = CatalogClient::new(&options.catalog_config())?;
    let mut processor = ReleaseProcessor::new(&client);
    if let Some(observer) = observer {
        processor = processor.with_observer(observer);
    }
    processor.process(options).await
}

/// Runs the pipeline for one release against any [`CatalogApi`].
pub struct ReleaseProcessor<'a> {
    api: &'a dyn CatalogApi,
    observer: Option<&'a dyn ProgressObserver>,
}

/// State shared by every upload within one run.
struct RunContext {
    release_name: String,
    category: Category,
    archive: Option<Archive>,
}

impl<'a> ReleaseProcessor<'a> {
    pub fn new(api: &'a dyn CatalogApi) -> Self {
        Self {
            api,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    fn emit(&self, stage: Stage, release_name: &str, detail: impl Into<String>) {
        if let Some(observer) = self.observer {
            observer.on_progress(&ProgressEvent {
                stage,
                release_name: release_name.to_string(),
                detail: detail.into(),
            });
        }
    }

    /// Processes the release described by `options`.
    pub async fn process(&self, options: &ReleaseOptions) -> Result<ProcessResult, ProcessError> {
        let path = options.release_path.as_path();
        let name = release_name(path)
            .ok_or_else(|| ProcessError::ReleaseName(path.display().to_string()))?;
        if options.api_key.is_empty() {
            return Err(ProcessError::MissingApiKey);
        }
        let category = resolve_category(options.category.as_deref(), &name)?;
        info!(release = %name, %category, "processing release");

        let ctx = RunContext {
            release_name: name,
            category,
            archive: options.archive_dir.as_ref().map(Archive::new),
        };

        if is_season_pack(&ctx.release_name, path) {
            self.emit(Stage::Startup, &ctx.release_name, "season pack detected");
            info!(release = %ctx.release_name, "detected season pack");
            self.process_season_pack(&ctx, options).await
        } else {
            self.emit(Stage::Startup, &ctx.release_name, "single release");
            self.process_single(&ctx, options).await
        }
    }

    /// Resolves and version-checks the MediaInfo tool.
    ///
    /// A missing tool is not an error; an outdated one is.
    async fn media_tool(
        &self,
        options: &ReleaseOptions,
    ) -> Result<Option<MediaInfo>, ProcessError> {
        let Some(tool) = MediaInfo::locate(options.media_info_path.as_deref()) else {
            info!("MediaInfo not found, continuing without media info");
            return Ok(None);
        };
        tool.check_version().await?;
        Ok(Some(tool))
    }

    async fn process_single(
        &self,
        ctx: &RunContext,
        options: &ReleaseOptions,
    ) -> Result<ProcessResult, ProcessError> {
        let path = options.release_path.as_path();
        let name = ctx.release_name.as_str();
        let media_file = scanner::find_media_file(path)?;
        debug!(release = %name, file = %media_file.display(), "selected media file");

        let supplied = options.media_info_json.clone().filter(|j| !j.is_empty());
        let tool = if supplied.is_some() || scanner::is_hash_only_file(&media_file) {
            None
        } else {
            self.media_tool(options).await?
        };

        let mut result = ProcessResult::new();

        self.emit(Stage::Metadata, name, "gathering metadata");
        let media_info = match supplied {
            Some(json) => Some(json),
            None => generate_media_info(tool.as_ref(), &media_file, name, &mut result).await,
        };

        let nfo_path = match &options.nfo_file {
            Some(nfo) => Some(nfo.clone()),
            None => scanner::find_nfo_file(path).unwrap_or_else(|e| {
                result.warn(name, WarningKind::Nfo, format!("NFO lookup failed: {e}"));
                None
            }),
        };
        if nfo_path.is_none() {
            info!(release = %name, "no NFO file found");
        }
        let nfo = nfo_path.and_then(|p| read_nfo(&p, name, &mut result));

        let file_list = match scanner::create_file_list(path) {
            Ok(entries) => Some(entries),
            Err(e) => {
                result.warn(name, WarningKind::FileList, e);
                None
            }
        };

        self.emit(Stage::Hashing, name, media_file.display().to_string());
        let hash = release_hash(&media_file, options.max_hash_file_size, name, &mut result);

        self.emit(Stage::Upload, name, "uploading assets");
        let target = UploadTarget {
            release_name: name.to_string(),
            category: ctx.category,
            hash,
        };
        let bundle = AssetBundle {
            media_info,
            nfo,
            file_list,
        };
        let uploaded = AssetUploader::new(self.api, ctx.archive.as_ref())
            .upload(&target, bundle)
            .await;
        result.merge(uploaded);
        Ok(result)
    }

    async fn process_season_pack(
        &self,
        ctx: &RunContext,
        options: &ReleaseOptions,
    ) -> Result<ProcessResult, ProcessError> {
        let path = options.release_path.as_path();
        let videos = scanner::find_all_video_files(path)?;
        if videos.is_empty() {
            return Err(ProcessError::NoVideoFiles(path.display().to_string()));
        }

        self.emit(
            Stage::Metadata,
            &ctx.release_name,
            format!("extracting episodes from {} video files", videos.len()),
        );
        let general_nfo = scanner::find_general_nfo(path);
        let episodes = extract_episodes(&videos, &ctx.release_name, general_nfo.as_deref());
        if episodes.is_empty() {
            return Err(ProcessError::NoEpisodes(path.display().to_string()));
        }
        info!(release = %ctx.release_name, episodes = episodes.len(), "extracted episodes");

        let tool = self.media_tool(options).await?;
        let mut result = ProcessResult::new();
        for episode in &episodes {
            let episode_result = self
                .process_episode(ctx, episode, tool.as_ref(), options.max_hash_file_size)
                .await;
            result.merge(episode_result);
        }
        Ok(result)
    }

    async fn process_episode(
        &self,
        ctx: &RunContext,
        episode: &EpisodeInfo,
        tool: Option<&MediaInfo>,
        max_hash_file_size: i64,
    ) -> ProcessResult {
        let name = episode.release_name.as_str();
        let video = episode.video_file.path.as_path();
        let mut result = ProcessResult::new();

        self.emit(Stage::Metadata, name, episode.episode_number.clone());
        let media_info = generate_media_info(tool, video, name, &mut result).await;
        let nfo = episode
            .nfo_file
            .as_deref()
            .and_then(|p| read_nfo(p, name, &mut result));
        let file_list = match scanner::create_episode_file_list(episode) {
            Ok(entries) => Some(entries),
            Err(e) => {
                result.warn(name, WarningKind::FileList, e);
                None
            }
        };

        self.emit(Stage::Hashing, name, episode.video_file.name.clone());
        let hash = match hash_media_file(video, max_hash_file_size, name, &mut result) {
            Ok(hash) => hash,
            Err(e) => {
                result.warn(name, WarningKind::Hash, format!("failed to generate hash: {e}"));
                return result;
            }
        };

        self.emit(Stage::Upload, name, "uploading assets");
        let target = UploadTarget {
            release_name: name.to_string(),
            category: ctx.category,
            hash,
        };
        let bundle = AssetBundle {
            media_info,
            nfo,
            file_list,
        };
        let uploaded = AssetUploader::new(self.api, ctx.archive.as_ref())
            .upload(&target, bundle)
            .await;
        result.merge(uploaded);
        result
    }
}

async fn generate_media_info(
    tool: Option<&MediaInfo>,
    file: &Path,
    release: &str,
    result: &mut ProcessResult,
) -> Option<Vec<u8>> {
    let tool = tool?;
    match tool.generate_json(file).await {
        Ok(json) => Some(json),
        Err(e) => {
            let message = format!("failed to generate MediaInfo: {e}");
            result.warn(release, WarningKind::MediaInfo, message);
            None
        }
    }
}

fn read_nfo(path: &Path, release: &str, result: &mut ProcessResult) -> Option<NfoAsset> {
    match std::fs::read(path) {
        Ok(data) => Some(NfoAsset {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            data,
        }),
        Err(e) => {
            result.warn(release, WarningKind::Nfo, e);
            None
        }
    }
}

/// Hash for a single release. A failed digest is recorded and the release
/// is uploaded without one.
fn release_hash(
    file: &Path,
    max_hash_file_size: i64,
    release: &str,
    result: &mut ProcessResult,
) -> Option<String> {
    hash_media_file(file, max_hash_file_size, release, result).unwrap_or_else(|e| {
        result.warn(release, WarningKind::Hash, format!("failed to generate hash: {e}"));
        None
    })
}

/// Applies the hash policy to `file` and digests it when allowed.
///
/// A failed size check is recorded and leaves the hash out. `Err` means the
/// digest itself failed; the caller decides whether that skips the upload.
fn hash_media_file(
    file: &Path,
    max_hash_file_size: i64,
    release: &str,
    result: &mut ProcessResult,
) -> Result<Option<String>, ReleaseError> {
    match should_hash(file, max_hash_file_size) {
        Ok(decision) if decision.hash => calculate_sha256(file).map(Some),
        Ok(_) => {
            info!(release = %release, "skip hashing: file exceeds size limit");
            Ok(None)
        }
        Err(e) => {
            result.warn(release, WarningKind::Hash, e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::AssetKind;
    use crate::upload::tests::{Call, MockCatalog};
    use crowdnfo_catalog::FileType;
    use crowdnfo_release::VideoFile;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn options(path: &Path) -> ReleaseOptions {
        ReleaseOptions {
            media_info_path: Some(PathBuf::from("/nonexistent/bin/mediainfo")),
            ..ReleaseOptions::new(path, "test-key")
        }
    }

    fn movie_release(tmp: &TempDir) -> PathBuf {
        let root = tmp.path().join("Movie.2024.1080p.BluRay.x264-GRP");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("movie.mkv"), b"movie bytes").unwrap();
        fs::write(root.join("grp.nfo"), b"NFO").unwrap();
        root
    }

    fn season_pack(tmp: &TempDir) -> PathBuf {
        let root = tmp.path().join("Show.S01.1080p.WEB-GRP");
        fs::create_dir_all(&root).unwrap();
        for ep in 1..=3 {
            fs::write(root.join(format!("show.s01e0{ep}.1080p.mkv")), b"ep").unwrap();
        }
        fs::write(root.join("season.nfo"), b"NFO").unwrap();
        root
    }

    fn uploaded_releases(calls: &[Call]) -> Vec<String> {
        calls
            .iter()
            .map(|c| match c {
                Call::File(u) => u.release_name.clone(),
                Call::FileList(r) => r.release_name.clone(),
            })
            .collect()
    }

    #[tokio::test]
    async fn single_release_uploads_all_assets() {
        let tmp = TempDir::new().unwrap();
        let root = movie_release(&tmp);
        let mock = MockCatalog::default();
        let opts = ReleaseOptions {
            media_info_json: Some(br#"{"media":{}}"#.to_vec()),
            archive_dir: Some(tmp.path().join("archive")),
            ..options(&root)
        };

        let result = ReleaseProcessor::new(&mock).process(&opts).await.unwrap();
        assert!(result.is_clean(), "{:?}", result.warnings);

        let calls = mock.calls();
        assert_eq!(calls.len(), 3);
        let Call::File(media) = &calls[0] else {
            panic!("expected file upload");
        };
        assert_eq!(media.file_type, FileType::MediaInfo);
        assert_eq!(media.category, Category::Movies);
        assert_eq!(
            media.hash.as_deref(),
            Some(calculate_sha256(&root.join("movie.mkv")).unwrap().as_str())
        );
        let Call::File(nfo) = &calls[1] else {
            panic!("expected NFO upload");
        };
        assert_eq!(nfo.original_file_name.as_deref(), Some("grp.nfo"));
        let Call::FileList(list) = &calls[2] else {
            panic!("expected file list");
        };
        assert_eq!(list.entries.len(), 2);

        let archive = tmp.path().join("archive");
        assert!(archive.join("Movie.2024.1080p.BluRay.x264-GRP.json").exists());
        assert!(archive.join("grp.nfo").exists());
    }

    #[tokio::test]
    async fn missing_tool_means_no_media_info() {
        let tmp = TempDir::new().unwrap();
        let root = movie_release(&tmp);
        let mock = MockCatalog::default();

        let result = ReleaseProcessor::new(&mock)
            .process(&options(&root))
            .await
            .unwrap();
        assert!(result.is_clean());
        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], Call::File(u) if u.file_type == FileType::Nfo));
    }

    #[tokio::test]
    async fn hash_threshold_is_respected() {
        let tmp = TempDir::new().unwrap();
        let root = movie_release(&tmp);
        let mock = MockCatalog::default();
        let opts = ReleaseOptions {
            max_hash_file_size: 3,
            ..options(&root)
        };

        ReleaseProcessor::new(&mock).process(&opts).await.unwrap();
        let Call::File(nfo) = &mock.calls()[0] else {
            panic!("expected NFO upload");
        };
        assert_eq!(nfo.hash, None);
    }

    #[tokio::test]
    async fn explicit_nfo_overrides_discovery() {
        let tmp = TempDir::new().unwrap();
        let root = movie_release(&tmp);
        let custom = tmp.path().join("custom.nfo");
        fs::write(&custom, b"CUSTOM").unwrap();
        let mock = MockCatalog::default();
        let opts = ReleaseOptions {
            nfo_file: Some(custom),
            ..options(&root)
        };

        ReleaseProcessor::new(&mock).process(&opts).await.unwrap();
        let Call::File(nfo) = &mock.calls()[0] else {
            panic!("expected NFO upload");
        };
        assert_eq!(nfo.original_file_name.as_deref(), Some("custom.nfo"));
        assert_eq!(nfo.data, b"CUSTOM");
    }

    #[tokio::test]
    async fn unreadable_nfo_is_a_warning() {
        let tmp = TempDir::new().unwrap();
        let root = movie_release(&tmp);
        let mock = MockCatalog::default();
        let opts = ReleaseOptions {
            nfo_file: Some(tmp.path().join("missing.nfo")),
            ..options(&root)
        };

        let result = ReleaseProcessor::new(&mock).process(&opts).await.unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::Nfo);
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn single_file_release() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("Movie.2024.1080p.WEB.h264-GRP.mkv");
        fs::write(&file, b"bytes").unwrap();
        let mock = MockCatalog::default();

        let result = ReleaseProcessor::new(&mock)
            .process(&options(&file))
            .await
            .unwrap();
        assert!(result.is_clean());
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        let Call::FileList(list) = &calls[0] else {
            panic!("expected file list");
        };
        assert_eq!(list.release_name, "Movie.2024.1080p.WEB.h264-GRP");
        assert_eq!(list.entries[0].file_path, "Movie.2024.1080p.WEB.h264-GRP.mkv");
    }

    #[tokio::test]
    async fn missing_api_key_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let root = movie_release(&tmp);
        let mock = MockCatalog::default();
        let opts = ReleaseOptions::new(&root, "");

        let err = ReleaseProcessor::new(&mock).process(&opts).await.unwrap_err();
        assert!(matches!(err, ProcessError::MissingApiKey));
        assert!(mock.calls().is_empty());

        let err = process_release(&opts, None).await.unwrap_err();
        assert!(matches!(err, ProcessError::MissingApiKey));
    }

    #[tokio::test]
    async fn invalid_category_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let root = movie_release(&tmp);
        let mock = MockCatalog::default();
        let opts = ReleaseOptions {
            category: Some("Bogus".into()),
            ..options(&root)
        };

        let err = ReleaseProcessor::new(&mock).process(&opts).await.unwrap_err();
        assert!(matches!(err, ProcessError::Release(_)));
        assert!(err.to_string().contains("Bogus"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn undetermined_category_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Completely-Unremarkable");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.mkv"), b"x").unwrap();
        let mock = MockCatalog::default();

        let err = ReleaseProcessor::new(&mock)
            .process(&options(&root))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::Release(_)));
    }

    #[tokio::test]
    async fn no_media_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Movie.2024.1080p-GRP");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("readme.txt"), b"x").unwrap();
        let mock = MockCatalog::default();

        let err = ReleaseProcessor::new(&mock)
            .process(&options(&root))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::Release(_)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn unresolvable_release_name_is_fatal() {
        let mock = MockCatalog::default();
        let err = ReleaseProcessor::new(&mock)
            .process(&options(Path::new("/")))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::ReleaseName(_)));
    }

    #[tokio::test]
    async fn season_pack_uploads_each_episode() {
        let tmp = TempDir::new().unwrap();
        let root = season_pack(&tmp);
        let mock = MockCatalog::default();

        let result = ReleaseProcessor::new(&mock)
            .process(&options(&root))
            .await
            .unwrap();
        assert!(result.is_clean(), "{:?}", result.warnings);

        let calls = mock.calls();
        assert_eq!(
            uploaded_releases(&calls),
            vec![
                "Show.S01E01.1080p.WEB-GRP",
                "Show.S01E01.1080p.WEB-GRP",
                "Show.S01E02.1080p.WEB-GRP",
                "Show.S01E02.1080p.WEB-GRP",
                "Show.S01E03.1080p.WEB-GRP",
                "Show.S01E03.1080p.WEB-GRP",
            ]
        );
        for call in &calls {
            match call {
                Call::File(u) => {
                    assert_eq!(u.category, Category::Tv);
                    assert_eq!(u.original_file_name.as_deref(), Some("season.nfo"));
                    assert!(u.hash.is_some());
                }
                Call::FileList(r) => assert_eq!(r.entries.len(), 2),
            }
        }
    }

    #[tokio::test]
    async fn season_pack_failure_is_isolated_to_one_episode() {
        let tmp = TempDir::new().unwrap();
        let root = season_pack(&tmp);
        let mock = MockCatalog {
            fail_releases: vec!["Show.S01E02.1080p.WEB-GRP".into()],
            ..Default::default()
        };

        let result = ReleaseProcessor::new(&mock)
            .process(&options(&root))
            .await
            .unwrap();

        assert_eq!(mock.calls().len(), 6);
        assert_eq!(result.warnings.len(), 2);
        assert!(
            result
                .warnings
                .iter()
                .all(|w| w.release == "Show.S01E02.1080p.WEB-GRP")
        );
        assert_eq!(result.warnings[0].kind, WarningKind::Upload(AssetKind::Nfo));
        assert_eq!(
            result.warnings[1].kind,
            WarningKind::Upload(AssetKind::FileList)
        );
    }

    #[tokio::test]
    async fn season_pack_skips_videos_without_episode_token() {
        let tmp = TempDir::new().unwrap();
        let root = season_pack(&tmp);
        fs::write(root.join("bonus.featurette.mkv"), b"x").unwrap();
        let mock = MockCatalog::default();

        ReleaseProcessor::new(&mock)
            .process(&options(&root))
            .await
            .unwrap();
        assert_eq!(mock.calls().len(), 6);
    }

    #[tokio::test]
    async fn season_pack_without_videos_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Show.S01.1080p.WEB-GRP");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("season.nfo"), b"x").unwrap();
        let mock = MockCatalog::default();

        let err = ReleaseProcessor::new(&mock)
            .process(&options(&root))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::NoVideoFiles(_)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn season_pack_without_episodes_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Show.S01.1080p.WEB-GRP");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("trailer.mkv"), b"x").unwrap();
        let mock = MockCatalog::default();

        let err = ReleaseProcessor::new(&mock)
            .process(&options(&root))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::NoEpisodes(_)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn progress_stages_in_order() {
        let tmp = TempDir::new().unwrap();
        let root = movie_release(&tmp);
        let mock = MockCatalog::default();
        let seen = Mutex::new(Vec::new());
        let observer = |e: &ProgressEvent| seen.lock().unwrap().push(e.stage);

        ReleaseProcessor::new(&mock)
            .with_observer(&observer)
            .process(&options(&root))
            .await
            .unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![Stage::Startup, Stage::Metadata, Stage::Hashing, Stage::Upload]
        );
    }

    #[tokio::test]
    async fn season_pack_progress_per_episode() {
        let tmp = TempDir::new().unwrap();
        let root = season_pack(&tmp);
        let mock = MockCatalog::default();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        ReleaseProcessor::new(&mock)
            .with_observer(&tx)
            .process(&options(&root))
            .await
            .unwrap();
        drop(tx);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        assert_eq!(events[0].stage, Stage::Startup);
        assert_eq!(events[1].stage, Stage::Metadata);
        assert_eq!(events[1].release_name, "Show.S01.1080p.WEB-GRP");
        let uploads: Vec<&str> = events
            .iter()
            .filter(|e| e.stage == Stage::Upload)
            .map(|e| e.release_name.as_str())
            .collect();
        assert_eq!(
            uploads,
            vec![
                "Show.S01E01.1080p.WEB-GRP",
                "Show.S01E02.1080p.WEB-GRP",
                "Show.S01E03.1080p.WEB-GRP",
            ]
        );
    }

    fn pack_ctx() -> RunContext {
        RunContext {
            release_name: "Show.S01.1080p.WEB-GRP".into(),
            category: Category::Tv,
            archive: None,
        }
    }

    fn episode(path: PathBuf, number: &str) -> EpisodeInfo {
        EpisodeInfo {
            video_file: VideoFile::from_path(&path),
            episode_number: format!("E{number}"),
            release_name: format!("Show.S01E{number}.1080p.WEB-GRP"),
            nfo_file: None,
        }
    }

    #[tokio::test]
    async fn episode_digest_failure_skips_only_that_episode() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("show.s01e01.mkv");
        fs::write(&good, b"ep").unwrap();
        let missing = tmp.path().join("show.s01e02.mkv");
        let mock = MockCatalog::default();
        let processor = ReleaseProcessor::new(&mock);
        let ctx = pack_ctx();

        let mut result = ProcessResult::new();
        for ep in [episode(missing, "02"), episode(good, "01")] {
            result.merge(processor.process_episode(&ctx, &ep, None, 0).await);
        }

        assert!(
            result
                .warnings
                .iter()
                .all(|w| w.release == "Show.S01E02.1080p.WEB-GRP")
        );
        let hash_warnings = result
            .warnings
            .iter()
            .filter(|w| w.kind == WarningKind::Hash)
            .count();
        assert_eq!(hash_warnings, 1);
        assert_eq!(
            uploaded_releases(&mock.calls()),
            vec!["Show.S01E01.1080p.WEB-GRP"]
        );
    }

    #[test]
    fn release_digest_failure_keeps_uploading_without_hash() {
        let tmp = TempDir::new().unwrap();
        let unreadable = tmp.path().join("movie.mkv");
        fs::create_dir(&unreadable).unwrap();
        let mut result = ProcessResult::new();

        let hash = release_hash(&unreadable, 0, "Movie.2024-GRP", &mut result);
        assert_eq!(hash, None);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::Hash);
        assert!(result.warnings[0].message.contains("failed to generate hash"));
    }

    #[test]
    fn failed_size_check_omits_hash() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("gone.mkv");
        let mut result = ProcessResult::new();

        let hash = hash_media_file(&missing, 1024, "Movie.2024-GRP", &mut result).unwrap();
        assert_eq!(hash, None);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::Hash);
        assert_eq!(result.warnings[0].release, "Movie.2024-GRP");
    }

    /// Serializes tests that change the process working directory.
    static CWD_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

    #[tokio::test]
    async fn bare_file_name_release_finds_its_nfo() {
        let _lock = CWD_LOCK.lock().await;
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Movie.2024.1080p.BluRay.x264-GRP.mkv"), b"x").unwrap();
        fs::write(tmp.path().join("Movie.2024.1080p.BluRay.x264-GRP.nfo"), b"NFO").unwrap();
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(tmp.path()).unwrap();

        let mock = MockCatalog::default();
        let outcome = ReleaseProcessor::new(&mock)
            .process(&options(Path::new("Movie.2024.1080p.BluRay.x264-GRP.mkv")))
            .await;
        std::env::set_current_dir(previous).unwrap();

        let result = outcome.unwrap();
        assert!(result.is_clean(), "{:?}", result.warnings);
        let Call::File(nfo) = &mock.calls()[0] else {
            panic!("expected NFO upload");
        };
        assert_eq!(
            nfo.original_file_name.as_deref(),
            Some("Movie.2024.1080p.BluRay.x264-GRP.nfo")
        );
        assert_eq!(nfo.release_name, "Movie.2024.1080p.BluRay.x264-GRP");
    }

    #[tokio::test]
    async fn repeated_runs_upload_again() {
        let tmp = TempDir::new().unwrap();
        let root = movie_release(&tmp);
        let mock = MockCatalog::default();
        let processor = ReleaseProcessor::new(&mock);

        processor.process(&options(&root)).await.unwrap();
        processor.process(&options(&root)).await.unwrap();
        let calls = mock.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], calls[2]);
    }
}
