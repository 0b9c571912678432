//! Fakes and a wired harness shared by the integration tests.
#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use cs_app::{App, AppDeps};
use cs_core::clipboard::{ClipboardImage, ClipboardOffer, SourceApp};
use cs_core::ports::{
    ClipboardHistoryRepositoryPort, ClockPort, ImageBlobStorePort, PlatformClipboardPort,
    SkipNextChangePort, SourceAppPort,
};
use cs_infra::clipboard::InMemorySkipNextChange;
use cs_infra::db::mappers::ClipboardEntryRowMapper;
use cs_infra::db::pool::init_db_pool;
use cs_infra::db::repositories::DieselClipboardHistoryRepository;
use cs_infra::db::DieselSqliteExecutor;
use cs_infra::fs::FsImageBlobStore;
use cs_infra::settings::FileSettingsRepository;
use cs_infra::thumbnail::{ThumbnailCache, WebpThumbnailGenerator};
use tempfile::TempDir;

pub const DAY_MS: i64 = 86_400_000;
/// 2024-06-15T12:00:00Z
pub const NOW_MS: i64 = 1_718_452_800_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Written {
    Text(String),
    Image(Vec<u8>),
    File(PathBuf),
}

#[derive(Default)]
struct ClipboardState {
    change_count: i64,
    text: Option<String>,
    image: Option<Vec<u8>>,
    files: Vec<PathBuf>,
    /// A file URL is advertised but does not parse to a local path.
    unresolved_file_url: bool,
    counter_fails: bool,
    writes_fail: bool,
    written: Vec<Written>,
}

/// In-memory clipboard whose counter moves on every write, like the real one.
#[derive(Default)]
pub struct FakeClipboard {
    state: Mutex<ClipboardState>,
}

impl FakeClipboard {
    fn replace(&self, text: Option<String>, image: Option<Vec<u8>>, files: Vec<PathBuf>) {
        let mut state = self.state.lock().unwrap();
        state.text = text;
        state.image = image;
        state.files = files;
        state.unresolved_file_url = false;
        state.change_count += 1;
    }

    pub fn copy_text(&self, text: &str) {
        self.replace(Some(text.to_string()), None, Vec::new());
    }

    pub fn copy_image(&self, png: Vec<u8>) {
        self.replace(None, Some(png), Vec::new());
    }

    pub fn copy_image_with_text(&self, png: Vec<u8>, text: &str) {
        self.replace(Some(text.to_string()), Some(png), Vec::new());
    }

    pub fn copy_file(&self, path: &Path) {
        self.replace(
            Some(path.display().to_string()),
            None,
            vec![path.to_path_buf()],
        );
    }

    /// A remote or relative URI next to `text`, like a browser link drag.
    pub fn copy_unresolvable_file_url(&self, text: Option<&str>, png: Option<Vec<u8>>) {
        self.replace(text.map(str::to_string), png, Vec::new());
        self.state.lock().unwrap().unresolved_file_url = true;
    }

    pub fn fail_counter(&self, fail: bool) {
        self.state.lock().unwrap().counter_fails = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().writes_fail = fail;
    }

    pub fn written(&self) -> Vec<Written> {
        self.state.lock().unwrap().written.clone()
    }

    fn write(&self, written: Written) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.writes_fail {
            bail!("pasteboard refused write");
        }
        state.written.push(written);
        state.change_count += 1;
        Ok(())
    }
}

impl PlatformClipboardPort for FakeClipboard {
    fn change_count(&self) -> Result<i64> {
        let state = self.state.lock().unwrap();
        if state.counter_fails {
            bail!("pasteboard unavailable");
        }
        Ok(state.change_count)
    }

    fn offer(&self) -> Result<ClipboardOffer> {
        let state = self.state.lock().unwrap();
        Ok(ClipboardOffer {
            has_file_url: !state.files.is_empty() || state.unresolved_file_url,
            has_image: state.image.is_some(),
            has_text: state.text.is_some(),
        })
    }

    fn read_text(&self) -> Result<Option<String>> {
        Ok(self.state.lock().unwrap().text.clone())
    }

    fn read_image(&self) -> Result<Option<ClipboardImage>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .image
            .clone()
            .map(ClipboardImage::new))
    }

    fn read_file_urls(&self) -> Result<Vec<PathBuf>> {
        Ok(self.state.lock().unwrap().files.clone())
    }

    fn write_text(&self, text: &str) -> Result<()> {
        self.write(Written::Text(text.to_string()))
    }

    fn write_image(&self, png_bytes: &[u8]) -> Result<()> {
        self.write(Written::Image(png_bytes.to_vec()))
    }

    fn write_file_url(&self, path: &Path) -> Result<()> {
        self.write(Written::File(path.to_path_buf()))
    }
}

#[derive(Default)]
pub struct FakeSourceApp {
    app: Mutex<Option<SourceApp>>,
}

impl FakeSourceApp {
    pub fn set(&self, app: Option<SourceApp>) {
        *self.app.lock().unwrap() = app;
    }
}

impl SourceAppPort for FakeSourceApp {
    fn frontmost_app(&self) -> Option<SourceApp> {
        self.app.lock().unwrap().clone()
    }
}

pub struct FixedClock {
    now_ms: AtomicI64,
}

impl FixedClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, by_ms: i64) {
        self.now_ms.fetch_add(by_ms, Ordering::SeqCst);
    }
}

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

pub fn in_memory_repo() -> Arc<dyn ClipboardHistoryRepositoryPort> {
    let pool = init_db_pool(":memory:").expect("Failed to create test DB pool");
    Arc::new(DieselClipboardHistoryRepository::new(
        DieselSqliteExecutor::new(pool),
        ClipboardEntryRowMapper,
        ClipboardEntryRowMapper,
    ))
}

pub fn blob_store(dir: &Path) -> Arc<FsImageBlobStore> {
    Arc::new(FsImageBlobStore::new(
        dir,
        Arc::new(WebpThumbnailGenerator::new()),
        ThumbnailCache::new(32, 4 * 1024 * 1024),
    ))
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// PNG of deterministic noise, which deflate barely shrinks.
pub fn noise_png(width: u32, height: u32) -> Vec<u8> {
    let mut seed: u32 = 0x2545_f491;
    let image = image::RgbaImage::from_fn(width, height, |_, _| {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let [r, g, b, _] = seed.to_le_bytes();
        image::Rgba([r, g, b, 255])
    });
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// Fully wired application over fakes and real storage in a temp dir.
pub struct Harness {
    pub dir: TempDir,
    pub clipboard: Arc<FakeClipboard>,
    pub source_app: Arc<FakeSourceApp>,
    pub clock: Arc<FixedClock>,
    pub skip_next: Arc<InMemorySkipNextChange>,
    pub blobs: Arc<FsImageBlobStore>,
    pub app: App,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_repo(in_memory_repo()).await
    }

    pub async fn with_repo(repo: Arc<dyn ClipboardHistoryRepositoryPort>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = Arc::new(FakeClipboard::default());
        let source_app = Arc::new(FakeSourceApp::default());
        let clock = Arc::new(FixedClock::new(NOW_MS));
        let skip_next = Arc::new(InMemorySkipNextChange::new());
        let blobs = blob_store(dir.path());

        let deps = AppDeps {
            clipboard: clipboard.clone(),
            source_app: source_app.clone(),
            skip_next: skip_next.clone() as Arc<dyn SkipNextChangePort>,
            history_repo: repo,
            blob_store: blobs.clone() as Arc<dyn ImageBlobStorePort>,
            settings: Arc::new(FileSettingsRepository::new(dir.path().join("settings.json"))),
            clock: clock.clone(),
        };
        let app = App::start(deps).await.expect("app start");

        Self {
            dir,
            clipboard,
            source_app,
            clock,
            skip_next,
            blobs,
            app,
        }
    }

    pub fn image_count(&self) -> usize {
        std::fs::read_dir(self.blobs.dir())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}
