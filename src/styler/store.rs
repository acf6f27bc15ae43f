//! 风格目录缓存
//!
//! 用户可以在风格目录中放置同名 JSON 文件覆盖内置目录,
//! 文件修改后下次加载即生效.

use std::{
    collections::HashMap,
    env,
    ffi::{OsStr, OsString},
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, OnceLock},
    time::SystemTime,
};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    error::Error,
    styler::{catalog::StyleCatalog, pack::StylePack},
};

/// 风格目录路径的环境变量
pub const STYLES_DIR_ENV: &str = "PROMPT_STYLER_DIR";
/// 默认风格目录, 相对于 ComfyUI 运行目录
pub const DEFAULT_STYLES_DIR: &str = "custom_styles";

// 全局目录缓存实例
static CATALOG_STORE: OnceLock<Mutex<CatalogStore>> = OnceLock::new();

// 磁盘目录缓存项
#[derive(Debug, Clone)]
struct CacheEntry {
    catalog: Arc<StyleCatalog>,
    /// 文件修改时间
    mtime: SystemTime,
}

/// 风格目录缓存
#[derive(Debug)]
pub struct CatalogStore {
    styles_dir: PathBuf,
    disk: HashMap<PathBuf, CacheEntry>,
    bundled: HashMap<&'static str, Arc<StyleCatalog>>,
}

impl CatalogStore {
    pub fn new(styles_dir: impl Into<PathBuf>) -> Self {
        Self {
            styles_dir: styles_dir.into(),
            disk: HashMap::new(),
            bundled: HashMap::new(),
        }
    }

    /// 从环境变量读取风格目录
    pub fn from_env() -> Self {
        Self::new(resolve_styles_dir(
            env::var_os(STYLES_DIR_ENV),
            env::current_dir().ok(),
        ))
    }

    /// 全局实例
    pub fn global() -> Result<MutexGuard<'static, CatalogStore>, Error> {
        let store = CATALOG_STORE.get_or_init(|| {
            let store = CatalogStore::from_env();
            info!("prompt styler styles dir: {}", store.styles_dir().display());
            match store.list_files() {
                Ok(files) if files.is_empty() => {}
                Ok(files) => {
                    for file in files {
                        info!("style catalog override: {}", file.display());
                    }
                }
                Err(e) => warn!("list styles dir failed, {e}"),
            }
            Mutex::new(store)
        });
        store.lock().map_err(|e| Error::LockError(e.to_string()))
    }

    pub fn styles_dir(&self) -> &Path {
        &self.styles_dir
    }

    /// 加载风格包目录
    ///
    /// 风格目录中存在同名文件时优先使用
    pub fn load(&mut self, pack: StylePack) -> Result<Arc<StyleCatalog>, Error> {
        let path = self.styles_dir.join(pack.file_name());
        if path.is_file() {
            return self.load_from_disk(path);
        }
        self.load_bundled(pack)
    }

    fn load_from_disk(&mut self, path: PathBuf) -> Result<Arc<StyleCatalog>, Error> {
        let mtime = fs::metadata(&path)?.modified()?;
        if let Some(entry) = self.disk.get(&path) {
            if entry.mtime == mtime {
                return Ok(entry.catalog.clone());
            }
        }

        debug!("load style catalog: {}", path.display());
        let catalog = Arc::new(StyleCatalog::from_file(&path)?);
        self.disk.insert(
            path,
            CacheEntry {
                catalog: catalog.clone(),
                mtime,
            },
        );
        Ok(catalog)
    }

    fn load_bundled(&mut self, pack: StylePack) -> Result<Arc<StyleCatalog>, Error> {
        if let Some(catalog) = self.bundled.get(pack.file_name()) {
            return Ok(catalog.clone());
        }

        let catalog = Arc::new(StyleCatalog::from_json_str(pack.bundled())?);
        self.bundled.insert(pack.file_name(), catalog.clone());
        Ok(catalog)
    }

    /// 风格目录中的 JSON 文件
    pub fn list_files(&self) -> Result<Vec<PathBuf>, Error> {
        if !self.styles_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.styles_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension() == Some(OsStr::new("json")) {
                files.push(path.to_path_buf());
            }
        }
        Ok(files)
    }
}

/// 风格目录: 环境变量非空时使用其值, 否则为运行目录下的 `custom_styles`
fn resolve_styles_dir(env_value: Option<OsString>, cwd: Option<PathBuf>) -> PathBuf {
    match env_value {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => cwd
            .map(|dir| dir.join(DEFAULT_STYLES_DIR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STYLES_DIR)),
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io::Write, time::Duration};

    use super::*;

    fn write_catalog(path: &Path, text: &str) -> anyhow::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    #[test]
    fn test_load_bundled() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = CatalogStore::new(dir.path());

        let catalog = store.load(StylePack::Original)?;
        assert!(catalog.style_names().contains(&"base".to_string()));

        // 共用文件的风格包共用缓存
        let nordic = store.load(StylePack::ContemporaryNordicArt)?;
        let icelandic = store.load(StylePack::IcelandicContemporaryArt)?;
        assert!(Arc::ptr_eq(&nordic, &icelandic));
        Ok(())
    }

    #[test]
    fn test_load_override() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(StylePack::Horror.file_name());
        write_catalog(
            &path,
            r#"[{"name": "custom", "prompt": "custom {prompt}", "negative_prompt": "bright"}]"#,
        )?;

        let mut store = CatalogStore::new(dir.path());
        let catalog = store.load(StylePack::Horror)?;
        assert_eq!(catalog.style_names(), vec!["custom"]);

        // 未修改时使用缓存
        let cached = store.load(StylePack::Horror)?;
        assert!(Arc::ptr_eq(&catalog, &cached));

        // 其他风格包仍使用内置目录
        let misc = store.load(StylePack::Misc)?;
        assert!(!misc.style_names().contains(&"custom".to_string()));
        Ok(())
    }

    #[test]
    fn test_reload_on_modification() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(StylePack::Mood.file_name());
        write_catalog(&path, r#"[{"name": "first", "prompt": "{prompt}"}]"#)?;

        let mut store = CatalogStore::new(dir.path());
        assert_eq!(store.load(StylePack::Mood)?.style_names(), vec!["first"]);

        write_catalog(&path, r#"[{"name": "second", "prompt": "{prompt}"}]"#)?;
        let file = File::options().write(true).open(&path)?;
        file.set_modified(SystemTime::now() + Duration::from_secs(10))?;

        assert_eq!(store.load(StylePack::Mood)?.style_names(), vec!["second"]);
        Ok(())
    }

    #[test]
    fn test_invalid_override() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(StylePack::Mood.file_name());
        write_catalog(&path, r#"{"name": "first"}"#)?;

        let mut store = CatalogStore::new(dir.path());
        assert!(matches!(
            store.load(StylePack::Mood),
            Err(Error::InvalidCatalog(_))
        ));
        Ok(())
    }

    #[test]
    fn test_list_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        write_catalog(&dir.path().join("b.json"), "[]")?;
        write_catalog(&dir.path().join("a.json"), "[]")?;
        write_catalog(&dir.path().join("notes.txt"), "")?;

        let store = CatalogStore::new(dir.path());
        let files = store.list_files()?;
        let names: Vec<_> = files
            .iter()
            .filter_map(|path| path.file_name())
            .filter_map(|name| name.to_str())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);

        let missing = CatalogStore::new(dir.path().join("missing"));
        assert!(missing.list_files()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_resolve_styles_dir() -> anyhow::Result<()> {
        let cwd = PathBuf::from("/opt/ComfyUI");
        assert_eq!(
            resolve_styles_dir(Some(OsString::from("/data/styles")), Some(cwd.clone())),
            PathBuf::from("/data/styles")
        );

        // 空值与未设置相同
        assert_eq!(
            resolve_styles_dir(Some(OsString::new()), Some(cwd.clone())),
            cwd.join(DEFAULT_STYLES_DIR)
        );
        assert_eq!(
            resolve_styles_dir(None, Some(cwd.clone())),
            cwd.join(DEFAULT_STYLES_DIR)
        );

        // 无法获取运行目录时使用相对路径
        assert_eq!(
            resolve_styles_dir(None, None),
            PathBuf::from(DEFAULT_STYLES_DIR)
        );
        Ok(())
    }
}
