use std::path::{ Path, PathBuf };

const DEFAULT_STORE_FILE_PATH: &str = ".recipe-book/store.json";

/// Settings read from the environment (and `.env`, through dotenv).
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub store_file_path: PathBuf,
    pub strings_xml_file_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let store_file_path = dotenv::var("STORE_FILE_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_FILE_PATH.to_string());
        let strings_xml_file_path = dotenv::var("STRINGS_XML_FILE_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty());
        AppConfig {
            store_file_path: resolve_home_relative(&store_file_path),
            strings_xml_file_path: strings_xml_file_path.map(|path| resolve_home_relative(&path)),
        }
    }
}

/// Relative paths live under the home directory, or the working directory when there is none.
pub fn resolve_home_relative(configured: &str) -> PathBuf {
    let path = Path::new(configured.trim());
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match dirs::home_dir() {
        Some(home_dir) => home_dir.join(path),
        None => path.to_path_buf(),
    }
}
