use std::path::{Path, PathBuf};

/// The slice of process and filesystem state that credential discovery reads.
pub trait HostEnvironment {
    /// Value of an environment variable, if set and valid unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Operating system name, spelled `Linux`, `Windows`, `Darwin`, ...
    fn platform(&self) -> String;

    fn home_dir(&self) -> Option<PathBuf>;

    /// Name of the user running the process.
    fn login_name(&self) -> Option<String>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn can_read(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// [`HostEnvironment`] backed by the real process environment and filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEnvironment;

impl HostEnvironment for OsEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn platform(&self) -> String {
        platform_name(std::env::consts::OS)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn login_name(&self) -> Option<String> {
        self.var("USERNAME")
            .or_else(|| self.var("USER"))
            .or_else(|| self.var("LOGNAME"))
            .filter(|name| !name.is_empty())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn can_read(&self, path: &Path) -> bool {
        std::fs::File::open(path).is_ok()
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

fn platform_name(os: &str) -> String {
    match os {
        "linux" => "Linux".to_string(),
        "windows" => "Windows".to_string(),
        "macos" => "Darwin".to_string(),
        other => other.to_string(),
    }
}
