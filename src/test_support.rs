use crate::config::Config;
use crate::loader::PythonLoader;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;

static PYTHON_AVAILABLE: LazyLock<bool> = LazyLock::new(|| {
    let command = match Config::default().interpreter_command() {
        Ok(command) => command,
        Err(_) => return false,
    };
    Command::new(&command[0])
        .args(&command[1..])
        .arg("-c")
        .arg("import sys; sys.exit(0 if sys.version_info >= (3, 8) else 1)")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
});

/// Whether the default interpreter can run the bootstrap script.
pub(crate) fn python_available() -> bool {
    *PYTHON_AVAILABLE
}

/// Skip the current test when no Python interpreter is installed.
macro_rules! require_python {
    () => {
        if !$crate::test_support::python_available() {
            eprintln!("skipping: python3 is not available");
            return;
        }
    };
}
pub(crate) use require_python;

pub(crate) fn python_loader() -> PythonLoader {
    PythonLoader::from_config(&Config::default()).unwrap()
}

/// Write `source` to `dir/relative`, creating parent directories.
pub(crate) fn write_program(dir: &Path, relative: &str, source: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, source).unwrap();
    path
}
