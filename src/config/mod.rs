use std::env;
use std::path::PathBuf;

const DEFAULT_STORE_FILE: &str = "employees.txt";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Durable store, relative to the working directory unless absolute.
    pub project_file: PathBuf,
    /// Scratch store used when `project_file` cannot be written.
    pub tmp_file: PathBuf,
    pub bind_address: String,
}

impl Config {
    pub fn from_env() -> Self {
        let project_file = env::var("EMPLOYEES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_FILE));
        let project_file = if project_file.is_absolute() {
            project_file
        } else {
            env::current_dir()
                .map(|cwd| cwd.join(&project_file))
                .unwrap_or(project_file)
        };

        let tmp_file = env::var("EMPLOYEES_TMP_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join(DEFAULT_STORE_FILE));

        let bind_address = env::var("BIND_ADDRESS")
            .ok()
            .filter(|addr| !addr.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        Config {
            project_file,
            tmp_file,
            bind_address,
        }
    }
}
