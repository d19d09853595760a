pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Load typed input from `--input`, falling back to piped stdin.
///
/// Returns `None` when neither source supplied anything.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_input(path)?));
    }
    match stdin::read_stdin()? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Load the raw request body from `--input` or piped stdin.
pub fn load_raw(path: Option<&str>) -> Result<Option<String>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Some(file::read_raw(path)?)),
        None => stdin::read_stdin(),
    }
}
