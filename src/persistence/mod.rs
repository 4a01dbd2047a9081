use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    info,
    warn,
};

use crate::core::DeckError;

const APP_NAME: &str = "hanzideck";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), DeckError> {
    save_json_at(data, &get_data_file_path(filename))
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    load_json_or_default_at(&get_data_file_path(filename))
}

fn save_json_at<T: Serialize>(data: &T, file_path: &Path) -> Result<(), DeckError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(file_path, json)?;
    info!("Data saved to: {}", file_path.display());
    Ok(())
}

fn load_json_at<T: for<'de> Deserialize<'de> + Default>(file_path: &Path) -> Result<T, DeckError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    info!("Data loaded from: {}", file_path.display());
    Ok(data)
}

fn load_json_or_default_at<T: for<'de> Deserialize<'de> + Default>(file_path: &Path) -> T {
    match load_json_at::<T>(file_path) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults.", file_path.display(), e);
            T::default()
        }
    }
}
