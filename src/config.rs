use crate::error::AppError;
use std::env;
use std::path::PathBuf;

const DEFAULT_DATA_PATH: &str = "data/ufc_fights.csv";
const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub recent_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let data_path = env::var("UFC_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH));

        let recent_limit = match env::var("UFC_RECENT_LIMIT") {
            Ok(raw) => raw.parse::<usize>().map_err(|_| {
                AppError::ConfigError(format!(
                    "UFC_RECENT_LIMIT must be a whole number, got '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_RECENT_LIMIT,
        };

        Ok(Config {
            data_path,
            recent_limit,
        })
    }
}
