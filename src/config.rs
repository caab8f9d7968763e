use std::{env, net::SocketAddr, path::PathBuf};

use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub data_root: PathBuf,
    pub countries_url: Url,
    pub ai_base_url: Url,
    pub ai_api_key: String,
    pub ai_model: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let data_root = env::var("DATA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let countries_url = env::var("COUNTRIES_URL")
            .unwrap_or_else(|_| "https://restcountries.com/v3.1/all".to_string());
        let countries_url = Url::parse(&countries_url)
            .map_err(|err| AppError::Config(format!("invalid COUNTRIES_URL: {err}")))?;

        let ai_base_url =
            env::var("AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let ai_base_url = Url::parse(&ai_base_url)
            .map_err(|err| AppError::Config(format!("invalid AI_BASE_URL: {err}")))?;

        let ai_api_key = env::var("AI_API_KEY").unwrap_or_default();
        let ai_model = env::var("AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Ok(Self {
            listen_addr,
            data_root,
            countries_url,
            ai_base_url,
            ai_api_key,
            ai_model,
        })
    }
}
