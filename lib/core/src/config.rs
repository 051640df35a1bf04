use url::Url;

use agora_utils::errors::AppError;

pub const DATA_SERVICE_URL_ENV: &str = "AGORA_DATA_SERVICE_URL";
pub const DATA_SERVICE_KEY_ENV: &str = "AGORA_DATA_SERVICE_KEY";
pub const REST_API_PATH: &str = "rest/v1/";
pub const AUTH_API_PATH: &str = "auth/v1/";

/// Location and public key of the backend data service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataServiceConfig {
    base_url: Url,
    api_key: String,
}

impl DataServiceConfig {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AppError> {
        Self::from_values(Some(base_url), Some(api_key))
    }

    /// Configuration captured from the build environment, the browser has no process environment to read at runtime.
    pub fn from_build_env() -> Result<Self, AppError> {
        Self::from_values(option_env!("AGORA_DATA_SERVICE_URL"), option_env!("AGORA_DATA_SERVICE_KEY"))
    }

    pub fn from_values(base_url: Option<&str>, api_key: Option<&str>) -> Result<Self, AppError> {
        let base_url = base_url
            .map(str::trim)
            .filter(|base_url| !base_url.is_empty())
            .ok_or_else(|| AppError::MissingConfiguration(String::from(DATA_SERVICE_URL_ENV)))?;
        let api_key = api_key
            .map(str::trim)
            .filter(|api_key| !api_key.is_empty())
            .ok_or_else(|| AppError::MissingConfiguration(String::from(DATA_SERVICE_KEY_ENV)))?;

        // relative joins only keep the last path segment when the base ends with a slash
        let base_url = match base_url.ends_with('/') {
            true => Url::parse(base_url)?,
            false => Url::parse(&format!("{base_url}/"))?,
        };
        if base_url.cannot_be_a_base() {
            return Err(AppError::InvalidInput(format!("Invalid data service url: {base_url}")));
        }

        Ok(DataServiceConfig {
            base_url,
            api_key: String::from(api_key),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Url of the REST endpoint of `table`
    pub fn rest_url(&self, table: &str) -> Result<Url, AppError> {
        Ok(self.base_url.join(REST_API_PATH)?.join(table)?)
    }

    /// Url of the authentication endpoint `path`
    pub fn auth_url(&self, path: &str) -> Result<Url, AppError> {
        Ok(self.base_url.join(AUTH_API_PATH)?.join(path)?)
    }
}
