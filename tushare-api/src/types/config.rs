use getset::{Getters, Setters};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default, Getters, Setters)]
pub struct Config {
    #[getset(get = "pub")]
    token: String,
    #[getset(get = "pub", set = "pub")]
    endpoint_url: Option<String>,
}

impl Config {
    /// endpoint_url 为空或空串时返回默认接口地址
    pub fn endpoint_or_default(&self) -> &str {
        match &self.endpoint_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => super::DEFAULT_ENDPOINT_URL,
        }
    }
}
