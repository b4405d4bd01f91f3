pub const ENDPOINT_VAR: &str = "AWS_ENDPOINT";
pub const REGION_VAR: &str = "AWS_REGION";
pub const DEFAULT_REGION_VAR: &str = "AWS_DEFAULT_REGION";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:4566";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Connection parameters for the compute backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub endpoint: String,
    pub region: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl BackendConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> BackendConfig {
        BackendConfig::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration through `lookup`. Empty values count as unset.
    ///
    /// The region falls back from `AWS_REGION` to `AWS_DEFAULT_REGION` before
    /// the hard-coded default.
    pub fn from_lookup<F>(lookup: F) -> BackendConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        BackendConfig {
            endpoint: get(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            region: get(REGION_VAR)
                .or_else(|| get(DEFAULT_REGION_VAR))
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        }
    }
}
