use std::env;
use std::str::FromStr;

use crate::types::error::AppError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessPolicyKind {
    #[default]
    AllowAll,
    SharedSecret,
}

impl FromStr for AccessPolicyKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow_all" | "allow-all" => Ok(Self::AllowAll),
            "shared_secret" | "shared-secret" => Ok(Self::SharedSecret),
            other => Err(AppError::Config(format!("unknown ACCESS_POLICY `{}`", other))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub db_url: String,
    pub access_policy: AccessPolicyKind,
    pub app_password: Option<String>,
}

impl EnvConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let db_url = get("DATABASE_URL")
            .ok_or_else(|| AppError::Config("environment variable DATABASE_URL not set".into()))?;

        let access_policy = match get("ACCESS_POLICY") {
            Some(raw) => raw.parse()?,
            None => AccessPolicyKind::default(),
        };

        let app_password = get("APP_PASSWORD");
        if access_policy == AccessPolicyKind::SharedSecret && app_password.is_none() {
            return Err(AppError::Config(
                "ACCESS_POLICY=shared_secret needs APP_PASSWORD".into(),
            ));
        }

        Ok(EnvConfig { db_url, access_policy, app_password })
    }
}
