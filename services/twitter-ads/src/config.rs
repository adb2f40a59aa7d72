// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use adsign_core::{utils::Redact, Context};

use crate::constants::*;

/// Config carries all the configuration for the Twitter Ads client.
#[derive(Clone, Default)]
pub struct Config {
    /// `consumer_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TWITTER_ADS_CONSUMER_KEY`]
    pub consumer_key: Option<String>,
    /// `consumer_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TWITTER_ADS_CONSUMER_SECRET`]
    pub consumer_secret: Option<String>,
    /// `access_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TWITTER_ADS_ACCESS_TOKEN`]
    pub access_token: Option<String>,
    /// `access_token_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TWITTER_ADS_ACCESS_TOKEN_SECRET`]
    pub access_token_secret: Option<String>,
    /// `base_domain` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TWITTER_ADS_BASE_DOMAIN`]
    /// - default: [`DEFAULT_BASE_DOMAIN`]
    pub base_domain: Option<String>,
    /// `api_version` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TWITTER_ADS_API_VERSION`]
    /// - default: [`DEFAULT_API_VERSION`]
    pub api_version: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set consumer_key
    pub fn with_consumer_key(mut self, consumer_key: impl Into<String>) -> Self {
        self.consumer_key = Some(consumer_key.into());
        self
    }

    /// Set consumer_secret
    pub fn with_consumer_secret(mut self, consumer_secret: impl Into<String>) -> Self {
        self.consumer_secret = Some(consumer_secret.into());
        self
    }

    /// Set access_token
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Set access_token_secret
    pub fn with_access_token_secret(mut self, access_token_secret: impl Into<String>) -> Self {
        self.access_token_secret = Some(access_token_secret.into());
        self
    }

    /// Set base_domain
    pub fn with_base_domain(mut self, base_domain: impl Into<String>) -> Self {
        self.base_domain = Some(base_domain.into());
        self
    }

    /// Set api_version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let envs = [
            (&mut self.consumer_key, TWITTER_ADS_CONSUMER_KEY),
            (&mut self.consumer_secret, TWITTER_ADS_CONSUMER_SECRET),
            (&mut self.access_token, TWITTER_ADS_ACCESS_TOKEN),
            (&mut self.access_token_secret, TWITTER_ADS_ACCESS_TOKEN_SECRET),
            (&mut self.base_domain, TWITTER_ADS_BASE_DOMAIN),
            (&mut self.api_version, TWITTER_ADS_API_VERSION),
        ];
        for (field, key) in envs {
            if let Some(v) = ctx.env_var(key) {
                field.get_or_insert(v);
            }
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &self.consumer_key.as_ref().map(Redact::from))
            .field(
                "consumer_secret",
                &self.consumer_secret.as_ref().map(Redact::from),
            )
            .field("access_token", &self.access_token.as_ref().map(Redact::from))
            .field(
                "access_token_secret",
                &self.access_token_secret.as_ref().map(Redact::from),
            )
            .field("base_domain", &self.base_domain)
            .field("api_version", &self.api_version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adsign_core::StaticEnv;
    use std::collections::HashMap;

    #[test]
    fn test_from_env_keeps_explicit_values() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (TWITTER_ADS_CONSUMER_KEY.to_string(), "env_key".to_string()),
                (
                    TWITTER_ADS_CONSUMER_SECRET.to_string(),
                    "env_secret".to_string(),
                ),
                (TWITTER_ADS_API_VERSION.to_string(), "11".to_string()),
            ]),
        });

        let config = Config::new().with_consumer_key("explicit_key").from_env(&ctx);

        assert_eq!(config.consumer_key.as_deref(), Some("explicit_key"));
        assert_eq!(config.consumer_secret.as_deref(), Some("env_secret"));
        assert_eq!(config.api_version.as_deref(), Some("11"));
        assert_eq!(config.base_domain, None);
        assert_eq!(config.access_token, None);
    }

    #[test]
    fn test_from_os_env() {
        temp_env::with_vars(
            vec![
                (TWITTER_ADS_ACCESS_TOKEN, Some("token")),
                (TWITTER_ADS_BASE_DOMAIN, Some("example.com")),
            ],
            || {
                let ctx = Context::new().with_env(adsign_core::OsEnv);
                let config = Config::default().from_env(&ctx);

                assert_eq!(config.access_token.as_deref(), Some("token"));
                assert_eq!(config.base_domain.as_deref(), Some("example.com"));
            },
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config =
            Config::new().with_consumer_secret("kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw");
        assert!(!format!("{config:?}").contains("kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw"));
    }
}
