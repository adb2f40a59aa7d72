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

use crate::{constants::*, Credential};
use adsign_core::{Context, ProvideCredential, Result};
use async_trait::async_trait;

/// EnvCredentialProvider loads OAuth1 credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `TWITTER_ADS_CONSUMER_KEY`: The consumer key
/// - `TWITTER_ADS_CONSUMER_SECRET`: The consumer secret
/// - `TWITTER_ADS_ACCESS_TOKEN`: The access token (optional)
/// - `TWITTER_ADS_ACCESS_TOKEN_SECRET`: The access token secret (optional)
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let consumer_key = envs.get(TWITTER_ADS_CONSUMER_KEY);
        let consumer_secret = envs.get(TWITTER_ADS_CONSUMER_SECRET);

        match (consumer_key, consumer_secret) {
            (Some(ck), Some(cs)) => Ok(Some(Credential {
                consumer_key: ck.clone(),
                consumer_secret: cs.clone(),
                access_token: envs.get(TWITTER_ADS_ACCESS_TOKEN).cloned(),
                access_token_secret: envs.get(TWITTER_ADS_ACCESS_TOKEN_SECRET).cloned(),
            })),
            _ => Ok(None),
        }
    }
}
