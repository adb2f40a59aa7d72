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

//! Request composition and OAuth1 signing for the Twitter Ads API.
//!
//! ```no_run
//! use adsign_core::{Context, OsEnv};
//! use adsign_http_send_reqwest::ReqwestHttpSend;
//! use adsign_twitter_ads::{DefaultCredentialProvider, OAuthSigner, TwitterAdsClient};
//! use http::Method;
//!
//! # async fn example() -> adsign_core::Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//!
//! let signer = OAuthSigner::load(&ctx, &DefaultCredentialProvider::new()).await?;
//! let client = TwitterAdsClient::new(ctx).with_signer(signer);
//!
//! let mut req = client.request(Method::GET, "/accounts");
//! req.set_query_param("count", "10");
//! let resp = req.execute().await?;
//! println!("{}", String::from_utf8_lossy(resp.body()));
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::*;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{OAuthSigner, SignatureMethod};

mod client;
pub use client::TwitterAdsClient;

mod multipart;

mod provide_credential;
pub use provide_credential::*;
