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

//! Core components for composing and signing ads API requests.
//!
//! ## Overview
//!
//! - [`Request`]: one pending call. Holds scheme, domain, version, path,
//!   method, headers and the query, body and file [`Parameters`]. It
//!   produces the request url and the OAuth1 signature base string.
//! - [`Client`]: the owner of defaults (base domain, headers, signer) and
//!   of the transport used by [`Request::execute`].
//! - [`SignRequest`]: computes a signature over a request and writes it
//!   back into the query parameters.
//! - [`ProvideCredential`]: loads credentials for a signer, chained with
//!   [`ProvideCredentialChain`].
//! - [`Context`]: the environment seams ([`HttpSend`], [`Env`]).
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use adsign_core::{Client, Request, Result};
//! use bytes::Bytes;
//! use http::HeaderMap;
//!
//! #[derive(Debug, Default)]
//! struct MyClient {
//!     headers: HeaderMap,
//! }
//!
//! #[async_trait::async_trait]
//! impl Client for MyClient {
//!     fn default_base_domain(&self) -> &str {
//!         "twitter.com"
//!     }
//!
//!     fn default_headers(&self) -> &HeaderMap {
//!         &self.headers
//!     }
//!
//!     async fn send_request(&self, _: &Request) -> Result<http::Response<Bytes>> {
//!         unimplemented!()
//!     }
//! }
//!
//! let mut req = Request::new(Arc::new(MyClient::default()));
//! req.set_version("12");
//! req.set_path("/accounts");
//! req.set_query_param("count", "10");
//!
//! assert_eq!(req.url(), "https://ads-api.twitter.com/12/accounts?count=10");
//! ```
//!
//! ## Utilities
//!
//! - [`encoding`]: form and RFC 3986 encoders, canonical query builders
//! - [`hash`]: HMAC digests used by signers
//! - [`time`]: timestamps
//! - [`utils`]: data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod encoding;
pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod api;
pub use api::{
    ApiRequest, Client, ProvideCredential, SignRequest, SigningCredential,
    DEFAULT_LAST_LEVEL_DOMAIN,
};

mod chain;
pub use chain::ProvideCredentialChain;

mod parameters;
pub use parameters::{ParamValue, Parameters};

mod request;
pub use request::{Request, OAUTH_SIGNATURE};
