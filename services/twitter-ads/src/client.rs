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

use std::sync::Arc;

use adsign_core::encoding::build_form_query;
use adsign_core::{Client, Context, Error, Request, Result, SignRequest};
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use log::debug;

use crate::config::Config;
use crate::constants::*;
use crate::multipart;

/// TwitterAdsClient creates requests against the ads API and executes them.
///
/// Every request created by [`TwitterAdsClient::request`] inherits the
/// client's base domain, API version, default headers and signer. When a
/// signer is attached, [`Client::send_request`] signs a copy of the request
/// with fresh protocol parameters right before it goes out.
#[derive(Debug, Clone)]
pub struct TwitterAdsClient {
    ctx: Context,
    base_domain: String,
    api_version: String,
    headers: HeaderMap,
    signer: Option<Arc<dyn SignRequest>>,
}

impl TwitterAdsClient {
    /// Create a client with default domain, version and headers.
    pub fn new(ctx: Context) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("adsign/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            ctx,
            base_domain: DEFAULT_BASE_DOMAIN.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            headers,
            signer: None,
        }
    }

    /// Create a client from config, with values missing from the config
    /// filled from the environment.
    pub fn from_config(ctx: Context, config: &Config) -> Result<Self> {
        let config = config.clone().from_env(&ctx);
        let mut client = Self::new(ctx);

        if let Some(base_domain) = config.base_domain {
            if base_domain.is_empty() || base_domain.contains('/') {
                return Err(Error::config_invalid(format!(
                    "base domain {base_domain:?} is not a valid domain"
                )));
            }
            client.base_domain = base_domain;
        }
        if let Some(api_version) = config.api_version {
            if api_version.is_empty() || api_version.contains('/') {
                return Err(Error::config_invalid(format!(
                    "api version {api_version:?} is not a valid path segment"
                )));
            }
            client.api_version = api_version;
        }

        Ok(client)
    }

    /// Set the base domain.
    pub fn with_base_domain(mut self, base_domain: impl Into<String>) -> Self {
        self.base_domain = base_domain.into();
        self
    }

    /// Set the API version segment.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Add a default header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach a signer to every request created from now on.
    pub fn with_signer(mut self, signer: impl SignRequest) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    /// Get the API version segment.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Create a request for `method` and `path` bound to this client.
    pub fn request(&self, method: Method, path: &str) -> Request {
        let mut req = Request::new(Arc::new(self.clone()));
        req.set_method(method);
        req.set_version(&self.api_version);
        req.set_path(path);
        req
    }
}

#[async_trait]
impl Client for TwitterAdsClient {
    fn default_base_domain(&self) -> &str {
        &self.base_domain
    }

    fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn signer(&self) -> Option<Arc<dyn SignRequest>> {
        self.signer.clone()
    }

    async fn send_request(&self, req: &Request) -> Result<http::Response<Bytes>> {
        let mut req = req.create_clone();
        if req.signer().is_some() {
            req.sign()?;
        }

        let http_req = build_http_request(&req)?;
        debug!("sending request: {} {}", http_req.method(), http_req.uri());

        let resp = self.ctx.http_send(http_req).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::request_failed(format!(
                "{} {} responded with {}: {}",
                req.method(),
                req.url(),
                status,
                String::from_utf8_lossy(resp.body())
            )));
        }

        Ok(resp)
    }
}

/// Convert a composed request into an `http::Request`.
///
/// - file parameters present: `multipart/form-data` with body parameters as text parts
/// - body parameters only: `application/x-www-form-urlencoded`
/// - otherwise: empty body
fn build_http_request(req: &Request) -> Result<http::Request<Bytes>> {
    let mut headers = req.headers().clone();

    let body = if !req.file_params().is_empty() {
        let boundary = multipart::boundary();
        headers.insert(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}").parse()?,
        );
        multipart::encode(&boundary, req.body_params(), req.file_params())
    } else if !req.body_params().is_empty() {
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        Bytes::from(build_form_query(req.body_params().export()))
    } else {
        Bytes::new()
    };

    let mut http_req = http::Request::builder()
        .method(req.method().clone())
        .uri(req.url())
        .body(body)?;
    *http_req.headers_mut() = headers;

    Ok(http_req)
}
