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

use std::borrow::Cow;
use std::sync::Arc;

use bytes::Bytes;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use log::debug;

use crate::encoding::{build_form_query, build_http_query, signature_base_string};
use crate::{ApiRequest, Client, Error, ParamValue, Parameters, Result, SignRequest};

/// Query key holding the OAuth1 signature.
pub const OAUTH_SIGNATURE: &str = "oauth_signature";

static EMPTY_PARAMETERS: Parameters = Parameters::new();

/// Request is one pending call to the ads API.
///
/// A request is bound to the [`Client`] it was created from. The client
/// supplies the default domain and headers; both are resolved when read
/// and only copied into the request once they are mutated.
///
/// ```text
/// url = scheme "://" domain "/" version path ["?" | "&"] query
/// ```
///
/// Cloning (see [`Request::create_clone`]) deep copies the query, body and
/// file parameters and the headers. The client and the signer are shared.
#[derive(Debug, Clone)]
pub struct Request {
    client: Arc<dyn Client>,
    signer: Option<Arc<dyn SignRequest>>,

    headers: Option<HeaderMap>,
    method: Method,
    scheme: Scheme,
    domain: Option<String>,
    path: String,
    version: String,

    query_params: Option<Parameters>,
    body_params: Option<Parameters>,
    file_params: Option<Parameters>,
}

impl Request {
    /// Create a `GET` request over https bound to `client`.
    ///
    /// The client's signer, if any, is attached to the request.
    pub fn new(client: Arc<dyn Client>) -> Self {
        Self {
            signer: client.signer(),
            client,

            headers: None,
            method: Method::GET,
            scheme: Scheme::HTTPS,
            domain: None,
            path: String::new(),
            version: String::new(),

            query_params: None,
            body_params: None,
            file_params: None,
        }
    }

    /// The client this request was created from.
    pub fn client(&self) -> &Arc<dyn Client> {
        &self.client
    }

    /// The attached signer.
    pub fn signer(&self) -> Option<&Arc<dyn SignRequest>> {
        self.signer.as_ref()
    }

    /// Attach a signer, replacing the one inherited from the client.
    pub fn set_signer(&mut self, signer: Arc<dyn SignRequest>) {
        self.signer = Some(signer);
    }

    /// Get the scheme, `https` by default.
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Set the scheme.
    pub fn set_scheme(&mut self, scheme: Scheme) {
        self.scheme = scheme;
    }

    /// Get the domain.
    ///
    /// Falls back to `<last level domain>.<base domain>` of the client as
    /// long as no domain has been set explicitly.
    pub fn domain(&self) -> Cow<'_, str> {
        match &self.domain {
            Some(domain) => Cow::Borrowed(domain),
            None => Cow::Owned(format!(
                "{}.{}",
                self.client.default_last_level_domain(),
                self.client.default_base_domain()
            )),
        }
    }

    /// Set the domain.
    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = Some(domain.into());
    }

    /// Set the domain to `<last_level_domain>.<base domain>` of the client.
    pub fn set_last_level_domain(&mut self, last_level_domain: &str) {
        self.domain = Some(format!(
            "{last_level_domain}.{}",
            self.client.default_base_domain()
        ));
    }

    /// Get the headers, which are the client defaults until first mutated.
    pub fn headers(&self) -> &HeaderMap {
        match &self.headers {
            Some(headers) => headers,
            None => self.client.default_headers(),
        }
    }

    /// Get the headers for mutation.
    ///
    /// The client defaults are copied on first call, so changes never leak
    /// into other requests.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        self.headers
            .get_or_insert_with(|| self.client.default_headers().clone())
    }

    /// Replace the headers.
    pub fn set_headers(&mut self, headers: HeaderMap) {
        self.headers = Some(headers);
    }

    /// Get the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Set the HTTP method.
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Get the path, like `/accounts`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Set the path.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Get the API version segment.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Set the API version segment.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    /// Get the query parameters.
    pub fn query_params(&self) -> &Parameters {
        self.query_params.as_ref().unwrap_or(&EMPTY_PARAMETERS)
    }

    /// Get the query parameters for mutation.
    pub fn query_params_mut(&mut self) -> &mut Parameters {
        self.query_params.get_or_insert_with(Parameters::new)
    }

    /// Replace the query parameters.
    pub fn set_query_params(&mut self, params: Parameters) {
        self.query_params = Some(params);
    }

    /// Set one query parameter.
    pub fn set_query_param(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.query_params_mut().set(key, value);
    }

    /// Get the body parameters.
    pub fn body_params(&self) -> &Parameters {
        self.body_params.as_ref().unwrap_or(&EMPTY_PARAMETERS)
    }

    /// Get the body parameters for mutation.
    pub fn body_params_mut(&mut self) -> &mut Parameters {
        self.body_params.get_or_insert_with(Parameters::new)
    }

    /// Replace the body parameters.
    pub fn set_body_params(&mut self, params: Parameters) {
        self.body_params = Some(params);
    }

    /// Set one body parameter.
    pub fn set_body_param(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.body_params_mut().set(key, value);
    }

    /// Get the file parameters.
    pub fn file_params(&self) -> &Parameters {
        self.file_params.as_ref().unwrap_or(&EMPTY_PARAMETERS)
    }

    /// Get the file parameters for mutation.
    pub fn file_params_mut(&mut self) -> &mut Parameters {
        self.file_params.get_or_insert_with(Parameters::new)
    }

    /// Replace the file parameters.
    pub fn set_file_params(&mut self, params: Parameters) {
        self.file_params = Some(params);
    }

    /// Set one file parameter.
    pub fn set_file_param(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.file_params_mut().set(key, value);
    }

    /// Build the fully qualified url.
    ///
    /// The query string is form encoded with sorted keys and appended only
    /// when there are query parameters. It is joined with `&` if the path
    /// already carries a `?`.
    pub fn url(&self) -> String {
        let mut url = format!(
            "{}://{}/{}{}",
            self.scheme,
            self.domain(),
            self.version,
            self.path
        );

        let query = self.query_params();
        if !query.is_empty() {
            url.push(if self.path.contains('?') { '&' } else { '?' });
            url.push_str(&build_form_query(query.export()));
        }

        url
    }

    /// Build the canonical query string of all signable parameters.
    ///
    /// Every query parameter takes part except a previously computed
    /// `oauth_signature`, so a request can be signed again after mutation.
    pub fn signable_parameters(&self) -> String {
        let mut params = self.query_params().export();
        params.retain(|(k, _)| k != OAUTH_SIGNATURE);

        build_http_query(params)
    }

    /// Build the OAuth1 signature base string.
    ///
    /// `rfc3986(method) & rfc3986(url) & rfc3986(signable parameters)`
    pub fn signature_base_string(&self) -> String {
        signature_base_string(
            self.method.as_str(),
            &self.url(),
            &self.signable_parameters(),
        )
    }

    /// Merge `params` into the query parameters and let the attached signer
    /// compute and insert the signature.
    ///
    /// A previous `oauth_signature` is dropped first, so neither the url nor
    /// the signable parameters of the new signature contain it.
    pub fn sign_request(&mut self, params: Parameters) -> Result<()> {
        let signer = self
            .signer
            .clone()
            .ok_or_else(|| Error::request_invalid("no signer attached to request"))?;

        let query = self.query_params_mut();
        query.remove(OAUTH_SIGNATURE);
        query.extend(params);
        signer.build_signature(self)
    }

    /// Sign the request with fresh protocol parameters from the attached signer.
    pub fn sign(&mut self) -> Result<()> {
        let params = match &self.signer {
            Some(signer) => signer.protocol_parameters()?,
            None => return Err(Error::request_invalid("no signer attached to request")),
        };

        self.sign_request(params)
    }

    /// Execute the request through its client.
    ///
    /// Errors from the client are returned unchanged.
    pub async fn execute(&self) -> Result<http::Response<Bytes>> {
        debug!("executing request: {} {}", self.method, self.url());
        self.client.send_request(self).await
    }

    /// Create an independent copy of this request.
    pub fn create_clone(&self) -> Self {
        self.clone()
    }
}

#[async_trait::async_trait]
impl ApiRequest for Request {
    fn url(&self) -> String {
        Request::url(self)
    }

    fn signature_base_string(&self) -> String {
        Request::signature_base_string(self)
    }

    async fn execute(&self) -> Result<http::Response<Bytes>> {
        Request::execute(self).await
    }

    fn create_clone(&self) -> Self {
        Request::create_clone(self)
    }
}
