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

use std::fmt::Debug;
use std::sync::Arc;

use bytes::Bytes;
use http::HeaderMap;

use crate::{Context, Parameters, Request, Result};

/// Last level domain prepended to a client's base domain when a request
/// has no explicit domain.
pub const DEFAULT_LAST_LEVEL_DOMAIN: &str = "ads-api";

/// SigningCredential is the trait used by signers as the signing key.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is usable for signing.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential loads a credential from somewhere: static values,
/// config or environment.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load credential from current context.
    ///
    /// Returns `Ok(None)` when this provider has nothing to offer.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// SignRequest computes a signature over a [`Request`] and writes it back.
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Protocol parameters that must be present in the query collection
    /// before [`SignRequest::build_signature`] runs.
    ///
    /// For OAuth1 these are `oauth_consumer_key`, `oauth_nonce`,
    /// `oauth_signature_method`, `oauth_timestamp`, `oauth_token` and
    /// `oauth_version`.
    fn protocol_parameters(&self) -> Result<Parameters>;

    /// Sign the request in place.
    ///
    /// Implementations compute the signature from
    /// [`Request::signature_base_string`] and insert it into the query
    /// collection.
    fn build_signature(&self, req: &mut Request) -> Result<()>;
}

/// Client owns the defaults requests are created from and the transport
/// they are executed with.
#[async_trait::async_trait]
pub trait Client: Debug + Send + Sync + 'static {
    /// Base domain such as `twitter.com`.
    fn default_base_domain(&self) -> &str;

    /// Last level domain placed in front of the base domain.
    fn default_last_level_domain(&self) -> &str {
        DEFAULT_LAST_LEVEL_DOMAIN
    }

    /// Headers every request starts with.
    fn default_headers(&self) -> &HeaderMap;

    /// Signer attached to new requests.
    fn signer(&self) -> Option<Arc<dyn SignRequest>> {
        None
    }

    /// Send the request and return the raw response.
    ///
    /// Transport and HTTP level failures are reported as
    /// [`ErrorKind::RequestFailed`](crate::ErrorKind::RequestFailed).
    async fn send_request(&self, req: &Request) -> Result<http::Response<Bytes>>;
}

/// ApiRequest is the contract shared by every request variant.
#[async_trait::async_trait]
pub trait ApiRequest: Send + Sync {
    /// Fully qualified url including the query string.
    fn url(&self) -> String;

    /// OAuth1 signature base string.
    fn signature_base_string(&self) -> String;

    /// Execute the request through its client.
    async fn execute(&self) -> Result<http::Response<Bytes>>;

    /// Independent copy that can be mutated without affecting `self`.
    fn create_clone(&self) -> Self
    where
        Self: Sized;
}
