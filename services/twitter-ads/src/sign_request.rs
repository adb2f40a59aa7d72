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

//! OAuth1 request signer.

use std::fmt;

use adsign_core::encoding::rfc3986_encode;
use adsign_core::hash::{base64_hmac_sha1, base64_hmac_sha256};
use adsign_core::time::{now, unix_timestamp, DateTime};
use adsign_core::{
    Context, Error, Parameters, ProvideCredential, Request, Result, SignRequest,
    SigningCredential, OAUTH_SIGNATURE,
};
use log::debug;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::constants::*;
use crate::credential::Credential;

/// Signature methods supported by [`OAuthSigner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureMethod {
    /// `HMAC-SHA1`, the method the ads API expects.
    #[default]
    HmacSha1,
    /// `HMAC-SHA256`.
    HmacSha256,
    /// `PLAINTEXT`: the signing key itself is the signature.
    Plaintext,
}

impl SignatureMethod {
    /// Name used in `oauth_signature_method`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMethod::HmacSha1 => "HMAC-SHA1",
            SignatureMethod::HmacSha256 => "HMAC-SHA256",
            SignatureMethod::Plaintext => "PLAINTEXT",
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuthSigner that implements
/// [OAuth 1.0a](https://datatracker.ietf.org/doc/html/rfc5849) request signing.
///
/// The signer adds the protocol parameters to the query collection and
/// then signs the request's signature base string with
/// `rfc3986(consumer_secret) & rfc3986(access_token_secret)`.
#[derive(Debug, Clone)]
pub struct OAuthSigner {
    credential: Credential,
    method: SignatureMethod,

    nonce: Option<String>,
    time: Option<DateTime>,
}

impl OAuthSigner {
    /// Create a signer for the given credential.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            method: SignatureMethod::default(),
            nonce: None,
            time: None,
        }
    }

    /// Load the credential through `provider` and create a signer for it.
    pub async fn load(
        ctx: &Context,
        provider: &impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        let credential = provider
            .provide_credential(ctx)
            .await?
            .ok_or_else(|| Error::credential_invalid("no credential found for oauth signer"))?;

        Ok(Self::new(credential))
    }

    /// Use another signature method.
    pub fn with_signature_method(mut self, method: SignatureMethod) -> Self {
        self.method = method;
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// Every request must carry a fresh nonce.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The credential used by this signer.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    fn valid_credential(&self) -> Result<&Credential> {
        if !self.credential.is_valid() {
            return Err(Error::credential_invalid(
                "consumer key and consumer secret must not be empty",
            ));
        }

        Ok(&self.credential)
    }

    fn signing_key(cred: &Credential) -> String {
        format!(
            "{}&{}",
            rfc3986_encode(&cred.consumer_secret),
            rfc3986_encode(cred.access_token_secret.as_deref().unwrap_or_default())
        )
    }
}

impl SignRequest for OAuthSigner {
    fn protocol_parameters(&self) -> Result<Parameters> {
        let cred = self.valid_credential()?;
        let now = self.time.unwrap_or_else(now);
        let nonce = self.nonce.clone().unwrap_or_else(generate_nonce);

        let mut params = Parameters::new();
        params.set(OAUTH_CONSUMER_KEY, &cred.consumer_key);
        params.set(OAUTH_NONCE, nonce);
        params.set(OAUTH_SIGNATURE_METHOD, self.method.as_str());
        params.set(OAUTH_TIMESTAMP, unix_timestamp(now));
        if let Some(token) = &cred.access_token {
            params.set(OAUTH_TOKEN, token);
        }
        params.set(OAUTH_VERSION, OAUTH_VERSION_1_0);

        Ok(params)
    }

    fn build_signature(&self, req: &mut Request) -> Result<()> {
        let cred = self.valid_credential()?;

        let base_string = req.signature_base_string();
        debug!("signature base string: {base_string}");

        let key = Self::signing_key(cred);
        let signature = match self.method {
            SignatureMethod::HmacSha1 => base64_hmac_sha1(key.as_bytes(), base_string.as_bytes()),
            SignatureMethod::HmacSha256 => {
                base64_hmac_sha256(key.as_bytes(), base_string.as_bytes())
            }
            SignatureMethod::Plaintext => key,
        };

        req.set_query_param(OAUTH_SIGNATURE, signature);
        Ok(())
    }
}

fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use adsign_core::encoding::{build_form_query, build_http_query, signature_base_string};
    use adsign_core::{ErrorKind, ParamValue};
    use chrono::{TimeZone, Utc};
    use http::Method;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::TwitterAdsClient;

    const CONSUMER_KEY: &str = "xvz1evFS4wEEPTGEFPHBog";
    const CONSUMER_SECRET: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
    const ACCESS_TOKEN: &str = "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb";
    const ACCESS_TOKEN_SECRET: &str = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";
    const NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";

    fn signer() -> OAuthSigner {
        let cred = Credential::new(CONSUMER_KEY, CONSUMER_SECRET)
            .with_access_token(ACCESS_TOKEN, ACCESS_TOKEN_SECRET);

        OAuthSigner::new(cred)
            .with_nonce(NONCE)
            .with_time(Utc.timestamp_opt(1318622958, 0).unwrap())
    }

    fn campaigns_request(signer: OAuthSigner) -> Request {
        let client = TwitterAdsClient::new(Context::new()).with_signer(signer);
        let mut req = client.request(Method::POST, "/accounts/abc1/campaigns");
        req.set_query_param("name", "Hello Ladies + Gentlemen");
        req.set_query_param("count", "10");
        req
    }

    fn signature(req: &Request) -> String {
        req.query_params()
            .get(OAUTH_SIGNATURE)
            .map(|v| v.as_str().into_owned())
            .expect("request must be signed")
    }

    #[test]
    fn test_protocol_parameters() -> Result<()> {
        let params = signer().protocol_parameters()?;

        let names = params.iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                OAUTH_CONSUMER_KEY,
                OAUTH_NONCE,
                OAUTH_SIGNATURE_METHOD,
                OAUTH_TIMESTAMP,
                OAUTH_TOKEN,
                OAUTH_VERSION
            ]
        );
        assert_eq!(
            params.get(OAUTH_TIMESTAMP),
            Some(&ParamValue::from("1318622958"))
        );
        assert_eq!(
            params.get(OAUTH_SIGNATURE_METHOD),
            Some(&ParamValue::from("HMAC-SHA1"))
        );
        Ok(())
    }

    #[test]
    fn test_protocol_parameters_without_token() -> Result<()> {
        let params = OAuthSigner::new(Credential::new(CONSUMER_KEY, CONSUMER_SECRET))
            .protocol_parameters()?;

        assert!(!params.contains_key(OAUTH_TOKEN));
        assert_eq!(params.count(), 5);
        Ok(())
    }

    #[test]
    fn test_random_nonce() -> Result<()> {
        let signer = OAuthSigner::new(Credential::new(CONSUMER_KEY, CONSUMER_SECRET));
        let n1 = signer.protocol_parameters()?.get(OAUTH_NONCE).cloned();
        let n2 = signer.protocol_parameters()?.get(OAUTH_NONCE).cloned();

        assert_ne!(n1, n2);
        assert_eq!(n1.map(|v| v.as_str().len()), Some(32));
        Ok(())
    }

    #[test]
    fn test_sign_hmac_sha1() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut req = campaigns_request(signer());
        req.sign()?;

        assert_eq!(signature(&req), "FK0fDXxISLsGcpmoFPXuwcSt/Co=");
        Ok(())
    }

    #[test]
    fn test_sign_hmac_sha256() -> Result<()> {
        let mut req =
            campaigns_request(signer().with_signature_method(SignatureMethod::HmacSha256));
        req.sign()?;

        assert_eq!(
            signature(&req),
            "7aXxKdrc/5CjunujHxQaghTZWnxvTEZx0ARC61S6WkI="
        );
        Ok(())
    }

    #[test]
    fn test_sign_plaintext() -> Result<()> {
        let mut req =
            campaigns_request(signer().with_signature_method(SignatureMethod::Plaintext));
        req.sign()?;

        assert_eq!(
            signature(&req),
            format!("{CONSUMER_SECRET}&{ACCESS_TOKEN_SECRET}")
        );
        Ok(())
    }

    #[test]
    fn test_sign_without_access_token() -> Result<()> {
        let signer = OAuthSigner::new(Credential::new(CONSUMER_KEY, CONSUMER_SECRET))
            .with_nonce("abc")
            .with_time(Utc.timestamp_opt(1318622958, 0).unwrap());
        let client = TwitterAdsClient::new(Context::new()).with_signer(signer);

        let mut req = client.request(Method::GET, "/accounts");
        req.sign()?;

        assert_eq!(signature(&req), "/Dyw2eB5YQMx9ClR4v4ASBFpOS0=");
        Ok(())
    }

    /// Recompute the signature the way a server does: query without the
    /// signature, form encoded url, strict signable parameters.
    fn recompute_signature(req: &Request) -> String {
        let mut query = req.query_params().export();
        query.retain(|(k, _)| k != OAUTH_SIGNATURE);

        let url = format!(
            "{}://{}/{}{}?{}",
            req.scheme(),
            req.domain(),
            req.version(),
            req.path(),
            build_form_query(query.clone())
        );
        let base = signature_base_string(req.method().as_str(), &url, &build_http_query(query));
        let key = format!(
            "{}&{}",
            rfc3986_encode(CONSUMER_SECRET),
            rfc3986_encode(ACCESS_TOKEN_SECRET)
        );

        base64_hmac_sha1(key.as_bytes(), base.as_bytes())
    }

    #[test]
    fn test_resign_reproduces_signature() -> Result<()> {
        let mut req = campaigns_request(signer());
        req.sign()?;
        let first = signature(&req);

        let mut resigned = req.create_clone();
        resigned.sign()?;

        assert_eq!(first, "FK0fDXxISLsGcpmoFPXuwcSt/Co=");
        assert_eq!(first, signature(&resigned));
        assert_eq!(req.url(), resigned.url());
        Ok(())
    }

    #[test]
    fn test_resign_after_mutation_matches_server() -> Result<()> {
        let client = TwitterAdsClient::new(Context::new()).with_signer(signer());
        let mut req = client.request(Method::GET, "/accounts");
        req.sign()?;
        assert_eq!(signature(&req), recompute_signature(&req));

        req.set_query_param("count", "10");
        req.sign()?;
        assert_eq!(signature(&req), recompute_signature(&req));
        Ok(())
    }

    #[test]
    fn test_sign_request_with_given_parameters() -> Result<()> {
        let client = TwitterAdsClient::new(Context::new()).with_signer(signer());
        let mut req = client.request(Method::GET, "/accounts");

        let params: Parameters = [("oauth_nonce", "given"), ("oauth_timestamp", "1")]
            .into_iter()
            .collect();
        req.sign_request(params)?;

        assert_eq!(
            req.query_params().get(OAUTH_NONCE),
            Some(&ParamValue::from("given"))
        );
        assert!(req.query_params().contains_key(OAUTH_SIGNATURE));
        Ok(())
    }

    #[test]
    fn test_invalid_credential() {
        let signer = OAuthSigner::new(Credential::new(CONSUMER_KEY, ""));
        let err = signer.protocol_parameters().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);

        let client = TwitterAdsClient::new(Context::new());
        let mut req = client.request(Method::GET, "/accounts");
        req.set_signer(Arc::new(signer));
        let err = req.sign().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert!(!req.query_params().contains_key(OAUTH_SIGNATURE));
    }

    #[tokio::test]
    async fn test_load_from_provider() -> Result<()> {
        let provider = crate::StaticCredentialProvider::new(CONSUMER_KEY, CONSUMER_SECRET);
        let signer = OAuthSigner::load(&Context::new(), &provider).await?;
        assert_eq!(signer.credential().consumer_key, CONSUMER_KEY);

        let err = OAuthSigner::load(&Context::new(), &crate::EnvCredentialProvider::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        Ok(())
    }
}
