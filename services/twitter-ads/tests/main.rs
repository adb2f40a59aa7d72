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

use std::env;
use std::sync::{Arc, Mutex};

use adsign_core::encoding::{
    build_form_query, build_http_query, rfc3986_encode, signature_base_string,
};
use adsign_core::hash::base64_hmac_sha1;
use adsign_core::{Context, Error, ErrorKind, HttpSend, OsEnv, Result, OAUTH_SIGNATURE};
use adsign_http_send_reqwest::ReqwestHttpSend;
use adsign_twitter_ads::{
    Config, ConfigCredentialProvider, DefaultCredentialProvider, OAuthSigner,
    StaticCredentialProvider, TwitterAdsClient, OAUTH_NONCE, OAUTH_TIMESTAMP,
};
use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};
use log::warn;
use pretty_assertions::assert_eq;

const CONSUMER_SECRET: &str = "consumer_secret";
const ACCESS_TOKEN_SECRET: &str = "access_token_secret";

/// Records every request and answers with a fixed status.
#[derive(Debug, Clone)]
struct MockHttpSend {
    status: StatusCode,
    sent: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl MockHttpSend {
    fn new(status: StatusCode) -> Self {
        Self {
            status,
            sent: Arc::default(),
        }
    }

    fn last(&self) -> http::Request<Bytes> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("a request must have been sent")
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.sent.lock().unwrap().push(req);
        Ok(http::Response::builder()
            .status(self.status)
            .body(Bytes::from_static(br#"{"data":[]}"#))?)
    }
}

#[derive(Debug)]
struct FailingHttpSend;

#[async_trait]
impl HttpSend for FailingHttpSend {
    async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::request_failed("connection reset"))
    }
}

async fn signed_client(http: impl HttpSend) -> Result<TwitterAdsClient> {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new().with_http_send(http);
    let provider = StaticCredentialProvider::new("consumer_key", CONSUMER_SECRET)
        .with_access_token("access_token", ACCESS_TOKEN_SECRET);
    let signer = OAuthSigner::load(&ctx, &provider).await?;

    Ok(TwitterAdsClient::new(ctx).with_signer(signer))
}

/// Recompute the signature of a captured request the way a server would.
fn verify_signature(req: &http::Request<Bytes>) -> bool {
    let uri = req.uri();
    let mut pairs = form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect::<Vec<_>>();

    let Some(idx) = pairs.iter().position(|(k, _)| k == OAUTH_SIGNATURE) else {
        return false;
    };
    let (_, signature) = pairs.remove(idx);

    let url = format!(
        "{}://{}{}?{}",
        uri.scheme_str().unwrap_or("https"),
        uri.authority().map(|a| a.as_str()).unwrap_or_default(),
        uri.path(),
        build_form_query(pairs.clone())
    );
    let base = signature_base_string(req.method().as_str(), &url, &build_http_query(pairs));
    let key = format!(
        "{}&{}",
        rfc3986_encode(CONSUMER_SECRET),
        rfc3986_encode(ACCESS_TOKEN_SECRET)
    );

    base64_hmac_sha1(key.as_bytes(), base.as_bytes()) == signature
}

fn query_value(req: &http::Request<Bytes>, key: &str) -> Option<String> {
    form_urlencoded::parse(req.uri().query().unwrap_or_default().as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[tokio::test]
async fn test_execute_signs_request() -> Result<()> {
    let http = MockHttpSend::new(StatusCode::OK);
    let client = signed_client(http.clone()).await?;

    let mut req = client.request(Method::GET, "/accounts");
    req.set_query_param("with_deleted", "true");
    req.set_query_param("q", "it's a (test)");

    let resp = req.execute().await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let sent = http.last();
    assert_eq!(sent.method(), Method::GET);
    assert_eq!(sent.uri().host(), Some("ads-api.twitter.com"));
    assert_eq!(sent.uri().path(), "/12/accounts");
    assert_eq!(query_value(&sent, "q").as_deref(), Some("it's a (test)"));
    assert!(query_value(&sent, OAUTH_NONCE).is_some());
    assert!(query_value(&sent, OAUTH_TIMESTAMP).is_some());
    assert!(verify_signature(&sent));

    // The caller's request is left untouched.
    assert!(!req.query_params().contains_key(OAUTH_SIGNATURE));
    Ok(())
}

#[tokio::test]
async fn test_execute_resigns_presigned_request() -> Result<()> {
    let http = MockHttpSend::new(StatusCode::OK);
    let client = signed_client(http.clone()).await?;

    let mut req = client.request(Method::DELETE, "/accounts/abc1/campaigns/8wku2");
    req.sign()?;
    req.set_query_param("reason", "ended");
    req.execute().await?;

    let sent = http.last();
    assert_eq!(sent.method(), Method::DELETE);
    assert_eq!(query_value(&sent, "reason").as_deref(), Some("ended"));
    assert!(verify_signature(&sent));
    Ok(())
}

#[tokio::test]
async fn test_execute_with_form_body() -> Result<()> {
    let http = MockHttpSend::new(StatusCode::CREATED);
    let client = signed_client(http.clone()).await?;

    let mut req = client.request(Method::POST, "/accounts/abc1/line_items");
    req.set_body_param("objective", "WEBSITE_CLICKS");
    req.set_body_param("name", "spring sale");
    req.execute().await?;

    let sent = http.last();
    assert_eq!(
        sent.body().as_ref(),
        b"name=spring+sale&objective=WEBSITE_CLICKS"
    );
    assert!(verify_signature(&sent));
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_is_request_failed() -> Result<()> {
    let client = signed_client(MockHttpSend::new(StatusCode::UNAUTHORIZED)).await?;

    let err = client
        .request(Method::GET, "/accounts")
        .execute()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestFailed);
    assert!(err.message().contains("401"));
    assert!(err.message().contains(r#"{"data":[]}"#));
    Ok(())
}

#[tokio::test]
async fn test_transport_error_is_forwarded() -> Result<()> {
    let client = signed_client(FailingHttpSend).await?;

    let err = client
        .request(Method::GET, "/accounts")
        .execute()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestFailed);
    assert_eq!(err.message(), "connection reset");
    Ok(())
}

#[tokio::test]
async fn test_cloned_template_requests_are_independent() -> Result<()> {
    let http = MockHttpSend::new(StatusCode::OK);
    let client = signed_client(http.clone()).await?;

    let mut template = client.request(Method::GET, "/stats/accounts/abc1");
    template.set_query_param("entity", "CAMPAIGN");

    let mut first = template.create_clone();
    first.set_query_param("granularity", "DAY");
    let mut second = template.create_clone();
    second.set_query_param("granularity", "HOUR");

    first.execute().await?;
    assert_eq!(query_value(&http.last(), "granularity").as_deref(), Some("DAY"));
    second.execute().await?;
    assert_eq!(query_value(&http.last(), "granularity").as_deref(), Some("HOUR"));

    assert!(!template.query_params().contains_key("granularity"));
    Ok(())
}

#[tokio::test]
async fn test_config_provider_feeds_signer() -> Result<()> {
    let ctx = Context::new();
    let config = Config::new()
        .with_consumer_key("consumer_key")
        .with_consumer_secret(CONSUMER_SECRET);

    let signer = OAuthSigner::load(&ctx, &ConfigCredentialProvider::new(config.into())).await?;
    assert_eq!(signer.credential().consumer_key, "consumer_key");
    assert!(signer.credential().access_token.is_none());
    Ok(())
}

/// Talks to the real API. Skipped unless `ADSIGN_TWITTER_ADS_TEST=on`.
#[tokio::test]
async fn test_list_accounts() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("ADSIGN_TWITTER_ADS_TEST").as_deref() != Ok("on") {
        warn!("ADSIGN_TWITTER_ADS_TEST is not set, skipped");
        return Ok(());
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let signer = OAuthSigner::load(&ctx, &DefaultCredentialProvider::new()).await?;
    let client = TwitterAdsClient::from_config(ctx, &Config::default())?.with_signer(signer);

    let resp = client.request(Method::GET, "/accounts").execute().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}
