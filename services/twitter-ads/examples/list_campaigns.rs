use adsign_core::{Context, OsEnv, ProvideCredentialChain};
use adsign_http_send_reqwest::ReqwestHttpSend;
use adsign_twitter_ads::{
    Config, EnvCredentialProvider, OAuthSigner, StaticCredentialProvider, TwitterAdsClient,
};
use anyhow::Result;
use http::Method;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for debugging
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    // Environment first, then a placeholder credential for dry runs
    let chain = ProvideCredentialChain::new()
        .push(EnvCredentialProvider::new())
        .push(
            StaticCredentialProvider::new("demo_consumer_key", "demo_consumer_secret")
                .with_access_token("demo_access_token", "demo_access_token_secret"),
        );

    let signer = OAuthSigner::load(&ctx, &chain).await?;
    let client = TwitterAdsClient::from_config(ctx, &Config::default())?.with_signer(signer);

    let account_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "18ce54d4x5t".to_string());

    let mut req = client.request(Method::GET, &format!("/accounts/{account_id}/campaigns"));
    req.set_query_param("count", "10");
    req.set_query_param("with_deleted", "false");

    let mut preview = req.create_clone();
    preview.sign()?;
    println!("Signed URL: {}", preview.url());

    match req.execute().await {
        Ok(resp) => {
            println!("Status: {}", resp.status());
            println!("{}", String::from_utf8_lossy(resp.body()));
        }
        Err(err) => println!("Request failed: {err}"),
    }

    Ok(())
}
