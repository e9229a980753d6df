use bindery_common::Secret;
use log::*;

#[derive(Debug, Clone, Default)]
pub struct SpApiConfig {
    /// The regional SP-API endpoint. The default is the EU region host, which serves amazon.in.
    pub endpoint: String,
    /// The Login-with-Amazon endpoint used to exchange the refresh token for access tokens.
    pub auth_url: String,
    pub marketplace_id: String,
    pub refresh_token: Secret,
    pub client_id: Secret,
    pub client_secret: Secret,
}

impl SpApiConfig {
    pub fn new_from_env_or_default() -> Self {
        let endpoint = std::env::var("BND_SPAPI_ENDPOINT").unwrap_or_else(|_| {
            warn!("🪛️ BND_SPAPI_ENDPOINT is not set. Using https://sellingpartnerapi-eu.amazon.com as default");
            "https://sellingpartnerapi-eu.amazon.com".to_string()
        });
        let auth_url = std::env::var("BND_SPAPI_AUTH_URL").unwrap_or_else(|_| {
            warn!("🪛️ BND_SPAPI_AUTH_URL is not set. Using https://api.amazon.com/auth/o2/token as default");
            "https://api.amazon.com/auth/o2/token".to_string()
        });
        let marketplace_id = std::env::var("BND_SPAPI_MARKETPLACE_ID").unwrap_or_else(|_| {
            warn!("🪛️ BND_SPAPI_MARKETPLACE_ID is not set. Using A21TJRUUN4KGV (amazon.in) as default");
            "A21TJRUUN4KGV".to_string()
        });
        let refresh_token = std::env::var("BND_SPAPI_REFRESH_TOKEN").unwrap_or_else(|_| {
            warn!("🪛️ BND_SPAPI_REFRESH_TOKEN is not set. Using a default value, which is almost certainly not what you want");
            "Atzr|00000000000000".to_string()
        });
        let client_id = std::env::var("BND_SPAPI_CLIENT_ID").unwrap_or_else(|_| {
            warn!("🪛️ BND_SPAPI_CLIENT_ID is not set. Using a default value, which is almost certainly not what you want");
            "amzn1.application-oa2-client.00000000000000".to_string()
        });
        let client_secret = std::env::var("BND_SPAPI_CLIENT_SECRET").unwrap_or_else(|_| {
            warn!("🪛️ BND_SPAPI_CLIENT_SECRET is not set. Using a default value, which is almost certainly not what you want");
            "amzn1.oa2-cs.v1.00000000000000".to_string()
        });
        Self {
            endpoint,
            auth_url,
            marketplace_id,
            refresh_token: Secret::new(refresh_token),
            client_id: Secret::new(client_id),
            client_secret: Secret::new(client_secret),
        }
    }
}
