//! # Identity Service Client
//!
//! Exchanges sign-in magic codes with the bot token service and reads the signed-in
//! user's profile from Microsoft Graph.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::config::IdentityConfig;
use crate::domain::traits::IdentityClient;
use crate::domain::types::{Token, UserProfile};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphUser {
    display_name: Option<String>,
    mail: Option<String>,
    user_principal_name: Option<String>,
}

pub struct HttpIdentityClient {
    http: Client,
    config: IdentityConfig,
}

impl HttpIdentityClient {
    pub fn new(config: IdentityConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { http, config })
    }

    fn token_url(&self) -> String {
        format!(
            "{}/api/usertoken/GetToken",
            self.config.token_endpoint.trim_end_matches('/')
        )
    }

    fn me_url(&self) -> String {
        format!("{}/v1.0/me", self.config.graph_endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn exchange_code(
        &self,
        user_id: &str,
        resource: &str,
        code: &str,
    ) -> Result<Option<Token>> {
        let mut request = self.http.get(self.token_url()).query(&[
            ("userId", user_id),
            ("connectionName", resource),
            ("channelId", self.config.channel_id.as_str()),
            ("code", code),
        ]);
        if let Some(bot_token) = &self.config.bot_token {
            request = request.bearer_auth(bot_token);
        }

        let response = request.send().await.context("Token service request failed")?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body: TokenResponse = response
            .error_for_status()
            .context("Token service rejected the code")?
            .json()
            .await
            .context("Failed to parse token response")?;

        Ok(body.token.filter(|t| !t.is_empty()).map(|token| Token { token }))
    }

    async fn get_current_user(&self, token: &Token) -> Result<UserProfile> {
        let user: GraphUser = self
            .http
            .get(self.me_url())
            .bearer_auth(&token.token)
            .send()
            .await
            .context("Graph request failed")?
            .error_for_status()
            .context("Graph rejected the token")?
            .json()
            .await
            .context("Failed to parse Graph profile")?;

        Ok(UserProfile {
            display_name: user.display_name.unwrap_or_default(),
            mail: user.mail.or(user.user_principal_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_tolerate_trailing_slashes() {
        let client = HttpIdentityClient::new(IdentityConfig {
            token_endpoint: "https://token.example/".into(),
            graph_endpoint: "https://graph.example/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.token_url(), "https://token.example/api/usertoken/GetToken");
        assert_eq!(client.me_url(), "https://graph.example/v1.0/me");
    }

    #[test]
    fn graph_profile_falls_back_to_principal_name() {
        let user: GraphUser =
            serde_json::from_str(r#"{"displayName":"Megan Bowen","userPrincipalName":"megan@contoso.com"}"#)
                .unwrap();
        assert_eq!(user.mail.or(user.user_principal_name).as_deref(), Some("megan@contoso.com"));
    }
}
