//! Card tokenizer: exchanges raw card details for a single-use token.

use super::client::ApiClient;
use super::models::{CardTokenResponse, TokenizerErrorResponse};
use crate::core::prompts::CardInput;
use crate::core::services::types::CardToken;
use crate::error::{ApiError, ConfigError};
use crate::storage::config::Config;
use crate::utils::error_helpers::{convert_json_error, convert_request_error};
use reqwest::Method;

pub struct StripeClient {
    client: ApiClient,
}

impl StripeClient {
    /// Build a tokenizer client; requires a publishable key in the configuration.
    pub fn new(config: &Config) -> crate::Result<Self> {
        let key = config
            .stripe_publishable_key
            .as_deref()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "stripe_publishable_key".to_string(),
                value: String::new(),
                reason: "a publishable key is required to tokenize cards".to_string(),
            })?;
        Ok(Self {
            client: ApiClient::with_token(&config.stripe_url, key)?,
        })
    }

    pub async fn create_token(&self, card: &CardInput) -> crate::Result<CardToken> {
        let endpoint = "/tokens";
        let mut form = vec![
            ("card[number]", card.number.clone()),
            ("card[exp_month]", card.exp_month.to_string()),
            ("card[exp_year]", card.exp_year.to_string()),
            ("card[cvc]", card.cvc.clone()),
        ];
        if let Some(zip) = &card.postal_code {
            form.push(("card[address_zip]", zip.clone()));
        }

        let response = self
            .client
            .build_request(Method::POST, endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| convert_request_error(e, endpoint))?;

        let status = response.status();
        if !status.is_success() {
            // The tokenizer explains declines in a JSON error envelope
            let message = match response.json::<TokenizerErrorResponse>().await {
                Ok(body) => body.error.message,
                Err(_) => "card was rejected".to_string(),
            };
            return Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message,
            }
            .into());
        }

        let token: CardTokenResponse = response
            .json()
            .await
            .map_err(|e| convert_json_error(e, endpoint))?;
        Ok(CardToken { id: token.id })
    }
}
