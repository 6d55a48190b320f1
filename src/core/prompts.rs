use crate::api::stripe::StripeClient;
use crate::core::services::traits::Prompter;
use crate::core::services::types::CardToken;
use crate::error::PromptError;
use crate::storage::config::Config;
use crate::utils::validation::{luhn_valid, normalize_card_number};
use async_trait::async_trait;
use rpassword::read_password;
use std::io::{self, Write};

/// Card details collected from the terminal, validated locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardInput {
    pub number: String,
    pub exp_month: u8,
    pub exp_year: u16,
    pub cvc: String,
    pub postal_code: Option<String>,
}

impl CardInput {
    /// Validate raw answers. `expiry` is `MM/YY` or `MM/YYYY`.
    pub fn parse(
        number: &str,
        expiry: &str,
        cvc: &str,
        postal_code: &str,
    ) -> Result<Self, PromptError> {
        let number = normalize_card_number(number);
        if !luhn_valid(&number) {
            return Err(invalid("card number", "failed checksum"));
        }

        let (month, year) = expiry
            .trim()
            .split_once('/')
            .ok_or_else(|| invalid("expiry", "expected MM/YY"))?;
        let exp_month: u8 = month
            .trim()
            .parse()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| invalid("expiry", "month must be between 01 and 12"))?;
        let year = year.trim();
        let exp_year: u16 = match (year.len(), year.parse::<u16>()) {
            (2, Ok(y)) => 2000 + y,
            (4, Ok(y)) => y,
            _ => return Err(invalid("expiry", "expected MM/YY")),
        };

        let cvc = cvc.trim();
        if !(3..=4).contains(&cvc.len()) || !cvc.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("CVC", "expected 3 or 4 digits"));
        }

        let postal_code = Some(postal_code.trim())
            .filter(|z| !z.is_empty())
            .map(str::to_string);

        Ok(Self {
            number,
            exp_month,
            exp_year,
            cvc: cvc.to_string(),
            postal_code,
        })
    }

    /// Collect card details from interactive input
    pub fn collect() -> Result<Self, PromptError> {
        let number = read_hidden("Card number: ")?;
        let expiry = read_line("Expiry (MM/YY): ")?;
        let cvc = read_hidden("CVC: ")?;
        let postal_code = read_line("Postal code: ")?;
        Self::parse(&number, &expiry, &cvc, &postal_code)
    }
}

fn invalid(field: &str, reason: &str) -> PromptError {
    PromptError::InvalidCard {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn write_prompt(label: &str) -> Result<(), PromptError> {
    print!("{}", label);
    io::stdout()
        .flush()
        .map_err(|e| PromptError::Input(format!("Failed to flush stdout: {}", e)))
}

fn read_line(label: &str) -> Result<String, PromptError> {
    write_prompt(label)?;
    let mut answer = String::new();
    let read = io::stdin()
        .read_line(&mut answer)
        .map_err(|e| PromptError::Input(e.to_string()))?;
    if read == 0 {
        // stdin closed (Ctrl-D)
        return Err(PromptError::Aborted);
    }
    Ok(answer.trim().to_string())
}

fn read_hidden(label: &str) -> Result<String, PromptError> {
    write_prompt(label)?;
    read_password()
        .map(|v| v.trim().to_string())
        .map_err(|e| PromptError::Input(e.to_string()))
}

/// `y`/`yes` (any case) accepts, anything else declines.
pub fn parse_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Prompter reading from the controlling terminal.
#[derive(Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn tokenize_card(&self, config: &Config) -> crate::Result<CardToken> {
        let tokenizer = StripeClient::new(config)?;
        let card = CardInput::collect()?;
        tokenizer.create_token(&card).await
    }

    fn confirm(&self, message: &str) -> crate::Result<bool> {
        let answer = read_line(&format!("{} [y/N]: ", message))?;
        Ok(parse_confirmation(&answer))
    }
}
