//! Transfer request and the form that produces it

use serde::Serialize;

use crate::domain::entities::token::{token_list, TokenDescriptor};
use crate::shared::constants::DEFAULT_TRANSFER_AMOUNT;
use crate::shared::error::SenderError;

/// One submit action's input. Not persisted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransferRequest {
    pub amount: String,
    pub recipient: String,
    /// Empty for the native asset
    pub token_address: String,
}

/// Form state behind the send view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferForm {
    token_index: usize,
    pub amount: String,
    pub recipient: String,
}

impl Default for TransferForm {
    fn default() -> Self {
        Self {
            token_index: 0,
            amount: DEFAULT_TRANSFER_AMOUNT.to_string(),
            recipient: String::new(),
        }
    }
}

impl TransferForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> &'static TokenDescriptor {
        &token_list()[self.token_index]
    }

    pub fn select_token(&mut self, index: usize) -> Result<&'static TokenDescriptor, SenderError> {
        if index >= token_list().len() {
            return Err(SenderError::validation(format!("No token at position {}", index)));
        }
        self.token_index = index;
        Ok(self.token())
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    pub fn set_recipient(&mut self, recipient: impl Into<String>) {
        self.recipient = recipient.into();
    }

    /// The send control is enabled only with a connected wallet and no
    /// submission in flight.
    pub fn can_submit(&self, wallet_connected: bool, in_flight: bool) -> bool {
        wallet_connected && !in_flight
    }

    pub fn to_request(&self) -> TransferRequest {
        TransferRequest {
            amount: self.amount.trim().to_string(),
            recipient: self.recipient.trim().to_string(),
            token_address: self.token().address.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_defaults() {
        let form = TransferForm::new();
        assert!(form.token().is_native());
        assert_eq!(form.amount, "1");
        assert!(form.recipient.is_empty());
    }

    #[test]
    fn test_select_token() {
        let mut form = TransferForm::new();
        let token = form.select_token(1).unwrap();
        assert_eq!(token.symbol, "USDT");
        assert!(form.select_token(99).is_err());
        assert_eq!(form.token().symbol, "USDT");
    }

    #[test]
    fn test_can_submit() {
        let form = TransferForm::new();
        assert!(!form.can_submit(false, false));
        assert!(!form.can_submit(true, true));
        assert!(form.can_submit(true, false));
    }

    #[test]
    fn test_to_request_trims_input() {
        let mut form = TransferForm::new();
        form.select_token(2).unwrap();
        form.set_amount(" 5 ");
        form.set_recipient(" D3V8DhfG3nKLL99Ywb6ThuU8DxxbBgnPQmA3piqQ2ec2\n");

        let request = form.to_request();
        assert_eq!(request.amount, "5");
        assert_eq!(request.recipient, "D3V8DhfG3nKLL99Ywb6ThuU8DxxbBgnPQmA3piqQ2ec2");
        assert_eq!(request.token_address, "8Tc5q5jzZa2jWGsJSZ8NBvEdNw7siR7tavgKwJdje35w");
    }
}
