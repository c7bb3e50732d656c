use crate::search::{SearchIntent, SearchKind};
use thiserror::Error;

/// Destination view for a classified search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Block(u64),
    Transaction(String),
    Account(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Invalid block number: {0}")]
    InvalidBlockNumber(String),
    #[error("Account name cannot be empty")]
    EmptyAccount,
}

impl Route {
    /// Resolve an intent into the view key it navigates to
    pub fn from_intent(intent: &SearchIntent) -> Result<Self, RouteError> {
        let value = intent.value();
        match intent.kind() {
            SearchKind::Block => match value.parse::<u64>() {
                Ok(num) if num > 0 => Ok(Self::Block(num)),
                _ => Err(RouteError::InvalidBlockNumber(value.to_string())),
            },
            SearchKind::Transaction => Ok(Self::Transaction(value.to_lowercase())),
            SearchKind::Account => {
                let name = value.strip_prefix('@').unwrap_or(value);
                if name.is_empty() {
                    return Err(RouteError::EmptyAccount);
                }
                Ok(Self::Account(name.to_lowercase()))
            }
        }
    }

    /// Path of the equivalent page on the web explorer
    pub fn path(&self) -> String {
        match self {
            Self::Block(num) => format!("/blocks/{num}"),
            Self::Transaction(id) => format!("/transactions/{id}"),
            Self::Account(name) => format!("/accounts/{name}"),
        }
    }

    pub fn loading_message(&self) -> String {
        match self {
            Self::Block(num) => format!("Fetching block #{num}..."),
            Self::Transaction(_) => "Fetching transaction...".to_string(),
            Self::Account(name) => format!("Fetching @{name}..."),
        }
    }
}
