use regex::Regex;
use std::sync::OnceLock;

/// What a search string refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    /// Block number (decimal digits only)
    Block,
    /// Transaction id (40 hex chars)
    Transaction,
    /// Account name, also the fallback for anything unrecognized
    Account,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Transaction => "transaction",
            Self::Account => "account",
        }
    }
}

/// A classified search string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIntent {
    kind: SearchKind,
    value: String,
    fallback: bool,
}

struct Patterns {
    block: Regex,
    transaction: Regex,
    account: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        block: Regex::new(r"^[0-9]+$").unwrap(),
        transaction: Regex::new(r"^[a-fA-F0-9]{40}$").unwrap(),
        account: Regex::new(r"^[a-zA-Z0-9.-]{3,16}$").unwrap(),
    })
}

/// Classify a trimmed, non-empty search string.
///
/// Rules are tried most specific first: block number, transaction id,
/// account name. Input matching none of them is still treated as an
/// account, so a bad name shows up as "account not found" downstream.
pub fn classify(input: &str) -> SearchIntent {
    let p = patterns();

    let (kind, fallback) = if p.block.is_match(input) {
        (SearchKind::Block, false)
    } else if p.transaction.is_match(input) {
        (SearchKind::Transaction, false)
    } else if p.account.is_match(input) {
        (SearchKind::Account, false)
    } else {
        (SearchKind::Account, true)
    };

    SearchIntent {
        kind,
        value: input.to_string(),
        fallback,
    }
}

impl SearchIntent {
    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    /// The input as given. A leading `@` on accounts is kept here.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True when no rule matched and the account default was used
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Returns a human-readable description of the intent
    pub fn description(&self) -> String {
        match self.kind {
            SearchKind::Block => format!("Block: {}", self.value),
            SearchKind::Transaction => format!("Transaction: {}", self.value),
            SearchKind::Account => format!("Account: {}", self.value),
        }
    }
}
