use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Zero transaction id used by virtual operations that have no parent transaction
pub const NULL_TRX_ID: &str = "0000000000000000000000000000000000000000";

/// Signing key a witness sets when it disables block production
pub const NULL_SIGNING_KEY: &str = "STM1111111111111111111111111111111114T1Anm";

const STEEM_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// An amount with its symbol, parsed from the condenser `"1.000 STEEM"` form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Asset {
    pub amount: f64,
    pub symbol: String,
}

impl Asset {
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let amount = parts.next()?.parse::<f64>().ok()?;
        let symbol = parts.next()?.to_string();
        if parts.next().is_some() {
            return None;
        }
        Some(Self { amount, symbol })
    }

    /// Parse or fall back to zero of the given symbol
    pub fn parse_or_zero(s: &str, symbol: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| Self {
            amount: 0.0,
            symbol: symbol.to_string(),
        })
    }
}

/// Convert VESTS to STEEM Power at the current vesting price
pub fn vests_to_sp(vests: f64, total_vesting_fund_steem: f64, total_vesting_shares: f64) -> f64 {
    if total_vesting_shares <= 0.0 {
        return 0.0;
    }
    vests * total_vesting_fund_steem / total_vesting_shares
}

/// Convert raw on-chain reputation to the familiar 25-based score
pub fn reputation_score(raw: i64) -> f64 {
    if raw == 0 {
        return 25.0;
    }
    let magnitude = (raw.unsigned_abs() as f64).log10();
    let level = (magnitude - 9.0).max(0.0);
    let sign = if raw < 0 { -1.0 } else { 1.0 };
    sign * level * 9.0 + 25.0
}

/// Parse a chain timestamp (UTC, no zone suffix) into unix seconds
pub fn parse_steem_time(s: &str) -> Option<u64> {
    let dt = NaiveDateTime::parse_from_str(s, STEEM_TIME_FORMAT).ok()?;
    u64::try_from(dt.and_utc().timestamp()).ok()
}

/// Integers the node sends either as JSON numbers or as strings
pub fn de_lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(i64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

fn field<'a>(body: &'a Value, key: &str) -> &'a str {
    body.get(key).and_then(Value::as_str).unwrap_or("?")
}

/// One-line description of an operation for list views
pub fn describe_op(name: &str, body: &Value) -> String {
    match name {
        "vote" => {
            let weight = body.get("weight").and_then(Value::as_i64).unwrap_or(0);
            format!(
                "{} voted {:.0}% on @{}/{}",
                field(body, "voter"),
                weight as f64 / 100.0,
                field(body, "author"),
                field(body, "permlink")
            )
        }
        "comment" => {
            let parent = field(body, "parent_author");
            if parent.is_empty() || parent == "?" {
                format!("{} posted {}", field(body, "author"), field(body, "permlink"))
            } else {
                format!("{} replied to @{parent}", field(body, "author"))
            }
        }
        "transfer" => format!(
            "{} sent {} to {}",
            field(body, "from"),
            field(body, "amount"),
            field(body, "to")
        ),
        "transfer_to_vesting" => format!(
            "{} powered up {} to {}",
            field(body, "from"),
            field(body, "amount"),
            field(body, "to")
        ),
        "withdraw_vesting" => format!(
            "{} started power down of {}",
            field(body, "account"),
            field(body, "vesting_shares")
        ),
        "delegate_vesting_shares" => format!(
            "{} delegated {} to {}",
            field(body, "delegator"),
            field(body, "vesting_shares"),
            field(body, "delegatee")
        ),
        "custom_json" => {
            let by = first_posting_auth(body).unwrap_or("?");
            format!("custom_json {} by {by}", field(body, "id"))
        }
        "claim_reward_balance" => format!(
            "{} claimed {}, {}, {}",
            field(body, "account"),
            field(body, "reward_steem"),
            field(body, "reward_sbd"),
            field(body, "reward_vests")
        ),
        "account_witness_vote" => {
            let approve = body.get("approve").and_then(Value::as_bool).unwrap_or(true);
            let verb = if approve { "voted for" } else { "unvoted" };
            format!(
                "{} {verb} witness {}",
                field(body, "account"),
                field(body, "witness")
            )
        }
        "producer_reward" => format!(
            "{} produced block ({})",
            field(body, "producer"),
            field(body, "vesting_shares")
        ),
        "author_reward" => format!(
            "{} author reward for {}",
            field(body, "author"),
            field(body, "permlink")
        ),
        "curation_reward" => format!(
            "{} curation reward {}",
            field(body, "curator"),
            field(body, "reward")
        ),
        "fill_vesting_withdraw" => format!(
            "{} withdrew {} to {}",
            field(body, "from_account"),
            field(body, "deposited"),
            field(body, "to_account")
        ),
        other => other.replace('_', " "),
    }
}

fn first_posting_auth(body: &Value) -> Option<&str> {
    body.get("required_posting_auths")
        .and_then(Value::as_array)
        .and_then(|auths| auths.first())
        .and_then(Value::as_str)
        .or_else(|| {
            body.get("required_auths")
                .and_then(Value::as_array)
                .and_then(|auths| auths.first())
                .and_then(Value::as_str)
        })
}

const ACCOUNT_FIELDS: &[&str] = &[
    "voter",
    "author",
    "parent_author",
    "from",
    "to",
    "delegator",
    "delegatee",
    "account",
    "producer",
    "curator",
    "comment_author",
    "witness",
    "owner",
    "from_account",
    "to_account",
    "creator",
    "new_account_name",
];

/// Accounts an operation refers to, in field order, without duplicates
pub fn op_accounts(body: &Value) -> Vec<String> {
    let mut accounts: Vec<String> = Vec::new();

    let candidates = ACCOUNT_FIELDS
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .chain(first_posting_auth(body));

    for name in candidates {
        if !name.is_empty() && !accounts.iter().any(|a| a == name) {
            accounts.push(name.to_string());
        }
    }
    accounts
}
