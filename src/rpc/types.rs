use super::helper::*;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// Wire types (condenser_api)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RpcErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorBody>,
}

impl<T> RpcResponse<T> {
    /// `Ok(None)` means the node answered with a `null` result
    pub fn into_result(self) -> Result<Option<T>> {
        if let Some(err) = self.error {
            return Err(anyhow!("RPC error {}: {}", err.code, err.message));
        }
        Ok(self.result)
    }
}

/// Operation as `[name, body]`
pub type RawOperation = (String, Value);

#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub ref_block_num: u32,
    #[serde(default)]
    pub ref_block_prefix: u64,
    #[serde(default)]
    pub expiration: String,
    #[serde(default)]
    pub operations: Vec<RawOperation>,
    #[serde(default)]
    pub signatures: Vec<String>,
    pub transaction_id: Option<String>,
    pub block_num: Option<u64>,
    pub transaction_num: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    #[serde(default)]
    pub previous: String,
    pub timestamp: String,
    pub witness: String,
    #[serde(default)]
    pub transaction_merkle_root: String,
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
    #[serde(default)]
    pub block_id: String,
    #[serde(default)]
    pub signing_key: String,
    #[serde(default)]
    pub transaction_ids: Vec<String>,
}

/// Operation as returned by get_ops_in_block and get_account_history
#[derive(Debug, Clone, Deserialize)]
pub struct RawAppliedOp {
    #[serde(default)]
    pub trx_id: String,
    #[serde(default)]
    pub block: u64,
    #[serde(default)]
    pub timestamp: String,
    pub op: RawOperation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAccount {
    pub name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default, deserialize_with = "de_lenient_i64")]
    pub reputation: i64,
    #[serde(default)]
    pub post_count: u64,
    #[serde(default)]
    pub balance: String,
    #[serde(default)]
    pub savings_balance: String,
    #[serde(default)]
    pub sbd_balance: String,
    #[serde(default)]
    pub savings_sbd_balance: String,
    #[serde(default)]
    pub vesting_shares: String,
    #[serde(default)]
    pub delegated_vesting_shares: String,
    #[serde(default)]
    pub received_vesting_shares: String,
    #[serde(default)]
    pub recovery_account: String,
    #[serde(default)]
    pub proxy: String,
    #[serde(default)]
    pub witness_votes: Vec<String>,
    #[serde(default)]
    pub json_metadata: String,
    #[serde(default)]
    pub posting_json_metadata: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DynamicGlobalProperties {
    pub head_block_number: u64,
    #[serde(default)]
    pub head_block_id: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub current_witness: String,
    #[serde(default)]
    pub last_irreversible_block_num: u64,
    #[serde(default)]
    pub virtual_supply: String,
    #[serde(default)]
    pub current_supply: String,
    #[serde(default)]
    pub current_sbd_supply: String,
    #[serde(default)]
    pub total_vesting_fund_steem: String,
    #[serde(default)]
    pub total_vesting_shares: String,
}

impl DynamicGlobalProperties {
    /// STEEM per VESTS at the current vesting price
    pub fn vesting_price(&self) -> (f64, f64) {
        (
            Asset::parse_or_zero(&self.total_vesting_fund_steem, "STEEM").amount,
            Asset::parse_or_zero(&self.total_vesting_shares, "VESTS").amount,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPrice {
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub quote: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWitness {
    pub owner: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "de_lenient_i64")]
    pub votes: i64,
    #[serde(default)]
    pub total_missed: u64,
    #[serde(default)]
    pub last_confirmed_block_num: u64,
    #[serde(default)]
    pub signing_key: String,
    #[serde(default)]
    pub running_version: String,
    pub sbd_exchange_rate: Option<RawPrice>,
}

// ============================================================================
// Display types
// ============================================================================

/// One operation, flattened for list views
#[derive(Debug, Clone, PartialEq)]
pub struct OpSummary {
    pub name: String,
    pub description: String,
    /// Accounts referenced by the operation, first one is the actor
    pub accounts: Vec<String>,
    /// None for virtual ops without a parent transaction
    pub trx_id: Option<String>,
    pub block: Option<u64>,
    pub timestamp: Option<u64>,
    pub is_virtual: bool,
}

impl OpSummary {
    pub fn from_op(op: &RawOperation, trx_id: Option<&str>) -> Self {
        let (name, body) = op;
        Self {
            name: name.clone(),
            description: describe_op(name, body),
            accounts: op_accounts(body),
            trx_id: trx_id
                .filter(|id| !id.is_empty() && *id != NULL_TRX_ID)
                .map(str::to_string),
            block: None,
            timestamp: None,
            is_virtual: false,
        }
    }

    pub fn from_applied(raw: &RawAppliedOp, is_virtual: bool) -> Self {
        let mut summary = Self::from_op(&raw.op, Some(&raw.trx_id));
        summary.block = (raw.block > 0).then_some(raw.block);
        summary.timestamp = parse_steem_time(&raw.timestamp);
        summary.is_virtual = is_virtual;
        summary
    }
}

#[derive(Debug, Clone)]
pub struct BlockInfo {
    pub number: u64,
    pub block_id: String,
    pub previous: String,
    pub timestamp: u64,
    pub witness: String,
    pub merkle_root: String,
    pub signing_key: String,
    pub tx_count: usize,
    /// Operations of all transactions in block order
    pub operations: Vec<OpSummary>,
    pub virtual_ops: Vec<OpSummary>,
}

impl BlockInfo {
    pub fn from_raw(number: u64, raw: &RawBlock, virtual_ops: Vec<OpSummary>) -> Self {
        let mut operations = Vec::new();
        for (i, tx) in raw.transactions.iter().enumerate() {
            let trx_id = tx
                .transaction_id
                .as_deref()
                .or_else(|| raw.transaction_ids.get(i).map(String::as_str));
            for op in &tx.operations {
                let mut summary = OpSummary::from_op(op, trx_id);
                summary.block = Some(number);
                operations.push(summary);
            }
        }

        Self {
            number,
            block_id: raw.block_id.clone(),
            previous: raw.previous.clone(),
            timestamp: parse_steem_time(&raw.timestamp).unwrap_or(0),
            witness: raw.witness.clone(),
            merkle_root: raw.transaction_merkle_root.clone(),
            signing_key: raw.signing_key.clone(),
            tx_count: raw.transactions.len(),
            operations,
            virtual_ops,
        }
    }
}

/// Block row for the live latest-blocks list
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSummary {
    pub number: u64,
    pub witness: String,
    pub timestamp: u64,
    pub tx_count: usize,
    pub op_count: usize,
    /// Set when the block arrived in the most recent refresh
    pub is_new: bool,
}

impl BlockSummary {
    pub fn from_raw(number: u64, raw: &RawBlock) -> Self {
        Self {
            number,
            witness: raw.witness.clone(),
            timestamp: parse_steem_time(&raw.timestamp).unwrap_or(0),
            tx_count: raw.transactions.len(),
            op_count: raw.transactions.iter().map(|t| t.operations.len()).sum(),
            is_new: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TxInfo {
    pub id: String,
    pub block_num: Option<u64>,
    pub transaction_num: Option<u32>,
    pub ref_block_num: u32,
    pub ref_block_prefix: u64,
    pub expiration: Option<u64>,
    pub signatures: usize,
    pub operations: Vec<OpSummary>,
}

impl TxInfo {
    pub fn from_raw(id: &str, raw: &RawTransaction) -> Self {
        let id = raw.transaction_id.clone().unwrap_or_else(|| id.to_string());
        let operations = raw
            .operations
            .iter()
            .map(|op| {
                let mut summary = OpSummary::from_op(op, Some(&id));
                summary.block = raw.block_num;
                summary
            })
            .collect();

        Self {
            block_num: raw.block_num,
            transaction_num: raw.transaction_num,
            ref_block_num: raw.ref_block_num,
            ref_block_prefix: raw.ref_block_prefix,
            expiration: parse_steem_time(&raw.expiration),
            signatures: raw.signatures.len(),
            operations,
            id,
        }
    }
}

/// Profile fields from the account's JSON metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub name: Option<String>,
    pub about: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

impl Profile {
    /// Reads `profile` from posting metadata, then from legacy metadata.
    /// Malformed JSON yields an empty profile.
    pub fn from_metadata(posting: &str, legacy: &str) -> Self {
        [posting, legacy]
            .iter()
            .filter_map(|s| serde_json::from_str::<Value>(s).ok())
            .find_map(|v| v.get("profile").cloned())
            .map(|p| {
                let text = |key: &str| {
                    p.get(key)
                        .and_then(Value::as_str)
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                };
                Self {
                    name: text("name"),
                    about: text("about"),
                    location: text("location"),
                    website: text("website"),
                }
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct AccountInfo {
    pub name: String,
    pub created: Option<u64>,
    pub reputation: f64,
    pub post_count: u64,
    pub profile: Profile,
    pub balance: Asset,
    pub sbd_balance: Asset,
    pub savings_balance: Asset,
    pub savings_sbd_balance: Asset,
    pub own_sp: f64,
    pub delegated_out_sp: f64,
    pub received_sp: f64,
    pub own_vests: f64,
    pub recovery_account: String,
    pub proxy: Option<String>,
    pub witness_votes: Vec<String>,
    /// Most recent first
    pub history: Vec<OpSummary>,
}

impl AccountInfo {
    pub fn from_raw(
        raw: &RawAccount,
        props: &DynamicGlobalProperties,
        history: Vec<OpSummary>,
    ) -> Self {
        let (fund, shares) = props.vesting_price();
        let vests = |s: &str| Asset::parse_or_zero(s, "VESTS").amount;
        let own_vests = vests(&raw.vesting_shares);

        Self {
            name: raw.name.clone(),
            created: parse_steem_time(&raw.created),
            reputation: reputation_score(raw.reputation),
            post_count: raw.post_count,
            profile: Profile::from_metadata(&raw.posting_json_metadata, &raw.json_metadata),
            balance: Asset::parse_or_zero(&raw.balance, "STEEM"),
            sbd_balance: Asset::parse_or_zero(&raw.sbd_balance, "SBD"),
            savings_balance: Asset::parse_or_zero(&raw.savings_balance, "STEEM"),
            savings_sbd_balance: Asset::parse_or_zero(&raw.savings_sbd_balance, "SBD"),
            own_sp: vests_to_sp(own_vests, fund, shares),
            delegated_out_sp: vests_to_sp(vests(&raw.delegated_vesting_shares), fund, shares),
            received_sp: vests_to_sp(vests(&raw.received_vesting_shares), fund, shares),
            own_vests,
            recovery_account: raw.recovery_account.clone(),
            proxy: Some(raw.proxy.clone()).filter(|p| !p.is_empty()),
            witness_votes: raw.witness_votes.clone(),
            history,
        }
    }

    /// Own SP plus received delegations minus outgoing delegations
    pub fn effective_sp(&self) -> f64 {
        self.own_sp + self.received_sp - self.delegated_out_sp
    }
}

#[derive(Debug, Clone)]
pub struct NetworkInfo {
    pub head_block: u64,
    pub irreversible_block: u64,
    pub current_witness: String,
    pub time: Option<u64>,
    pub current_supply: Asset,
    pub sbd_supply: Asset,
    pub virtual_supply: Asset,
    pub total_vesting_fund: Asset,
    pub total_vesting_shares: Asset,
}

impl NetworkInfo {
    pub fn from_raw(props: &DynamicGlobalProperties) -> Self {
        Self {
            head_block: props.head_block_number,
            irreversible_block: props.last_irreversible_block_num,
            current_witness: props.current_witness.clone(),
            time: parse_steem_time(&props.time),
            current_supply: Asset::parse_or_zero(&props.current_supply, "STEEM"),
            sbd_supply: Asset::parse_or_zero(&props.current_sbd_supply, "SBD"),
            virtual_supply: Asset::parse_or_zero(&props.virtual_supply, "STEEM"),
            total_vesting_fund: Asset::parse_or_zero(&props.total_vesting_fund_steem, "STEEM"),
            total_vesting_shares: Asset::parse_or_zero(&props.total_vesting_shares, "VESTS"),
        }
    }

    /// STEEM backing one million VESTS
    pub fn steem_per_mvests(&self) -> f64 {
        vests_to_sp(
            1_000_000.0,
            self.total_vesting_fund.amount,
            self.total_vesting_shares.amount,
        )
    }

    /// Blocks between head and last irreversible
    pub fn irreversible_lag(&self) -> u64 {
        self.head_block.saturating_sub(self.irreversible_block)
    }
}

#[derive(Debug, Clone)]
pub struct WitnessInfo {
    pub rank: usize,
    pub owner: String,
    /// Approval weight in MVESTS
    pub votes_mvests: f64,
    pub total_missed: u64,
    pub last_confirmed_block: u64,
    pub url: String,
    pub version: String,
    /// Published STEEM price in SBD
    pub price_feed: Option<f64>,
    pub active: bool,
}

impl WitnessInfo {
    pub fn from_raw(rank: usize, raw: &RawWitness) -> Self {
        let price_feed = raw.sbd_exchange_rate.as_ref().and_then(|rate| {
            let base = Asset::parse(&rate.base)?;
            let quote = Asset::parse(&rate.quote)?;
            (quote.amount > 0.0).then(|| base.amount / quote.amount)
        });

        Self {
            rank,
            owner: raw.owner.clone(),
            // votes are raw vests with 6 decimals
            votes_mvests: raw.votes as f64 / 1e12,
            total_missed: raw.total_missed,
            last_confirmed_block: raw.last_confirmed_block_num,
            url: raw.url.clone(),
            version: raw.running_version.clone(),
            price_feed,
            active: !raw.signing_key.is_empty() && raw.signing_key != NULL_SIGNING_KEY,
        }
    }
}
