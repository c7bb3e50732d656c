mod helper;
mod types;

pub use helper::{
    describe_op, op_accounts, parse_steem_time, reputation_score, vests_to_sp, Asset,
    NULL_SIGNING_KEY, NULL_TRX_ID,
};
pub use types::*;

use anyhow::{anyhow, bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::sleep;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const ACCOUNT_HISTORY_LIMIT: u32 = 20;

/// Steem JSON-RPC client with retry logic for rate-limited endpoints
#[derive(Debug, Clone)]
pub struct SteemClient {
    http: reqwest::Client,
    url: String,
    max_retries: u32,
    base_delay: Duration,
}

/// Whether an error chain looks transient (rate limit, timeout, gateway)
fn is_retryable(error_full: &str) -> bool {
    let error_lower = error_full.to_lowercase();
    error_lower.contains("rate")
        || error_lower.contains("limit")
        || error_lower.contains("429")
        || error_lower.contains("too many")
        || error_lower.contains("timeout")
        || error_lower.contains("timed out")
        || error_lower.contains("connection")
        || error_lower.contains("temporarily")
        || error_lower.contains("unavailable")
        || error_lower.contains("502")
        || error_lower.contains("503")
        || error_lower.contains("504")
}

impl SteemClient {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url = reqwest::Url::parse(rpc_url).context("Invalid RPC URL")?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Unsupported RPC URL scheme: {}", url.scheme());
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            url: url.to_string(),
            max_retries: 5,
            base_delay: Duration::from_millis(500),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn with_retry<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut all_errors: Vec<String> = Vec::new();

        for attempt in 0..=self.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    let error_full = format!("{e:#}");
                    all_errors.push(format!("Attempt {}: {}", attempt + 1, error_full));

                    if is_retryable(&error_full) && attempt < self.max_retries {
                        let delay = self.base_delay * 2_u32.pow(attempt);
                        log::warn!("retrying in {delay:?}: {error_full}");
                        sleep(delay).await;
                    } else {
                        if all_errors.len() > 1 {
                            return Err(anyhow!(
                                "{:#}\n\nAll attempts:\n{}",
                                e,
                                all_errors.join("\n")
                            ));
                        }
                        return Err(e);
                    }
                }
            }
        }

        Err(anyhow!(
            "All {} retries failed:\n{}",
            self.max_retries + 1,
            all_errors.join("\n")
        ))
    }

    /// Single JSON-RPC call. `Ok(None)` when the node returns `null`.
    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<Option<T>> {
        log::debug!("-> {method} {params}");

        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("RPC call {method} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("RPC call {method} returned HTTP {status}");
        }

        let envelope: RpcResponse<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to decode {method} response"))?;

        envelope
            .into_result()
            .with_context(|| format!("RPC call {method} failed"))
    }

    async fn get_raw_block(&self, number: u64) -> Result<RawBlock> {
        self.with_retry(|| async {
            self.call::<RawBlock>("condenser_api.get_block", json!([number]))
                .await?
                .ok_or_else(|| anyhow!("Block #{number} not found or doesn't exist yet"))
        })
        .await
    }

    /// Block with its transactions' operations and virtual operations
    pub async fn get_block(&self, number: u64) -> Result<BlockInfo> {
        let raw = self
            .get_raw_block(number)
            .await
            .with_context(|| format!("Failed to fetch block #{number}"))?;

        // Virtual ops are optional on the block page
        let virtual_ops = match self.get_ops_in_block(number, true).await {
            Ok(ops) => ops,
            Err(e) => {
                log::warn!("virtual ops for block {number} unavailable: {e:#}");
                Vec::new()
            }
        };

        Ok(BlockInfo::from_raw(number, &raw, virtual_ops))
    }

    pub async fn get_ops_in_block(&self, number: u64, virtual_only: bool) -> Result<Vec<OpSummary>> {
        let raw: Vec<RawAppliedOp> = self
            .with_retry(|| async {
                self.call::<Vec<RawAppliedOp>>("condenser_api.get_ops_in_block", json!([number, virtual_only]))
                    .await
                    .map(Option::unwrap_or_default)
            })
            .await
            .with_context(|| format!("Failed to fetch operations of block #{number}"))?;

        Ok(raw
            .iter()
            .map(|op| OpSummary::from_applied(op, virtual_only))
            .collect())
    }

    pub async fn get_transaction(&self, id: &str) -> Result<TxInfo> {
        let raw: RawTransaction = self
            .with_retry(|| async {
                self.call::<RawTransaction>("condenser_api.get_transaction", json!([id]))
                    .await?
                    .ok_or_else(|| anyhow!("Transaction {id} not found"))
            })
            .await
            .with_context(|| format!("Failed to fetch transaction {id}"))?;

        Ok(TxInfo::from_raw(id, &raw))
    }

    pub async fn get_dynamic_global_properties(&self) -> Result<DynamicGlobalProperties> {
        self.with_retry(|| async {
            self.call::<DynamicGlobalProperties>("condenser_api.get_dynamic_global_properties", json!([]))
                .await?
                .ok_or_else(|| anyhow!("Node returned no global properties"))
        })
        .await
        .context("Failed to fetch dynamic global properties")
    }

    /// Account with balances converted to SP and its recent history
    pub async fn get_account(&self, name: &str) -> Result<AccountInfo> {
        let accounts: Vec<RawAccount> = self
            .with_retry(|| async {
                self.call::<Vec<RawAccount>>("condenser_api.get_accounts", json!([[name]]))
                    .await
                    .map(Option::unwrap_or_default)
            })
            .await
            .with_context(|| format!("Failed to fetch account @{name}"))?;

        let raw = accounts
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Account @{name} not found"))?;

        let props = self.get_dynamic_global_properties().await?;

        let history = match self.get_account_history(name, ACCOUNT_HISTORY_LIMIT).await {
            Ok(history) => history,
            Err(e) => {
                log::warn!("history for @{name} unavailable: {e:#}");
                Vec::new()
            }
        };

        Ok(AccountInfo::from_raw(&raw, &props, history))
    }

    /// Most recent operations of an account, newest first
    pub async fn get_account_history(&self, name: &str, limit: u32) -> Result<Vec<OpSummary>> {
        let raw: Vec<(u64, RawAppliedOp)> = self
            .with_retry(|| async {
                self.call::<Vec<(u64, RawAppliedOp)>>("condenser_api.get_account_history", json!([name, -1, limit]))
                    .await
                    .map(Option::unwrap_or_default)
            })
            .await
            .with_context(|| format!("Failed to fetch history of @{name}"))?;

        Ok(raw
            .iter()
            .rev()
            .map(|(_, op)| OpSummary::from_applied(op, false))
            .collect())
    }

    pub async fn get_network_info(&self) -> Result<NetworkInfo> {
        let props = self.get_dynamic_global_properties().await?;
        Ok(NetworkInfo::from_raw(&props))
    }

    /// Fetch `count` blocks ending at `head` concurrently, newest first.
    /// Blocks that fail to load are skipped.
    pub async fn get_latest_blocks(&self, head: u64, count: u64) -> Vec<BlockSummary> {
        if count == 0 || head == 0 {
            return Vec::new();
        }

        let mut set = JoinSet::new();
        for number in (head.saturating_sub(count - 1).max(1)..=head).rev() {
            let client = self.clone();
            set.spawn(async move {
                let result = client.get_raw_block(number).await;
                (number, result)
            });
        }

        let mut blocks = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((number, Ok(raw))) => blocks.push(BlockSummary::from_raw(number, &raw)),
                Ok((number, Err(e))) => log::debug!("latest block {number} skipped: {e:#}"),
                Err(e) => log::warn!("latest block task failed: {e}"),
            }
        }

        blocks.sort_by(|a, b| b.number.cmp(&a.number));
        blocks
    }

    /// Witnesses ordered by approval weight
    pub async fn get_witnesses(&self, limit: u32) -> Result<Vec<WitnessInfo>> {
        let raw: Vec<RawWitness> = self
            .with_retry(|| async {
                self.call::<Vec<RawWitness>>("condenser_api.get_witnesses_by_vote", json!(["", limit]))
                    .await
                    .map(Option::unwrap_or_default)
            })
            .await
            .context("Failed to fetch witness ranking")?;

        Ok(raw
            .iter()
            .enumerate()
            .map(|(i, w)| WitnessInfo::from_raw(i + 1, w))
            .collect())
    }
}
