use http::Uri;
use serde_derive::Deserialize;
use tracing::debug;

use crate::account::Account;
use crate::error::Error;

/// Response payload of the `cosmos.auth.v1beta1` accounts endpoint.
///
/// Only the two numeric fields are ever read, which keeps this resolver
/// independent of the public-key type embedded in the account record.
#[derive(Debug, Deserialize)]
struct QueryAccountResponse {
    account: Option<RawAccount>,
}

/// Ethermint-style chains wrap the base account in an `EthAccount`
/// envelope; plain chains return the fields at the top level.
#[derive(Debug, Deserialize)]
struct RawAccount {
    base_account: Option<RawBaseAccount>,
    account_number: Option<String>,
    sequence: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBaseAccount {
    account_number: Option<String>,
    sequence: Option<String>,
}

/// Uses the REST endpoint to retrieve the account number and sequence.
///
/// The result is valid for a single signing attempt only; callers must
/// re-query before any further attempt to pick up the advanced sequence.
pub async fn query_account(rest_address: &Uri, account_address: &str) -> Result<Account, Error> {
    if account_address.is_empty() {
        return Err(Error::empty_address());
    }

    let url = format!(
        "{}/cosmos/auth/v1beta1/accounts/{}",
        rest_address.to_string().trim_end_matches('/'),
        account_address
    );

    debug!("querying account state from {url}");

    let response = reqwest::get(&url)
        .await
        .map_err(|e| Error::http_request(url.clone(), e))?;

    // Querying for an account might fail, i.e. if the account doesn't
    // actually exist: the endpoint signals that with a 404.
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(Error::account_not_found(account_address.to_string()));
    }

    if !response.status().is_success() {
        return Err(Error::http_response(url, response.status().as_u16()));
    }

    let result: QueryAccountResponse = response
        .json()
        .await
        .map_err(|e| Error::http_response_body(url, e))?;

    let raw = match result.account {
        Some(raw) => raw,
        None => return Err(Error::empty_query_account(account_address.to_string())),
    };

    let account = account_from_raw(account_address, raw)?;

    debug!(
        sequence = %account.sequence,
        number = %account.number,
        "retrieved account",
    );

    Ok(account)
}

fn account_from_raw(address: &str, raw: RawAccount) -> Result<Account, Error> {
    match raw.base_account {
        Some(base) => account_from_fields(base.account_number, base.sequence),
        None if raw.account_number.is_some() || raw.sequence.is_some() => {
            account_from_fields(raw.account_number, raw.sequence)
        }
        None => Err(Error::empty_query_account(address.to_string())),
    }
}

// Absent fields decode as zero, per proto3 JSON zero-value omission.
fn account_from_fields(
    account_number: Option<String>,
    sequence: Option<String>,
) -> Result<Account, Error> {
    let number = parse_u64(account_number.as_deref().unwrap_or("0"))?;
    let sequence = parse_u64(sequence.as_deref().unwrap_or("0"))?;

    Ok(Account::new(number, sequence))
}

fn parse_u64(value: &str) -> Result<u64, Error> {
    value
        .parse::<u64>()
        .map_err(|e| Error::parse_int(value.to_string(), e))
}
