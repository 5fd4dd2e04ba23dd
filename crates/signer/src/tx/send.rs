use ibc_proto::cosmos::tx::v1beta1::{AuthInfo, Fee, TxBody};
use ibc_proto::google::protobuf::Any;
use prost::Message;
use tracing::{debug, info};

use crate::account::Account;
use crate::config::types::Memo;
use crate::config::ChainConfig;
use crate::error::Error;
use crate::query::account::query_account;
use crate::signer::{find_signer_account, OfflineDirectSigner, SignerAccount};
use crate::tx::broadcast::{check_broadcast_response, TxBroadcaster, TxResponse};
use crate::tx::encode::{
    auth_info_and_bytes, encode_key_bytes, encode_signed_tx, encode_signer_info,
    sign_doc_and_bytes, tx_body_and_bytes,
};
use crate::tx::types::{SignedTx, UnsignedTx};

/// Build the transaction body, auth info and canonical signing payload
/// for the given account state and signer public key.
pub fn build_unsigned_tx(
    config: &ChainConfig,
    account: &Account,
    signer_pubkey: &[u8],
    messages: &[Any],
    fee: Fee,
    memo: &Memo,
) -> Result<UnsignedTx, Error> {
    let key_bytes = encode_key_bytes(signer_pubkey)?;

    let signer_info = encode_signer_info(&config.address_type, account.sequence, key_bytes)?;

    let (body, body_bytes) = tx_body_and_bytes(messages, memo)?;

    let (auth_info, auth_info_bytes) = auth_info_and_bytes(signer_info, fee)?;

    let (sign_doc, sign_doc_bytes) = sign_doc_and_bytes(
        &config.id,
        account.number,
        body_bytes.clone(),
        auth_info_bytes.clone(),
    )?;

    Ok(UnsignedTx {
        body,
        body_bytes,
        auth_info,
        auth_info_bytes,
        sign_doc,
        sign_doc_bytes,
    })
}

/// Build a transaction and have the external signer sign it.
///
/// The returned transaction carries the body and auth-info bytes from the
/// signer's response rather than the locally-built ones: the document the
/// signer signed over is authoritative, and assembling anything else
/// would invalidate the signature. The returned bytes are decoded back
/// into their domain types, which also validates them.
pub async fn sign_tx<S>(
    config: &ChainConfig,
    signer: &S,
    signer_account: &SignerAccount,
    account: &Account,
    messages: &[Any],
    fee: Fee,
    memo: &Memo,
) -> Result<SignedTx, Error>
where
    S: OfflineDirectSigner + Sync,
{
    let unsigned = build_unsigned_tx(config, account, &signer_account.pubkey, messages, fee, memo)?;

    debug!(
        sequence = %account.sequence,
        number = %account.number,
        "requesting signature over sign doc",
    );

    let response = signer
        .sign_direct(&signer_account.address, unsigned.sign_doc)
        .await?;

    let signature = response.signature_bytes()?;

    let body = TxBody::decode(response.signed.body_bytes.as_slice())
        .map_err(|e| Error::protobuf_decode("TxBody".to_string(), e))?;
    let auth_info = AuthInfo::decode(response.signed.auth_info_bytes.as_slice())
        .map_err(|e| Error::protobuf_decode("AuthInfo".to_string(), e))?;

    Ok(SignedTx {
        body,
        body_bytes: response.signed.body_bytes,
        auth_info,
        auth_info_bytes: response.signed.auth_info_bytes,
        signatures: vec![signature],
    })
}

/// Send a transaction end to end: check the signer key, resolve fresh
/// account state, build and sign the payload, assemble the envelope and
/// broadcast it.
///
/// Every failure is terminal for this attempt, and nothing is retried
/// with the already-fetched sequence; a manual retry re-resolves the
/// account and picks up a fresh one.
pub async fn send_tx<S, B>(
    config: &ChainConfig,
    signer: &S,
    broadcaster: &B,
    signer_address: &str,
    messages: &[Any],
    fee: Fee,
    memo: &Memo,
) -> Result<TxResponse, Error>
where
    S: OfflineDirectSigner + Sync,
    B: TxBroadcaster + Sync,
{
    // Local precondition, checked before touching the network.
    let signer_account = find_signer_account(signer, signer_address).await?;

    let account = query_account(&config.rest_addr, signer_address).await?;

    let signed_tx = sign_tx(
        config,
        signer,
        &signer_account,
        &account,
        messages,
        fee,
        memo,
    )
    .await?;

    let tx_bytes = encode_signed_tx(signed_tx)?;

    debug!("broadcasting transaction of {} bytes", tx_bytes.len());

    let response = check_broadcast_response(broadcaster.broadcast_tx(tx_bytes).await?)?;

    info!(tx_hash = %response.tx_hash, "transaction accepted by the chain");

    Ok(response)
}
