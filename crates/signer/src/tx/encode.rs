use ibc_proto::cosmos::tx::v1beta1::mode_info::{Single, Sum};
use ibc_proto::cosmos::tx::v1beta1::{AuthInfo, Fee, ModeInfo, SignDoc, SignerInfo, TxBody, TxRaw};
use ibc_proto::google::protobuf::Any;
use prost::Message;

use crate::account::{AccountNumber, AccountSequence};
use crate::config::types::{ChainId, Memo};
use crate::config::AddressType;
use crate::error::Error;
use crate::tx::types::SignedTx;

/// Type URL of the default Cosmos SDK secp256k1 public key.
pub const COSMOS_PUB_KEY_TYPE_URL: &str = "/cosmos.crypto.secp256k1.PubKey";

/// Protobuf-encode raw public-key bytes as the chain's `PubKey` message
/// body (a single `bytes` field). The byte content is untouched.
pub fn encode_key_bytes(pubkey: &[u8]) -> Result<Vec<u8>, Error> {
    let mut pk_buf = Vec::new();

    Message::encode(&pubkey.to_vec(), &mut pk_buf)
        .map_err(|e| Error::protobuf_encode("PublicKey".into(), e))?;

    Ok(pk_buf)
}

/// Wrap the encoded key under the type URL the chain's accounts require,
/// overriding the descriptor a generic client would infer, and pair it
/// with the resolved sequence in direct signing mode.
pub fn encode_signer_info(
    address_type: &AddressType,
    sequence: AccountSequence,
    key_bytes: Vec<u8>,
) -> Result<SignerInfo, Error> {
    let pk_type = match address_type {
        AddressType::Cosmos => COSMOS_PUB_KEY_TYPE_URL.to_string(),
        AddressType::Ethermint { pk_type } => pk_type.clone(),
    };

    let pk_any = Any {
        type_url: pk_type,
        value: key_bytes,
    };

    let single = Single { mode: 1 };
    let sum_single = Some(Sum::Single(single));
    let mode = Some(ModeInfo { sum: sum_single });
    let signer_info = SignerInfo {
        public_key: Some(pk_any),
        mode_info: mode,
        sequence: sequence.to_u64(),
    };

    Ok(signer_info)
}

/// Create the transaction body, preserving the caller's message order.
pub fn tx_body_and_bytes(proto_msgs: &[Any], memo: &Memo) -> Result<(TxBody, Vec<u8>), Error> {
    let body = TxBody {
        messages: proto_msgs.to_vec(),
        memo: memo.to_string(),
        timeout_height: 0_u64,
        extension_options: Vec::<Any>::new(),
        non_critical_extension_options: Vec::<Any>::new(),
    };

    // A protobuf serialization of a TxBody
    let mut body_buf = Vec::new();

    Message::encode(&body, &mut body_buf)
        .map_err(|e| Error::protobuf_encode(String::from("TxBody"), e))?;

    Ok((body, body_buf))
}

pub fn auth_info_and_bytes(signer_info: SignerInfo, fee: Fee) -> Result<(AuthInfo, Vec<u8>), Error> {
    #[allow(deprecated)]
    let auth_info = AuthInfo {
        signer_infos: vec![signer_info],
        fee: Some(fee),

        // Since Cosmos SDK v0.46.0
        tip: None,
    };

    // A protobuf serialization of a AuthInfo
    let mut auth_buf = Vec::new();

    Message::encode(&auth_info, &mut auth_buf)
        .map_err(|e| Error::protobuf_encode(String::from("AuthInfo"), e))?;

    Ok((auth_info, auth_buf))
}

/// The canonical signing payload: serialized body and auth info, the
/// chain identifier and the account number, in that fixed field order.
pub fn sign_doc_and_bytes(
    chain_id: &ChainId,
    account_number: AccountNumber,
    body_bytes: Vec<u8>,
    auth_info_bytes: Vec<u8>,
) -> Result<(SignDoc, Vec<u8>), Error> {
    let sign_doc = SignDoc {
        body_bytes,
        auth_info_bytes,
        chain_id: chain_id.to_string(),
        account_number: account_number.to_u64(),
    };

    // A protobuf serialization of a SignDoc
    let mut signdoc_buf = Vec::new();

    Message::encode(&sign_doc, &mut signdoc_buf)
        .map_err(|e| Error::protobuf_encode(String::from("SignDoc"), e))?;

    Ok((sign_doc, signdoc_buf))
}

/// Wrap the signed payload and the detached signature into the wire
/// envelope. The signature sits in the same position as the single
/// signer supplied to `AuthInfo`.
pub fn assemble_tx_raw(
    body_bytes: Vec<u8>,
    auth_info_bytes: Vec<u8>,
    signature: Vec<u8>,
) -> TxRaw {
    TxRaw {
        body_bytes,
        auth_info_bytes,
        signatures: vec![signature],
    }
}

pub fn encode_tx_raw(tx_raw: TxRaw) -> Result<Vec<u8>, Error> {
    let mut tx_bytes = Vec::new();
    Message::encode(&tx_raw, &mut tx_bytes)
        .map_err(|e| Error::protobuf_encode("Transaction".to_string(), e))?;

    Ok(tx_bytes)
}

/// Final wire bytes for a signed transaction.
pub fn encode_signed_tx(signed_tx: SignedTx) -> Result<Vec<u8>, Error> {
    let tx_raw = TxRaw {
        body_bytes: signed_tx.body_bytes,
        auth_info_bytes: signed_tx.auth_info_bytes,
        signatures: signed_tx.signatures,
    };

    encode_tx_raw(tx_raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::ETHSECP256K1_PUB_KEY_TYPE_URL;

    fn sample_pubkey() -> Vec<u8> {
        // A compressed secp256k1 point is 33 bytes.
        let mut pubkey = vec![0x02];
        pubkey.extend_from_slice(&[0xab; 32]);
        pubkey
    }

    #[test]
    fn key_encoding_preserves_byte_content() {
        let pubkey = sample_pubkey();
        let key_bytes = encode_key_bytes(&pubkey).unwrap();

        let decoded = Vec::<u8>::decode(key_bytes.as_slice()).unwrap();
        assert_eq!(decoded, pubkey);
    }

    #[test]
    fn retagging_changes_only_the_type_url() {
        let key_bytes = encode_key_bytes(&sample_pubkey()).unwrap();
        let sequence = AccountSequence::new(5);

        let cosmos =
            encode_signer_info(&AddressType::Cosmos, sequence, key_bytes.clone()).unwrap();
        let ethermint =
            encode_signer_info(&AddressType::ethermint(), sequence, key_bytes).unwrap();

        let cosmos_pk = cosmos.public_key.unwrap();
        let ethermint_pk = ethermint.public_key.unwrap();

        assert_eq!(cosmos_pk.type_url, COSMOS_PUB_KEY_TYPE_URL);
        assert_eq!(ethermint_pk.type_url, ETHSECP256K1_PUB_KEY_TYPE_URL);
        assert_eq!(cosmos_pk.value, ethermint_pk.value);
    }

    #[test]
    fn auth_info_embeds_the_resolved_sequence() {
        let key_bytes = encode_key_bytes(&sample_pubkey()).unwrap();
        let signer_info =
            encode_signer_info(&AddressType::ethermint(), AccountSequence::new(5), key_bytes)
                .unwrap();

        let fee = Fee {
            amount: vec![],
            gas_limit: 300_000,
            payer: "".to_string(),
            granter: "".to_string(),
        };

        let (_, auth_info_bytes) = auth_info_and_bytes(signer_info, fee).unwrap();

        let decoded = AuthInfo::decode(auth_info_bytes.as_slice()).unwrap();
        assert_eq!(decoded.signer_infos.len(), 1);
        assert_eq!(decoded.signer_infos[0].sequence, 5);
        assert_eq!(decoded.fee.unwrap().gas_limit, 300_000);
    }

    #[test]
    fn sign_doc_commits_to_chain_id_and_account_number() {
        let chain_id: ChainId = "oro_1336-1".parse().unwrap();

        let (sign_doc, sign_doc_bytes) = sign_doc_and_bytes(
            &chain_id,
            AccountNumber::new(12),
            vec![1, 2, 3],
            vec![4, 5, 6],
        )
        .unwrap();

        assert_eq!(sign_doc.account_number, 12);
        assert_eq!(sign_doc.chain_id, "oro_1336-1");

        let decoded = SignDoc::decode(sign_doc_bytes.as_slice()).unwrap();
        assert_eq!(decoded, sign_doc);
    }

    #[test]
    fn assembled_envelope_round_trips() {
        let tx_raw = assemble_tx_raw(vec![1, 2], vec![3, 4], vec![5, 6]);
        let tx_bytes = encode_tx_raw(tx_raw.clone()).unwrap();

        let decoded = TxRaw::decode(tx_bytes.as_slice()).unwrap();
        assert_eq!(decoded, tx_raw);
        assert_eq!(decoded.signatures.len(), 1);
    }
}
