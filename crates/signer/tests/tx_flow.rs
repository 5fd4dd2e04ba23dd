//! End-to-end pipeline tests against mock implementations of the two
//! external capabilities, the wallet signer and the broadcast transport.

use async_trait::async_trait;
use ibc_proto::cosmos::base::v1beta1::Coin;
use ibc_proto::cosmos::tx::v1beta1::{AuthInfo, SignDoc, TxRaw};
use prost::Message;
use subtle_encoding::base64;

use ethsecp_signer::account::Account;
use ethsecp_signer::config::types::Memo;
use ethsecp_signer::config::{AddressType, ChainConfig, GasPrice};
use ethsecp_signer::error::{Error, ErrorDetail};
use ethsecp_signer::signer::{
    DirectSignResponse, KeyAlgo, OfflineDirectSigner, SignerAccount,
};
use ethsecp_signer::tx::broadcast::{check_broadcast_response, TxBroadcaster, TxResponse};
use ethsecp_signer::tx::encode::{assemble_tx_raw, encode_tx_raw};
use ethsecp_signer::tx::gas::fee_from_gas;
use ethsecp_signer::tx::msgs::bank_msg_send;
use ethsecp_signer::tx::send::{build_unsigned_tx, send_tx, sign_tx};

const SENDER: &str = "kii1afxj87jjd4usd80gsprtq76uykv02egayark25";
const RECIPIENT: &str = "kii174hsj0ax02rvuf2fw52vu0080epdx6844c79xj";

fn test_config() -> ChainConfig {
    ChainConfig {
        id: "oro_1336-1".parse().unwrap(),
        // Unroutable on purpose: no test below is allowed to reach the
        // network, and any attempt fails loudly.
        rest_addr: "http://127.0.0.1:1".parse().unwrap(),
        gas_price: GasPrice::new(0.5, "akii".to_string()),
        address_type: AddressType::ethermint(),
    }
}

fn sample_pubkey() -> Vec<u8> {
    let mut pubkey = vec![0x03];
    pubkey.extend_from_slice(&[0x5c; 32]);
    pubkey
}

fn signer_account() -> SignerAccount {
    SignerAccount {
        address: SENDER.to_string(),
        pubkey: sample_pubkey(),
        algo: KeyAlgo::EthSecp256k1,
    }
}

fn one_token_send() -> Vec<ibc_proto::google::protobuf::Any> {
    vec![bank_msg_send(
        SENDER,
        RECIPIENT,
        vec![Coin {
            denom: "akii".to_string(),
            amount: "1".to_string(),
        }],
    )
    .unwrap()]
}

/// Signs by echoing the document back with a fixed detached signature,
/// the way a wallet that does not amend the document behaves.
struct MockSigner {
    accounts: Vec<SignerAccount>,
    signature: Vec<u8>,
}

impl MockSigner {
    fn with_key() -> Self {
        Self {
            accounts: vec![signer_account()],
            signature: vec![0x42; 64],
        }
    }

    fn without_keys() -> Self {
        Self {
            accounts: vec![],
            signature: vec![],
        }
    }
}

#[async_trait]
impl OfflineDirectSigner for MockSigner {
    async fn get_accounts(&self) -> Result<Vec<SignerAccount>, Error> {
        Ok(self.accounts.clone())
    }

    async fn sign_direct(
        &self,
        _address: &str,
        sign_doc: SignDoc,
    ) -> Result<DirectSignResponse, Error> {
        let signature = String::from_utf8(base64::encode(&self.signature)).unwrap();

        Ok(DirectSignResponse {
            signed: sign_doc,
            signature,
        })
    }
}

struct MockBroadcaster {
    code: u32,
    raw_log: String,
}

#[async_trait]
impl TxBroadcaster for MockBroadcaster {
    async fn broadcast_tx(&self, tx_bytes: Vec<u8>) -> Result<TxResponse, Error> {
        assert!(!tx_bytes.is_empty());

        Ok(TxResponse {
            code: self.code,
            tx_hash: "A6CFD5BE22AA4A2F1E495F1B162A3E4CF25D6F4CD6C67E4E2E4A7B9A2D3D8E01"
                .to_string(),
            raw_log: self.raw_log.clone(),
        })
    }
}

#[test]
fn sign_doc_commits_to_resolved_account_state() {
    let config = test_config();
    let account = Account::new(12, 5);
    let fee = fee_from_gas(&config.gas_price, 300_000);
    let memo = Memo::new("test".to_string()).unwrap();

    let unsigned = build_unsigned_tx(
        &config,
        &account,
        &sample_pubkey(),
        &one_token_send(),
        fee,
        &memo,
    )
    .unwrap();

    assert_eq!(unsigned.sign_doc.account_number, 12);
    assert_eq!(unsigned.sign_doc.chain_id, "oro_1336-1");
    assert_eq!(unsigned.body.memo, "test");

    let auth_info = AuthInfo::decode(unsigned.auth_info_bytes.as_slice()).unwrap();
    assert_eq!(auth_info.signer_infos[0].sequence, 5);
}

#[test]
fn identical_inputs_produce_identical_bytes() {
    let config = test_config();
    let account = Account::new(12, 5);
    let memo = Memo::new("test".to_string()).unwrap();

    let build = || {
        build_unsigned_tx(
            &config,
            &account,
            &sample_pubkey(),
            &one_token_send(),
            fee_from_gas(&config.gas_price, 300_000),
            &memo,
        )
        .unwrap()
    };

    let first = build();
    let second = build();

    assert_eq!(first.sign_doc_bytes, second.sign_doc_bytes);

    let signature = vec![0x42; 64];
    let first_tx = encode_tx_raw(assemble_tx_raw(
        first.body_bytes,
        first.auth_info_bytes,
        signature.clone(),
    ))
    .unwrap();
    let second_tx = encode_tx_raw(assemble_tx_raw(
        second.body_bytes,
        second.auth_info_bytes,
        signature,
    ))
    .unwrap();

    assert_eq!(first_tx, second_tx);
}

#[tokio::test]
async fn assembled_tx_round_trips_to_what_the_signer_signed() {
    let config = test_config();
    let signer = MockSigner::with_key();
    let account = Account::new(12, 5);
    let memo = Memo::new("test".to_string()).unwrap();

    let signed_tx = sign_tx(
        &config,
        &signer,
        &signer_account(),
        &account,
        &one_token_send(),
        fee_from_gas(&config.gas_price, 300_000),
        &memo,
    )
    .await
    .unwrap();

    assert_eq!(signed_tx.signatures, vec![vec![0x42; 64]]);

    let tx_bytes = encode_tx_raw(assemble_tx_raw(
        signed_tx.body_bytes.clone(),
        signed_tx.auth_info_bytes.clone(),
        signed_tx.signatures[0].clone(),
    ))
    .unwrap();

    let decoded = TxRaw::decode(tx_bytes.as_slice()).unwrap();
    assert_eq!(decoded.body_bytes, signed_tx.body_bytes);
    assert_eq!(decoded.auth_info_bytes, signed_tx.auth_info_bytes);
    assert_eq!(decoded.signatures.len(), 1);

    // The signed document embeds the resolved account state.
    let auth_info = AuthInfo::decode(decoded.auth_info_bytes.as_slice()).unwrap();
    assert_eq!(auth_info.signer_infos[0].sequence, 5);
}

#[tokio::test]
async fn rejected_broadcast_surfaces_the_raw_log() {
    let config = test_config();
    let signer = MockSigner::with_key();
    let account = Account::new(12, 5);
    let memo = Memo::new("test".to_string()).unwrap();

    let signed_tx = sign_tx(
        &config,
        &signer,
        &signer_account(),
        &account,
        &one_token_send(),
        fee_from_gas(&config.gas_price, 300_000),
        &memo,
    )
    .await
    .unwrap();

    let tx_bytes = encode_tx_raw(assemble_tx_raw(
        signed_tx.body_bytes,
        signed_tx.auth_info_bytes,
        signed_tx.signatures[0].clone(),
    ))
    .unwrap();

    let broadcaster = MockBroadcaster {
        code: 5,
        raw_log: "insufficient funds: insufficient account funds".to_string(),
    };

    let response = broadcaster.broadcast_tx(tx_bytes).await.unwrap();
    let err = check_broadcast_response(response).unwrap_err();

    match err.detail() {
        ErrorDetail::CheckTx(detail) => {
            assert_eq!(detail.code, 5);
            assert_eq!(
                detail.raw_log,
                "insufficient funds: insufficient account funds"
            );
        }
        detail => panic!("unexpected error detail: {detail:?}"),
    }
}

#[tokio::test]
async fn missing_signer_key_fails_before_any_account_query() {
    let config = test_config();
    let signer = MockSigner::without_keys();
    let broadcaster = MockBroadcaster {
        code: 0,
        raw_log: String::new(),
    };
    let memo = Memo::new("test".to_string()).unwrap();

    let err = send_tx(
        &config,
        &signer,
        &broadcaster,
        SENDER,
        &one_token_send(),
        fee_from_gas(&config.gas_price, 300_000),
        &memo,
    )
    .await
    .unwrap_err();

    // An `HttpRequest` detail here would mean the pipeline reached the
    // (unroutable) REST endpoint before checking the local precondition.
    assert!(matches!(err.detail(), ErrorDetail::MissingSignerKey(_)));
}

#[tokio::test]
async fn empty_signer_pubkey_is_rejected() {
    let config = test_config();

    let mut signer = MockSigner::with_key();
    signer.accounts[0].pubkey = Vec::new();

    let broadcaster = MockBroadcaster {
        code: 0,
        raw_log: String::new(),
    };
    let memo = Memo::default();

    let err = send_tx(
        &config,
        &signer,
        &broadcaster,
        SENDER,
        &one_token_send(),
        fee_from_gas(&config.gas_price, 300_000),
        &memo,
    )
    .await
    .unwrap_err();

    assert!(matches!(err.detail(), ErrorDetail::EmptySignerPubkey(_)));
}
