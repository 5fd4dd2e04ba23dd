//! Disposable example caller for the signing pipeline.
//!
//! Stands in for the browser wallet UI: a stub signer plays the role of
//! the wallet extension so the whole flow runs offline. A real
//! integration implements `OfflineDirectSigner` on top of the wallet
//! bridge and `TxBroadcaster` on top of the chain client, then calls
//! `tx::send::send_tx` with a freshly-resolved account.

use async_trait::async_trait;
use ibc_proto::cosmos::base::v1beta1::Coin;
use ibc_proto::cosmos::tx::v1beta1::SignDoc;
use subtle_encoding::base64;

use ethsecp_signer::account::Account;
use ethsecp_signer::config::types::Memo;
use ethsecp_signer::config::{AddressType, ChainConfig, GasPrice};
use ethsecp_signer::error::Error;
use ethsecp_signer::signer::{DirectSignResponse, KeyAlgo, OfflineDirectSigner, SignerAccount};
use ethsecp_signer::tx::encode::{assemble_tx_raw, encode_tx_raw};
use ethsecp_signer::tx::gas::fee_from_gas;
use ethsecp_signer::tx::msgs::bank_msg_send;
use ethsecp_signer::tx::send::sign_tx;

const SENDER: &str = "kii1afxj87jjd4usd80gsprtq76uykv02egayark25";
const RECIPIENT: &str = "kii174hsj0ax02rvuf2fw52vu0080epdx6844c79xj";

/// Echoes the document back with a placeholder signature. A wallet
/// bridge would forward the document to the extension instead.
struct StubSigner;

#[async_trait]
impl OfflineDirectSigner for StubSigner {
    async fn get_accounts(&self) -> Result<Vec<SignerAccount>, Error> {
        let mut pubkey = vec![0x02];
        pubkey.extend_from_slice(&[0x11; 32]);

        Ok(vec![SignerAccount {
            address: SENDER.to_string(),
            pubkey,
            algo: KeyAlgo::EthSecp256k1,
        }])
    }

    async fn sign_direct(
        &self,
        _address: &str,
        sign_doc: SignDoc,
    ) -> Result<DirectSignResponse, Error> {
        let signature = String::from_utf8(base64::encode(vec![0u8; 64])).unwrap();

        Ok(DirectSignResponse {
            signed: sign_doc,
            signature,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = ChainConfig {
        id: "oro_1336-1".parse().map_err(Error::config)?,
        rest_addr: "https://lcd.uno.sentry.testnet.v3.kiivalidator.com"
            .parse()
            .expect("valid URI"),
        gas_price: GasPrice::new(0.025, "akii".to_string()),
        address_type: AddressType::ethermint(),
    };

    let signer = StubSigner;
    let signer_account = ethsecp_signer::signer::find_signer_account(&signer, SENDER).await?;

    // A real caller resolves this per attempt:
    // `query::account::query_account(&config.rest_addr, SENDER).await?`
    let account = Account::new(12, 5);

    let messages = vec![bank_msg_send(
        SENDER,
        RECIPIENT,
        vec![Coin {
            denom: "akii".to_string(),
            amount: "1000000000000000000".to_string(),
        }],
    )?];

    let fee = fee_from_gas(&config.gas_price, 300_000);
    let memo = Memo::new("test".to_string()).map_err(Error::config)?;

    let signed_tx = sign_tx(
        &config,
        &signer,
        &signer_account,
        &account,
        &messages,
        fee,
        &memo,
    )
    .await?;

    let tx_bytes = encode_tx_raw(assemble_tx_raw(
        signed_tx.body_bytes,
        signed_tx.auth_info_bytes,
        signed_tx.signatures[0].clone(),
    ))?;

    println!(
        "assembled a {} byte transaction for broadcast: {}",
        tx_bytes.len(),
        String::from_utf8(base64::encode(&tx_bytes)).unwrap()
    );

    Ok(())
}
