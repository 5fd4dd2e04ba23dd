//! Capability interface of the external wallet signer.

use async_trait::async_trait;
use ibc_proto::cosmos::tx::v1beta1::SignDoc;
use strum::Display;
use subtle_encoding::base64;

use crate::error::Error;

/// Public-key algorithms a signer can report for its accounts.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum KeyAlgo {
    #[strum(serialize = "secp256k1")]
    Secp256k1,
    #[strum(serialize = "ethsecp256k1")]
    EthSecp256k1,
}

/// An account as reported by the external signer: the chain address, the
/// raw public-key bytes and the algorithm they belong to.
#[derive(Clone, Debug)]
pub struct SignerAccount {
    pub address: String,
    pub pubkey: Vec<u8>,
    pub algo: KeyAlgo,
}

/// Outcome of a direct-mode signing request: the document the signer
/// actually signed over, and the detached signature in base64.
#[derive(Clone, Debug)]
pub struct DirectSignResponse {
    pub signed: SignDoc,
    pub signature: String,
}

impl DirectSignResponse {
    pub fn signature_bytes(&self) -> Result<Vec<u8>, Error> {
        base64::decode(&self.signature).map_err(Error::base64_decode)
    }
}

/// The wallet capability consumed by the signing pipeline.
///
/// Implementations hold the key material and perform the actual
/// cryptography; the pipeline only hands over a `SignDoc` and consumes
/// the detached signature. Implementations surface their own failures
/// through [`Error::signer`].
#[async_trait]
pub trait OfflineDirectSigner {
    async fn get_accounts(&self) -> Result<Vec<SignerAccount>, Error>;

    async fn sign_direct(
        &self,
        address: &str,
        sign_doc: SignDoc,
    ) -> Result<DirectSignResponse, Error>;
}

/// Look up the signer-side account for `address`.
///
/// A signer without a key for the address, or with one that carries no
/// public-key material (e.g. a wallet that has not been unlocked), fails
/// the attempt here, before anything else runs.
pub async fn find_signer_account<S>(signer: &S, address: &str) -> Result<SignerAccount, Error>
where
    S: OfflineDirectSigner + Sync,
{
    let account = signer
        .get_accounts()
        .await?
        .into_iter()
        .find(|account| account.address == address)
        .ok_or_else(|| Error::missing_signer_key(address.to_string()))?;

    if account.pubkey.is_empty() {
        return Err(Error::empty_signer_pubkey(address.to_string()));
    }

    Ok(account)
}
