use async_trait::async_trait;

use crate::error::Error;

/// Outcome of handing transaction bytes to the broadcast transport.
///
/// `code` is chain-defined: zero means the transaction was accepted,
/// non-zero identifies the rejection reason, with `raw_log` carrying the
/// chain's own description of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxResponse {
    pub code: u32,
    pub tx_hash: String,
    pub raw_log: String,
}

impl TxResponse {
    pub fn is_accepted(&self) -> bool {
        self.code == 0
    }
}

/// The broadcast capability consumed by the signing pipeline.
///
/// A non-zero response code is an on-chain rejection, not a transport
/// error; implementations return it inside the response rather than as
/// an `Err`.
#[async_trait]
pub trait TxBroadcaster {
    async fn broadcast_tx(&self, tx_bytes: Vec<u8>) -> Result<TxResponse, Error>;
}

/// Surface an on-chain rejection as an application-level failure,
/// preserving the chain's raw log for display.
pub fn check_broadcast_response(response: TxResponse) -> Result<TxResponse, Error> {
    if !response.is_accepted() {
        return Err(Error::check_tx(
            response.code,
            response.tx_hash,
            response.raw_log,
        ));
    }

    Ok(response)
}
