use ibc_proto::cosmos::bank::v1beta1::MsgSend;
use ibc_proto::cosmos::base::v1beta1::Coin;
use ibc_proto::google::protobuf::Any;
use prost::Message;

use crate::error::Error;

pub const BANK_MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";

/// Encode a bank transfer into the opaque message form the transaction
/// body carries. The builder never looks inside.
pub fn bank_msg_send(
    from_address: &str,
    to_address: &str,
    amount: Vec<Coin>,
) -> Result<Any, Error> {
    let msg = MsgSend {
        from_address: from_address.to_string(),
        to_address: to_address.to_string(),
        amount,
    };

    let mut buf = Vec::new();
    Message::encode(&msg, &mut buf)
        .map_err(|e| Error::protobuf_encode("MsgSend".to_string(), e))?;

    Ok(Any {
        type_url: BANK_MSG_SEND_TYPE_URL.to_string(),
        value: buf,
    })
}
