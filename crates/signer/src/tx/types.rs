use ibc_proto::cosmos::tx::v1beta1::{AuthInfo, SignDoc, TxBody};

/// A transaction built and serialized for signing, before the external
/// signer has produced a signature.
///
/// `sign_doc` is what gets handed to the signer; the other fields are
/// retained so the caller can inspect exactly what the document commits
/// to.
#[derive(Clone, Debug)]
pub struct UnsignedTx {
    pub body: TxBody,
    pub body_bytes: Vec<u8>,
    pub auth_info: AuthInfo,
    pub auth_info_bytes: Vec<u8>,
    pub sign_doc: SignDoc,
    pub sign_doc_bytes: Vec<u8>,
}

/// A transaction paired with the detached signature produced over it.
///
/// The body and auth-info bytes are the ones the signer signed over,
/// decoded back into their domain types; exactly one signature is
/// populated in the single-signer flow.
#[derive(Clone, Debug)]
pub struct SignedTx {
    pub body: TxBody,
    pub body_bytes: Vec<u8>,
    pub auth_info: AuthInfo,
    pub auth_info_bytes: Vec<u8>,
    pub signatures: Vec<Vec<u8>>,
}
