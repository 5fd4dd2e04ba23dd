//! This module defines the various errors that the signing pipeline can raise.

use flex_error::{define_error, TraceError};

use crate::config::Error as ConfigError;

define_error! {
    Error {
        EmptyAddress
            |_| { "the signer address is empty" },

        AccountNotFound
            { address: String }
            |e| {
                format!("account {} does not exist on chain", e.address)
            },

        EmptyQueryAccount
            { address: String }
            |e| {
                format!("query for account {} returned no account data", e.address)
            },

        HttpRequest
            { url: String }
            [ TraceError<reqwest::Error> ]
            |e| {
                format!("HTTP request to {} failed", e.url)
            },

        HttpResponse
            { url: String, status: u16 }
            |e| {
                format!("HTTP response from {} has unexpected status {}", e.url, e.status)
            },

        HttpResponseBody
            { url: String }
            [ TraceError<reqwest::Error> ]
            |e| {
                format!("failed to parse the HTTP response body from {}", e.url)
            },

        ParseInt
            { value: String }
            [ TraceError<core::num::ParseIntError> ]
            |e| {
                format!("failed to parse '{}' as an unsigned integer", e.value)
            },

        MissingSignerKey
            { address: String }
            |e| {
                format!("signer reports no key for address {}", e.address)
            },

        EmptySignerPubkey
            { address: String }
            |e| {
                format!("signer returned no public key material for address {}", e.address)
            },

        Signer
            { reason: String }
            |e| {
                format!("signer failure: {}", e.reason)
            },

        ProtobufEncode
            { payload_type: String }
            [ TraceError<prost::EncodeError> ]
            |e| {
                format!("error encoding protobuf data type '{}'", e.payload_type)
            },

        ProtobufDecode
            { payload_type: String }
            [ TraceError<prost::DecodeError> ]
            |e| {
                format!("error decoding protobuf data type '{}'", e.payload_type)
            },

        Base64Decode
            [ TraceError<subtle_encoding::Error> ]
            |_| { "error decoding base64-encoded signature" },

        CheckTx
            {
                code: u32,
                tx_hash: String,
                raw_log: String,
            }
            |e| {
                format_args!("transaction {} was rejected by the chain with code {}: {}",
                    e.tx_hash, e.code, e.raw_log)
            },

        Config
            [ ConfigError ]
            |_| { "configuration error" },
    }
}
