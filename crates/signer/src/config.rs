//! Chain configuration for the signing pipeline.

pub mod error;
pub mod types;

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use http::Uri;
use serde_derive::{Deserialize, Serialize};

use crate::config::types::ChainId;

pub use error::Error;

/// Type URL of the ethsecp256k1 public key on cosmos/evm chains.
pub const ETHSECP256K1_PUB_KEY_TYPE_URL: &str = "/cosmos.evm.crypto.v1.ethsecp256k1.PubKey";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GasPrice {
    pub price: f64,
    pub denom: String,
}

impl GasPrice {
    pub const fn new(price: f64, denom: String) -> Self {
        Self { price, denom }
    }
}

impl Display for GasPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}{}", self.price, self.denom)
    }
}

impl FromStr for GasPrice {
    type Err = Error;

    fn from_str(price_in: &str) -> Result<Self, Self::Err> {
        // We split by `char::is_alphabetic` delimiter.
        let spos = price_in.find(char::is_alphabetic);

        match spos {
            Some(position) => {
                let (price_str, denom) = price_in.split_at(position);

                let price = price_str
                    .parse::<f64>()
                    .map_err(|_| Error::invalid_gas_price(price_in.to_string()))?;

                Ok(GasPrice {
                    price,
                    denom: denom.to_owned(),
                })
            }

            None => Err(Error::invalid_gas_price(price_in.to_string())),
        }
    }
}

/// The public-key type descriptor to embed in the transaction's
/// `SignerInfo`.
///
/// Chains with Ethermint-style accounts reject the default secp256k1
/// descriptor and require their own ethsecp256k1 type URL instead; the
/// `Ethermint` variant carries that URL.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(
    rename_all = "lowercase",
    tag = "derivation",
    content = "proto_type",
    deny_unknown_fields
)]
#[derive(Default)]
pub enum AddressType {
    #[default]
    Cosmos,
    Ethermint {
        pk_type: String,
    },
}

impl AddressType {
    /// The Ethermint-style variant with the type URL cosmos/evm chains use.
    pub fn ethermint() -> Self {
        Self::Ethermint {
            pk_type: ETHSECP256K1_PUB_KEY_TYPE_URL.to_string(),
        }
    }
}

impl Display for AddressType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            AddressType::Cosmos => write!(f, "cosmos"),
            AddressType::Ethermint { .. } => write!(f, "ethermint"),
        }
    }
}

/// Everything the signing pipeline needs to know about the target chain.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    /// The chain's network identifier
    pub id: ChainId,

    /// The REST (LCD) URL account state is resolved against
    #[serde(with = "self::uri")]
    pub rest_addr: Uri,

    /// Per-unit-of-gas price used to derive transaction fees
    pub gas_price: GasPrice,

    #[serde(default)]
    pub address_type: AddressType,
}

/// Serde support for `http::Uri` fields, round-tripping through the
/// string form.
pub(crate) mod uri {
    use core::str::FromStr;

    use http::Uri;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(uri: &Uri, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&uri.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Uri, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uri::from_str(&s).map_err(D::Error::custom)
    }
}

/// Attempt to load and parse the TOML config file as a `ChainConfig`.
pub fn load(path: impl AsRef<Path>) -> Result<ChainConfig, Error> {
    let config_toml = fs::read_to_string(&path).map_err(Error::io)?;

    let config = toml::from_str::<ChainConfig>(&config_toml[..]).map_err(Error::decode)?;

    Ok(config)
}

/// Serialize the given `ChainConfig` as TOML to the given config file.
pub fn store(config: &ChainConfig, path: impl AsRef<Path>) -> Result<(), Error> {
    let mut file = if path.as_ref().exists() {
        fs::OpenOptions::new().write(true).truncate(true).open(path)
    } else {
        File::create(path)
    }
    .map_err(Error::io)?;

    store_writer(config, &mut file)
}

/// Serialize the given `ChainConfig` as TOML to the given writer.
pub(crate) fn store_writer(config: &ChainConfig, mut writer: impl Write) -> Result<(), Error> {
    let toml_config = toml::to_string_pretty(&config).map_err(Error::encode)?;

    writeln!(writer, "{toml_config}").map_err(Error::io)?;

    Ok(())
}
