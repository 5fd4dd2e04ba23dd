use ibc_proto::cosmos::base::v1beta1::Coin;
use ibc_proto::cosmos::tx::v1beta1::Fee;
use num_bigint::BigInt;
use num_rational::BigRational;

use crate::config::GasPrice;

/// Fee for an explicitly-provisioned gas limit, priced from the
/// configured per-unit gas price. Nothing defaults the gas limit.
pub fn fee_from_gas(gas_price: &GasPrice, gas_limit: u64) -> Fee {
    let amount = calculate_fee(gas_limit, gas_price);

    Fee {
        amount: vec![amount],
        gas_limit,
        payer: "".to_string(),
        granter: "".to_string(),
    }
}

pub fn calculate_fee(gas_limit: u64, gas_price: &GasPrice) -> Coin {
    let fee_amount = mul_ceil(gas_limit, gas_price.price);

    Coin {
        denom: gas_price.denom.to_string(),
        amount: fee_amount.to_string(),
    }
}

/// Multiply `a` with `f` and round the result up to the nearest integer.
pub fn mul_ceil(a: u64, f: f64) -> BigInt {
    assert!(f.is_finite());

    let a = BigInt::from(a);
    let f = BigRational::from_float(f).expect("f is finite");
    (f * a).ceil().to_integer()
}
