use std::fmt;

use ethereum_types::{Address, H160, H256};
use log::debug;

use crate::err::Error;
use crate::hasher;
use crate::provider::DataProvider;

/// Well-known storage contract holding the code record of every account.
pub const CODE_STORE_ADDRESS: Address =
    H160([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x80, 0x02]);

/// Storage slot of an account's code record: the 20-byte address
/// left-padded to 32 bytes.
pub fn code_slot(address: &Address) -> H256 {
    let mut key = [0u8; 32];
    key[12..].copy_from_slice(&address.0);
    H256(key)
}

/// Outcome of a verification. A mismatch is a normal negative answer, not
/// an error; provider failures surface as `Err` from the verify functions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
    Match,
    Mismatch { expected: H256, actual: H256 },
}

impl Verification {
    pub fn is_match(&self) -> bool {
        *self == Verification::Match
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Verification::Match => write!(f, "match"),
            Verification::Mismatch { expected, actual } => write!(
                f,
                "mismatch expected=0x{} actual=0x{}",
                hex::encode(expected.0),
                hex::encode(actual.0)
            ),
        }
    }
}

/// Check that the code record for `address` matches `expected_blob`'s tag.
pub fn verify_deployed<P: DataProvider>(
    provider: &P,
    address: &Address,
    expected_blob: &[u8],
) -> Result<Verification, Error> {
    let expected = hasher::code_tag(expected_blob);
    let actual = provider.get_storage(&CODE_STORE_ADDRESS, &code_slot(address))?;
    debug!(
        "verify_deployed address={:?} expected={:?} actual={:?}",
        address, expected, actual
    );
    if actual == expected {
        Ok(Verification::Match)
    } else {
        Ok(Verification::Mismatch { expected, actual })
    }
}

/// Check that `address` has never had code stored: its record must still be
/// the all-zero sentinel.
pub fn verify_not_deployed<P: DataProvider>(
    provider: &P,
    address: &Address,
) -> Result<Verification, Error> {
    let actual = provider.get_storage(&CODE_STORE_ADDRESS, &code_slot(address))?;
    if actual == H256::zero() {
        Ok(Verification::Match)
    } else {
        Ok(Verification::Mismatch {
            expected: H256::zero(),
            actual,
        })
    }
}
