mod deployer;
mod err;
mod hasher;
mod provider;
mod verifier;

pub use deployer::{Deployer, GasReport};
pub use err::Error;
pub use hasher::{code_tag, code_tag_checked, CODE_TAG_VERSION, MAX_TAGGED_LEN};
pub use provider::{DataProvider, DataProviderMock, Log, Receipt, Transaction};
pub use verifier::{
    code_slot, verify_deployed, verify_not_deployed, Verification, CODE_STORE_ADDRESS,
};
