use std::collections::HashMap;

use ethereum_types::{Address, H256, U256};

use crate::err::Error;
use crate::hasher;
use crate::verifier;

// Log is the data struct for contract events.
// The members are "Address: Address, Topics: Vec<H256>, Body: Vec<u8>"
#[derive(Clone, Debug)]
pub struct Log(pub Address, pub Vec<H256>, pub Vec<u8>);

/// Request handed to the node client. `to == None` means deployment, with
/// the code blob in `input`.
#[derive(Clone, Debug, Default)]
pub struct Transaction {
    pub from: Address,
    pub to: Option<Address>,
    pub value: U256,
    pub gas_limit: u64,
    pub input: Vec<u8>,
}

/// Confirmed outcome of a transaction.
#[derive(Clone, Debug, Default)]
pub struct Receipt {
    pub contract_address: Option<Address>,
    pub gas_used: u64,
    pub logs: Vec<Log>,
}

/// The node-client capability this crate consumes: read a raw storage slot,
/// send a transaction and await its receipt, fetch a contract's logs.
/// Transport, signing and retries live behind the implementation.
pub trait DataProvider {
    fn get_storage(&self, address: &Address, key: &H256) -> Result<H256, Error>;
    fn send_transaction(&mut self, tx: Transaction) -> Result<Receipt, Error>;
    fn get_logs(&self, address: &Address) -> Result<Vec<Log>, Error>;
}

/// In-memory provider. Deployments allocate sequential addresses and write
/// the code tag into the code-store record, so verification behaves as it
/// would against a live node.
#[derive(Default)]
pub struct DataProviderMock {
    pub storage: HashMap<Address, HashMap<H256, H256>>,
    pub logs: HashMap<Address, Vec<Log>>,
    pub next_address: u64,
    /// When set, every read fails. Used to exercise infrastructure-failure
    /// paths.
    pub fail_reads: bool,
}

impl DataProviderMock {
    pub fn set_storage(&mut self, address: Address, key: H256, value: H256) {
        self.storage
            .entry(address)
            .or_insert_with(HashMap::new)
            .insert(key, value);
    }
}

impl DataProvider for DataProviderMock {
    fn get_storage(&self, address: &Address, key: &H256) -> Result<H256, Error> {
        if self.fail_reads {
            return Err(Error::Provider("storage read refused".to_string()));
        }
        Ok(self
            .storage
            .get(address)
            .map_or(H256::zero(), |s| s.get(key).map_or(H256::zero(), |&v| v)))
    }

    fn send_transaction(&mut self, tx: Transaction) -> Result<Receipt, Error> {
        match tx.to {
            Some(_) => Ok(Receipt {
                contract_address: None,
                gas_used: 21_000,
                logs: vec![],
            }),
            None => {
                self.next_address += 1;
                let mut raw = [0u8; 20];
                raw[12..].copy_from_slice(&self.next_address.to_be_bytes());
                let address = Address::from(raw);

                let tag = hasher::code_tag(&tx.input);
                self.set_storage(verifier::CODE_STORE_ADDRESS, verifier::code_slot(&address), tag);

                let log = Log(address, vec![tag], vec![]);
                self.logs.entry(address).or_insert_with(Vec::new).push(log.clone());

                Ok(Receipt {
                    contract_address: Some(address),
                    gas_used: 32_000 + 200 * tx.input.len() as u64,
                    logs: vec![log],
                })
            }
        }
    }

    fn get_logs(&self, address: &Address) -> Result<Vec<Log>, Error> {
        if self.fail_reads {
            return Err(Error::Provider("log query refused".to_string()));
        }
        Ok(self.logs.get(address).cloned().unwrap_or_default())
    }
}
