use ethereum_types::{Address, U256};
use log::debug;

use crate::err::Error;
use crate::provider::{DataProvider, Log, Transaction};
use crate::verifier::{self, Verification};

/// Labelled gas costs accumulated across a deployment session. Constructed
/// by the caller and threaded through explicitly; rendered once at
/// teardown.
#[derive(Clone, Debug, Default)]
pub struct GasReport {
    entries: Vec<(String, u64)>,
}

impl GasReport {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn record(&mut self, label: &str, gas_used: u64) {
        self.entries.push((label.to_string(), gas_used));
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, gas)| gas).sum()
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (label, gas) in &self.entries {
            out.push_str(&format!("{}: {}\n", label, gas));
        }
        out.push_str(&format!("total: {}", self.total()));
        out
    }
}

/// Drives deployments through a provider and checks the stored code record
/// afterwards.
#[derive(Clone, Debug)]
pub struct Deployer {
    pub from: Address,
    pub gas_limit: u64,
}

impl Deployer {
    pub fn new(from: Address) -> Self {
        Deployer {
            from,
            gas_limit: 8_000_000,
        }
    }

    /// Deploy `blob` and confirm the chain stored its tag. Returns the new
    /// contract address. Unlike the raw verify functions, a record that
    /// disagrees with `blob`'s tag is an error here.
    pub fn deploy<P: DataProvider>(
        &self,
        provider: &mut P,
        blob: &[u8],
        report: &mut GasReport,
        label: &str,
    ) -> Result<Address, Error> {
        let tx = Transaction {
            from: self.from,
            to: None,
            value: U256::zero(),
            gas_limit: self.gas_limit,
            input: blob.to_vec(),
        };
        let receipt = provider.send_transaction(tx)?;
        let address = receipt.contract_address.ok_or(Error::NoContractAddress)?;
        debug!("deploy address={:?} gas_used={:?}", address, receipt.gas_used);
        report.record(label, receipt.gas_used);

        match verifier::verify_deployed(provider, &address, blob)? {
            Verification::Match => Ok(address),
            Verification::Mismatch { expected, actual } => {
                Err(Error::CodeMismatch { expected, actual })
            }
        }
    }

    /// Events the contract at `address` has emitted so far.
    pub fn events<P: DataProvider>(&self, provider: &P, address: &Address) -> Result<Vec<Log>, Error> {
        provider.get_logs(address)
    }
}
