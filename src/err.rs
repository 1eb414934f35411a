use std::error;
use std::fmt;

use ethereum_types::H256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The underlying client failed to serve a request. Transport and node
    /// failures land here unmodified.
    Provider(String),
    /// Blob too long for the tag's two-byte length field.
    LengthOverflow(usize),
    /// A deployment receipt came back without a contract address.
    NoContractAddress,
    /// The stored code record disagrees with the blob that was deployed.
    CodeMismatch { expected: H256, actual: H256 },
}

impl error::Error for Error {}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Provider(e) => write!(f, "{}", e),
            Error::LengthOverflow(n) => write!(f, "LengthOverflow({})", n),
            Error::NoContractAddress => write!(f, "NoContractAddress"),
            Error::CodeMismatch { expected, actual } => write!(
                f,
                "CodeMismatch expected=0x{} actual=0x{}",
                hex::encode(expected.0),
                hex::encode(actual.0)
            ),
        }
    }
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Provider(error)
    }
}
