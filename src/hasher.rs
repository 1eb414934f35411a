use byteorder::{BigEndian, ByteOrder};
use ethereum_types::H256;
use sha2::{Digest, Sha256};

use crate::err::Error;

/// Version marker in byte 0 of a code tag. Tells a code-blob hash apart
/// from a generic data hash.
pub const CODE_TAG_VERSION: u8 = 0x02;

/// Longest blob whose size fits the tag's two-byte length field.
pub const MAX_TAGGED_LEN: usize = 65_535;

/// Compute the canonical 32-byte tag for a code blob.
///
/// Layout: `[version, 0x00, len_hi, len_lo, sha256(blob)[4..]]` with the
/// blob size in bytes encoded big-endian. Sizes above [`MAX_TAGGED_LEN`]
/// wrap modulo 65 536 so the output stays bit-compatible with the stored
/// format; use [`code_tag_checked`] to reject them instead.
pub fn code_tag(blob: &[u8]) -> H256 {
    let mut tag = [0u8; 32];
    tag.copy_from_slice(Sha256::digest(blob).as_slice());
    tag[0] = CODE_TAG_VERSION;
    tag[1] = 0x00;
    BigEndian::write_u16(&mut tag[2..4], blob.len() as u16);
    H256(tag)
}

/// Same as [`code_tag`] but fails on blobs longer than [`MAX_TAGGED_LEN`].
pub fn code_tag_checked(blob: &[u8]) -> Result<H256, Error> {
    if blob.len() > MAX_TAGGED_LEN {
        return Err(Error::LengthOverflow(blob.len()));
    }
    Ok(code_tag(blob))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tag_empty_blob() {
        let tag = code_tag(&[]);
        assert_eq!(&tag.0[..4], &[0x02, 0x00, 0x00, 0x00]);
        let digest = Sha256::digest(&[]);
        assert_eq!(&tag.0[4..], &digest.as_slice()[4..]);
    }

    #[test]
    fn tag_known_vector() {
        // PUSH1 0x2a PUSH1 0x00 MSTORE PUSH1 0x20 PUSH1 0x00 RETURN
        let blob = hex::decode("602a60005260206000f3").unwrap();
        let tag = code_tag(&blob);
        assert_eq!(&tag.0[..4], &[0x02, 0x00, 0x00, 0x0a]);
        let digest = Sha256::digest(&blob);
        assert_eq!(&tag.0[4..], &digest.as_slice()[4..]);
    }

    #[test]
    fn tag_sensitivity() {
        let a = code_tag(&[0x55, 0x44, 0xff]);
        let b = code_tag(&[0x55, 0x44, 0xfe]);
        let c = code_tag(&[0x55, 0x44]);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        // A longer blob with the same digest prefix still differs in the
        // length field.
        assert_ne!(code_tag(&[0u8; 1]), code_tag(&[0u8; 257]));
    }

    #[test]
    fn tag_length_wraps_past_u16() {
        let tag = code_tag(&vec![0x5b; 65_536]);
        assert_eq!(&tag.0[..4], &[0x02, 0x00, 0x00, 0x00]);
        let tag = code_tag(&vec![0x5b; 65_537]);
        assert_eq!(&tag.0[..4], &[0x02, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn tag_checked_rejects_oversize() {
        assert_eq!(
            code_tag_checked(&vec![0u8; 65_536]),
            Err(Error::LengthOverflow(65_536))
        );
        let tag = code_tag_checked(&vec![0u8; 65_535]).unwrap();
        assert_eq!(&tag.0[..4], &[0x02, 0x00, 0xff, 0xff]);
    }

    proptest! {
        #[test]
        fn tag_deterministic(blob in proptest::collection::vec(any::<u8>(), 0..2048)) {
            prop_assert_eq!(code_tag(&blob), code_tag(&blob));
        }

        #[test]
        fn tag_header_layout(blob in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let tag = code_tag(&blob);
            prop_assert_eq!(tag.0[0], CODE_TAG_VERSION);
            prop_assert_eq!(tag.0[1], 0x00);
            prop_assert_eq!(tag.0[2] as usize * 256 + tag.0[3] as usize, blob.len());
        }
    }
}
