use crate::{Address, AddressError, Prefix};
use ftmint_hashes::{HASH160_SIZE, Hash160};

impl Address {
    /// Encodes `version_byte || hash160` with a 4-byte double-SHA256 checksum in base58.
    pub(crate) fn encode_payload(&self) -> String {
        bs58::encode(self.hash.as_slice()).with_check_version(self.prefix.version_byte()).into_string()
    }

    pub(crate) fn decode_payload(address: &str) -> Result<Self, AddressError> {
        if address.is_empty() {
            return Err(AddressError::Empty);
        }
        let decoded = bs58::decode(address).with_check(None).into_vec().map_err(|err| match err {
            bs58::decode::Error::InvalidCharacter { character, .. } => AddressError::DecodingError(character),
            bs58::decode::Error::NonAsciiCharacter { index } => {
                AddressError::DecodingError(address[index..].chars().next().unwrap_or_default())
            }
            _ => AddressError::BadChecksum,
        })?;

        // Version byte followed by the public key hash
        let (version, payload) = decoded.split_first().ok_or(AddressError::InvalidPayloadLength(0))?;
        let prefix = Prefix::try_from(*version)?;
        if payload.len() != HASH160_SIZE {
            return Err(AddressError::InvalidPayloadLength(payload.len()));
        }
        let hash = Hash160::try_from(payload).map_err(|_| AddressError::InvalidPayloadLength(payload.len()))?;
        Ok(Address::new(prefix, hash))
    }
}
