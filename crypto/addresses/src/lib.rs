use ftmint_hashes::{HASH160_SIZE, Hash160, hash160};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use thiserror::Error;

mod base58;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum AddressError {
    #[error("Invalid network prefix byte {0:#04x}")]
    InvalidPrefix(u8),

    #[error("Invalid network name {0}")]
    InvalidNetwork(String),

    #[error("Invalid character {0}")]
    DecodingError(char),

    #[error("Checksum is invalid")]
    BadChecksum,

    #[error("Payload length is {0} while a public key hash address requires {HASH160_SIZE} bytes")]
    InvalidPayloadLength(usize),

    #[error("Address is empty")]
    Empty,
}

///
///  Network of a P2PKH address, encoded as the leading base58check version byte
///
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash, Serialize, Deserialize)]
pub enum Prefix {
    #[serde(rename = "mainnet")]
    Mainnet,
    #[serde(rename = "testnet")]
    Testnet,
}

impl Prefix {
    /// Version byte of pay-to-public-key-hash addresses on this network
    pub const fn version_byte(self) -> u8 {
        match self {
            Prefix::Mainnet => 0x00,
            Prefix::Testnet => 0x6f,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Prefix::Mainnet => "mainnet",
            Prefix::Testnet => "testnet",
        }
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Prefix {
    type Error = AddressError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Prefix::Mainnet),
            0x6f => Ok(Prefix::Testnet),
            _ => Err(AddressError::InvalidPrefix(value)),
        }
    }
}

impl TryFrom<&str> for Prefix {
    type Error = AddressError;

    fn try_from(network: &str) -> Result<Self, Self::Error> {
        match network {
            "mainnet" => Ok(Prefix::Mainnet),
            "testnet" => Ok(Prefix::Testnet),
            _ => Err(AddressError::InvalidNetwork(network.to_string())),
        }
    }
}

/// Pay-to-public-key-hash `Address` that serializes to and from the base58check string form: `1BgGZ9tc...6SAMH`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub struct Address {
    pub prefix: Prefix,
    pub hash: Hash160,
}

impl Address {
    pub fn new(prefix: Prefix, hash: Hash160) -> Self {
        Self { prefix, hash }
    }

    /// Derives the address of a serialized (compressed or uncompressed) public key
    pub fn from_public_key(prefix: Prefix, public_key: &[u8]) -> Self {
        Self { prefix, hash: hash160(public_key) }
    }

    pub fn payload(&self) -> &[u8] {
        self.hash.as_slice()
    }

    pub fn to_str(&self) -> String {
        self.into()
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_str())
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        (&address).into()
    }
}

impl From<&Address> for String {
    fn from(address: &Address) -> Self {
        address.encode_payload()
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::decode_payload(&value)
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::decode_payload(value)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Address::try_from(s.as_ref()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn cases() -> Vec<(Address, &'static str)> {
        // cspell:disable
        vec![
            (Address::new(Prefix::Mainnet, Hash160::from_bytes([0u8; 20])), "1111111111111111111114oLvT2"),
            (Address::new(Prefix::Testnet, Hash160::from_bytes([0u8; 20])), "mfWxJ45yp2SFn7UciZyNpvDKrzbhyfKrY8"),
            (
                Address::new(
                    Prefix::Mainnet,
                    Hash160::from_bytes(*b"\x75\x1e\x76\xe8\x19\x91\x96\xd4\x54\x94\x1c\x45\xd1\xb3\xa3\x23\xf1\x43\x3b\xd6"),
                ),
                "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH",
            ),
        ]
        // cspell:enable
    }

    #[test]
    fn check_into_string() {
        for (address, expected_address_str) in cases() {
            let address_str: String = address.into();
            assert_eq!(address_str, expected_address_str);
        }
    }

    #[test]
    fn check_from_string() {
        for (expected_address, address_str) in cases() {
            let address: Address = address_str.to_string().try_into().expect("Test failed");
            assert_eq!(address, expected_address);
        }
    }

    #[test]
    fn check_from_public_key() {
        // Compressed secp256k1 generator point
        let mut public_key = [0u8; 33];
        public_key[0] = 0x02;
        public_key[1..].copy_from_slice(b"\x79\xbe\x66\x7e\xf9\xdc\xbb\xac\x55\xa0\x62\x95\xce\x87\x0b\x07\x02\x9b\xfc\xdb\x2d\xce\x28\xd9\x59\xf2\x81\x5b\x16\xf8\x17\x98");
        let address = Address::from_public_key(Prefix::Mainnet, &public_key);
        assert_eq!(address.to_string(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
    }

    #[test]
    fn test_errors() {
        // cspell:disable
        let address: Result<Address, AddressError> = "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAM0".try_into();
        assert_eq!(Err(AddressError::DecodingError('0')), address);

        let address: Result<Address, AddressError> = "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMJ".try_into();
        assert_eq!(Err(AddressError::BadChecksum), address);

        let address: Result<Address, AddressError> = "".try_into();
        assert_eq!(Err(AddressError::Empty), address);
        // cspell:enable

        assert_eq!(Prefix::try_from(0x05), Err(AddressError::InvalidPrefix(0x05)));
        assert_eq!(Prefix::try_from("regtest"), Err(AddressError::InvalidNetwork("regtest".into())));
    }

    #[test]
    fn test_serde_round_trip() {
        let (address, address_str) = cases().pop().unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{address_str}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
