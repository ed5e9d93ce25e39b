use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};
use smallvec::SmallVec;
use std::{
    borrow::Cow,
    fmt::{Debug, Formatter},
    str::{self, FromStr},
};

/// Size of the underlying script vector of a script.
pub const SCRIPT_VECTOR_SIZE: usize = 25;

/// Used as the underlying type for locking script data, optimized for the p2pkh script size (25).
pub type ScriptVec = SmallVec<[u8; SCRIPT_VECTOR_SIZE]>;

/// Alias the `smallvec!` macro to ease maintenance
pub use smallvec::smallvec as scriptvec;

/// Locking script of a transaction output
#[derive(Default, PartialEq, Eq, Clone, Hash)]
pub struct ScriptPublicKey {
    script: ScriptVec, // Kept private to preserve read-only semantics
}

impl ScriptPublicKey {
    pub fn new(script: ScriptVec) -> Self {
        Self { script }
    }

    pub fn from_vec(script: Vec<u8>) -> Self {
        Self { script: ScriptVec::from_vec(script) }
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    fn to_hex(&self) -> String {
        let mut hex = vec![0u8; self.script.len() * 2];
        faster_hex::hex_encode(&self.script, &mut hex).expect("The output is exactly twice the size of the input");
        String::from_utf8(hex).expect("hex is always valid UTF-8")
    }
}

impl Debug for ScriptPublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ScriptPublicKey").field(&self.to_hex()).finish()
    }
}

impl FromStr for ScriptPublicKey {
    type Err = faster_hex::Error;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() % 2 != 0 {
            return Err(faster_hex::Error::InvalidLength(hex_str.len()));
        }
        let mut bytes = vec![0u8; hex_str.len() / 2];
        faster_hex::hex_decode(hex_str.as_bytes(), &mut bytes)?;
        Ok(Self::from_vec(bytes))
    }
}

impl Serialize for ScriptPublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() { serializer.serialize_str(&self.to_hex()) } else { self.script().serialize(serializer) }
    }
}

impl<'de> Deserialize<'de> for ScriptPublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = <Cow<'de, str>>::deserialize(deserializer)?;
            ScriptPublicKey::from_str(&s).map_err(D::Error::custom)
        } else {
            Vec::<u8>::deserialize(deserializer).map(ScriptPublicKey::from_vec)
        }
    }
}
