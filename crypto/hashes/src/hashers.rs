use crate::{HASH160_SIZE, Hash, Hash160};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

pub trait HasherBase {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self;
}

pub trait Hasher: HasherBase + Clone + Default {
    fn finalize(self) -> Hash;
    fn reset(&mut self);
    #[inline(always)]
    fn hash<A: AsRef<[u8]>>(data: A) -> Hash {
        let mut hasher = Self::default();
        hasher.update(data);
        hasher.finalize()
    }
}

/// Lets the wire writers target a plain byte buffer as well as a hasher
impl HasherBase for Vec<u8> {
    #[inline(always)]
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
        self.extend_from_slice(data.as_ref());
        self
    }
}

/// SHA-256 applied twice (`hash256`). Used for transaction ids and the outputs commitment.
#[derive(Clone, Default)]
pub struct Sha256d(Sha256);

impl Sha256d {
    #[inline(always)]
    pub fn new() -> Self {
        Self(Sha256::new())
    }
}

impl HasherBase for Sha256d {
    #[inline(always)]
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
        self.0.update(data.as_ref());
        self
    }
}

impl Hasher for Sha256d {
    #[inline(always)]
    fn finalize(self) -> Hash {
        let first = self.0.finalize();
        Hash::from_bytes(Sha256::digest(first).into())
    }

    #[inline(always)]
    fn reset(&mut self) {
        self.0.reset();
    }
}

/// `RIPEMD160(SHA256(data))`
pub fn hash160(data: &[u8]) -> Hash160 {
    let digest: [u8; HASH160_SIZE] = Ripemd160::digest(Sha256::digest(data)).into();
    Hash160::from_bytes(digest)
}
