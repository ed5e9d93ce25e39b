use crate::tx::TransactionOutput;
use ftmint_hashes::HasherBase;

pub mod outputs;
pub mod tx;

pub trait HasherExtensions {
    /// Writes the value as a compact-size varint (1, 3, 5 or 9 bytes)
    fn write_var_int(&mut self, value: u64) -> &mut Self;

    /// Writes the len as a compact-size varint
    fn write_len(&mut self, len: usize) -> &mut Self;

    /// Writes the u32 as a little endian u8 array
    fn write_u32(&mut self, element: u32) -> &mut Self;

    /// Writes the u64 as a little endian u8 array
    fn write_u64(&mut self, element: u64) -> &mut Self;

    /// Writes the number of bytes followed by the bytes themselves
    fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self;
}

/// Fails at compile time if `usize::MAX > u64::MAX`.
/// If `usize` will ever grow larger than `u64`, we need to verify
/// that the lossy conversion below at `write_len` remains precise.
const _: usize = u64::MAX as usize - usize::MAX;

impl<T: HasherBase> HasherExtensions for T {
    #[inline(always)]
    fn write_var_int(&mut self, value: u64) -> &mut Self {
        match value {
            0..=0xfc => self.update([value as u8]),
            0xfd..=0xffff => self.update([0xfd]).update((value as u16).to_le_bytes()),
            0x10000..=0xffff_ffff => self.update([0xfe]).update((value as u32).to_le_bytes()),
            _ => self.update([0xff]).update(value.to_le_bytes()),
        }
    }

    #[inline(always)]
    fn write_len(&mut self, len: usize) -> &mut Self {
        self.write_var_int(len as u64)
    }

    #[inline(always)]
    fn write_u32(&mut self, element: u32) -> &mut Self {
        self.update(element.to_le_bytes())
    }

    #[inline(always)]
    fn write_u64(&mut self, element: u64) -> &mut Self {
        self.update(element.to_le_bytes())
    }

    #[inline(always)]
    fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_len(bytes.len()).update(bytes)
    }
}

#[inline(always)]
pub(crate) fn write_output<T: HasherBase>(hasher: &mut T, output: &TransactionOutput) {
    hasher.write_u64(output.value).write_var_bytes(output.script_public_key.script());
}
