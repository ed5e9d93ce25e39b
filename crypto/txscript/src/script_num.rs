//! Minimally encoded script numbers: little endian magnitude with the sign carried by the
//! most significant bit of the last byte.

use crate::errors::{TxScriptError, TxScriptResult};
use std::iter;

/// Longest script number accepted when decoding. Covers every `u64` (9 bytes) with room to spare
pub const MAX_SCRIPT_NUM_LEN: usize = 16;

fn check_minimal_data_encoding(v: &[u8]) -> TxScriptResult<()> {
    if v.is_empty() {
        return Ok(());
    }

    // Check that the number is encoded with the minimum possible
    // number of bytes.
    //
    // If the most-significant-byte - excluding the sign bit - is zero
    // then we're not minimal. Note how this test also rejects the
    // negative-zero encoding, [0x80].
    if v[v.len() - 1] & 0x7f == 0 {
        // One exception: if there's more than one byte and the most
        // significant bit of the second-most-significant-byte is set
        // it would conflict with the sign bit. An example of this case
        // is +-255, which encode to 0xff00 and 0xff80 respectively.
        // (big-endian).
        if v.len() == 1 || v[v.len() - 2] & 0x80 == 0 {
            return Err(TxScriptError::NotMinimalData(format!("numeric value encoded as {v:x?} is not minimally encoded")));
        }
    }

    Ok(())
}

/// Encodes `value` as a minimal script number. Zero encodes to the empty vector
pub fn serialize(value: i128) -> Vec<u8> {
    let negative = value < 0;
    let mut positive = value.unsigned_abs();
    let mut last_saturated = false;
    let mut number_vec: Vec<u8> = iter::from_fn(move || {
        if positive == 0 {
            if last_saturated {
                last_saturated = false;
                Some(0)
            } else {
                None
            }
        } else {
            let value = positive & 0xff;
            last_saturated = (value & 0x80) != 0;
            positive >>= 8;
            Some(value as u8)
        }
    })
    .collect();
    if negative {
        if let Some(num) = number_vec.last_mut() {
            *num |= 0x80;
        }
    }
    number_vec
}

/// Decodes a minimal script number of at most [`MAX_SCRIPT_NUM_LEN`] bytes
pub fn deserialize(v: &[u8]) -> TxScriptResult<i128> {
    match v.len() {
        l if l > MAX_SCRIPT_NUM_LEN => {
            Err(TxScriptError::NumberTooBig(format!("numeric value encoded as {v:x?} is longer than {MAX_SCRIPT_NUM_LEN} bytes")))
        }
        0 => Ok(0),
        _ => {
            check_minimal_data_encoding(v)?;
            let msb = v[v.len() - 1];
            let sign = 1 - 2 * ((msb >> 7) as i128);
            let first_byte = (msb & 0x7f) as i128;
            Ok(v[..v.len() - 1].iter().rev().map(|v| *v as i128).fold(first_byte, |accum, item| (accum << 8) + item) * sign)
        }
    }
}

/// Decodes a script number that must fit a `u64`
pub fn deserialize_u64(v: &[u8]) -> TxScriptResult<u64> {
    let value = deserialize(v)?;
    u64::try_from(value).map_err(|_| TxScriptError::NumberTooBig(format!("value {value} does not fit an unsigned 64 bit integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize() {
        struct Test {
            num: i128,
            serialized: Vec<u8>,
        }

        let tests = vec![
            Test { num: 0, serialized: vec![] },
            Test { num: 1, serialized: vec![0x01] },
            Test { num: -1, serialized: vec![0x81] },
            Test { num: 127, serialized: vec![0x7f] },
            Test { num: -127, serialized: vec![0xff] },
            Test { num: 128, serialized: vec![0x80, 0x00] },
            Test { num: -128, serialized: vec![0x80, 0x80] },
            Test { num: 129, serialized: vec![0x81, 0x00] },
            Test { num: 255, serialized: vec![0xff, 0x00] },
            Test { num: 256, serialized: vec![0x00, 0x01] },
            Test { num: -256, serialized: vec![0x00, 0x81] },
            Test { num: 32767, serialized: vec![0xff, 0x7f] },
            Test { num: 32768, serialized: vec![0x00, 0x80, 0x00] },
            Test { num: 2147483647, serialized: vec![0xff, 0xff, 0xff, 0x7f] },
            Test { num: 2147483648, serialized: vec![0x00, 0x00, 0x00, 0x80, 0x00] },
            Test { num: u64::MAX as i128, serialized: vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00] },
        ];

        for test in tests {
            assert_eq!(serialize(test.num), test.serialized, "serialization of {} is wrong", test.num);
            assert_eq!(deserialize(&test.serialized), Ok(test.num), "deserialization of {:x?} is wrong", test.serialized);
        }
    }

    #[test]
    fn test_deserialize_rejects() {
        struct Test {
            name: &'static str,
            serialized: Vec<u8>,
        }

        let tests = vec![
            Test { name: "negative zero", serialized: vec![0x80] },
            Test { name: "padded zero", serialized: vec![0x00] },
            Test { name: "padded one", serialized: vec![0x01, 0x00] },
            Test { name: "padded negative one", serialized: vec![0x01, 0x80] },
            Test { name: "too long", serialized: vec![0x01; MAX_SCRIPT_NUM_LEN + 1] },
        ];

        for test in tests {
            assert!(deserialize(&test.serialized).is_err(), "test '{}' should fail", test.name);
        }
    }

    #[test]
    fn test_deserialize_u64() {
        assert_eq!(deserialize_u64(&serialize(u64::MAX as i128)), Ok(u64::MAX));
        assert_eq!(deserialize_u64(&[]), Ok(0));
        assert!(matches!(deserialize_u64(&[0x81]), Err(TxScriptError::NumberTooBig(_))));
        assert!(matches!(deserialize_u64(&serialize(u64::MAX as i128 + 1)), Err(TxScriptError::NumberTooBig(_))));
    }
}
