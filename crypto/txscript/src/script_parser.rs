use crate::{
    errors::{TxScriptError, TxScriptResult},
    opcodes::{OP_DATA_MAX_VAL, codes::*, mnemonic},
    script_num,
};
use itertools::Itertools;
use std::slice::Iter;

/// A single parsed instruction. `data` is empty for non-push opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedOpcode<'a> {
    pub opcode: u8,
    pub data: &'a [u8],
}

impl ParsedOpcode<'_> {
    /// Whether this instruction pushes explicit data bytes (`OP_0`, `OP_DATA_N` or `OP_PUSHDATA_N`)
    pub fn is_data_push(&self) -> bool {
        self.opcode <= OpPushData4
    }

    /// Number of script bytes this instruction occupies
    pub fn encoded_len(&self) -> usize {
        let prefix = match self.opcode {
            OpPushData1 => 2,
            OpPushData2 => 3,
            OpPushData4 => 5,
            _ => 1,
        };
        prefix + self.data.len()
    }

    /// Interprets the instruction as a numeric push: small integer opcodes, `OP_1NEGATE`
    /// or a minimally encoded script number
    pub fn as_number(&self) -> TxScriptResult<i128> {
        match self.opcode {
            Op1Negate => Ok(-1),
            Op1..=Op16 => Ok((self.opcode - Op1 + 1) as i128),
            _ if self.is_data_push() => script_num::deserialize(self.data),
            _ => Err(TxScriptError::ExpectedDataPush(self.opcode)),
        }
    }
}

fn read_len(it: &mut Iter<'_, u8>, width: usize) -> TxScriptResult<usize> {
    let remaining = it.as_slice();
    if remaining.len() < width {
        return Err(TxScriptError::MalformedPushSize(remaining.to_vec()));
    }
    let mut bytes = [0u8; 4];
    bytes[..width].copy_from_slice(&remaining[..width]);
    it.nth(width - 1);
    Ok(u32::from_le_bytes(bytes) as usize)
}

fn deserialize_next_opcode<'a>(it: &mut Iter<'a, u8>) -> Option<TxScriptResult<ParsedOpcode<'a>>> {
    let opcode = *it.next()?;
    let data_len = match opcode {
        Op0 => 0,
        OpData1..=OP_DATA_MAX_VAL => opcode as usize,
        OpPushData1 => match read_len(it, 1) {
            Ok(len) => len,
            Err(err) => return Some(Err(err)),
        },
        OpPushData2 => match read_len(it, 2) {
            Ok(len) => len,
            Err(err) => return Some(Err(err)),
        },
        OpPushData4 => match read_len(it, 4) {
            Ok(len) => len,
            Err(err) => return Some(Err(err)),
        },
        _ => return Some(Ok(ParsedOpcode { opcode, data: &[] })),
    };

    let remaining = it.as_slice();
    if remaining.len() < data_len {
        // Exhaust the iterator so parsing stops at the malformed push
        it.nth(remaining.len());
        return Some(Err(TxScriptError::MalformedPush(data_len, remaining.len())));
    }
    let data = &remaining[..data_len];
    if data_len > 0 {
        it.nth(data_len - 1);
    }
    Some(Ok(ParsedOpcode { opcode, data }))
}

/// Splits a script into its instructions
pub fn parse_script(script: &[u8]) -> impl Iterator<Item = TxScriptResult<ParsedOpcode<'_>>> + '_ {
    script.iter().batching(|it| deserialize_next_opcode(it))
}

/// Renders a script in the usual assembly notation: mnemonics for opcodes, hex for pushed data.
///
/// Bytes following an unconditional `OP_RETURN` are never executed and need not parse, so they are
/// rendered as a single hex blob.
pub fn disassemble(script: &[u8]) -> TxScriptResult<String> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut offset = 0;
    for parsed in parse_script(script) {
        let parsed = parsed?;
        offset += parsed.encoded_len();
        if parsed.is_data_push() && parsed.opcode != Op0 {
            tokens.push(faster_hex::hex_string(parsed.data));
            continue;
        }
        tokens.push(mnemonic(parsed.opcode).map_or_else(|| format!("OP_UNKNOWN{}", parsed.opcode), str::to_string));
        match parsed.opcode {
            OpIf | OpNotIf => depth += 1,
            OpEndIf => depth = depth.saturating_sub(1),
            OpReturn if depth == 0 => {
                if offset < script.len() {
                    tokens.push(faster_hex::hex_string(&script[offset..]));
                }
                break;
            }
            _ => {}
        }
    }
    Ok(tokens.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script_builder::ScriptBuilder;

    #[test]
    fn test_parse_script() {
        let script = ScriptBuilder::new()
            .add_op(OpFalse)
            .unwrap()
            .add_data(b"ord")
            .unwrap()
            .add_data(&[0x49; 300])
            .unwrap()
            .add_op(OpCheckSig)
            .unwrap()
            .drain();

        let parsed: Vec<_> = parse_script(&script).collect::<TxScriptResult<_>>().unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0], ParsedOpcode { opcode: OpFalse, data: &[] });
        assert_eq!(parsed[1], ParsedOpcode { opcode: OpData3, data: b"ord" });
        assert_eq!(parsed[2].opcode, OpPushData2);
        assert_eq!(parsed[2].data.len(), 300);
        assert_eq!(parsed[3], ParsedOpcode { opcode: OpCheckSig, data: &[] });
        assert_eq!(parsed.iter().map(|p| p.encoded_len()).sum::<usize>(), script.len());
    }

    #[test]
    fn test_malformed_pushes() {
        struct Test {
            name: &'static str,
            script: Vec<u8>,
            expected: TxScriptError,
        }

        let tests = vec![
            Test { name: "truncated data", script: vec![OpData3, 1, 2], expected: TxScriptError::MalformedPush(3, 2) },
            Test { name: "truncated pushdata1 length", script: vec![OpPushData1], expected: TxScriptError::MalformedPushSize(vec![]) },
            Test {
                name: "truncated pushdata2 length",
                script: vec![OpPushData2, 1],
                expected: TxScriptError::MalformedPushSize(vec![1]),
            },
            Test { name: "truncated pushdata4 data", script: vec![OpPushData4, 5, 0, 0, 0, 1], expected: TxScriptError::MalformedPush(5, 1) },
        ];

        for test in tests {
            let result: TxScriptResult<Vec<_>> = parse_script(&test.script).collect();
            assert_eq!(result, Err(test.expected), "test '{}' failed", test.name);
        }
    }

    #[test]
    fn test_as_number() {
        let script = ScriptBuilder::new()
            .add_i64(0)
            .unwrap()
            .add_i64(-1)
            .unwrap()
            .add_i64(16)
            .unwrap()
            .add_u64(u64::MAX)
            .unwrap()
            .add_op(OpReturn)
            .unwrap()
            .drain();
        let numbers: Vec<_> = parse_script(&script).map(|parsed| parsed.and_then(|p| p.as_number())).collect();
        assert_eq!(numbers, vec![Ok(0), Ok(-1), Ok(16), Ok(u64::MAX as i128), Err(TxScriptError::ExpectedDataPush(OpReturn))]);
    }

    #[test]
    fn test_disassemble() {
        let script = ScriptBuilder::new()
            .add_op(OpDup)
            .unwrap()
            .add_op(OpHash160)
            .unwrap()
            .add_data(&[0xab; 20])
            .unwrap()
            .add_op(OpEqualVerify)
            .unwrap()
            .add_op(OpCheckSig)
            .unwrap()
            .add_op(OpFalse)
            .unwrap()
            .add_op(0xfe)
            .unwrap()
            .drain();
        assert_eq!(
            disassemble(&script).unwrap(),
            "OP_DUP OP_HASH160 abababababababababababababababababababab OP_EQUALVERIFY OP_CHECKSIG OP_0 OP_UNKNOWN254"
        );
    }

    #[test]
    fn test_disassemble_data_trailer() {
        struct Test {
            name: &'static str,
            script: Vec<u8>,
            expected: &'static str,
        }

        let tests = vec![
            Test { name: "unparseable trailer", script: vec![OpDup, OpReturn, 0x06, 0, 0, 0, 0], expected: "OP_DUP OP_RETURN 0600000000" },
            Test { name: "lone return", script: vec![OpReturn], expected: "OP_RETURN" },
            Test {
                name: "conditional return",
                script: vec![OpFalse, OpIf, OpReturn, OpEndIf, OpData1, 0x05],
                expected: "OP_0 OP_IF OP_RETURN OP_ENDIF 05",
            },
            Test {
                name: "return after closed branch",
                script: vec![OpFalse, OpNotIf, OpEndIf, OpReturn, OpPushData4],
                expected: "OP_0 OP_NOTIF OP_ENDIF OP_RETURN 4e",
            },
        ];

        for test in tests {
            assert_eq!(disassemble(&test.script).unwrap(), test.expected, "test '{}' failed", test.name);
        }
        assert!(disassemble(&[OpDup, OpData3, 1]).is_err());
    }
}
