//! Opcode values and their assembly mnemonics.

macro_rules! opcode_list {
    (
        data: [$($data_name:ident = $data_code:literal),* $(,)?],
        ops: [$($name:ident = $code:literal => $asm:literal),* $(,)?],
        aliases: [$($alias:ident = $target:ident),* $(,)?] $(,)?
    ) => {
        #[allow(non_upper_case_globals)]
        pub mod codes {
            $(pub const $data_name: u8 = $data_code;)*
            $(pub const $name: u8 = $code;)*
            $(pub const $alias: u8 = $target;)*
        }

        /// Returns the assembly mnemonic of `opcode`, or `None` for data pushes and unassigned values
        pub fn mnemonic(opcode: u8) -> Option<&'static str> {
            match opcode {
                $($code => Some($asm),)*
                _ => None,
            }
        }
    };
}

opcode_list! {
    data: [
        OpData1 = 0x01,
        OpData2 = 0x02,
        OpData3 = 0x03,
        OpData4 = 0x04,
        OpData5 = 0x05,
        OpData6 = 0x06,
        OpData7 = 0x07,
        OpData8 = 0x08,
        OpData9 = 0x09,
        OpData10 = 0x0a,
        OpData11 = 0x0b,
        OpData12 = 0x0c,
        OpData13 = 0x0d,
        OpData14 = 0x0e,
        OpData15 = 0x0f,
        OpData16 = 0x10,
        OpData17 = 0x11,
        OpData18 = 0x12,
        OpData19 = 0x13,
        OpData20 = 0x14,
        OpData21 = 0x15,
        OpData22 = 0x16,
        OpData23 = 0x17,
        OpData24 = 0x18,
        OpData25 = 0x19,
        OpData26 = 0x1a,
        OpData27 = 0x1b,
        OpData28 = 0x1c,
        OpData29 = 0x1d,
        OpData30 = 0x1e,
        OpData31 = 0x1f,
        OpData32 = 0x20,
        OpData33 = 0x21,
        OpData34 = 0x22,
        OpData35 = 0x23,
        OpData36 = 0x24,
        OpData37 = 0x25,
        OpData38 = 0x26,
        OpData39 = 0x27,
        OpData40 = 0x28,
        OpData41 = 0x29,
        OpData42 = 0x2a,
        OpData43 = 0x2b,
        OpData44 = 0x2c,
        OpData45 = 0x2d,
        OpData46 = 0x2e,
        OpData47 = 0x2f,
        OpData48 = 0x30,
        OpData49 = 0x31,
        OpData50 = 0x32,
        OpData51 = 0x33,
        OpData52 = 0x34,
        OpData53 = 0x35,
        OpData54 = 0x36,
        OpData55 = 0x37,
        OpData56 = 0x38,
        OpData57 = 0x39,
        OpData58 = 0x3a,
        OpData59 = 0x3b,
        OpData60 = 0x3c,
        OpData61 = 0x3d,
        OpData62 = 0x3e,
        OpData63 = 0x3f,
        OpData64 = 0x40,
        OpData65 = 0x41,
        OpData66 = 0x42,
        OpData67 = 0x43,
        OpData68 = 0x44,
        OpData69 = 0x45,
        OpData70 = 0x46,
        OpData71 = 0x47,
        OpData72 = 0x48,
        OpData73 = 0x49,
        OpData74 = 0x4a,
        OpData75 = 0x4b,
    ],
    ops: [
        Op0 = 0x00 => "OP_0",
        OpPushData1 = 0x4c => "OP_PUSHDATA1",
        OpPushData2 = 0x4d => "OP_PUSHDATA2",
        OpPushData4 = 0x4e => "OP_PUSHDATA4",
        Op1Negate = 0x4f => "OP_1NEGATE",
        OpReserved = 0x50 => "OP_RESERVED",
        Op1 = 0x51 => "OP_1",
        Op2 = 0x52 => "OP_2",
        Op3 = 0x53 => "OP_3",
        Op4 = 0x54 => "OP_4",
        Op5 = 0x55 => "OP_5",
        Op6 = 0x56 => "OP_6",
        Op7 = 0x57 => "OP_7",
        Op8 = 0x58 => "OP_8",
        Op9 = 0x59 => "OP_9",
        Op10 = 0x5a => "OP_10",
        Op11 = 0x5b => "OP_11",
        Op12 = 0x5c => "OP_12",
        Op13 = 0x5d => "OP_13",
        Op14 = 0x5e => "OP_14",
        Op15 = 0x5f => "OP_15",
        Op16 = 0x60 => "OP_16",
        OpNop = 0x61 => "OP_NOP",
        OpVer = 0x62 => "OP_VER",
        OpIf = 0x63 => "OP_IF",
        OpNotIf = 0x64 => "OP_NOTIF",
        OpElse = 0x67 => "OP_ELSE",
        OpEndIf = 0x68 => "OP_ENDIF",
        OpVerify = 0x69 => "OP_VERIFY",
        OpReturn = 0x6a => "OP_RETURN",
        OpToAltStack = 0x6b => "OP_TOALTSTACK",
        OpFromAltStack = 0x6c => "OP_FROMALTSTACK",
        OpDrop = 0x75 => "OP_DROP",
        OpDup = 0x76 => "OP_DUP",
        OpNip = 0x77 => "OP_NIP",
        OpOver = 0x78 => "OP_OVER",
        OpPick = 0x79 => "OP_PICK",
        OpRoll = 0x7a => "OP_ROLL",
        OpSwap = 0x7c => "OP_SWAP",
        OpCat = 0x7e => "OP_CAT",
        OpSplit = 0x7f => "OP_SPLIT",
        OpNum2Bin = 0x80 => "OP_NUM2BIN",
        OpBin2Num = 0x81 => "OP_BIN2NUM",
        OpSize = 0x82 => "OP_SIZE",
        OpEqual = 0x87 => "OP_EQUAL",
        OpEqualVerify = 0x88 => "OP_EQUALVERIFY",
        OpAdd = 0x93 => "OP_ADD",
        OpSub = 0x94 => "OP_SUB",
        OpNumEqual = 0x9c => "OP_NUMEQUAL",
        OpNumEqualVerify = 0x9d => "OP_NUMEQUALVERIFY",
        OpLessThan = 0x9f => "OP_LESSTHAN",
        OpGreaterThan = 0xa0 => "OP_GREATERTHAN",
        OpLessThanOrEqual = 0xa1 => "OP_LESSTHANOREQUAL",
        OpGreaterThanOrEqual = 0xa2 => "OP_GREATERTHANOREQUAL",
        OpSha256 = 0xa8 => "OP_SHA256",
        OpHash160 = 0xa9 => "OP_HASH160",
        OpHash256 = 0xaa => "OP_HASH256",
        OpCodeSeparator = 0xab => "OP_CODESEPARATOR",
        OpCheckSig = 0xac => "OP_CHECKSIG",
        OpCheckSigVerify = 0xad => "OP_CHECKSIGVERIFY",
        OpCheckMultiSig = 0xae => "OP_CHECKMULTISIG",
        OpCheckMultiSigVerify = 0xaf => "OP_CHECKMULTISIGVERIFY",
    ],
    aliases: [
        OpFalse = Op0,
        OpTrue = Op1,
    ],
}

/// First value in the range formed by the "small integer" Op# opcodes
pub const OP_SMALL_INT_MIN_VAL: u8 = 1;
/// Last value in the range formed by the "small integer" Op# opcodes
pub const OP_SMALL_INT_MAX_VAL: u8 = 16;
/// First value in the range formed by OpData# opcodes (where opcode == value)
pub const OP_DATA_MIN_VAL: u8 = self::codes::OpData1;
/// Last value in the range formed by OpData# opcodes (where opcode == value)
pub const OP_DATA_MAX_VAL: u8 = self::codes::OpData75;
/// Minus 1 value
pub const OP_1_NEGATE_VAL: u8 = 0x81;

/// Whether `opcode` pushes data (or a small integer) onto the stack
#[inline]
pub fn is_push_opcode(opcode: u8) -> bool {
    opcode <= codes::Op16 && opcode != codes::OpReserved
}

#[cfg(test)]
mod tests {
    use super::{codes::*, *};

    #[test]
    fn test_mnemonics() {
        assert_eq!(mnemonic(OpFalse), Some("OP_0"));
        assert_eq!(mnemonic(OpTrue), Some("OP_1"));
        assert_eq!(mnemonic(Op16), Some("OP_16"));
        assert_eq!(mnemonic(OpReturn), Some("OP_RETURN"));
        assert_eq!(mnemonic(OpCheckSig), Some("OP_CHECKSIG"));
        assert_eq!(mnemonic(OpData20), None);
        assert_eq!(mnemonic(0xff), None);
    }

    #[test]
    fn test_push_opcodes() {
        assert!(is_push_opcode(Op0));
        assert!(is_push_opcode(OpData75));
        assert!(is_push_opcode(OpPushData4));
        assert!(is_push_opcode(Op1Negate));
        assert!(is_push_opcode(Op16));
        assert!(!is_push_opcode(OpReserved));
        assert!(!is_push_opcode(OpNop));
        assert!(!is_push_opcode(OpIf));
    }
}
