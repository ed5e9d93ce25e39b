//! 1Sat ordinals inscription envelopes.
//!
//! An envelope is a never executed `OP_FALSE OP_IF ... OP_ENDIF` block prefixed to a
//! locking script: `OP_FALSE OP_IF "ord" OP_1 <content type> OP_0 <content> OP_ENDIF`.

use crate::{
    errors::TxScriptResult,
    opcodes::codes::{Op0, Op1, OpEndIf, OpFalse, OpIf},
    script_builder::{ScriptBuilder, ScriptBuilderResult},
    script_parser::parse_script,
};

pub const ORD_TAG: &[u8] = b"ord";

/// Content type of BSV-20 token inscriptions
pub const BSV20_CONTENT_TYPE: &[u8] = b"application/bsv-20";

/// Instruction count of a well formed envelope
const ENVELOPE_INSTRUCTIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inscription<'a> {
    pub content_type: &'a [u8],
    pub content: &'a [u8],
}

impl<'a> Inscription<'a> {
    pub fn new(content_type: &'a [u8], content: &'a [u8]) -> Self {
        Self { content_type, content }
    }

    /// Appends the envelope to the builder
    pub fn write_envelope<'b>(&self, builder: &'b mut ScriptBuilder) -> ScriptBuilderResult<&'b mut ScriptBuilder> {
        builder
            .add_op(OpFalse)?
            .add_op(OpIf)?
            .add_data(ORD_TAG)?
            .add_op(Op1)?
            .add_data(self.content_type)?
            .add_op(Op0)?
            .add_data(self.content)?
            .add_op(OpEndIf)
    }

    /// Returns the envelope script on its own
    pub fn envelope(&self) -> ScriptBuilderResult<Vec<u8>> {
        Ok(self.write_envelope(&mut ScriptBuilder::new())?.drain())
    }

    /// Splits a script that starts with an inscription envelope into the inscription and the
    /// remaining script. Returns `Ok(None)` when the script does not start with an envelope
    pub fn split(script: &'a [u8]) -> TxScriptResult<Option<(Inscription<'a>, &'a [u8])>> {
        let mut instructions = Vec::with_capacity(ENVELOPE_INSTRUCTIONS);
        for parsed in parse_script(script).take(ENVELOPE_INSTRUCTIONS) {
            instructions.push(parsed?);
        }
        if instructions.len() != ENVELOPE_INSTRUCTIONS {
            return Ok(None);
        }

        let opcodes: Vec<u8> = instructions.iter().map(|parsed| parsed.opcode).collect();
        let shape_matches = opcodes[0] == OpFalse
            && opcodes[1] == OpIf
            && instructions[2].is_data_push()
            && instructions[2].data == ORD_TAG
            && opcodes[3] == Op1
            && instructions[4].is_data_push()
            && opcodes[5] == Op0
            && instructions[6].is_data_push()
            && opcodes[7] == OpEndIf;
        if !shape_matches {
            return Ok(None);
        }

        let consumed: usize = instructions.iter().map(|parsed| parsed.encoded_len()).sum();
        let inscription = Inscription { content_type: instructions[4].data, content: instructions[6].data };
        Ok(Some((inscription, &script[consumed..])))
    }
}
