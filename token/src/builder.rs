use crate::{
    errors::{TokenError, TokenResult},
    fungible_token::FungibleToken,
    predicate::{MintContext, MintPredicate},
    state::TokenState,
};
use ftmint_addresses::{Address, Prefix};
use ftmint_consensus_core::{
    constants::{MAX_TX_IN_SEQUENCE_NUM, TX_VERSION},
    context::{ChangeOutput, TxContext},
    tx::{Transaction, TransactionInput, TransactionOutpoint},
};

/// Input index of the contract output being spent
pub const CONTRACT_INPUT_INDEX: usize = 0;

/// Output index of the successor contract output, when there is one
pub const SUCCESSOR_OUTPUT_INDEX: u32 = 0;

/// An unsigned mint transaction together with the context the predicate evaluates it under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintCall {
    pub tx: Transaction,
    pub context: MintContext,
    /// Outpoint of the successor contract output, absent for a terminal mint
    pub successor: Option<TransactionOutpoint>,
}

/// Assembles the transaction spending a mint covenant output.
///
/// The builder lays out inputs and outputs the way the predicate expects them but does not
/// validate the call: a mint that breaks the throttle or the amount bound is built as asked
/// and rejected by [`MintPredicate::evaluate`].
pub struct MintCallBuilder<'a> {
    predicate: MintPredicate<'a>,
    contract_outpoint: TransactionOutpoint,
    destination: Address,
    amount: u64,
    lock_time: u32,
    sequence: u32,
    funding_inputs: Vec<TransactionInput>,
    change: Option<ChangeOutput>,
    network: Option<Prefix>,
}

impl<'a> MintCallBuilder<'a> {
    pub fn new(predicate: MintPredicate<'a>, contract_outpoint: TransactionOutpoint, destination: Address, amount: u64) -> Self {
        Self {
            predicate,
            contract_outpoint,
            destination,
            amount,
            lock_time: 0,
            // Lock time is only enforced for non-final inputs
            sequence: MAX_TX_IN_SEQUENCE_NUM - 1,
            funding_inputs: vec![],
            change: None,
            network: None,
        }
    }

    pub fn lock_time(mut self, lock_time: u32) -> Self {
        self.lock_time = lock_time;
        self
    }

    /// Sequence of the contract input
    pub fn sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    /// Adds an input paying the fees. Funding inputs follow the contract input
    pub fn funding_input(mut self, input: TransactionInput) -> Self {
        self.funding_inputs.push(input);
        self
    }

    pub fn change(mut self, change: ChangeOutput) -> Self {
        self.change = Some(change);
        self
    }

    /// Requires the destination and change addresses to belong to `network`
    pub fn network(mut self, network: Prefix) -> Self {
        self.network = Some(network);
        self
    }

    fn check_network(&self) -> TokenResult<()> {
        let Some(expected) = self.network else {
            return Ok(());
        };
        let addresses = std::iter::once(&self.destination).chain(self.change.as_ref().map(|change| &change.address));
        match addresses.map(|address| address.prefix).find(|&found| found != expected) {
            Some(found) => Err(TokenError::NetworkMismatch { expected, found }),
            None => Ok(()),
        }
    }

    pub fn build(self) -> TokenResult<MintCall> {
        self.check_network()?;
        let token = self.predicate.token();
        let state = self.predicate.state();

        let (transferred, successor_output) = if state.supply > self.amount {
            let next_state = TokenState::new(state.supply - self.amount, self.lock_time as u64);
            (self.amount, Some(token.build_state_output_ft(&next_state)?))
        } else {
            (state.supply, None)
        };
        let has_successor = successor_output.is_some();

        let transfer = FungibleToken::build_transfer_output(&self.destination, &token.id(), transferred)?;
        let change = FungibleToken::build_change_output(self.change.as_ref());
        let outputs = successor_output.into_iter().chain(Some(transfer)).chain(change).collect();

        let contract_input = TransactionInput::new(self.contract_outpoint, vec![], self.sequence);
        let inputs = std::iter::once(contract_input).chain(self.funding_inputs).collect();

        let tx = Transaction::new(TX_VERSION, inputs, outputs, self.lock_time);
        let tx_context = TxContext::from_transaction(&tx, CONTRACT_INPUT_INDEX, self.change)?;
        let successor = has_successor.then(|| TransactionOutpoint::new(tx.id(), SUCCESSOR_OUTPUT_INDEX));

        Ok(MintCall { context: MintContext::new(self.destination, self.amount, tx_context), successor, tx })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::MintError, params::TokenParams, token_id::TokenId};
    use ftmint_consensus_core::constants::TOKEN_OUTPUT_VALUE;
    use ftmint_hashes::{Hash, Hash160};
    use smallvec::smallvec;

    fn token() -> FungibleToken {
        let params = TokenParams::new(TokenId::from_outpoint(Hash::from_u64_word(77), 1), "MINT", 1000, 2, 500, 600).unwrap();
        FungibleToken::new(params, smallvec![0xac])
    }

    fn address(byte: u8) -> Address {
        Address::new(Prefix::Testnet, Hash160::from_bytes([byte; 20]))
    }

    fn contract_outpoint() -> TransactionOutpoint {
        TransactionOutpoint::new(Hash::from_u64_word(78), 0)
    }

    #[test]
    fn test_partial_call() {
        let token = token();
        let predicate = token.bind(TokenState::new(1000, 1000)).unwrap();
        let funding = TransactionInput::new(TransactionOutpoint::new(Hash::from_u64_word(5), 3), vec![], MAX_TX_IN_SEQUENCE_NUM);
        let call = MintCallBuilder::new(predicate, contract_outpoint(), address(1), 300)
            .lock_time(1600)
            .funding_input(funding.clone())
            .change(ChangeOutput::new(address(2), 900))
            .build()
            .unwrap();

        assert_eq!(call.tx.inputs.len(), 2);
        assert_eq!(call.tx.inputs[CONTRACT_INPUT_INDEX].previous_outpoint, contract_outpoint());
        assert_eq!(call.tx.inputs[CONTRACT_INPUT_INDEX].sequence, MAX_TX_IN_SEQUENCE_NUM - 1);
        assert_eq!(call.tx.inputs[1], funding);
        assert_eq!(call.tx.outputs.len(), 3);
        assert_eq!(call.tx.outputs[0].value, TOKEN_OUTPUT_VALUE);
        assert_eq!(call.tx.outputs[2].value, 900);
        assert_eq!(call.successor, Some(TransactionOutpoint::new(call.tx.id(), SUCCESSOR_OUTPUT_INDEX)));
        assert_eq!(call.context.tx.hash_outputs, call.tx.outputs_hash());

        let acceptance = predicate.evaluate(&call.context).unwrap();
        assert_eq!(acceptance.outputs, call.tx.outputs);
        assert_eq!(token.decode_state_output(call.tx.outputs[0].script_public_key.script()), Ok(acceptance.next_state));
    }

    #[test]
    fn test_terminal_call() {
        let token = token();
        let predicate = token.bind(TokenState::new(120, 1000)).unwrap();
        let call = MintCallBuilder::new(predicate, contract_outpoint(), address(1), 500).lock_time(2000).build().unwrap();

        assert_eq!(call.tx.outputs.len(), 1);
        assert_eq!(call.successor, None);
        let acceptance = predicate.evaluate(&call.context).unwrap();
        assert_eq!(acceptance.transferred, 120);
        assert!(acceptance.is_terminal());
    }

    #[test]
    fn test_builder_does_not_validate() {
        struct Test {
            name: &'static str,
            amount: u64,
            lock_time: u32,
            sequence: u32,
            expected: MintError,
        }

        let tests = vec![
            Test {
                name: "too early",
                amount: 100,
                lock_time: 1599,
                sequence: MAX_TX_IN_SEQUENCE_NUM - 1,
                expected: MintError::ThrottleViolation { lock_time: 1599, unlock: 1600 },
            },
            Test {
                name: "too much",
                amount: 501,
                lock_time: 1600,
                sequence: MAX_TX_IN_SEQUENCE_NUM - 1,
                expected: MintError::AmountExceedsLimit { requested: 501, max: 500 },
            },
            Test { name: "final", amount: 100, lock_time: 1600, sequence: MAX_TX_IN_SEQUENCE_NUM, expected: MintError::FinalSequence },
        ];

        let token = token();
        let predicate = token.bind(TokenState::new(1000, 1000)).unwrap();
        for test in tests {
            let call = MintCallBuilder::new(predicate, contract_outpoint(), address(1), test.amount)
                .lock_time(test.lock_time)
                .sequence(test.sequence)
                .build()
                .unwrap();
            assert_eq!(predicate.evaluate(&call.context), Err(test.expected), "test '{}' failed", test.name);
        }
    }

    #[test]
    fn test_network_check() {
        struct Test {
            name: &'static str,
            destination: Address,
            change: Option<Address>,
            expected: Option<TokenError>,
        }

        let mainnet = Address::new(Prefix::Mainnet, Hash160::from_bytes([3; 20]));
        let tests = vec![
            Test { name: "matching destination", destination: address(1), change: None, expected: None },
            Test { name: "matching destination and change", destination: address(1), change: Some(address(2)), expected: None },
            Test {
                name: "foreign destination",
                destination: mainnet,
                change: Some(address(2)),
                expected: Some(TokenError::NetworkMismatch { expected: Prefix::Testnet, found: Prefix::Mainnet }),
            },
            Test {
                name: "foreign change",
                destination: address(1),
                change: Some(mainnet),
                expected: Some(TokenError::NetworkMismatch { expected: Prefix::Testnet, found: Prefix::Mainnet }),
            },
        ];

        let token = token();
        let predicate = token.bind(TokenState::new(1000, 1000)).unwrap();
        for test in tests {
            let mut builder = MintCallBuilder::new(predicate, contract_outpoint(), test.destination, 100).lock_time(1600).network(Prefix::Testnet);
            if let Some(change) = test.change {
                builder = builder.change(ChangeOutput::new(change, 900));
            }
            assert_eq!(builder.build().err(), test.expected, "test '{}' failed", test.name);
        }

        // Without a network any address is laid out as given
        let call = MintCallBuilder::new(predicate, contract_outpoint(), mainnet, 100).lock_time(1600).build().unwrap();
        assert!(predicate.evaluate(&call.context).is_ok());
    }
}
