use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ftmint_addresses::{Address, Prefix};
use ftmint_consensus_core::{context::ChangeOutput, tx::TransactionOutpoint};
use ftmint_hashes::{Hash, Hash160};
use ftmint_token::{FungibleToken, MintCallBuilder, TokenId, TokenParams, TokenState};

fn mint_benchmark(c: &mut Criterion) {
    let params = TokenParams::new(TokenId::from_outpoint(Hash::from_u64_word(1), 0), "BENCH", 21_000_000, 8, 1000, 10).unwrap();
    // Compiled covenants are typically a few kilobytes
    let token = FungibleToken::new(params, vec![0x7e; 4000].into());
    let state = TokenState::new(20_000_000, 800_000);
    let predicate = token.bind(state).unwrap();
    let destination = Address::new(Prefix::Mainnet, Hash160::from_bytes([1; 20]));

    let partial = MintCallBuilder::new(predicate, TransactionOutpoint::new(Hash::from_u64_word(2), 0), destination, 1000)
        .lock_time(800_010)
        .change(ChangeOutput::new(destination, 10_000))
        .build()
        .unwrap();
    c.bench_function("evaluate_partial_mint", |b| b.iter(|| predicate.evaluate(black_box(&partial.context))));

    let exhausted = token.bind(TokenState::new(500, 800_000)).unwrap();
    let terminal =
        MintCallBuilder::new(exhausted, TransactionOutpoint::new(Hash::from_u64_word(3), 0), destination, 1000).lock_time(800_010).build().unwrap();
    c.bench_function("evaluate_terminal_mint", |b| b.iter(|| exhausted.evaluate(black_box(&terminal.context))));

    c.bench_function("build_state_output", |b| b.iter(|| token.build_state_output_ft(black_box(&state))));
}

criterion_group!(benches, mint_benchmark);
criterion_main!(benches);
