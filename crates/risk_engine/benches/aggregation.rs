//! Criterion benchmarks for risk_engine.
//!
//! Benchmarks cover:
//! - Contract book indexing
//! - Portfolio aggregation with varying position counts
//! - Snapshot merge over generated documents

use adapter_span::SpanDocument;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use risk_core::{Contract, InstrumentType, MonthKey, Position, ScenarioArray};
use risk_engine::{aggregate_portfolio, merge_max, ContractBook};

const SCENARIOS: usize = 16;

/// Generate synthetic scenario values.
fn scenario_values(seed: usize) -> Vec<f64> {
    (0..SCENARIOS)
        .map(|i| (((seed * 31 + i * 17) % 200) as f64 - 100.0) * 1.5)
        .collect()
}

/// Generate a book of option contracts over one symbol and twelve months.
fn generate_contracts(n: usize) -> Vec<Contract> {
    (0..n)
        .map(|i| {
            let month = MonthKey::new(2025, (i % 12) as u32 + 1).unwrap_or(MonthKey::Unknown);
            let strike = 50_000.0 + (i / 12) as f64 * 100.0;
            Contract::new(
                "GOLD",
                month,
                InstrumentType::Option,
                strike,
                ScenarioArray::new(scenario_values(i)),
            )
        })
        .collect()
}

/// Positions on every contract of a generated book.
fn generate_positions(contracts: &[Contract]) -> Vec<Position> {
    contracts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let lots = (i % 7) as i64 - 3;
            Position::new(&c.symbol, c.month, c.instrument, c.strike, lots)
        })
        .collect()
}

/// Generate a risk document with `n` futures.
fn generate_document(n: usize, offset: f64) -> SpanDocument {
    let mut xml = String::from("<spanFile>");
    for i in 0..n {
        xml.push_str(&format!("<fut><cId>{}</cId><pe>20250130</pe><ra>", i));
        for v in scenario_values(i) {
            xml.push_str(&format!("<a>{}</a>", v + offset));
        }
        xml.push_str("</ra></fut>");
    }
    xml.push_str("</spanFile>");
    SpanDocument::parse(&xml).expect("generated document is well-formed")
}

fn bench_book_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("contract_book");
    for n in [100, 1_000, 10_000] {
        let contracts = generate_contracts(n);
        group.bench_with_input(BenchmarkId::new("index", n), &contracts, |b, contracts| {
            b.iter(|| ContractBook::new(black_box(contracts.clone())))
        });
    }
    group.finish();
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("portfolio_aggregation");
    for n in [10, 100, 1_000] {
        let contracts = generate_contracts(n);
        let positions = generate_positions(&contracts);
        let book = ContractBook::new(contracts);
        group.bench_with_input(BenchmarkId::new("positions", n), &positions, |b, positions| {
            b.iter(|| aggregate_portfolio(black_box(positions), black_box(&book)))
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_merge");
    for n in [100, 1_000] {
        let earlier = generate_document(n, 0.0);
        let later = generate_document(n, 5.0);
        group.bench_with_input(BenchmarkId::new("merge_max", n), &n, |b, _| {
            b.iter(|| merge_max(black_box(&earlier), black_box(&later)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_book_index, bench_aggregation, bench_merge);
criterion_main!(benches);
