//! Benchmarks for the hot paths of evaluation: expression reduction,
//! statement/loop execution, and the `BigDecimal` arithmetic underneath
//! both. Grounded on the teacher's `benches/mod.rs` `criterion_group!`/
//! `criterion_main!` shape, scoped to Cantus's own evaluator instead of
//! DATEX's JSON/DXB codec paths.

use cantus_core::bigdecimal::BigDecimal;
use cantus_core::config::EvaluatorConfig;
use cantus_core::context::Context;
use cantus_core::runtime::evaluator::Evaluator;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_arithmetic_expression(c: &mut Criterion) {
    c.bench_function("eval arithmetic expression", |b| {
        b.iter(|| {
            let mut evaluator = Evaluator::new(EvaluatorConfig::default(), Context::native());
            black_box(evaluator.eval(black_box("2 + 3 * 4 - 1 / 2 ^ 2")).unwrap());
        })
    });
}

fn bench_matrix_multiply(c: &mut Criterion) {
    c.bench_function("eval matrix multiply", |b| {
        b.iter(|| {
            let mut evaluator = Evaluator::new(EvaluatorConfig::default(), Context::native());
            black_box(evaluator.eval(black_box("[[1,2],[3,4]] * [[5,6],[7,8]]")).unwrap());
        })
    });
}

fn bench_for_loop(c: &mut Criterion) {
    c.bench_function("eval for-to-step loop", |b| {
        b.iter(|| {
            let mut evaluator = Evaluator::new(EvaluatorConfig::default(), Context::native());
            black_box(evaluator.eval(black_box("s := 0\nfor i = 1 to 100:\n    s += i\ns")).unwrap());
        })
    });
}

fn bench_bigdecimal_arithmetic(c: &mut Criterion) {
    c.bench_function("bigdecimal mul/div chain", |b| {
        b.iter(|| {
            let a = BigDecimal::parse_with_sig_figs("123456.789").unwrap();
            let divisor = BigDecimal::parse_with_sig_figs("3.14159").unwrap();
            let product = black_box(&a).checked_mul(black_box(&a));
            black_box(product.checked_div(black_box(&divisor), 20));
        })
    });
}

criterion_group!(evaluation, bench_arithmetic_expression, bench_matrix_multiply, bench_for_loop);
criterion_group!(bigdecimal, bench_bigdecimal_arithmetic);
criterion_main!(evaluation, bigdecimal);
