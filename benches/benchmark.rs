//! Benchmarks for rotorcrypt machine operations.
//!
//! Measures machine construction, per-letter enciphering throughput and
//! how throughput scales with the number of rotors.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rotorcrypt::{Machine, MachineSettings};

/// Message used consistently across all throughput benchmarks.
const BENCH_TEXT: &str = "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG ";

fn settings(rotors: &[&str]) -> MachineSettings {
    MachineSettings::new(rotors.iter().copied(), "B")
        .plug('A', 'B')
        .plug('C', 'D')
        .plug('X', 'Z')
}

/// Benchmarks `Machine::new()`: catalog lookup, inverse wiring and
/// plugboard setup.
fn bench_construction(c: &mut Criterion) {
    let s = settings(&["I", "II", "III"]);
    c.bench_function("machine_new", |b| {
        b.iter(|| Machine::new(black_box(&s)).unwrap());
    });
}

/// Benchmarks `encrypt()` on a fixed message with three rotors. The
/// machine is built once and its rotors keep turning between iterations.
fn bench_encrypt(c: &mut Criterion) {
    let mut machine = Machine::new(&settings(&["I", "II", "III"])).unwrap();

    let mut group = c.benchmark_group("encrypt");
    group.throughput(Throughput::Bytes(BENCH_TEXT.len() as u64));
    group.bench_function("3_rotors", |b| {
        b.iter(|| machine.encrypt(black_box(BENCH_TEXT)));
    });
    group.finish();
}

/// Benchmarks `encrypt()` across rotor counts.
fn bench_encrypt_rotor_scaling(c: &mut Criterion) {
    let stacks: &[&[&str]] = &[&["III"], &["II", "III"], &["I", "II", "III"], &["V", "IV", "I", "II", "III"]];

    let mut group = c.benchmark_group("encrypt_rotor_scaling");
    group.throughput(Throughput::Bytes(BENCH_TEXT.len() as u64));

    for rotors in stacks {
        let mut machine = Machine::new(&settings(rotors)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(rotors.len()), &rotors.len(), |b, _| {
            b.iter(|| machine.encrypt(black_box(BENCH_TEXT)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_encrypt,
    bench_encrypt_rotor_scaling,
);
criterion_main!(benches);
