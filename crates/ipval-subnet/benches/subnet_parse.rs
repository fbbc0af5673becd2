use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ipval_subnet::Subnet;

fn benchmark_parse(c: &mut Criterion) {
    c.bench_function("parse_cidr_bit_count", |b| {
        b.iter(|| Subnet::parse(black_box("192.168.10.10/26")))
    });

    c.bench_function("parse_explicit_mask", |b| {
        b.iter(|| Subnet::parse(black_box("192.168.0.0/255.255.255.252")))
    });

    c.bench_function("parse_wildcard", |b| {
        b.iter(|| Subnet::parse(black_box("192.168.123.*")))
    });

    c.bench_function("is_in_range", |b| {
        let subnet = Subnet::parse("10.0.0.0/8").unwrap();
        b.iter(|| subnet.is_in_range(black_box("10.1.2.3")))
    });
}

criterion_group!(benches, benchmark_parse);
criterion_main!(benches);
