use batch::{BatchRunner, OutputFormat, build_sink};
use common::{Record, Selector};
use criterion::{Criterion, criterion_group, criterion_main};
use lookup::InMemoryLookup;
use serde_json::json;

fn populate_lookup(n: usize) -> (InMemoryLookup, Vec<String>) {
    let mut lookup = InMemoryLookup::new();
    let mut addresses = Vec::with_capacity(n);
    for i in 0..n {
        let address = format!("10.{}.{}.{}", i / 65536 % 256, i / 256 % 256, i % 256);
        let record: Record = serde_json::from_value(json!({
            "ip": address,
            "city": "Somewhere",
            "status": 200,
            "asn": {"name": "Example Net", "domain": "example.net"},
            "threat": {"scores": {"vpn_score": 0, "threat_score": 0}}
        }))
        .unwrap();
        lookup = lookup.with_record(address.clone(), record);
        addresses.push(address);
    }
    (lookup, addresses)
}

fn bench_json_batch_1000(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (lookup, addresses) = populate_lookup(1000);
    let selectors = Selector::parse_list("ip,asn.name,threat.scores.threat_score");

    c.bench_function("batch/json_1000_addresses", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut out = Vec::new();
                let mut sink = build_sink(OutputFormat::Json, &selectors, &mut out).unwrap();
                BatchRunner::new(lookup.clone())
                    .with_selectors(selectors.clone())
                    .run(&addresses, &mut sink)
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_csv_batch_1000(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (lookup, addresses) = populate_lookup(1000);
    let selectors = Selector::parse_list("ip,city,asn.name,threat.scores.threat_score");

    c.bench_function("batch/csv_1000_addresses", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut out = Vec::new();
                let mut sink = build_sink(OutputFormat::Csv, &selectors, &mut out).unwrap();
                BatchRunner::new(lookup.clone())
                    .with_selectors(selectors.clone())
                    .run(&addresses, &mut sink)
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_json_batch_1000, bench_csv_batch_1000);
criterion_main!(benches);
