use chrono::DateTime;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_properties::{from_str, to_string_with_options, OrderedProperties, PropertiesOptions};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

fn options() -> PropertiesOptions {
    PropertiesOptions::new()
        .with_timestamp(DateTime::parse_from_rfc3339("2024-01-15T10:30:00+00:00").unwrap())
}

fn sample_file(size: usize) -> String {
    let mut text = String::from("# generated sample\n");
    for i in 0..size {
        text.push_str(&format!("app.module{}.name = Module number {}\n", i, i));
        text.push_str(&format!("app.module{}.path : C:\\\\modules\\\\m{}\n", i, i));
        text.push_str(&format!(
            "app.module{}.description = first part \\\n    second part caf\\u00E9\n",
            i
        ));
    }
    text
}

fn benchmark_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for size in [10, 100, 1000].iter() {
        let text = sample_file(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let mut props = OrderedProperties::new();
                props.load(black_box(text.as_bytes())).unwrap();
                props
            })
        });
    }
    group.finish();
}

fn benchmark_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    for size in [10, 100, 1000].iter() {
        let mut props = OrderedProperties::new().with_options(options());
        props.load(sample_file(*size).as_bytes()).unwrap();
        props.set_property("unicode", "日本語 😀");

        group.bench_with_input(BenchmarkId::from_parameter(size), &props, |b, props| {
            b.iter(|| {
                let mut out = Vec::with_capacity(64 * 1024);
                black_box(props).store(&mut out, Some("bench")).unwrap();
                out
            })
        });
    }
    group.finish();
}

fn benchmark_long_line(c: &mut Criterion) {
    let value = "abcdefghij".repeat(1000);
    let text = format!("long = {}\n", value);

    c.bench_function("load_long_line", |b| {
        b.iter(|| {
            let mut props = OrderedProperties::new();
            props.load(black_box(text.as_bytes())).unwrap();
            props
        })
    });
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    let mut group = c.benchmark_group("comparison");

    group.bench_function("properties_serialize", |b| {
        b.iter(|| to_string_with_options(black_box(&user), options()))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&user)))
    });

    let properties_str = to_string_with_options(&user, options()).unwrap();
    let json_str = serde_json::to_string(&user).unwrap();

    group.bench_function("properties_deserialize", |b| {
        b.iter(|| from_str::<User>(black_box(&properties_str)))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<User>(black_box(&json_str)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("roundtrip_simple", |b| {
        b.iter(|| {
            let serialized = to_string_with_options(black_box(&user), options()).unwrap();
            let _deserialized: User = from_str(black_box(&serialized)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_load,
    benchmark_store,
    benchmark_long_line,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);
