use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pitchzones::extract::{extract, parse_lenient, parse_strict};

fn source(pairs: usize, typo: bool) -> String {
    let mut goals = (0..pairs)
        .map(|i| format!("({}, {})", i % 68, 75 + i % 25))
        .collect::<Vec<_>>();
    if typo {
        goals[pairs / 2] = "(30 ,, 80".into();
    }
    format!(
        "import matplotlib.pyplot as plt\n\ngoals = [\n    {}\n]\nassists = [(30, 80), (61, 85)]\nplt.title(\"U18 - Eigene Tore\\n 2 Elfmeter\")\n",
        goals.join(",\n    ")
    )
}

fn criterion_benchmark(c: &mut Criterion) {
    {
        let text = source(100, false);
        assert_eq!(100, extract(&text).goals.len());
        c.bench_function("cri_extract_clean_100", |b| {
            b.iter(|| extract(black_box(&text)));
        });
    }
    {
        let text = source(100, true);
        assert_eq!(99, extract(&text).goals.len());
        c.bench_function("cri_extract_typo_100", |b| {
            b.iter(|| extract(black_box(&text)));
        });
    }
    {
        let contents = (0..100).map(|i| format!("({i}, {i})")).collect::<Vec<_>>().join(", ");
        assert!(parse_strict(&contents).is_ok());
        c.bench_function("cri_extract_strict_100", |b| {
            b.iter(|| parse_strict(black_box(&contents)));
        });
        c.bench_function("cri_extract_lenient_100", |b| {
            b.iter(|| parse_lenient(black_box(&contents)));
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
