use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pitchzones::coord::Coordinate;
use pitchzones::distribution::aggregate;
use pitchzones::zone::{classify, Zone};

fn criterion_benchmark(c: &mut Criterion) {
    {
        let coordinate = Coordinate::new(34, 89);
        assert_eq!(Zone::GoldenZone, classify(&coordinate));
        c.bench_function("cri_classify_golden", |b| {
            b.iter(|| classify(black_box(&coordinate)));
        });
    }
    {
        let coordinate = Coordinate::new(50, 95);
        assert_eq!(Zone::Nd2Right, classify(&coordinate));
        c.bench_function("cri_classify_last_named", |b| {
            b.iter(|| classify(black_box(&coordinate)));
        });
    }
    {
        let coordinate = Coordinate::new(5, 95);
        assert_eq!(Zone::Remaining, classify(&coordinate));
        c.bench_function("cri_classify_uncovered_strip", |b| {
            b.iter(|| classify(black_box(&coordinate)));
        });
    }
    {
        let coordinates = (0..=68)
            .flat_map(|x| (60..=100).map(move |y| Coordinate::new(x, y)))
            .collect::<Vec<_>>();
        c.bench_function("cri_classify_aggregate_grid", |b| {
            b.iter(|| aggregate(black_box(&coordinates)));
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
