use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use layline_core::{FormatOptions, OcrBox, format, merge};

struct XorShift64(u64);

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn gen_f64(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + unit * (hi - lo)
    }
}

const WORDS: &[&str] = &[
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel",
];

/// Prose-like page: rows of jittered word boxes, three per row.
fn prose_page(seed: u64, rows: usize) -> Vec<OcrBox> {
    let mut rng = XorShift64::new(seed);
    let mut boxes = Vec::with_capacity(rows * 3);
    for row in 0..rows {
        let y0 = 1000.0 - row as f64 * 14.0 + rng.gen_f64(0.0, 1.5);
        let mut x = rng.gen_f64(0.0, 6.0);
        for col in 0..3 {
            let word = WORDS[(row * 3 + col) % WORDS.len()];
            let w = word.len() as f64 * 7.0;
            boxes.push(OcrBox::new(word, (x, y0, x + w, y0 + 10.0)).unwrap());
            x += w + rng.gen_f64(8.0, 14.0);
        }
    }
    boxes
}

/// Table-like page: rows of four cells on fixed column positions.
fn table_page(seed: u64, rows: usize) -> Vec<OcrBox> {
    let mut rng = XorShift64::new(seed);
    let mut boxes = Vec::with_capacity(rows * 4);
    for row in 0..rows {
        let y0 = 1000.0 - row as f64 * 14.0;
        for col in 0..4 {
            let x0 = col as f64 * 120.0 + rng.gen_f64(0.0, 2.0);
            let word = WORDS[(row + col) % WORDS.len()];
            let w = word.len() as f64 * 7.0;
            boxes.push(OcrBox::new(word, (x0, y0, x0 + w, y0 + 10.0)).unwrap());
        }
    }
    boxes
}

fn bench_format(c: &mut Criterion) {
    let options = FormatOptions::default();
    let mut group = c.benchmark_group("format");
    for &rows in &[16usize, 64, 256] {
        group.throughput(Throughput::Elements(rows as u64));

        let prose = prose_page(0x1357_9bdf, rows);
        group.bench_with_input(BenchmarkId::new("prose", rows), &prose, |b, boxes| {
            b.iter(|| format(black_box(boxes), &options));
        });

        let table = table_page(0x2468_ace0, rows);
        group.bench_with_input(BenchmarkId::new("table", rows), &table, |b, boxes| {
            b.iter(|| format(black_box(boxes), &options));
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for &rows in &[16usize, 64, 256] {
        group.throughput(Throughput::Elements(rows as u64));

        // Two passes over the same page, the second slightly shifted so most
        // boxes fuse.
        let primary = prose_page(0x0dde_face, rows);
        let secondary: Vec<OcrBox> = primary
            .iter()
            .map(|b| {
                let (x0, y0, x1, y1) = b.rect();
                OcrBox::new(b.text(), (x0 + 1.0, y0, x1 + 1.0, y1)).unwrap()
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(rows),
            &(primary, secondary),
            |b, (p, s)| {
                b.iter(|| merge(black_box(p), black_box(s)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_format, bench_merge);
criterion_main!(benches);
