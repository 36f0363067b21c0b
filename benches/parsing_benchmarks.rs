use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nc_program_concatenation::parser::{ProgramRole, parse_line, parse_program};

/// Generate a sub-program body of different patterns for benchmarking
fn generate_program(lines: usize, pattern: &str) -> String {
    let mut content = String::from("O8000(4-M10)\nG90G54\n");

    match pattern {
        "coordinates" => {
            for i in 0..lines {
                content.push_str(&format!("X{:.3}Y{:.3}\n", i as f32 * 0.5, i as f32 * 0.25));
            }
        }
        "template" => {
            for _ in 0..lines {
                content.push_str("G98G83R3.Z***Q***F***\n");
            }
        }
        _ => {
            for i in 0..lines {
                match i % 4 {
                    0 => content.push_str(&format!("X{}Y{}\n", i, i * 2)),
                    1 => content.push_str(&format!("#{}={}.\n", 100 + i % 50, i)),
                    2 => content.push_str(&format!("/{}X-{}.Y5.\n", 1 + i % 9, i)),
                    3 => content.push_str("(CHECK)M98P1234\n"),
                    _ => unreachable!(),
                }
            }
        }
    }

    content.push_str("M99\n");
    content
}

/// Benchmark parsing single lines with different shapes
fn bench_single_line_parsing(c: &mut Criterion) {
    let test_lines = [
        ("coordinate", "X123.456Y-78.9"),
        ("canned_cycle", "G98G83R3.Z-15.Q2.F250"),
        ("placeholder", "G98G83R3.Z***Q***F***"),
        ("comment", "(2-3/16 P.H)"),
        ("variable", "#100=-3.5"),
        ("block_skip", "/2X80.Y65."),
    ];

    let mut group = c.benchmark_group("single_line_parsing");

    for (name, line) in test_lines {
        group.bench_with_input(BenchmarkId::new("parse_line", name), &line, |b, line| {
            b.iter(|| black_box(parse_line(1, black_box(line))))
        });
    }

    group.finish();
}

/// Benchmark parsing and re-serializing whole programs
fn bench_program_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("program_round_trip");

    for &size in &[100, 1_000, 10_000] {
        for pattern in ["coordinates", "template", "mixed"] {
            let content = generate_program(size, pattern);

            group.throughput(Throughput::Bytes(content.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(pattern, size),
                &content,
                |b, content| {
                    b.iter(|| {
                        let program =
                            parse_program(black_box(content), ProgramRole::SubProgram, "O8000");
                        black_box(program.map(|p| p.to_string()))
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_single_line_parsing, bench_program_round_trip);
criterion_main!(benches);
