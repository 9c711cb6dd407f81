use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use smart_chess::game_state::board::{initial_board, Board};
use smart_chess::game_state::chess_types::Color;
use smart_chess::move_generation::perft::perft;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    diagram: Option<&'static str>,
    expected_nodes: &'static [u64],
}

const KIWIPETE: &str = "r...k..r
                        p.ppqpb.
                        bn..pnp.
                        ...PN...
                        .p..P...
                        ..N..Q.p
                        PPPBBPPP
                        R...K..R";

const POSITION_3: &str = "........
                          ..p.....
                          ...p....
                          KP.....r
                          .R...p.k
                          ........
                          ....P.P.
                          ........";

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "position_1",
        diagram: None,
        expected_nodes: &[20, 400, 8902],
    },
    BenchCase {
        name: "position_2",
        diagram: Some(KIWIPETE),
        expected_nodes: &[48, 2039],
    },
    BenchCase {
        name: "position_3",
        diagram: Some(POSITION_3),
        expected_nodes: &[14, 191, 2812],
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "position_1",
        diagram: None,
        expected_nodes: &[20, 400, 8902, 197_281],
    },
    BenchCase {
        name: "position_2",
        diagram: Some(KIWIPETE),
        expected_nodes: &[48, 2039, 97_862],
    },
    BenchCase {
        name: "position_3",
        diagram: Some(POSITION_3),
        expected_nodes: &[14, 191, 2812, 43_238],
    },
];

fn suite_is_standard() -> bool {
    matches!(std::env::var("SMART_CHESS_BENCH_SUITE"), Ok(value) if value.eq_ignore_ascii_case("standard"))
}

fn case_board(case: &BenchCase) -> Board {
    match case.diagram {
        Some(diagram) => Board::from_diagram(diagram).expect("benchmark diagram should parse"),
        None => initial_board(),
    }
}

fn bench_perft(c: &mut Criterion) {
    let (suite_name, cases) = if suite_is_standard() {
        ("standard", CASES_STANDARD)
    } else {
        ("quick", CASES_QUICK)
    };

    let mut group = c.benchmark_group(format!("perft_{suite_name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in cases {
        let board = case_board(case);

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before benchmarking.
            let warmup = perft(&board, Color::White, None, depth);
            assert_eq!(
                warmup.nodes as u64, *expected_nodes,
                "node mismatch in warmup for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            let bench_name = format!("{}_d{}", case.name, depth);

            group.bench_with_input(
                BenchmarkId::from_parameter(bench_name),
                expected_nodes,
                |b, expected| {
                    b.iter(|| {
                        let count = perft(black_box(&board), Color::White, None, black_box(depth));
                        assert_eq!(count.nodes as u64, *expected);
                        black_box(count.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
