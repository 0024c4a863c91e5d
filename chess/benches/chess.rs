use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gambit::{attack, movegen, Board, Color, Game, Move, Position};

const BOARDS: [(&str, &str, Color); 10] = [
    (
        "initial",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        Color::White,
    ),
    (
        "sicilian",
        "r1b1k2r/2qnbppp/p2ppn2/1p4B1/3NPPP1/2N2Q2/PPP4P/2KR1B1R",
        Color::White,
    ),
    (
        "middle",
        "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K",
        Color::White,
    ),
    (
        "open_position",
        "4r1k1/3R1ppp/8/5P2/p7/6PP/4pK2/1rN1B3",
        Color::White,
    ),
    ("queen", "6K1/8/8/1k3q2/3Q4/8/8/8", Color::White),
    ("pawn_move", "4k3/pppppppp/8/8/8/8/PPPPPPPP/4K3", Color::White),
    ("pawn_attack", "4k3/8/8/pppppppp/PPPPPPPP/8/8/4K3", Color::White),
    (
        "pawn_promote",
        "8/PPPPPPPP/8/2k1K3/8/8/pppppppp/8",
        Color::White,
    ),
    (
        "cydonia",
        "5K2/1N1N1N2/8/1N1N1N2/1n1n1n2/8/1n1n1n2/5k2",
        Color::White,
    ),
    (
        "back_rank_mate",
        "k6R/pp6/8/8/8/8/8/7K",
        Color::Black,
    ),
];

fn games() -> impl Iterator<Item = (&'static str, Game)> {
    BOARDS.iter().map(|&(name, fen, turn)| {
        (name, Game::from_board(Board::from_fen(fen).unwrap(), turn))
    })
}

fn bench_gen_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_moves");
    for (name, game) in games() {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut moves: Vec<Move> = Vec::new();
                for (pos, _) in game.board().pieces() {
                    movegen::piece_moves_into(game.board(), pos, &mut moves);
                }
                black_box(moves.len())
            })
        });
    }
}

fn bench_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_moves");
    for (name, game) in games() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(game.all_legal_moves(game.turn()).len()))
        });
    }
}

fn bench_make_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_move");
    for (name, game) in games() {
        let moves = game.all_legal_moves(game.turn());
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    let mut g = game.clone();
                    black_box(g.make_move(*mv).is_ok());
                }
            })
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, game) in games() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in [Color::White, Color::Black] {
                    for pos in Position::iter() {
                        black_box(attack::is_attacked(game.board(), pos, color));
                    }
                }
            })
        });
    }
}

fn bench_in_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("in_check");
    for (name, game) in games() {
        group.bench_function(name, |b| b.iter(|| black_box(game.in_check(game.turn()))));
    }
}

fn bench_outcome(c: &mut Criterion) {
    let mut group = c.benchmark_group("outcome");
    for (name, game) in games() {
        group.bench_function(name, |b| b.iter(|| black_box(game.outcome())));
    }
}

criterion_group!(
    chess,
    bench_gen_moves,
    bench_legal_moves,
    bench_make_move,
    bench_is_attacked,
    bench_in_check,
    bench_outcome,
);

criterion_main!(chess);
