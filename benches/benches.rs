#[macro_use]
extern crate bencher;

extern crate entro;

use bencher::Bencher;
use entro::Codec;

const TEXT: &[u8] = include_bytes!("../tests/sonnet.txt");

fn encoded(codec: Codec) -> Vec<u8> {
    let mut encoded = Vec::new();
    codec.dump(TEXT, &mut encoded).unwrap();
    encoded
}

fn dump_static_huffman(bench: &mut Bencher) {
    bench.iter(|| {
        let mut encoded = Vec::new();
        Codec::StaticHuffman.dump(TEXT, &mut encoded).unwrap();
        bencher::black_box(encoded);
    })
}

fn dump_adaptive_huffman(bench: &mut Bencher) {
    bench.iter(|| {
        let mut encoded = Vec::new();
        Codec::AdaptiveHuffman.dump(TEXT, &mut encoded).unwrap();
        bencher::black_box(encoded);
    })
}

fn dump_static_arithmetic(bench: &mut Bencher) {
    bench.iter(|| {
        let mut encoded = Vec::new();
        Codec::StaticArithmetic.dump(TEXT, &mut encoded).unwrap();
        bencher::black_box(encoded);
    })
}

fn dump_adaptive_arithmetic(bench: &mut Bencher) {
    bench.iter(|| {
        let mut encoded = Vec::new();
        Codec::AdaptiveArithmetic.dump(TEXT, &mut encoded).unwrap();
        bencher::black_box(encoded);
    })
}

fn load_static_huffman(bench: &mut Bencher) {
    let encoded = encoded(Codec::StaticHuffman);
    bench.iter(|| {
        let mut decoded = Vec::new();
        Codec::StaticHuffman.load(encoded.as_slice(), &mut decoded).unwrap();
        bencher::black_box(decoded);
    })
}

fn load_adaptive_huffman(bench: &mut Bencher) {
    let encoded = encoded(Codec::AdaptiveHuffman);
    bench.iter(|| {
        let mut decoded = Vec::new();
        Codec::AdaptiveHuffman.load(encoded.as_slice(), &mut decoded).unwrap();
        bencher::black_box(decoded);
    })
}

fn load_static_arithmetic(bench: &mut Bencher) {
    let encoded = encoded(Codec::StaticArithmetic);
    bench.iter(|| {
        let mut decoded = Vec::new();
        Codec::StaticArithmetic.load(encoded.as_slice(), &mut decoded).unwrap();
        bencher::black_box(decoded);
    })
}

fn load_adaptive_arithmetic(bench: &mut Bencher) {
    let encoded = encoded(Codec::AdaptiveArithmetic);
    bench.iter(|| {
        let mut decoded = Vec::new();
        Codec::AdaptiveArithmetic.load(encoded.as_slice(), &mut decoded).unwrap();
        bencher::black_box(decoded);
    })
}

benchmark_group!(dumps,
    dump_static_huffman, dump_adaptive_huffman,
    dump_static_arithmetic, dump_adaptive_arithmetic);

benchmark_group!(loads,
    load_static_huffman, load_adaptive_huffman,
    load_static_arithmetic, load_adaptive_arithmetic);

benchmark_main!(dumps, loads);
