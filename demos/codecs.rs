extern crate entro;

use entro::Codec;

/// Encode a short text with every codec, decode it back,
/// and print how many bytes each encoding took.
fn main() {
    let text = include_bytes!("../tests/sonnet.txt");

    for codec in Codec::ALL {
        let mut encoded = Vec::new();
        codec.dump(&text[..], &mut encoded).expect("encoding failed");

        let mut decoded = Vec::new();
        codec.load(encoded.as_slice(), &mut decoded).expect("decoding failed");
        assert_eq!(decoded, text.to_vec(), "round trip mismatch");

        println!("{:>24}: {} bytes -> {} bytes", codec.to_string(), text.len(), encoded.len());
    }
}
