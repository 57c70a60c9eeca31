// Bytes per published chunk. A single advertised attribute is capped at 8192
// characters, and 6000 bytes encode to exactly 8000.
pub const CHUNK_BYTES: usize = 6000;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

// Standard padded base64
pub fn encode(bytes: &[u8]) -> String {
    let mut output = String::with_capacity((bytes.len() + 2) / 3 * 4);
    for block in bytes.chunks(3) {
        let word = block
            .iter()
            .enumerate()
            .fold(0_u32, |word, (i, &byte)| word | (byte as u32) << (16 - 8 * i));
        // n input bytes need n + 1 characters, the rest is padding
        for k in 0..4 {
            if k <= block.len() {
                output.push(ALPHABET[(word >> (18 - 6 * k) & 0x3F) as usize] as char);
            } else {
                output.push('=');
            }
        }
    }
    output
}

// Encode a filter as a list of tokens, each at most CHUNK_BYTES of input.
// An empty filter still produces one (empty) token.
pub fn encode_chunks(bytes: &[u8]) -> Vec<String> {
    if bytes.is_empty() {
        return vec![String::new()];
    }
    bytes.chunks(CHUNK_BYTES).map(encode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg==");
        assert_eq!(encode(b"fo"), "Zm8=");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(encode(&[0xFF]), "/w==");
        assert_eq!(encode(&[0x00]), "AA==");
    }

    #[test]
    fn test_round_trip() {
        let mut rng = SmallRng::seed_from_u64(1);
        for len in [0, 1, 2, 3, 4, 5, 7, 64, 100, 301] {
            let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let token = encode(&bytes);
            assert_eq!(token, BASE64.encode(&bytes));
            assert_eq!(decode(&token).unwrap().as_bytes(), &bytes[..]);
        }
    }

    #[test]
    fn test_chunks_fit_attribute_limit() {
        let bytes = vec![0xA5_u8; CHUNK_BYTES * 2 + 10];
        let chunks = encode_chunks(&bytes);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 8000);
        assert_eq!(chunks[1].len(), 8000);
        assert_eq!(chunks[2], encode(&bytes[..10]));

        let rejoined: Vec<u8> = chunks
            .iter()
            .flat_map(|chunk| decode(chunk).unwrap().as_bytes().to_vec())
            .collect();
        assert_eq!(rejoined, bytes);
    }

    #[test]
    fn test_empty_filter_is_one_empty_chunk() {
        assert_eq!(encode_chunks(&[]), vec![String::new()]);
    }
}
