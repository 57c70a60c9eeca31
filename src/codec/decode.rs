use crate::buffer::BitBuffer;
use crate::error::DecodeError;

const PADDING: u8 = b'=';
// Marks bytes outside the base64 alphabet in the lookup table
const INVALID: u8 = 0xFF;

// How strictly tokens are checked against the base64 alphabet.
//
// Lenient mode reproduces what older publishers relied on: unknown characters
// and stray padding decode as zero bits instead of failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodeMode {
    #[default]
    Strict,
    Lenient,
}

// Decodes base64 tokens into exact-size bit buffers
#[derive(Clone)]
pub struct Decoder {
    mode: DecodeMode,
    // Maps every byte to its 6-bit value, or INVALID
    table: [u8; 256],
}

impl Decoder {
    pub fn new(mode: DecodeMode) -> Self {
        Self {
            mode,
            table: array_init::array_init(|byte: usize| sextet_value(byte as u8)),
        }
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    // Decode one token. The output length is fixed before any block is decoded:
    // 3 bytes per 4-character block, minus one byte per trailing '='.
    pub fn decode(&self, token: &str) -> Result<BitBuffer, DecodeError> {
        let text = token.as_bytes();
        if text.is_empty() {
            return Ok(BitBuffer::default());
        }
        if text.len() % 4 != 0 {
            return Err(DecodeError::Misaligned(text.len()));
        }

        let padding = text.iter().rev().take_while(|&&c| c == PADDING).count();
        if self.mode == DecodeMode::Strict && padding > 2 {
            return Err(DecodeError::ExcessPadding(padding));
        }
        let len = (text.len() * 6 / 8)
            .checked_sub(padding)
            .ok_or(DecodeError::NegativeLength {
                len: text.len(),
                padding,
            })?;
        let padding_start = text.len() - padding;

        let mut bytes = Vec::with_capacity(len);
        for (block_index, block) in text.chunks_exact(4).enumerate() {
            // First character lands in the highest 6 bits of the 24-bit word
            let mut word = 0_u32;
            for (offset, &c) in block.iter().enumerate() {
                let value = self.sextet(block_index * 4 + offset, c, padding_start)?;
                word = (word << 6) | value as u32;
            }

            // Never emit past the precomputed length
            let emit = (len - bytes.len()).min(3);
            bytes.extend((0..emit).map(|k| (word >> (8 * (2 - k))) as u8));
        }

        debug_assert_eq!(bytes.len(), len);
        Ok(BitBuffer::from(bytes))
    }

    fn sextet(&self, position: usize, c: u8, padding_start: usize) -> Result<u8, DecodeError> {
        match self.table[c as usize] {
            INVALID if c == PADDING => {
                if self.mode == DecodeMode::Strict && position < padding_start {
                    Err(DecodeError::MisplacedPadding(position))
                } else {
                    Ok(0)
                }
            }
            INVALID => match self.mode {
                DecodeMode::Strict => Err(DecodeError::InvalidCharacter { position, byte: c }),
                DecodeMode::Lenient => Ok(0),
            },
            value => Ok(value),
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecodeMode::default())
    }
}

// Decode a token with the strict decoder
pub fn decode(token: &str) -> Result<BitBuffer, DecodeError> {
    Decoder::default().decode(token)
}

fn sextet_value(byte: u8) -> u8 {
    match byte {
        b'A'..=b'Z' => byte - b'A',
        b'a'..=b'z' => byte - b'a' + 26,
        b'0'..=b'9' => byte - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        _ => INVALID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    #[test]
    fn test_decode_known_tokens() {
        assert_eq!(decode("").unwrap().as_bytes(), b"");
        assert_eq!(decode("Zg==").unwrap().as_bytes(), b"f");
        assert_eq!(decode("Zm8=").unwrap().as_bytes(), b"fo");
        assert_eq!(decode("Zm9v").unwrap().as_bytes(), b"foo");
        assert_eq!(decode("Zm9vYg==").unwrap().as_bytes(), b"foob");
        assert_eq!(decode("Zm9vYmE=").unwrap().as_bytes(), b"fooba");
        assert_eq!(decode("Zm9vYmFy").unwrap().as_bytes(), b"foobar");
        assert_eq!(decode("/w==").unwrap().as_bytes(), &[0xFF]);
        assert_eq!(decode("AA==").unwrap().as_bytes(), &[0x00]);
    }

    #[test]
    fn test_decode_matches_reference_encoder() {
        let mut rng = SmallRng::seed_from_u64(0);
        for len in (0..=10).chain([31, 32, 33, 255, 1000]) {
            let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let token = BASE64.encode(&bytes);
            let decoded = decode(&token).unwrap();
            assert_eq!(decoded.as_bytes(), &bytes[..], "length {}", len);
        }
    }

    #[test]
    fn test_decoded_length_is_computed_from_padding() {
        assert_eq!(decode("AAAA").unwrap().len(), 3);
        assert_eq!(decode("AAA=").unwrap().len(), 2);
        assert_eq!(decode("AA==").unwrap().len(), 1);
        assert_eq!(decode("AAAAAAAA").unwrap().len(), 6);
    }

    #[test]
    fn test_strict_rejects_bad_characters() {
        assert_eq!(
            decode("AA*A"),
            Err(DecodeError::InvalidCharacter {
                position: 2,
                byte: b'*'
            })
        );
        assert_eq!(
            decode("AAAA AAA"),
            Err(DecodeError::InvalidCharacter {
                position: 4,
                byte: b' '
            })
        );
        assert_eq!(decode("A=AA"), Err(DecodeError::MisplacedPadding(1)));
        assert_eq!(decode("AAAA=AAA"), Err(DecodeError::MisplacedPadding(4)));
    }

    #[test]
    fn test_strict_rejects_bad_lengths() {
        assert_eq!(decode("AAA"), Err(DecodeError::Misaligned(3)));
        assert_eq!(decode("AAAAA"), Err(DecodeError::Misaligned(5)));
        assert_eq!(decode("A==="), Err(DecodeError::ExcessPadding(3)));
        assert_eq!(decode("===="), Err(DecodeError::ExcessPadding(4)));
    }

    #[test]
    fn test_lenient_coerces_to_zero_bits() {
        let decoder = Decoder::new(DecodeMode::Lenient);
        assert_eq!(decoder.mode(), DecodeMode::Lenient);
        // '*' contributes 0, so this decodes like "AAAA"
        assert_eq!(decoder.decode("**AA").unwrap().as_bytes(), &[0, 0, 0]);
        assert_eq!(decoder.decode("/=/w").unwrap().as_bytes(), &[0xFC, 0x0F, 0xF0]);
        // Extra padding is subtracted without complaint
        assert_eq!(decoder.decode("AAAAA===").unwrap().as_bytes(), &[0, 0, 0]);
        assert_eq!(decoder.decode("A===").unwrap().len(), 0);
        assert_eq!(
            decoder.decode("===="),
            Err(DecodeError::NegativeLength { len: 4, padding: 4 })
        );
        assert_eq!(decoder.decode("AA"), Err(DecodeError::Misaligned(2)));
    }
}
