// Population count over a byte buffer.
//
// Whole 8-byte words are counted with the 64-bit SWAR reduction, any remaining
// bytes with the same trick at byte width. An empty buffer counts 0.
pub fn popcount(buffer: &[u8]) -> u64 {
    let words = buffer.chunks_exact(8);
    let tail = words.remainder();

    let word_count: u64 = words
        .map(|word| {
            let mut bytes = [0_u8; 8];
            bytes.copy_from_slice(word);
            count_word(u64::from_ne_bytes(bytes))
        })
        .sum();
    let tail_count: u64 = tail.iter().map(|&byte| count_byte(byte)).sum();

    word_count + tail_count
}

#[inline]
fn count_word(mut v: u64) -> u64 {
    v = v - ((v >> 1) & 0x5555_5555_5555_5555);
    v = (v & 0x3333_3333_3333_3333) + ((v >> 2) & 0x3333_3333_3333_3333);
    v = (v + (v >> 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    v.wrapping_mul(0x0101_0101_0101_0101) >> 56
}

#[inline]
fn count_byte(byte: u8) -> u64 {
    let mut v = byte as u32;
    v = v - ((v >> 1) & 0x55);
    v = (v & 0x33) + ((v >> 2) & 0x33);
    ((v + (v >> 4)) & 0x0F) as u64
}
