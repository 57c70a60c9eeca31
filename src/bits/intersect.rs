use crate::{BinaryChunk, ChunkElement};

const ELEMENT_BYTES: usize = std::mem::size_of::<ChunkElement>();
const CHUNK_ELEMENTS: usize = 4;
const CHUNK_BYTES: usize = ELEMENT_BYTES * CHUNK_ELEMENTS;

// AND `src` into `dst`, 256 bits at a time, then the leftover bytes one by one.
// Both slices must have the same length.
pub fn and_in_place(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());

    let mut dst_chunks = dst.chunks_exact_mut(CHUNK_BYTES);
    let mut src_chunks = src.chunks_exact(CHUNK_BYTES);
    for (d, s) in (&mut dst_chunks).zip(&mut src_chunks) {
        let anded = load_chunk(d) & load_chunk(s);
        store_chunk(anded, d);
    }

    dst_chunks
        .into_remainder()
        .iter_mut()
        .zip(src_chunks.remainder())
        .for_each(|(d, s)| *d &= s);
}

#[inline]
fn load_chunk(bytes: &[u8]) -> BinaryChunk {
    let elements: [ChunkElement; CHUNK_ELEMENTS] = array_init::array_init(|i| {
        let mut element = [0_u8; ELEMENT_BYTES];
        element.copy_from_slice(&bytes[i * ELEMENT_BYTES..(i + 1) * ELEMENT_BYTES]);
        ChunkElement::from_ne_bytes(element)
    });
    BinaryChunk::new(elements)
}

#[inline]
fn store_chunk(chunk: BinaryChunk, bytes: &mut [u8]) {
    let elements: &[ChunkElement; CHUNK_ELEMENTS] = chunk.as_array_ref();
    for (element, out) in elements.iter().zip(bytes.chunks_exact_mut(ELEMENT_BYTES)) {
        out.copy_from_slice(&element.to_ne_bytes());
    }
}
