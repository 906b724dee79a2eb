//! Fuzz target for unaligned load/store at every offset of a byte buffer.

#![no_main]

use lanes::{
  FloatLane,
  dispatch::{F32Lane, F64Lane},
};
use libfuzzer_sys::fuzz_target;

fn round_trip<L: FloatLane>(data: &[u8], to_bits: fn(L::Scalar) -> u64, from_bits: fn(u64) -> L::Scalar) {
  let size = core::mem::size_of::<L::Scalar>();
  let elems: Vec<L::Scalar> = data
    .chunks_exact(size)
    .map(|c| {
      let mut word = [0u8; 8];
      word[..size].copy_from_slice(c);
      from_bits(u64::from_le_bytes(word))
    })
    .collect();
  if elems.len() < L::WIDTH {
    return;
  }

  for offset in 0..=elems.len() - L::WIDTH {
    let mut out = vec![from_bits(0); elems.len()];
    // SAFETY: `offset + WIDTH <= len` for both buffers.
    unsafe {
      let v = L::load_unaligned(elems.as_ptr().add(offset));
      v.store_unaligned(out.as_mut_ptr().add(offset));
    }
    for i in 0..L::WIDTH {
      assert_eq!(to_bits(out[offset + i]), to_bits(elems[offset + i]), "offset {offset} lane {i}");
    }
  }
}

fuzz_target!(|data: &[u8]| {
  round_trip::<F32Lane>(data, |x| u64::from(x.to_bits()), |b| f32::from_bits(b as u32));
  round_trip::<F64Lane>(data, f64::to_bits, f64::from_bits);
});
