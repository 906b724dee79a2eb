//! Fuzz target for select against the bitwise blend `(a & m) | (b & !m)`.

#![no_main]

use arbitrary::Arbitrary;
use lanes::{
  BoolLane, FloatLane,
  dispatch::{F32Lane, F64Lane},
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  a: [u64; 8],
  b: [u64; 8],
  mask: u32,
}

fuzz_target!(|input: Input| {
  let m32 = <F32Lane as FloatLane>::Mask::load_binary_mask(input.mask);
  let a = F32Lane::from_fn(|i| f32::from_bits(input.a[i] as u32));
  let b = F32Lane::from_fn(|i| f32::from_bits(input.b[i] as u32));
  let got = F32Lane::select(m32, a, b);
  for i in 0..F32Lane::WIDTH {
    let want = if m32.test(i) { input.a[i] as u32 } else { input.b[i] as u32 };
    assert_eq!(got.extract(i).to_bits(), want, "f32 lane {i}");
  }

  let m64 = <F64Lane as FloatLane>::Mask::load_binary_mask(input.mask);
  let a = F64Lane::from_fn(|i| f64::from_bits(input.a[i]));
  let b = F64Lane::from_fn(|i| f64::from_bits(input.b[i]));
  let got = F64Lane::select(m64, a, b);
  for i in 0..F64Lane::WIDTH {
    let want = if m64.test(i) { input.a[i] } else { input.b[i] };
    assert_eq!(got.extract(i).to_bits(), want, "f64 lane {i}");
  }
});
