//! Differential fuzzing of the dispatched backend against the scalar backend.
//!
//! Element-wise results must match bit for bit; NaN lanes only need to agree
//! on being NaN. Runs 4-wide f32 chunks so both backends see the same lanes.

#![no_main]

use arbitrary::Arbitrary;
use lanes::{FloatLane, dispatch::F32Lane, scalar::F32x4};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  a: [u32; 8],
  b: [u32; 8],
}

fn same(x: f32, y: f32) -> bool {
  x.to_bits() == y.to_bits() || (x.is_nan() && y.is_nan())
}

fn apply<L: FloatLane<Scalar = f32>>(a: &[f32; 8], b: &[f32; 8], f: fn(L, L) -> L) -> [f32; 8] {
  let mut out = [0f32; 8];
  for ((x, y), dst) in a.chunks_exact(L::WIDTH).zip(b.chunks_exact(L::WIDTH)).zip(out.chunks_exact_mut(L::WIDTH)) {
    f(L::from_slice(x), L::from_slice(y)).write_to_slice(dst);
  }
  out
}

macro_rules! differential {
  ($a:expr, $b:expr, $($name:literal => |$x:ident, $y:ident| $body:expr),+ $(,)?) => {
    $(
      let hw = apply::<F32Lane>($a, $b, |$x, $y| $body);
      let reference = apply::<F32x4>($a, $b, |$x, $y| $body);
      for i in 0..8 {
        assert!(same(hw[i], reference[i]), "{} lane {i}: {} vs {}", $name, hw[i], reference[i]);
      }
    )+
  };
}

fuzz_target!(|input: Input| {
  let a = input.a.map(f32::from_bits);
  let b = input.b.map(f32::from_bits);

  differential!(&a, &b,
    "add" => |x, y| x + y,
    "sub" => |x, y| x - y,
    "mul" => |x, y| x * y,
    "div" => |x, y| x / y,
    "min" => |x, y| x.min(y),
    "max" => |x, y| x.max(y),
    "sqrt" => |x, _y| x.sqrt(),
    "rcp_sqrt" => |x, _y| x.rcp_sqrt(),
    "round" => |x, _y| x.round_to_nearest(),
    "sin" => |x, _y| x.sin(),
    "select_lt" => |x, y| FloatLane::select(x.lanes_lt(y), x, y),
  );
});
