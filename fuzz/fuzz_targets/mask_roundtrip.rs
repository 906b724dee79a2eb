//! Fuzz target for boolean lane bit packing.
//!
//! Tests that, for every dispatched mask type:
//! - load_binary_mask then store_mask keeps exactly the low WIDTH bits
//! - bit i of the packed form is lane i
//! - any/all/none agree with the packed bits

#![no_main]

use lanes::{
  BoolLane,
  dispatch::{M32Lane, M64Lane},
  scalar,
};
use libfuzzer_sys::fuzz_target;

fn check<M: BoolLane>(bits: u32) {
  let m = M::load_binary_mask(bits);
  let packed = m.store_mask();
  assert_eq!(packed, bits & M::FULL, "store_mask must keep the low {} bits", M::WIDTH);
  assert_eq!(M::load_binary_mask(packed).store_mask(), packed);

  for i in 0..M::WIDTH {
    assert_eq!(m.test(i), (bits >> i) & 1 != 0, "lane {i} must be bit {i}");
  }
  assert_eq!(m.any(), packed != 0);
  assert_eq!(m.all(), packed == M::FULL);
  assert_eq!(m.none(), packed == 0);
  assert_eq!((!m).store_mask(), !bits & M::FULL);
}

fuzz_target!(|bits: u32| {
  check::<M32Lane>(bits);
  check::<M64Lane>(bits);
  check::<scalar::M32x4>(bits);
  check::<scalar::M64x2>(bits);
});
