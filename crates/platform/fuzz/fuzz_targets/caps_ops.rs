//! `Caps` set operations against a plain `u128` model.
//!
//! Every operation must agree bit for bit with the integer operation it
//! stands for, and the subset test must agree with the model's `a & b == b`.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use platform::Caps;

#[derive(Arbitrary, Debug)]
struct Input {
  a: u128,
  b: u128,
  c: u128,
}

fuzz_target!(|input: Input| {
  let Input { a: ra, b: rb, c: rc } = input;
  let (a, b, c) = (Caps::from_raw(ra), Caps::from_raw(rb), Caps::from_raw(rc));

  assert_eq!((a | b).to_raw(), ra | rb);
  assert_eq!((a & b).to_raw(), ra & rb);
  assert_eq!(a.difference(b).to_raw(), ra & !rb);
  assert_eq!(a.has(b), ra & rb == rb);

  let mut acc = a;
  acc |= b;
  assert_eq!(acc, a | b);

  // Laws the model gives for free, checked through the public surface.
  assert_eq!(a & (b | c), (a & b) | (a & c));
  assert_eq!(a.difference(b) | (a & b), a);
  assert_eq!(a.difference(b).count() + (a & b).count(), a.count());
  assert!((a | b).has(a) && a.has(a & c));
});
