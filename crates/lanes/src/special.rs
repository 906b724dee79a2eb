//! Special functions written once against the lane traits.
//!
//! Every backend routes its `sin` through [`sin_f64`], so the only
//! per-backend differences are the primitive ops underneath, and those are
//! exact or correctly rounded. The result is bit-identical across backends.

use crate::traits::FloatLane;

/// `1/π`.
pub(crate) const FRAC_1_PI: f64 = core::f64::consts::FRAC_1_PI;

/// π split in three so that `q * PI_A` and `q * PI_B` are exact for the
/// quotients the reduction sees.
pub(crate) const PI_A: f64 = 3.1415926218032837;
pub(crate) const PI_B: f64 = 3.1786509424591713e-08;
pub(crate) const PI_C: f64 = 1.2246467991473532e-16;

/// Odd minimax polynomial for `sin(d)` on `[-π/2, π/2]`, highest degree first,
/// in `s = d²`: `sin(d) ≈ d + d·s·P(s)`.
pub(crate) const SIN_COEFFS: [f64; 9] = [
  -7.972_559_550_090_378_688_919_52e-18,
  2.810_099_727_108_632_000_912_51e-15,
  -7.647_122_191_181_588_332_884_84e-13,
  1.605_904_306_056_645_016_290_54e-10,
  -2.505_210_837_635_020_458_107_55e-8,
  2.755_731_922_391_987_476_304_16e-6,
  -1.984_126_984_126_961_628_068_09e-4,
  8.333_333_333_333_329_748_238_15e-3,
  -1.666_666_666_666_666_574_148_08e-1,
];

// Rounding constants for the x86 backends.

/// `1.5 · 2^52`: adding it to `|x| < 2^51` leaves the rounded integer in the low mantissa bits.
#[cfg_attr(not(target_arch = "x86_64"), allow(dead_code))]
pub(crate) const F64_ROUND_MAGIC: f64 = 6_755_399_441_055_744.0;
#[cfg_attr(not(target_arch = "x86_64"), allow(dead_code))]
pub(crate) const F64_ROUND_MAGIC_BITS: i64 = 0x4338_0000_0000_0000;

/// `2^23`, the first `f32` magnitude with no fractional bits.
#[cfg_attr(not(target_arch = "x86_64"), allow(dead_code))]
pub(crate) const F32_INTEGRAL_BOUND: f32 = 8_388_608.0;
/// `2^52`, the first `f64` magnitude with no fractional bits.
#[cfg_attr(not(target_arch = "x86_64"), allow(dead_code))]
pub(crate) const F64_INTEGRAL_BOUND: f64 = 4_503_599_627_370_496.0;

/// Sine of every lane.
///
/// `q = round(x/π)`, `d = x - qπ` with π in three parts, then the odd
/// polynomial, negated where `q` is odd. Good to about one ulp while `|x|`
/// stays in the low thousands; past that the reduction loses bits and the
/// error grows with `|x|`. NaN and ±∞ give NaN.
///
/// The parity of `q` is read off the float (`q - 2·round(q/2)`), not from
/// an integer conversion, so it stays exact over the whole finite range.
#[inline]
pub(crate) fn sin_f64<L: FloatLane<Scalar = f64>>(x: L) -> L {
  let q = (x * L::splat(FRAC_1_PI)).round_to_nearest();

  let mut d = x - q * L::splat(PI_A);
  d = d - q * L::splat(PI_B);
  d = d - q * L::splat(PI_C);

  let s = d * d;
  let mut u = L::splat(SIN_COEFFS[0]);
  for &c in &SIN_COEFFS[1..] {
    u = u * s + L::splat(c);
  }
  u = s * (u * d) + d;

  L::select(is_odd_integral(q), -u, u)
}

/// Lanes of an integral `q` that are odd. `q/2` is exact below `2^53`; above
/// it every `f64` is even and the remainder is zero.
#[inline]
fn is_odd_integral<L: FloatLane<Scalar = f64>>(q: L) -> L::Mask {
  let half = (q * L::splat(0.5)).round_to_nearest();
  (q - half - half).lanes_ne(L::splat(0.0))
}

/// Pairwise reduction: lane `i` plus lane `i + n/2`, halving until one is left.
///
/// This is the association order every backend's `sum` uses.
#[inline]
pub(crate) fn pairwise_sum<T: crate::Element>(values: &mut [T]) -> T {
  let mut n = values.len();
  while n > 1 {
    let half = n / 2;
    for i in 0..half {
      values[i] = values[i] + values[i + half];
    }
    n = half;
  }
  values.first().copied().unwrap_or(T::ZERO)
}
