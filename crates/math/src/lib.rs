//! Scalar vector, matrix and quaternion types.
//!
//! Everything is generic over [`lanes::Element`] (`f32` by default, or `f64`)
//! and built on the same scalar primitives the lane backends use, so
//! `normalize` here and a lane `rcp_sqrt` agree bit for bit.
//!
//! ```
//! use math::{Mat3, Quat, Vec3};
//!
//! let q = Quat::from_axis_angle(Vec3::Z, core::f32::consts::FRAC_PI_2);
//! let v = q.rotate(Vec3::X);
//! assert!(v.max_abs_diff(Vec3::Y) < 1e-6);
//! assert!((q.to_mat3() * Vec3::X).max_abs_diff(v) < 1e-6);
//! assert_eq!(Mat3::<f32>::IDENTITY.inverse(), Some(Mat3::IDENTITY));
//! ```
//!
//! Matrices are column-major. Singular matrices have no inverse and report
//! it with `None`.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod matrix;
pub mod quat;
pub mod vector;

pub use lanes::Element;
pub use matrix::{Mat3, Mat4};
pub use quat::Quat;
pub use vector::{Vec2, Vec3, Vec4};
