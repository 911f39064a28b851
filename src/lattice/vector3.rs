use std::ops::{Add, Mul, Sub};

use serde::Serialize;

use super::types::LatticeValue;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct Vec3 { pub x: LatticeValue, pub y: LatticeValue, pub z: LatticeValue }

impl Vec3 {
	pub const fn new(x: LatticeValue, y: LatticeValue, z: LatticeValue) -> Self { Self { x, y, z } }
	pub const fn zero() -> Self { Self { x: 0.0, y: 0.0, z: 0.0 } }

	/// Builds a vector from the first three components; anything shorter is the zero vector.
	pub fn from_slice_or_zero(a: &[LatticeValue]) -> Self {
		match a {
			[x, y, z, ..] => Self::new(*x, *y, *z),
			_ => Self::zero(),
		}
	}

	pub fn to_array(self) -> [LatticeValue; 3] { [self.x, self.y, self.z] }
	pub fn dot(self, o: Vec3) -> LatticeValue { self.x * o.x + self.y * o.y + self.z * o.z }
	pub fn norm(self) -> LatticeValue { self.dot(self).sqrt() }
}

impl Add for Vec3 {
	type Output = Vec3;
	fn add(self, o: Vec3) -> Vec3 { Vec3::new(self.x + o.x, self.y + o.y, self.z + o.z) }
}

impl Sub for Vec3 {
	type Output = Vec3;
	fn sub(self, o: Vec3) -> Vec3 { Vec3::new(self.x - o.x, self.y - o.y, self.z - o.z) }
}

impl Mul<LatticeValue> for Vec3 {
	type Output = Vec3;
	fn mul(self, s: LatticeValue) -> Vec3 { Vec3::new(self.x * s, self.y * s, self.z * s) }
}

impl Mul<Vec3> for LatticeValue {
	type Output = Vec3;
	fn mul(self, v: Vec3) -> Vec3 { v * self }
}
