use serde::Serialize;

use super::vector3::Vec3;

pub type LatticeValue = f64;

/// Display radius used when a basis atom gives no positive radius.
pub const DEFAULT_RADIUS: LatticeValue = 0.12;
/// Element label for basis atoms without one.
pub const DEFAULT_ELEMENT: &str = "X";

/// RGB colour, components expected in [0, 1]. Alpha is left to the sink.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Colour { pub r: LatticeValue, pub g: LatticeValue, pub b: LatticeValue }

impl Colour {
	pub const fn new(r: LatticeValue, g: LatticeValue, b: LatticeValue) -> Self { Self { r, g, b } }
}

/// Integer offset (i, j, k) of a unit cell inside the supercell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellIndex { pub i: usize, pub j: usize, pub k: usize }

impl CellIndex {
	pub const fn new(i: usize, j: usize, k: usize) -> Self { Self { i, j, k } }
	pub fn as_vec3(self) -> Vec3 { Vec3::new(self.i as LatticeValue, self.j as LatticeValue, self.k as LatticeValue) }
}

/// Template atom replicated at every cell offset.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BasisAtomSpec {
	/// Fractional (u, v, w); values outside [0, 1) land in a neighbouring cell
	pub relative_pos: Vec3,
	pub colour: Option<Colour>,
	pub element: String,
	pub radius: LatticeValue,
}

impl BasisAtomSpec {
	pub fn new(relative_pos: Vec3, element: impl Into<String>) -> Self {
		Self { relative_pos, colour: None, element: element.into(), radius: DEFAULT_RADIUS }
	}
}

/// Validated lattice description. Built by the loader and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LatticeDescription {
	pub size: usize,
	pub a1: Vec3,
	pub a2: Vec3,
	pub a3: Vec3,
	pub basis_atoms: Vec<BasisAtomSpec>,
}

impl LatticeDescription {
	pub fn new(size: usize, a1: Vec3, a2: Vec3, a3: Vec3, basis_atoms: Vec<BasisAtomSpec>) -> Self {
		Self { size: size.max(1), a1, a2, a3, basis_atoms }
	}

	/// Number of atoms one generation run yields (size³ × basis atoms), or `None` if it overflows `usize`.
	pub fn checked_atom_count(&self) -> Option<usize> {
		if self.basis_atoms.is_empty() { return Some(0); }
		self.size
			.checked_mul(self.size)?
			.checked_mul(self.size)?
			.checked_mul(self.basis_atoms.len())
	}

	/// Number of atoms one generation run yields (size³ × basis atoms).
	///
	/// # Panics
	///
	/// If the count overflows `usize`. The loader rejects such descriptions.
	pub fn atom_count(&self) -> usize {
		self.checked_atom_count().expect("lattice atom count overflows usize")
	}

	/// Maps a fractional coordinate onto the lattice basis.
	pub fn to_cartesian(&self, f: Vec3) -> Vec3 { f.x * self.a1 + f.y * self.a2 + f.z * self.a3 }
}

/// One generated atom. Plain value, owned by whoever consumes the sequence.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AtomInstance {
	pub cell_index: CellIndex,
	/// Index of the originating entry in `basis_atoms`
	pub basis_index: usize,
	pub fractional: Vec3,
	pub cartesian: Vec3,
	pub element: String,
	pub colour: Option<Colour>,
	pub radius: LatticeValue,
}
