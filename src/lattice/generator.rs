use std::iter::FusedIterator;

use log::info;
use rayon::prelude::*;

use crate::lattice::settings::Settings;
use crate::lattice::types::{AtomInstance, CellIndex, LatticeDescription};

/// Builds every atom of a supercell from a validated description.
///
/// Output order is fixed: cell index `i` outermost, then `j`, then `k`, and
/// within each cell the basis atoms in declared order. The serial and
/// parallel paths produce identical sequences.
#[derive(Clone, Debug, Default)]
pub struct LatticeGenerator {
	settings: Settings,
}

impl LatticeGenerator {
	pub fn new() -> Self { Self::default() }
	pub fn with_settings(settings: Settings) -> Self { Self { settings } }
	pub fn settings(&self) -> &Settings { &self.settings }
	pub fn settings_mut(&mut self) -> &mut Settings { &mut self.settings }

	pub fn generate(&self, desc: &LatticeDescription) -> Vec<AtomInstance> {
		let total = desc.atom_count();
		let parallel = self.settings.runs_parallel(total);
		let atoms: Vec<AtomInstance> = if parallel {
			// Indexed collect keeps the canonical order.
			(0..total).into_par_iter().map(|n| instance_at(desc, n)).collect()
		} else {
			iter(desc).collect()
		};
		info!("generated {} atoms ({}³ cells × {} basis atoms, {})", atoms.len(), desc.size, desc.basis_atoms.len(), if parallel { "parallel" } else { "serial" });
		atoms
	}
}

/// Generates the full supercell with default settings.
pub fn generate(desc: &LatticeDescription) -> Vec<AtomInstance> { LatticeGenerator::new().generate(desc) }

/// Lazy view over the same sequence `generate` returns. Calling again restarts from the first atom.
pub fn iter(desc: &LatticeDescription) -> LatticeIter<'_> {
	LatticeIter { desc, next: 0, total: desc.atom_count() }
}

pub struct LatticeIter<'a> {
	desc: &'a LatticeDescription,
	next: usize,
	total: usize,
}

impl<'a> Iterator for LatticeIter<'a> {
	type Item = AtomInstance;

	fn next(&mut self) -> Option<AtomInstance> {
		if self.next >= self.total { return None; }
		let atom = instance_at(self.desc, self.next);
		self.next += 1;
		Some(atom)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let left = self.total - self.next;
		(left, Some(left))
	}
}

impl ExactSizeIterator for LatticeIter<'_> {}
impl FusedIterator for LatticeIter<'_> {}

/// Decomposes a flat position in the canonical order into (cell, basis atom).
fn split_index(desc: &LatticeDescription, n: usize) -> (CellIndex, usize) {
	let nb = desc.basis_atoms.len();
	let s = desc.size;
	let basis = n % nb;
	let cell = n / nb;
	let k = cell % s;
	let j = (cell / s) % s;
	let i = cell / s / s;
	(CellIndex::new(i, j, k), basis)
}

// Callers guarantee n < atom_count(), so basis_atoms is non-empty here.
fn instance_at(desc: &LatticeDescription, n: usize) -> AtomInstance {
	let (cell_index, basis_index) = split_index(desc, n);
	let b = &desc.basis_atoms[basis_index];
	let fractional = b.relative_pos + cell_index.as_vec3();
	AtomInstance {
		cell_index,
		basis_index,
		fractional,
		cartesian: desc.to_cartesian(fractional),
		element: b.element.clone(),
		colour: b.colour,
		radius: b.radius,
	}
}
