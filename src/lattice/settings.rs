#[derive(Clone, Debug)]
pub struct Settings {
	/// Use rayon for large supercells; output order is unchanged either way
	pub enable_parallel: bool,
	/// Below this many atoms generation always runs serially
	pub min_parallel_atoms: usize,
}

impl Default for Settings {
	fn default() -> Self {
		Self { enable_parallel: true, min_parallel_atoms: 4096 }
	}
}

impl Settings {
	pub fn serial() -> Self { Self { enable_parallel: false, ..Self::default() } }

	pub fn runs_parallel(&self, n_atoms: usize) -> bool { self.enable_parallel && n_atoms >= self.min_parallel_atoms }
}
