use std::io::{self, Write};

use crate::lattice::types::AtomInstance;

/// Consumer of a generated atom sequence.
///
/// The sink owns whatever it renders into. `populate` drops the previous
/// contents before taking the new sequence. Each sink picks the fields it
/// applies and ignores the rest.
pub trait AtomSink {
	/// Discard everything from the previous sequence.
	fn clear(&mut self);
	fn accept(&mut self, atom: AtomInstance);

	fn populate<I>(&mut self, atoms: I)
	where
		I: IntoIterator<Item = AtomInstance>,
		Self: Sized,
	{
		self.clear();
		for atom in atoms { self.accept(atom); }
	}
}

#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
	pub atoms: Vec<AtomInstance>,
}

impl CollectingSink {
	pub fn new() -> Self { Self::default() }
}

impl AtomSink for CollectingSink {
	fn clear(&mut self) { self.atoms.clear(); }
	fn accept(&mut self, atom: AtomInstance) { self.atoms.push(atom); }
}

/// Writes the XYZ text format: atom count, a comment line, then `element x y z` per atom.
///
/// XYZ needs the count up front, so atoms are buffered until `finish`.
pub struct XyzSink<W: Write> {
	out: W,
	comment: String,
	lines: Vec<String>,
}

impl<W: Write> XyzSink<W> {
	pub fn new(out: W, comment: impl Into<String>) -> Self {
		Self { out, comment: comment.into(), lines: Vec::new() }
	}

	pub fn len(&self) -> usize { self.lines.len() }
	pub fn is_empty(&self) -> bool { self.lines.is_empty() }

	pub fn finish(mut self) -> io::Result<W> {
		writeln!(self.out, "{}", self.lines.len())?;
		writeln!(self.out, "{}", self.comment.replace('\n', " "))?;
		for l in &self.lines { writeln!(self.out, "{l}")?; }
		self.out.flush()?;
		Ok(self.out)
	}
}

impl<W: Write> AtomSink for XyzSink<W> {
	fn clear(&mut self) { self.lines.clear(); }

	fn accept(&mut self, atom: AtomInstance) {
		let [x, y, z] = atom.cartesian.to_array();
		self.lines.push(format!("{:<3} {:>14.8} {:>14.8} {:>14.8}", atom.element, x, y, z));
	}
}
