use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value;
use thiserror::Error;

use crate::lattice::types::{BasisAtomSpec, Colour, LatticeDescription, LatticeValue, DEFAULT_ELEMENT, DEFAULT_RADIUS};
use crate::lattice::vector3::Vec3;

#[derive(Debug, Error)]
pub enum LoadError {
	#[error("invalid lattice json: {0}")]
	Parse(#[from] serde_json::Error),

	#[error("missing required field `{0}`")]
	MissingField(&'static str),

	#[error("supercell of size {size} with {basis_atoms} basis atoms has more atoms than fit in memory")]
	TooLarge { size: usize, basis_atoms: usize },

	#[error("failed to read {}: {source}", path.display())]
	Io { path: PathBuf, #[source] source: std::io::Error },
}

// Wire shape. Every field is optional here so defaults and fallbacks are applied in one place below.
#[derive(serde::Deserialize)]
struct LatticeRecord {
	#[serde(rename = "Size")] size: Option<i64>,
	#[serde(rename = "A1")] a1: Option<Vec<LatticeValue>>,
	#[serde(rename = "A2")] a2: Option<Vec<LatticeValue>>,
	#[serde(rename = "A3")] a3: Option<Vec<LatticeValue>>,
	#[serde(rename = "BasisAtoms")] basis_atoms: Option<Vec<BasisAtomRecord>>,
}

#[derive(serde::Deserialize)]
struct BasisAtomRecord {
	#[serde(rename = "RelativePos")] relative_pos: Option<Vec<LatticeValue>>,
	#[serde(rename = "Colour")] colour: Option<Vec<LatticeValue>>,
	#[serde(rename = "Element")] element: Option<String>,
	#[serde(rename = "Radius")] radius: Option<LatticeValue>,
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<LatticeDescription, LoadError> {
	let path = path.as_ref();
	let buf = fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
	load(&buf)
}

/// Parses and validates a lattice description.
///
/// Malformed JSON (including a top level or basis atom that is not an
/// object), a missing/null `BasisAtoms`, and a supercell whose atom count
/// overflows `usize` are errors. Short or missing vectors become the zero
/// vector, `Size` is clamped to at least 1, and per-atom radius, element and
/// colour fall back to their defaults.
pub fn load(raw_text: &str) -> Result<LatticeDescription, LoadError> {
	let value: Value = serde_json::from_str(raw_text)?;
	// serde also maps JSON arrays onto structs positionally; only keyed objects are descriptions.
	require_object(&value, "lattice description")?;
	if let Some(Value::Array(entries)) = value.get("BasisAtoms") {
		for (idx, e) in entries.iter().enumerate() { require_object(e, &format!("BasisAtoms[{idx}]"))?; }
	}
	let rec: LatticeRecord = serde_json::from_value(value)?;
	let basis = rec.basis_atoms.ok_or(LoadError::MissingField("BasisAtoms"))?;

	let size = clamp_size(rec.size);
	let a1 = to_vec3("A1", rec.a1.as_deref());
	let a2 = to_vec3("A2", rec.a2.as_deref());
	let a3 = to_vec3("A3", rec.a3.as_deref());
	let basis_atoms: Vec<BasisAtomSpec> = basis.into_iter().enumerate().map(|(idx, b)| to_basis_atom(idx, b)).collect();

	let desc = LatticeDescription { size, a1, a2, a3, basis_atoms };
	if desc.checked_atom_count().is_none() {
		return Err(LoadError::TooLarge { size, basis_atoms: desc.basis_atoms.len() });
	}
	debug!("loaded lattice: size {size}, {} basis atoms", desc.basis_atoms.len());
	Ok(desc)
}

fn require_object(v: &Value, what: &str) -> Result<(), LoadError> {
	if v.is_object() { return Ok(()); }
	Err(LoadError::Parse(<serde_json::Error as serde::de::Error>::custom(format!("{what} must be a JSON object"))))
}

fn clamp_size(size: Option<i64>) -> usize {
	match size {
		Some(s) if s >= 1 => usize::try_from(s).unwrap_or(usize::MAX),
		Some(s) => {
			debug!("Size {s} clamped to 1");
			1
		}
		None => 1,
	}
}

fn to_vec3(field: &str, a: Option<&[LatticeValue]>) -> Vec3 {
	match a {
		Some(v) if v.len() >= 3 => Vec3::from_slice_or_zero(v),
		Some(v) => {
			debug!("{field} has {} components, using zero vector", v.len());
			Vec3::zero()
		}
		None => {
			debug!("{field} missing, using zero vector");
			Vec3::zero()
		}
	}
}

fn to_basis_atom(idx: usize, b: BasisAtomRecord) -> BasisAtomSpec {
	let relative_pos = to_vec3("RelativePos", b.relative_pos.as_deref());
	let radius = match b.radius {
		Some(r) if r > 0.0 => r,
		_ => DEFAULT_RADIUS,
	};
	let element = match b.element {
		Some(e) if !e.is_empty() => e,
		_ => DEFAULT_ELEMENT.to_string(),
	};
	let colour = match b.colour.as_deref() {
		Some([r, g, bl, ..]) => Some(Colour::new(*r, *g, *bl)),
		Some(c) => {
			debug!("basis atom {idx}: colour has {} components, leaving unset", c.len());
			None
		}
		None => None,
	};
	BasisAtomSpec { relative_pos, colour, element, radius }
}

#[cfg(test)]
mod tests {
	use super::*;

	const CUBIC: &str = r#""A1": [1, 0, 0], "A2": [0, 1, 0], "A3": [0, 0, 1]"#;

	fn with_basis(size: &str, basis: &str) -> String {
		format!(r#"{{ {size} {CUBIC}, "BasisAtoms": {basis} }}"#)
	}

	#[test]
	fn parses_full_description() {
		let text = r#"{
			"Size": 3,
			"A1": [2.5, 0, 0], "A2": [0, 2.5, 0], "A3": [0, 0, 4.0],
			"BasisAtoms": [
				{ "RelativePos": [0, 0, 0], "Colour": [1, 0, 0], "Element": "Na", "Radius": 0.3 },
				{ "RelativePos": [0.5, 0.5, 0.5], "Element": "Cl" }
			]
		}"#;
		let d = load(text).unwrap();
		assert_eq!(d.size, 3);
		assert_eq!(d.a1, Vec3::new(2.5, 0.0, 0.0));
		assert_eq!(d.a3, Vec3::new(0.0, 0.0, 4.0));
		assert_eq!(d.basis_atoms.len(), 2);
		assert_eq!(d.basis_atoms[0].element, "Na");
		assert_eq!(d.basis_atoms[0].colour, Some(Colour::new(1.0, 0.0, 0.0)));
		assert_eq!(d.basis_atoms[0].radius, 0.3);
		assert_eq!(d.basis_atoms[1].relative_pos, Vec3::new(0.5, 0.5, 0.5));
		assert_eq!(d.basis_atoms[1].radius, DEFAULT_RADIUS);
	}

	#[test]
	fn size_is_clamped_to_one() {
		for size in [r#""Size": 0,"#, r#""Size": -4,"#, ""] {
			let d = load(&with_basis(size, "[]")).unwrap();
			assert_eq!(d.size, 1, "input {size:?}");
		}
	}

	#[test]
	fn non_positive_radius_falls_back() {
		let basis = r#"[
			{ "RelativePos": [0, 0, 0] },
			{ "RelativePos": [0, 0, 0], "Radius": 0 },
			{ "RelativePos": [0, 0, 0], "Radius": -1.5 },
			{ "RelativePos": [0, 0, 0], "Radius": null }
		]"#;
		let d = load(&with_basis("", basis)).unwrap();
		assert!(d.basis_atoms.iter().all(|b| b.radius == DEFAULT_RADIUS));
	}

	#[test]
	fn missing_or_empty_element_is_sentinel() {
		let basis = r#"[{ "RelativePos": [0, 0, 0] }, { "RelativePos": [0, 0, 0], "Element": "" }]"#;
		let d = load(&with_basis("", basis)).unwrap();
		assert!(d.basis_atoms.iter().all(|b| b.element == DEFAULT_ELEMENT));
	}

	#[test]
	fn colour_needs_three_components() {
		let basis = r#"[
			{ "RelativePos": [0, 0, 0], "Colour": [0.2, 0.4] },
			{ "RelativePos": [0, 0, 0] },
			{ "RelativePos": [0, 0, 0], "Colour": [0.2, 0.4, 0.6, 1.0] }
		]"#;
		let d = load(&with_basis("", basis)).unwrap();
		assert_eq!(d.basis_atoms[0].colour, None);
		assert_eq!(d.basis_atoms[1].colour, None);
		assert_eq!(d.basis_atoms[2].colour, Some(Colour::new(0.2, 0.4, 0.6)));
	}

	#[test]
	fn short_and_missing_vectors_become_zero() {
		let text = r#"{ "A1": [1, 2], "A3": null, "BasisAtoms": [{ "RelativePos": [0.5] }, {}] }"#;
		let d = load(text).unwrap();
		assert_eq!(d.a1, Vec3::zero());
		assert_eq!(d.a2, Vec3::zero());
		assert_eq!(d.a3, Vec3::zero());
		assert_eq!(d.basis_atoms[0].relative_pos, Vec3::zero());
		assert_eq!(d.basis_atoms[1].relative_pos, Vec3::zero());
	}

	#[test]
	fn unknown_fields_are_ignored() {
		let d = load(r#"{ "Name": "rocksalt", "BasisAtoms": [{ "RelativePos": [0, 0, 0], "Charge": 1 }] }"#).unwrap();
		assert_eq!(d.basis_atoms.len(), 1);
	}

	#[test]
	fn malformed_text_is_parse_error() {
		assert!(matches!(load("not json at all"), Err(LoadError::Parse(_))));
		assert!(matches!(load(r#"{ "BasisAtoms": [ "#), Err(LoadError::Parse(_))));
		assert!(matches!(load(r#"{ "Size": "two", "BasisAtoms": [] }"#), Err(LoadError::Parse(_))));
		assert!(matches!(load("[]"), Err(LoadError::Parse(_))));
		assert!(matches!(load("null"), Err(LoadError::Parse(_))));
	}

	#[test]
	fn positional_arrays_are_not_descriptions() {
		let whole = r#"[2, [1,0,0], [0,1,0], [0,0,1], [[[0,0,0], null, "H", 0.3]]]"#;
		assert!(matches!(load(whole), Err(LoadError::Parse(_))));
		let atom = r#"{ "BasisAtoms": [[[0,0,0], null, "H", 0.3]] }"#;
		let err = load(atom).unwrap_err();
		assert!(matches!(err, LoadError::Parse(_)));
		assert!(err.to_string().contains("BasisAtoms[0] must be a JSON object"));
	}

	#[test]
	fn oversized_supercell_is_rejected() {
		let err = load(r#"{ "Size": 3000000, "BasisAtoms": [{ "RelativePos": [0, 0, 0] }] }"#).unwrap_err();
		assert!(matches!(err, LoadError::TooLarge { size: 3000000, basis_atoms: 1 }));
		// Nothing to generate, so any size is fine
		let d = load(r#"{ "Size": 3000000, "BasisAtoms": [] }"#).unwrap();
		assert_eq!(d.atom_count(), 0);
	}

	#[test]
	fn missing_basis_atoms_is_reported() {
		let err = load(&format!("{{ {CUBIC} }}")).unwrap_err();
		assert!(matches!(err, LoadError::MissingField("BasisAtoms")));
		assert_eq!(err.to_string(), "missing required field `BasisAtoms`");
		assert!(matches!(load(r#"{ "BasisAtoms": null }"#), Err(LoadError::MissingField(_))));
	}

	#[test]
	fn unreadable_path_is_io_error() {
		let err = load_from_path("/nonexistent/lattice.json").unwrap_err();
		assert!(matches!(err, LoadError::Io { .. }));
	}
}
