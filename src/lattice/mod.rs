pub mod types;
pub mod vector3;
pub mod settings;
pub mod loader;
pub mod generator;
pub mod sink;

pub use generator::{generate, iter, LatticeGenerator, LatticeIter};
pub use loader::{load, load_from_path, LoadError};
pub use settings::Settings;
pub use sink::{AtomSink, CollectingSink, XyzSink};
pub use types::{AtomInstance, BasisAtomSpec, CellIndex, Colour, LatticeDescription, DEFAULT_ELEMENT, DEFAULT_RADIUS};
