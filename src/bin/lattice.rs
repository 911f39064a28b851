use std::env;
use std::io;

use lattice_rs::lattice::types::AtomInstance;
use lattice_rs::lattice::{load_from_path, AtomSink, CollectingSink, LatticeGenerator, XyzSink};

#[derive(serde::Serialize)]
struct Output {
    version: &'static str,
    size: usize,
    n_basis_atoms: usize,
    n_atoms: usize,
    atoms: Vec<AtomInstance>,
}

struct Args {
    path: String,
    json: bool,
    no_parallel: bool,
}

// Flags may come before or after the path.
fn parse_args(args: &[String]) -> Option<Args> {
    let rest = args.get(1..)?;
    let path = rest.iter().find(|a| !a.starts_with("--"))?.clone();
    Some(Args {
        path,
        json: rest.iter().any(|a| a == "--json"),
        no_parallel: rest.iter().any(|a| a == "--no-parallel"),
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let Some(Args { path, json, no_parallel }) = parse_args(&args) else {
        eprintln!("Usage: lattice <description.json> [--json] [--no-parallel]");
        std::process::exit(1);
    };
    let path = &path;

    // A bad description stops here; nothing is generated or written.
    let desc = match load_from_path(path) {
        Ok(d) => d,
        Err(e) => {
            log::error!("{e}");
            anyhow::bail!("could not load {path}: {e}");
        }
    };

    let mut generator = LatticeGenerator::new();
    if no_parallel { generator.settings_mut().enable_parallel = false; }
    let atoms = generator.generate(&desc);

    if json {
        let mut sink = CollectingSink::new();
        sink.populate(atoms);
        let out = Output {
            version: env!("CARGO_PKG_VERSION"),
            size: desc.size,
            n_basis_atoms: desc.basis_atoms.len(),
            n_atoms: sink.atoms.len(),
            atoms: sink.atoms,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let n = desc.size;
        let mut sink = XyzSink::new(io::stdout().lock(), format!("{path} ({n}x{n}x{n} supercell)"));
        sink.populate(atoms);
        sink.finish()?;
    }
    Ok(())
}
