use crate::core::models::atom::Atom;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Builds a system from explicit coordinates, without bonds.
pub(super) fn system_from_points(points: &[[f64; 3]]) -> MolecularSystem {
    let mut system = MolecularSystem::new();
    for &[x, y, z] in points {
        system.add_atom(Atom::new(Point3::new(x, y, z)));
    }
    system
}

/// `n` atoms at x = 0, 1, ..., n - 1 on the x axis, bonded into a linear chain.
pub(super) fn line_system(n: usize) -> MolecularSystem {
    let points: Vec<[f64; 3]> = (0..n).map(|x| [x as f64, 0.0, 0.0]).collect();
    let mut system = system_from_points(&points);
    for i in 1..n {
        system.add_bond(i - 1, i).unwrap();
    }
    system
}

/// `n` atoms uniformly distributed in a cube of edge `extent` anchored at the
/// origin, bonded into a chain in index order.
pub(super) fn random_system(n: usize, extent: f64, seed: u64) -> MolecularSystem {
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<[f64; 3]> = (0..n)
        .map(|_| {
            [
                rng.gen_range(0.0..extent),
                rng.gen_range(0.0..extent),
                rng.gen_range(0.0..extent),
            ]
        })
        .collect();
    let mut system = system_from_points(&points);
    for i in 1..n {
        system.add_bond(i - 1, i).unwrap();
    }
    system
}
