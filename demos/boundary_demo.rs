//! Boundary Distance Demo
//!
//! Nearest boundary point and normalized distance for each sample curve
//! over the unit square.
//!
//! | Curve         | Shape                         |
//! |---------------|-------------------------------|
//! | flat          | horizontal line at y = 0.8    |
//! | diagonal      | y = x                         |
//! | diagonal_sine | y = x with a sine ripple      |
//! | arch          | parabola peaking at (0.5, 0.75) |
//!
//! ```bash
//! RUST_LOG=debug cargo run --example boundary_demo
//! ```

use dbdist::{curves, BoundaryDistanceSolver, Point, RectBounds};

fn main() -> dbdist::Result<()> {
    env_logger::init();

    let bounds = RectBounds::from_ranges((0.0, 1.0), (0.0, 1.0))?;
    let p = Point::try_from((0.1, 0.4))?;

    let cases: [(&str, fn(f64) -> f64); 4] = [
        ("flat", curves::flat),
        ("diagonal", curves::diagonal),
        ("diagonal_sine", curves::diagonal_sine),
        ("arch", curves::arch),
    ];

    println!("query point P = {p}\n");
    for (name, curve) in cases {
        let solver = BoundaryDistanceSolver::new(curve, bounds).normalized(true);
        let result = solver.execute(&p)?;

        println!("{name}:");
        println!("  closest boundary point CB = {}", result.closest_point);
        println!("  distance |P - CB|         = {}", result.distance);
        if let Some(norm) = result.normalization {
            println!(
                "  max edge distance         = {} ({} edge, E = {}, MB = {})",
                norm.max_distance, norm.edge, norm.edge_point, norm.boundary_point
            );
            println!("  proportion of max         = {}%", norm.percent());
        }
        println!();
    }

    // A query outside the rectangle can exceed the perimeter baseline.
    let outside = Point::new(0.6, -0.5)?;
    let solver = BoundaryDistanceSolver::new(curves::arch, bounds).normalized(true);
    let result = solver.execute(&outside)?;
    if let Some(norm) = result.normalization {
        println!("arch, P = {outside} (outside): proportion = {}", norm.proportion);
    }

    Ok(())
}
