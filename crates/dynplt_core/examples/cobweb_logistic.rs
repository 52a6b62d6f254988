//! Cobweb diagram of the logistic map x[n+1] = mu * x * (1 - x) at mu = 3.6.

use anyhow::Result;
use dynplt_core::portrait::cobweb;
use dynplt_core::render::MemorySurface;

fn main() -> Result<()> {
    let mu = 3.6;
    let logistic = move |x: f64| mu * x * (1.0 - x);

    let mut surface = MemorySurface::new();
    cobweb(&logistic, 0.05, 10, (0.0, 1.0), &mut surface)?;

    println!("Cobweb plot, logistic map at mu = {mu}");
    println!(
        "  reference curves: 2, connector segments: {}",
        surface.polylines.len() - 2
    );
    for (i, connector) in surface.polylines[2..].iter().enumerate() {
        let from = connector[0];
        let to = connector[2];
        println!("  step {:2}: x = {:.6} -> {:.6}", i + 1, from.x, to.x);
    }

    Ok(())
}
