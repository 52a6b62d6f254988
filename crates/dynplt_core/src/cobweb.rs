use crate::error::InputError;
use crate::traits::{Scalar, ScalarMap};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Sample count for the map reference curve.
pub const CURVE_SAMPLES: usize = 1000;

/// One cobweb iteration, drawn as a right-angle connector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CobwebStep<T> {
    pub from: T,
    pub to: T,
}

impl<T: Scalar> CobwebStep<T> {
    /// Connector vertices: (x, x) -> (x, f(x)) -> (f(x), f(x)).
    pub fn vertices(&self) -> [(T, T); 3] {
        [
            (self.from, self.from),
            (self.from, self.to),
            (self.to, self.to),
        ]
    }
}

/// Everything needed to draw a cobweb diagram: the display limits (which
/// also define the identity line), the sampled map curve, and the
/// connector steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CobwebDiagram<T> {
    pub limits: (T, T),
    pub curve: Vec<(T, T)>,
    pub steps: Vec<CobwebStep<T>>,
}

/// Iterate `map` from `initial_condition` for `nsteps` steps and sample its
/// curve densely over `limits`.
///
/// Map failures propagate unchanged.
pub fn cobweb_diagram<T, M>(
    map: &M,
    initial_condition: T,
    nsteps: usize,
    limits: (T, T),
) -> Result<CobwebDiagram<T>>
where
    T: Scalar,
    M: ScalarMap<T> + ?Sized,
{
    if !(limits.0 < limits.1) {
        bail!(InputError::CobwebLimits);
    }

    let span = limits.1 - limits.0;
    let denom = T::from_usize(CURVE_SAMPLES - 1).unwrap();
    let mut curve = Vec::with_capacity(CURVE_SAMPLES);
    for i in 0..CURVE_SAMPLES {
        let x = limits.0 + span * T::from_usize(i).unwrap() / denom;
        curve.push((x, map.apply(x)?));
    }

    let mut steps = Vec::with_capacity(nsteps);
    let mut x = initial_condition;
    for _ in 0..nsteps {
        let next = map.apply(x)?;
        steps.push(CobwebStep { from: x, to: next });
        x = next;
    }

    Ok(CobwebDiagram {
        limits,
        curve,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::{cobweb_diagram, CURVE_SAMPLES};
    use crate::error::InputError;
    use crate::traits::ScalarMap;
    use anyhow::{bail, Result};

    struct FailingMap;

    impl ScalarMap<f64> for FailingMap {
        fn apply(&self, _x: f64) -> Result<f64> {
            bail!("map evaluation failed")
        }
    }

    #[test]
    fn identity_map_steps_collapse_to_points() {
        let identity = |x: f64| x;
        let diagram = cobweb_diagram(&identity, 0.3, 5, (0.0, 1.0))
            .expect("diagram should build");

        assert_eq!(diagram.steps.len(), 5);
        for step in &diagram.steps {
            assert_eq!(step.from, step.to, "f(x) = x collapses every connector");
            let [a, b, c] = step.vertices();
            assert_eq!(a, b);
            assert_eq!(b, c);
        }
    }

    #[test]
    fn logistic_map_iterates_within_limits() {
        let mu = 3.6;
        let logistic = move |x: f64| mu * x * (1.0 - x);
        let diagram = cobweb_diagram(&logistic, 0.05, 10, (0.0, 1.0))
            .expect("diagram should build");

        assert_eq!(diagram.curve.len(), CURVE_SAMPLES);
        assert_eq!(diagram.steps.len(), 10);
        assert_eq!(diagram.steps[0].from, 0.05);
        for pair in diagram.steps.windows(2) {
            assert_eq!(pair[1].from, pair[0].to, "iterates must chain");
        }
    }

    #[test]
    fn curve_spans_the_limits() {
        let double = |x: f64| 2.0 * x;
        let diagram = cobweb_diagram(&double, 0.1, 0, (-1.0, 1.0))
            .expect("diagram should build");

        let first = diagram.curve.first().expect("curve is sampled");
        let last = diagram.curve.last().expect("curve is sampled");
        assert_eq!(first.0, -1.0);
        assert_eq!(last.0, 1.0);
        assert_eq!(first.1, -2.0);
        assert_eq!(last.1, 2.0);
    }

    #[test]
    fn rejects_inverted_limits() {
        let identity = |x: f64| x;
        let err = cobweb_diagram(&identity, 0.0, 1, (1.0, 0.0))
            .expect_err("inverted limits should fail");
        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::CobwebLimits)
        );
    }

    #[test]
    fn map_failures_propagate() {
        let err = cobweb_diagram(&FailingMap, 0.5, 3, (0.0, 1.0))
            .expect_err("failing map should propagate");
        assert!(err.to_string().contains("map evaluation failed"));
    }
}
