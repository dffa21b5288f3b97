//! Fixed-step integration of small first-order ODE systems.

use nalgebra::Vector2;

use crate::math::Scalar;
use crate::simulation::SimulationError;

/// Two-component state vector.
pub type State2 = Vector2<Scalar>;

/// A first-order system `dy/dt = f(t, y)` with a two-component state.
pub trait OdeSystem {
    /// Right-hand side `f(t, y)`.
    fn derivative(&self, t: Scalar, y: &State2) -> State2;

    /// Fastest natural rate of the system in 1/s, used to size internal steps.
    fn characteristic_rate(&self) -> Scalar;
}

/// Fourth-order Runge-Kutta integrator (RK4)
///
/// 1. k1 = f(t, y)
/// 2. k2 = f(t + h/2, y + k1 h/2)
/// 3. k3 = f(t + h/2, y + k2 h/2)
/// 4. k4 = f(t + h, y + k3 h)
/// 5. y(t+h) = y(t) + h/6 (k1 + 2 k2 + 2 k3 + k4)
#[derive(Debug, Clone, Copy)]
pub struct RungeKuttaFourthOrder {
    /// Largest allowed `h · rate` per internal step.
    pub max_phase_step: Scalar,
}

impl Default for RungeKuttaFourthOrder {
    fn default() -> Self {
        Self { max_phase_step: 0.05 }
    }
}

impl RungeKuttaFourthOrder {
    /// Advances `y` by one step of size `h` from time `t`.
    #[must_use]
    pub fn step<S: OdeSystem + ?Sized>(&self, system: &S, t: Scalar, y: &State2, h: Scalar) -> State2 {
        let half = 0.5 * h;
        let k1 = system.derivative(t, y);
        let k2 = system.derivative(t + half, &(y + k1 * half));
        let k3 = system.derivative(t + half, &(y + k2 * half));
        let k4 = system.derivative(t + h, &(y + k3 * h));
        y + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)
    }

    /// Integrates from `y0` at `times[0]` and returns the state at every requested time.
    ///
    /// Each interval is subdivided so that no internal step exceeds
    /// `max_phase_step / characteristic_rate`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Diverged`] when the state stops being finite.
    pub fn integrate<S: OdeSystem + ?Sized>(
        &self,
        system: &S,
        y0: State2,
        times: &[Scalar],
    ) -> Result<Vec<State2>, SimulationError> {
        let mut out = Vec::with_capacity(times.len());
        let Some(&t0) = times.first() else {
            return Ok(out);
        };
        let rate = system.characteristic_rate().abs();
        let mut y = y0;
        out.push(y);
        let mut t = t0;
        for &t_next in &times[1..] {
            let dt = t_next - t;
            let substeps = if rate > 0.0 {
                ((dt * rate / self.max_phase_step).ceil() as usize).max(1)
            } else {
                1
            };
            let h = dt / substeps as Scalar;
            for k in 0..substeps {
                y = self.step(system, t + h * k as Scalar, &y, h);
            }
            if !y.iter().all(|v| v.is_finite()) {
                return Err(SimulationError::Diverged { time: t_next });
            }
            t = t_next;
            out.push(y);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::sweep::linspace;

    struct Oscillator {
        omega: Scalar,
    }

    impl OdeSystem for Oscillator {
        fn derivative(&self, _t: Scalar, y: &State2) -> State2 {
            State2::new(y.y, -self.omega * self.omega * y.x)
        }

        fn characteristic_rate(&self) -> Scalar {
            self.omega
        }
    }

    struct Blowup;

    impl OdeSystem for Blowup {
        fn derivative(&self, _t: Scalar, y: &State2) -> State2 {
            State2::new(y.x * y.x, 0.0)
        }

        fn characteristic_rate(&self) -> Scalar {
            0.0
        }
    }

    #[test]
    fn harmonic_oscillator_tracks_cosine() {
        let osc = Oscillator { omega: 3.0 };
        let times = linspace(0.0, 2.0, 101);
        let states = RungeKuttaFourthOrder::default()
            .integrate(&osc, State2::new(1.0, 0.0), &times)
            .expect("integrates");
        for (t, y) in times.iter().zip(&states) {
            assert_relative_eq!(y.x, (3.0 * t).cos(), epsilon = 1e-6);
        }
    }

    #[test]
    fn non_finite_state_is_reported() {
        let times = linspace(0.0, 10.0, 11);
        let err = RungeKuttaFourthOrder::default()
            .integrate(&Blowup, State2::new(1.0, 0.0), &times)
            .unwrap_err();
        assert!(matches!(err, SimulationError::Diverged { .. }));
    }
}
