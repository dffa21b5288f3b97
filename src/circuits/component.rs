use num_complex::Complex;

use crate::math::Scalar;

/// Trait implemented by all circuit components that can provide a frequency-domain impedance.
pub trait Component {
    /// Returns the component's impedance for an angular frequency `omega` (rad/s).
    fn impedance(&self, omega: Scalar) -> Complex<Scalar>;

    /// Human-readable identifier (e.g. `R1`).
    fn name(&self) -> &str;
}

/// Lumped resistor model.
#[derive(Debug, Clone)]
pub struct Resistor {
    name: String,
    resistance: Scalar,
}

impl Resistor {
    /// Creates a resistor.
    #[must_use]
    pub fn new(name: impl Into<String>, resistance_ohms: Scalar) -> Self {
        Self {
            name: name.into(),
            resistance: resistance_ohms,
        }
    }

    /// Resistance in ohms.
    #[must_use]
    pub fn resistance(&self) -> Scalar {
        self.resistance
    }

    /// Voltage drop `R i` for a current `i`.
    #[must_use]
    pub fn voltage(&self, current: Scalar) -> Scalar {
        self.resistance * current
    }
}

impl Component for Resistor {
    fn impedance(&self, _omega: Scalar) -> Complex<Scalar> {
        Complex::new(self.resistance, 0.0)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Lumped capacitor model (ideal).
#[derive(Debug, Clone)]
pub struct Capacitor {
    name: String,
    capacitance: Scalar,
}

impl Capacitor {
    /// Creates a capacitor.
    #[must_use]
    pub fn new(name: impl Into<String>, capacitance_f: Scalar) -> Self {
        Self {
            name: name.into(),
            capacitance: capacitance_f,
        }
    }

    /// Returns the capacitance in farads.
    #[must_use]
    pub fn capacitance(&self) -> Scalar {
        self.capacitance
    }

    /// Stored energy `½ C v²` in joules.
    #[must_use]
    pub fn energy(&self, voltage: Scalar) -> Scalar {
        0.5 * self.capacitance * voltage * voltage
    }
}

impl Component for Capacitor {
    fn impedance(&self, omega: Scalar) -> Complex<Scalar> {
        if omega.abs() < Scalar::EPSILON {
            Complex::new(f64::INFINITY, 0.0)
        } else {
            Complex::new(0.0, -1.0 / (omega * self.capacitance))
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Lumped inductor model (ideal).
#[derive(Debug, Clone)]
pub struct Inductor {
    name: String,
    inductance: Scalar,
}

impl Inductor {
    /// Creates an inductor.
    #[must_use]
    pub fn new(name: impl Into<String>, inductance_h: Scalar) -> Self {
        Self {
            name: name.into(),
            inductance: inductance_h,
        }
    }

    /// Returns the inductance in henries.
    #[must_use]
    pub fn inductance(&self) -> Scalar {
        self.inductance
    }

    /// Stored energy `½ L i²` in joules.
    #[must_use]
    pub fn energy(&self, current: Scalar) -> Scalar {
        0.5 * self.inductance * current * current
    }
}

impl Component for Inductor {
    fn impedance(&self, omega: Scalar) -> Complex<Scalar> {
        Complex::new(0.0, omega * self.inductance)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn resistor_impedance_is_real() {
        let r = Resistor::new("R1", 100.0);
        let z = r.impedance(1.0);
        assert_relative_eq!(z.re, 100.0);
        assert_relative_eq!(z.im, 0.0);
    }

    #[test]
    fn capacitor_impedance_is_reactive() {
        let c = Capacitor::new("C1", 1e-6);
        let omega = 1.0e3;
        let z = c.impedance(omega);
        assert_relative_eq!(z.re, 0.0, epsilon = 1.0e-12);
        assert!(z.im < 0.0);
        assert!(c.impedance(0.0).re.is_infinite());
    }

    #[test]
    fn stored_energies() {
        assert_relative_eq!(Inductor::new("L1", 0.1).energy(2.0), 0.2);
        assert_relative_eq!(Capacitor::new("C1", 1e-5).energy(12.0), 7.2e-4, max_relative = 1e-12);
    }
}
