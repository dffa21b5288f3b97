use num_complex::Complex;

use crate::math::Scalar;

use super::component::Component;

/// Components connected in series; impedances add.
pub struct SeriesNetwork {
    name: String,
    members: Vec<Box<dyn Component + Send + Sync>>,
}

impl SeriesNetwork {
    /// Creates an empty network.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Adds a component to the chain.
    pub fn add_component<C>(&mut self, component: C)
    where
        C: Component + Send + Sync + 'static,
    {
        self.members.push(Box::new(component));
    }

    /// Builder form of [`SeriesNetwork::add_component`].
    #[must_use]
    pub fn with<C>(mut self, component: C) -> Self
    where
        C: Component + Send + Sync + 'static,
    {
        self.add_component(component);
        self
    }

    /// Returns the aggregate impedance at angular frequency `omega`.
    #[must_use]
    pub fn impedance(&self, omega: Scalar) -> Complex<Scalar> {
        self.members
            .iter()
            .fold(Complex::<Scalar>::default(), |acc, c| acc + c.impedance(omega))
    }

    /// Returns the name of the network.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the members in connection order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name())
    }

    /// Returns the number of components in the network.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true when no components are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl std::fmt::Debug for SeriesNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesNetwork")
            .field("name", &self.name)
            .field("members", &self.member_names().collect::<Vec<_>>())
            .finish()
    }
}
