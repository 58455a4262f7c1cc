use uom::si::f64::{MassDensity, ThermodynamicTemperature};

/// Thermodynamic state of a fluid at one point along the flow path.
///
/// A state pairs temperature and density with the fluid description. For a
/// [`GasMixture`](crate::fluid::GasMixture) the fluid carries the composition,
/// so cloning a state yields a fully independent snapshot: re-evaluating one
/// copy at a new temperature and pressure never touches another.
///
/// Pressure and the other derived properties come from a
/// [`ThermodynamicProperties`](crate::model::ThermodynamicProperties) model.
#[derive(Debug, Clone, PartialEq)]
pub struct State<Fluid> {
    pub temperature: ThermodynamicTemperature,
    pub density: MassDensity,
    pub fluid: Fluid,
}

impl<Fluid> State<Fluid> {
    /// Creates a new state with the given temperature, density, and fluid.
    #[must_use]
    pub fn new(temperature: ThermodynamicTemperature, density: MassDensity, fluid: Fluid) -> Self {
        Self {
            temperature,
            density,
            fluid,
        }
    }
}
