use hybrid_core::units::SpecificGasConstant;
use uom::si::{
    f64::{MolarMass, SpecificHeatCapacity, ThermodynamicTemperature},
    molar_mass::kilogram_per_mole,
    specific_heat_capacity::joule_per_kilogram_kelvin,
};

use crate::PropertyError;

use super::{Species, UNIVERSAL_GAS_CONSTANT};

/// A gas mixture described by species mole fractions.
///
/// Fractions are normalized on construction, so `[(N2, 3.0), (CO2, 1.0)]`
/// and `[(N2, 0.75), (CO2, 0.25)]` describe the same mixture.
#[derive(Debug, Clone, PartialEq)]
pub struct GasMixture {
    components: Vec<(Species, f64)>,
}

impl GasMixture {
    /// Creates a mixture from `(species, amount)` pairs.
    ///
    /// Amounts are relative; repeated species are combined.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidInput`] if the composition is empty,
    /// any amount is negative or non-finite, or all amounts are zero.
    pub fn new(
        components: impl IntoIterator<Item = (Species, f64)>,
    ) -> Result<Self, PropertyError> {
        let mut combined: Vec<(Species, f64)> = Vec::new();
        for (species, amount) in components {
            if !amount.is_finite() || amount < 0.0 {
                return Err(PropertyError::InvalidInput(format!(
                    "amount of {species:?} must be finite and non-negative, got {amount}"
                )));
            }
            match combined.iter_mut().find(|(s, _)| *s == species) {
                Some((_, total)) => *total += amount,
                None => combined.push((species, amount)),
            }
        }

        let total: f64 = combined.iter().map(|(_, amount)| amount).sum();
        if total <= 0.0 {
            return Err(PropertyError::InvalidInput(
                "mixture must contain a positive amount of at least one species".to_string(),
            ));
        }

        Ok(Self::normalized(combined, total))
    }

    /// Nominal combustion products of the nitrous oxide hybrid.
    ///
    /// Mole fractions of 0.599 N₂, 0.224 H₂O and 0.178 CO₂, renormalized.
    #[must_use]
    pub fn combustion_products() -> Self {
        let components = vec![
            (Species::Nitrogen, 0.599),
            (Species::Water, 0.224),
            (Species::CarbonDioxide, 0.178),
        ];
        Self::normalized(components, 1.001)
    }

    fn normalized(mut components: Vec<(Species, f64)>, total: f64) -> Self {
        for (_, amount) in &mut components {
            *amount /= total;
        }
        Self { components }
    }

    /// Returns the `(species, mole fraction)` pairs.
    #[must_use]
    pub fn components(&self) -> &[(Species, f64)] {
        &self.components
    }

    /// Returns the mole fraction of a species, or zero if it is absent.
    #[must_use]
    pub fn mole_fraction(&self, species: Species) -> f64 {
        self.components
            .iter()
            .find(|(s, _)| *s == species)
            .map_or(0.0, |(_, x)| *x)
    }

    /// Returns the mole-fraction weighted molar mass.
    #[must_use]
    pub fn molar_mass(&self) -> MolarMass {
        let kg_per_mol: f64 = self
            .components
            .iter()
            .map(|(species, x)| x * species.molar_mass().get::<kilogram_per_mole>())
            .sum();
        MolarMass::new::<kilogram_per_mole>(kg_per_mol)
    }

    /// Returns the specific gas constant `R = Rᵤ / M`.
    #[must_use]
    pub fn gas_constant(&self) -> SpecificGasConstant {
        SpecificGasConstant::new::<joule_per_kilogram_kelvin>(
            UNIVERSAL_GAS_CONSTANT / self.molar_mass().get::<kilogram_per_mole>(),
        )
    }

    /// Returns the specific heat at constant pressure at a temperature.
    ///
    /// Computed as `R·Σ xᵢ·(cp/R)ᵢ`, the molar average converted to a mass basis.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if any species' fit does not cover the temperature.
    pub fn cp(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<SpecificHeatCapacity, PropertyError> {
        let mut cp_over_r = 0.0;
        for (species, x) in &self.components {
            cp_over_r += x * species.cp_over_r(temperature)?;
        }
        Ok(self.gas_constant() * cp_over_r)
    }
}
