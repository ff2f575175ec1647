use crate::math::Real;
use crate::utils::QuadratureOptions;

/// Indicates a physically meaningless contact parameter.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum ParameterError {
    /// A parameter is NaN or infinite.
    #[error("the parameter `{0}` is not finite.")]
    NonFinite(&'static str),
    /// A parameter that must be strictly positive is not.
    #[error("the parameter `{name}` must be strictly positive, got {value}.")]
    NotPositive {
        /// Name of the parameter.
        name: &'static str,
        /// Its value.
        value: Real,
    },
    /// The physical penetration is negative.
    #[error("the penetration must be non-negative, got {0}.")]
    NegativePenetration(Real),
    /// The Poisson ratio is outside of `(-1, 0.5)`.
    #[error("the Poisson ratio must lie in (-1, 0.5), got {0}.")]
    PoissonRatio(Real),
}

/// The physical inputs of one contact evaluation.
///
/// All lengths must share one unit (conventionally millimetres), and the resulting pressures
/// are expressed in the unit of `youngs_modulus` (conventionally MPa).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContactParameters {
    /// Nominal rolling radius of the wheel, `R`.
    pub wheel_radius: Real,
    /// Young's modulus shared by the wheel and the rail, `E`.
    pub youngs_modulus: Real,
    /// Poisson's ratio shared by the wheel and the rail, `ν`.
    pub poisson_ratio: Real,
    /// Physical normal approach of the two bodies, `δ`.
    pub penetration: Real,
    /// Virtual penetration used to size the contact patches, `δ₀`.
    pub virtual_penetration: Real,
}

impl ContactParameters {
    /// Groups the contact parameters. See [`ContactParameters::validate`] for their domains.
    pub fn new(
        wheel_radius: Real,
        youngs_modulus: Real,
        poisson_ratio: Real,
        penetration: Real,
        virtual_penetration: Real,
    ) -> Self {
        Self {
            wheel_radius,
            youngs_modulus,
            poisson_ratio,
            penetration,
            virtual_penetration,
        }
    }

    /// Checks that every parameter lies in its physical domain.
    ///
    /// The radius, Young's modulus and virtual penetration must be strictly positive, the
    /// penetration non-negative, and the Poisson ratio in `(-1, 0.5)`.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let named = [
            ("wheel_radius", self.wheel_radius),
            ("youngs_modulus", self.youngs_modulus),
            ("poisson_ratio", self.poisson_ratio),
            ("penetration", self.penetration),
            ("virtual_penetration", self.virtual_penetration),
        ];

        if let Some((name, _)) = named.into_iter().find(|(_, value)| !value.is_finite()) {
            return Err(ParameterError::NonFinite(name));
        }

        for (name, value) in [
            ("wheel_radius", self.wheel_radius),
            ("youngs_modulus", self.youngs_modulus),
            ("virtual_penetration", self.virtual_penetration),
        ] {
            if value <= 0.0 {
                return Err(ParameterError::NotPositive { name, value });
            }
        }

        if self.penetration < 0.0 {
            return Err(ParameterError::NegativePenetration(self.penetration));
        }

        if self.poisson_ratio <= -1.0 || self.poisson_ratio >= 0.5 {
            return Err(ParameterError::PoissonRatio(self.poisson_ratio));
        }

        Ok(())
    }

    /// The load-scaling coefficient `π E δ / (2 (1 - ν²))`.
    pub fn load_coefficient(&self) -> Real {
        let nu = self.poisson_ratio;
        0.5 * core::f64::consts::PI * self.youngs_modulus * self.penetration / (1.0 - nu * nu)
    }

    /// The longitudinal half-length `sqrt(2 R g)` implied by an interpenetration `g`.
    pub fn half_length(&self, interpenetration: Real) -> Real {
        (2.0 * self.wheel_radius * interpenetration).sqrt()
    }
}

/// What the pressure solver does when a single patch fails.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum PatchErrorPolicy {
    /// Abort the whole pressure computation with the first failure, in patch order.
    #[default]
    Abort,
    /// Record the failure for that patch and carry on with the others.
    Skip,
}

/// Numerical settings of the pressure solver.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SolverOptions {
    /// Settings for the near-singular integral `∫ sqrt(a² - x²) / sqrt(x² + y² + ε) dx`.
    pub weighted_integral: QuadratureOptions,
    /// Settings for the smooth integral `∫ sqrt(a² - x²) dx`.
    pub elliptic_integral: QuadratureOptions,
    /// Abort-or-skip behavior on per-patch failures.
    pub on_patch_error: PatchErrorPolicy,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            weighted_integral: QuadratureOptions::near_singular(),
            elliptic_integral: QuadratureOptions::default(),
            on_patch_error: PatchErrorPolicy::Abort,
        }
    }
}

impl SolverOptions {
    /// Returns these options with the given per-patch failure policy.
    #[must_use]
    pub fn with_policy(mut self, on_patch_error: PatchErrorPolicy) -> Self {
        self.on_patch_error = on_patch_error;
        self
    }
}
