//! Scalar fields sampled by the mesher
//!
//! A scalar field is a pure function `f(x, y, z)`.  Points where
//! `f(x, y, z) < isovalue` are **inside** the shape; everything else is
//! **outside**.
use crate::Error;
use strum::VariantNames;

/// A deterministic function from 3D position to a scalar value
///
/// The field must be defined everywhere in the sampled volume and must not
/// have side effects; it may be evaluated from multiple threads at once.
pub trait ScalarField: Sync {
    /// Evaluates the field at the given position
    fn eval(&self, x: f32, y: f32, z: f32) -> f32;
}

impl<F: Fn(f32, f32, f32) -> f32 + Sync> ScalarField for F {
    fn eval(&self, x: f32, y: f32, z: f32) -> f32 {
        self(x, y, z)
    }
}

/// Built-in scalar fields, selectable by name
///
/// ```
/// use cubemarch::field::{Field, ScalarField};
///
/// let f = Field::from_name("sphere")?;
/// assert_eq!(f.eval(0.0, 0.0, 0.0), -1.0);
/// # Ok::<(), cubemarch::Error>(())
/// ```
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::VariantNames,
)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    /// `y - sin(x) cos(z)`
    Wavy,
    /// `x² - y² - z² - z`
    Hyperboloid,
    /// Unit sphere, `x² + y² + z² - 1`
    Sphere,
    /// Torus about the Y axis with major radius 1 and minor radius 0.25
    Torus,
}

impl Field {
    /// Looks up a field by name
    ///
    /// Returns [`Error::UnknownField`] (which lists every valid name) if the
    /// name isn't recognized.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        name.parse().map_err(|_| Error::UnknownField {
            name: name.to_owned(),
            options: Self::options(),
        })
    }

    /// Returns a comma-separated list of quoted field names
    pub fn options() -> String {
        Self::VARIANTS
            .iter()
            .map(|v| format!("'{v}'"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl ScalarField for Field {
    fn eval(&self, x: f32, y: f32, z: f32) -> f32 {
        match self {
            Field::Wavy => y - x.sin() * z.cos(),
            Field::Hyperboloid => x * x - y * y - z * z - z,
            Field::Sphere => x * x + y * y + z * z - 1.0,
            Field::Torus => {
                let q = (x * x + z * z).sqrt() - 1.0;
                q * q + y * y - 0.25 * 0.25
            }
        }
    }
}
