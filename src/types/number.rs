//! Number formatting for scene description text.
//!
//! The renderer's parser accepts any decimal notation, but output must be
//! stable across runs, so every numeric field goes through one of these
//! wrappers.

use std::fmt;

/// A scalar printed in shortest round-trip form, with integral values keeping
/// a trailing `.0` (`200.0`, `0.5`, `6.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar(pub f32);

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_finite() && v == v.trunc() && v.abs() < 1e16 {
            write!(f, "{:.1}", v)
        } else {
            write!(f, "{}", v)
        }
    }
}

/// Fixed-point components separated by single spaces.
#[derive(Debug, Clone, Copy)]
pub struct Fixed<'a> {
    values: &'a [f32],
    precision: usize,
}

impl<'a> Fixed<'a> {
    /// Six decimals, used for points, normals and UVs.
    pub fn p6(values: &'a [f32]) -> Self {
        Self { values, precision: 6 }
    }

    /// Three decimals, used for colors.
    pub fn p3(values: &'a [f32]) -> Self {
        Self { values, precision: 3 }
    }

    /// Two decimals, used for reflection amounts.
    pub fn p2(values: &'a [f32]) -> Self {
        Self { values, precision: 2 }
    }
}

impl fmt::Display for Fixed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:.*}", self.precision, v)?;
        }
        Ok(())
    }
}

/// A color wrapped in the renderer's `sRGB nonlinear` color-space block.
#[derive(Debug, Clone, Copy)]
pub struct Srgb(pub [f32; 3]);

impl fmt::Display for Srgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ \"sRGB nonlinear\" {} }}", Fixed::p3(&self.0))
    }
}

/// Components printed as [`Scalar`]s separated by spaces.
#[derive(Debug, Clone, Copy)]
pub struct Scalars<'a>(pub &'a [f32]);

impl fmt::Display for Scalars<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", Scalar(*v))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_keeps_integral_suffix() {
        assert_eq!(Scalar(200.0).to_string(), "200.0");
        assert_eq!(Scalar(0.5).to_string(), "0.5");
        assert_eq!(Scalar(0.01).to_string(), "0.01");
        assert_eq!(Scalar(-3.0).to_string(), "-3.0");
    }

    #[test]
    fn test_fixed_precision() {
        assert_eq!(Fixed::p6(&[1.0, -0.5, 0.25]).to_string(), "1.000000 -0.500000 0.250000");
        assert_eq!(Fixed::p3(&[0.8, 0.8, 0.8]).to_string(), "0.800 0.800 0.800");
        assert_eq!(Fixed::p2(&[0.333]).to_string(), "0.33");
    }

    #[test]
    fn test_srgb_block() {
        assert_eq!(
            Srgb([1.0, 0.5, 0.0]).to_string(),
            "{ \"sRGB nonlinear\" 1.000 0.500 0.000 }"
        );
    }

    #[test]
    fn test_scalars_join() {
        assert_eq!(Scalars(&[1.0, 0.95, 0.65]).to_string(), "1.0 0.95 0.65");
    }
}
