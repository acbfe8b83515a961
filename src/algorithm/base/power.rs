use enum_dispatch::enum_dispatch;
use crate::utils::error::{Error, Result};

/// Exponent bits of 1.0 shifted to balance the linear log2 approximation.
const ONE_BITS: i64 = 4606921280493453312;

#[enum_dispatch]
#[derive(Clone, Copy, Debug)]
pub enum PowerEnum {
    Precise,
    Approximate,
}

#[enum_dispatch(PowerEnum)]
pub trait Power {
    /// `base` raised to a non-negative `exp`.
    fn pow(&self, base: f64, exp: f64) -> f64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Precise;

/// Squaring for the integral part of the exponent and the IEEE 754 bit trick
/// for the fraction. Integral exponents are exact; otherwise the relative error
/// stays below 6%.
#[derive(Clone, Copy, Debug, Default)]
pub struct Approximate;

impl Power for Precise {
    fn pow(&self, base: f64, exp: f64) -> f64 {
        base.powf(exp)
    }
}

impl Power for Approximate {
    fn pow(&self, base: f64, exp: f64) -> f64 {
        debug_assert!(exp >= 0.0);
        let mut result = 1.0;
        let mut square = base;
        let mut n = exp.trunc() as i64;
        while n != 0 {
            if n & 1 != 0 {
                result *= square;
            }
            square *= square;
            n >>= 1;
        }
        let fraction = exp.fract();
        if fraction == 0.0 {
            return result;
        }
        if base <= 0.0 {
            return 0.0;
        }
        let bits = base.to_bits() as i64;
        let approx = (fraction * (bits - ONE_BITS) as f64) as i64 + ONE_BITS;
        result * f64::from_bits(approx as u64)
    }
}

impl PowerEnum {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "precise" => Ok(Precise.into()),
            "fast"    => Ok(Approximate.into()),
            _         => Err(Error::UnknownPower(name.to_owned())),
        }
    }
}
