use crate::Error;
use alloy::primitives::U256;
use std::fmt;
use std::ops;

/// A token amount in the contract's smallest (base) unit, paired with the token's
/// decimal count. Has functions to convert to and from the display unit (the unit
/// shown to users, e.g. whole USDC) and the base unit the contract works in.
#[derive(Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct TokenAmount {
    /// The number of base units (U256) in the amount
    base_units: U256,
    /// The number of decimal places the token uses
    decimals: u8,
}

impl ops::Add<Self> for TokenAmount {
    type Output = Result<Self, Error>;

    fn add(self, rhs: Self) -> Result<Self, Error> {
        if self.decimals != rhs.decimals {
            return Err(Error::DecimalMismatch {
                left: self.decimals,
                right: rhs.decimals,
            });
        }
        Ok(Self {
            base_units: self
                .base_units
                .checked_add(rhs.base_units)
                .ok_or(Error::Overflow(format!(
                    "Overflow in U256 when adding {} to {}",
                    self.base_units, rhs.base_units
                )))?,
            decimals: self.decimals,
        })
    }
}

impl ops::Sub for TokenAmount {
    type Output = Result<Self, Error>;

    fn sub(self, rhs: Self) -> Result<Self, Error> {
        if self.decimals != rhs.decimals {
            return Err(Error::DecimalMismatch {
                left: self.decimals,
                right: rhs.decimals,
            });
        }
        Ok(Self {
            base_units: self
                .base_units
                .checked_sub(rhs.base_units)
                .ok_or(Error::Overflow(format!(
                    "Overflow in U256 when subtracting {} from {}",
                    self.base_units, rhs.base_units
                )))?,
            decimals: self.decimals,
        })
    }
}

impl TokenAmount {
    /// Creates a new TokenAmount from a raw base-unit value.
    pub fn from_base_units(base_units: U256, decimals: u8) -> Self {
        Self {
            base_units,
            decimals,
        }
    }

    /// Creates a new TokenAmount from a decimal value in the display unit.
    ///
    /// Note: For very large amounts, precision may be lost in the f64
    /// representation. Prefer [`TokenAmount::from_base_units`] when an exact
    /// base-unit value is available.
    pub fn from_display(value: f64, decimals: u8) -> Self {
        let base_f64 = value * 10f64.powi(decimals as i32);

        // Clamp to valid range and convert safely
        if base_f64 < 0.0 {
            return Self {
                base_units: U256::ZERO,
                decimals,
            };
        }

        if base_f64 <= u128::MAX as f64 {
            let base_u128 = base_f64.round() as u128;
            Self {
                base_units: U256::from(base_u128),
                decimals,
            }
        } else {
            // Saturate; amounts beyond u128 base units are unrealistic
            Self {
                base_units: U256::MAX,
                decimals,
            }
        }
    }

    /// Creates a new zero TokenAmount with the given decimal count.
    pub fn zero(decimals: u8) -> Self {
        Self {
            base_units: U256::ZERO,
            decimals,
        }
    }

    /// Returns the raw number of base units in the amount.
    pub fn base_units(&self) -> U256 {
        self.base_units
    }

    /// Returns the decimal count the amount was constructed with.
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Returns true if the amount is zero base units.
    pub fn is_zero(&self) -> bool {
        self.base_units.is_zero()
    }

    /// Returns the amount in the display unit.
    ///
    /// Converts through the lower 128 bits of the base-unit value; very large
    /// amounts lose precision in f64.
    pub fn display(&self) -> f64 {
        let bytes = self.base_units.to_le_bytes::<32>();
        let low_u128 = u128::from_le_bytes(bytes[0..16].try_into().unwrap());
        low_u128 as f64 / 10f64.powi(self.decimals as i32)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
