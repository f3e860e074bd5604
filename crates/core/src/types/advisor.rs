//! Advisor query and result types.
//!
//! An [`AdvisorQuery`] carries the four inputs a visitor submits to the
//! solar advisor. An [`AdvisorResult`] is the estimate returned by the
//! external model service. The application performs no solar computation of
//! its own: results are opaque values that are range-checked and displayed.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::price::{CurrencyCode, Price};

/// Errors that can occur when building an [`AdvisorQuery`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvisorQueryError {
    /// Monthly bill is zero or negative.
    #[error("monthly bill must be greater than zero")]
    NonPositiveBill,
    /// Roof area is zero, negative, or not a number.
    #[error("roof area must be a positive number")]
    InvalidRoofArea,
    /// Location is empty or whitespace.
    #[error("location is required")]
    EmptyLocation,
}

/// Inputs for a single advisor request.
///
/// Constructed fresh per submission and discarded once the matching result
/// arrives (or the request fails).
///
/// ```
/// use rust_decimal::Decimal;
/// use solar_direct_core::AdvisorQuery;
///
/// let query = AdvisorQuery::new(Decimal::new(150, 0), "San Francisco, CA", 50.0, false).unwrap();
/// assert_eq!(query.property_type(), "Residential");
///
/// assert!(AdvisorQuery::new(Decimal::ZERO, "Austin, TX", 50.0, false).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorQuery {
    /// Average monthly electricity bill (USD).
    pub monthly_bill: Decimal,
    /// Free-text location, passed to the model verbatim.
    pub location: String,
    /// Available roof area in square meters.
    pub roof_area: f64,
    /// Whether the site is a commercial property.
    pub is_commercial: bool,
}

impl AdvisorQuery {
    /// Build a validated query.
    ///
    /// The location is trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the bill is not positive, the roof area is not a
    /// positive finite number, or the location is blank.
    pub fn new(
        monthly_bill: Decimal,
        location: &str,
        roof_area: f64,
        is_commercial: bool,
    ) -> Result<Self, AdvisorQueryError> {
        if monthly_bill <= Decimal::ZERO {
            return Err(AdvisorQueryError::NonPositiveBill);
        }

        if !roof_area.is_finite() || roof_area <= 0.0 {
            return Err(AdvisorQueryError::InvalidRoofArea);
        }

        let location = location.trim();
        if location.is_empty() {
            return Err(AdvisorQueryError::EmptyLocation);
        }

        Ok(Self {
            monthly_bill,
            location: location.to_owned(),
            roof_area,
            is_commercial,
        })
    }

    /// Property type label used in the prompt.
    #[must_use]
    pub const fn property_type(&self) -> &'static str {
        if self.is_commercial {
            "Commercial"
        } else {
            "Residential"
        }
    }
}

/// A numeric field in a model estimate failed the range check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvisorResultError {
    /// The value was negative, NaN, infinite, or too large to represent.
    #[error("{field} is out of range")]
    OutOfRange {
        /// Wire name of the offending field.
        field: &'static str,
    },
}

/// A solar installation estimate produced by the model service.
///
/// Every numeric field is non-negative. There is no relationship enforced
/// between the fields or with the originating query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorResult {
    /// Number of panels to install (whole panels).
    pub panels_needed: u32,
    /// Approximate installed cost.
    pub estimated_cost: Price,
    /// Approximate savings per year.
    pub annual_savings: Price,
    /// Years to break even.
    pub payback_years: f64,
    /// Free-text advice.
    pub recommendation: String,
}

impl AdvisorResult {
    /// Build a result from raw model estimates.
    ///
    /// Fractional panel counts are rounded up to the next whole panel and
    /// money values are rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorResultError::OutOfRange`] for the first numeric field
    /// that is negative or not finite.
    pub fn from_estimates(
        panels_needed: f64,
        estimated_cost: f64,
        annual_savings: f64,
        payback_years: f64,
        recommendation: String,
    ) -> Result<Self, AdvisorResultError> {
        let panels_needed = whole_panels(panels_needed)?;
        let estimated_cost = usd(estimated_cost, "estimatedCost")?;
        let annual_savings = usd(annual_savings, "annualSavings")?;
        let payback_years = non_negative(payback_years, "paybackPeriod")?;

        Ok(Self {
            panels_needed,
            estimated_cost,
            annual_savings,
            payback_years,
            recommendation,
        })
    }

    /// Payback period formatted to one decimal place.
    #[must_use]
    pub fn payback_display(&self) -> String {
        format!("{:.1}", self.payback_years)
    }
}

fn non_negative(value: f64, field: &'static str) -> Result<f64, AdvisorResultError> {
    if value.is_finite() && value >= 0.0 {
        // -0.0 passes the comparison; adding +0.0 clears the sign bit.
        Ok(value + 0.0)
    } else {
        Err(AdvisorResultError::OutOfRange { field })
    }
}

fn whole_panels(value: f64) -> Result<u32, AdvisorResultError> {
    const FIELD: &str = "panelsNeeded";

    let rounded = non_negative(value, FIELD)?.ceil();
    if rounded > f64::from(u32::MAX) {
        return Err(AdvisorResultError::OutOfRange { field: FIELD });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Range checked above
    Ok(rounded as u32)
}

fn usd(value: f64, field: &'static str) -> Result<Price, AdvisorResultError> {
    let amount = Decimal::from_f64(non_negative(value, field)?)
        .ok_or(AdvisorResultError::OutOfRange { field })?;
    Ok(Price::new(amount.round_dp(2).abs(), CurrencyCode::USD))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(bill: i64, location: &str, area: f64) -> Result<AdvisorQuery, AdvisorQueryError> {
        AdvisorQuery::new(Decimal::new(bill, 0), location, area, false)
    }

    #[test]
    fn test_query_valid() {
        let q = query(150, "  San Francisco, CA ", 50.0).unwrap();
        assert_eq!(q.location, "San Francisco, CA");
        assert_eq!(q.monthly_bill, Decimal::new(150, 0));
    }

    #[test]
    fn test_query_rejects_non_positive_bill() {
        assert_eq!(
            query(0, "Austin", 10.0),
            Err(AdvisorQueryError::NonPositiveBill)
        );
        assert_eq!(
            query(-20, "Austin", 10.0),
            Err(AdvisorQueryError::NonPositiveBill)
        );
    }

    #[test]
    fn test_query_rejects_bad_roof_area() {
        assert_eq!(
            query(100, "Austin", 0.0),
            Err(AdvisorQueryError::InvalidRoofArea)
        );
        assert_eq!(
            query(100, "Austin", f64::NAN),
            Err(AdvisorQueryError::InvalidRoofArea)
        );
        assert_eq!(
            query(100, "Austin", f64::INFINITY),
            Err(AdvisorQueryError::InvalidRoofArea)
        );
    }

    #[test]
    fn test_query_rejects_blank_location() {
        assert_eq!(query(100, "   ", 10.0), Err(AdvisorQueryError::EmptyLocation));
    }

    #[test]
    fn test_property_type() {
        let commercial = AdvisorQuery::new(Decimal::ONE, "Reno", 1.0, true).unwrap();
        assert_eq!(commercial.property_type(), "Commercial");
    }

    #[test]
    fn test_result_from_estimates() {
        let result =
            AdvisorResult::from_estimates(12.0, 18_500.0, 1_650.5, 11.2, "Go big.".to_string())
                .unwrap();
        assert_eq!(result.panels_needed, 12);
        assert_eq!(result.estimated_cost.display(), "$18,500.00");
        assert_eq!(result.annual_savings.display(), "$1,650.50");
        assert_eq!(result.payback_display(), "11.2");
        assert_eq!(result.recommendation, "Go big.");
    }

    #[test]
    fn test_fractional_panels_round_up() {
        let result = AdvisorResult::from_estimates(11.2, 1.0, 1.0, 1.0, String::new()).unwrap();
        assert_eq!(result.panels_needed, 12);
    }

    #[test]
    fn test_zero_values_allowed() {
        let result = AdvisorResult::from_estimates(0.0, 0.0, 0.0, 0.0, String::new()).unwrap();
        assert_eq!(result.panels_needed, 0);
        assert_eq!(result.estimated_cost.amount, Decimal::ZERO);
    }

    #[test]
    fn test_negative_zero_is_plain_zero() {
        let result = AdvisorResult::from_estimates(-0.0, -0.0, -0.0, -0.0, String::new()).unwrap();
        assert_eq!(result.panels_needed, 0);
        assert_eq!(result.estimated_cost.display(), "$0.00");
        assert_eq!(result.annual_savings.display(), "$0.00");
        assert!(result.payback_years.is_sign_positive());
        assert_eq!(result.payback_display(), "0.0");
    }

    #[test]
    fn test_negative_values_rejected() {
        assert_eq!(
            AdvisorResult::from_estimates(-1.0, 1.0, 1.0, 1.0, String::new()),
            Err(AdvisorResultError::OutOfRange {
                field: "panelsNeeded"
            })
        );
        assert_eq!(
            AdvisorResult::from_estimates(1.0, -1.0, 1.0, 1.0, String::new()),
            Err(AdvisorResultError::OutOfRange {
                field: "estimatedCost"
            })
        );
        assert_eq!(
            AdvisorResult::from_estimates(1.0, 1.0, -0.5, 1.0, String::new()),
            Err(AdvisorResultError::OutOfRange {
                field: "annualSavings"
            })
        );
        assert_eq!(
            AdvisorResult::from_estimates(1.0, 1.0, 1.0, -3.0, String::new()),
            Err(AdvisorResultError::OutOfRange {
                field: "paybackPeriod"
            })
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(AdvisorResult::from_estimates(f64::NAN, 1.0, 1.0, 1.0, String::new()).is_err());
        assert!(
            AdvisorResult::from_estimates(1.0, f64::INFINITY, 1.0, 1.0, String::new()).is_err()
        );
        assert!(AdvisorResult::from_estimates(1e12, 1.0, 1.0, 1.0, String::new()).is_err());
    }
}
