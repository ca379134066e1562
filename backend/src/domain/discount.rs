//! Coupon-based discount resolution.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Coupon;

/// Resolved discount applied to a base rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscountQuote {
    /// Applied percentage; zero for absent, zero-rated, or expired coupons.
    #[schema(example = 10)]
    pub discount: u8,
    /// Amount saved in whole currency units.
    #[schema(example = 100)]
    pub saved: i64,
}

impl DiscountQuote {
    /// The no-discount quote.
    pub fn none() -> Self {
        Self {
            discount: 0,
            saved: 0,
        }
    }
}

/// Resolve a coupon lookup result against a base rent.
///
/// An absent coupon, a zero percentage, or an expired coupon all quote zero;
/// none of them is an error. The saved amount is rounded half-up to the whole
/// currency unit using integer arithmetic, so `rent=105, p=10` saves `11`.
pub fn resolve_discount(coupon: Option<&Coupon>, base_rent: i64) -> DiscountQuote {
    let Some(coupon) = coupon else {
        return DiscountQuote::none();
    };
    if !coupon.is_usable() {
        return DiscountQuote::none();
    }
    let percentage = coupon.percentage();
    // Round half-up in integer space: (rent * p + 50) / 100.
    let saved = (base_rent
        .saturating_mul(i64::from(percentage))
        .saturating_add(50))
        / 100;
    DiscountQuote {
        discount: percentage,
        saved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CouponCode;
    use rstest::rstest;

    fn coupon(percentage: u8, expired: bool) -> Coupon {
        let coupon =
            Coupon::new(CouponCode::new("SAVE").expect("code"), percentage).expect("coupon");
        if expired { coupon.expire() } else { coupon }
    }

    #[test]
    fn absent_coupon_quotes_zero() {
        assert_eq!(resolve_discount(None, 1000), DiscountQuote::none());
    }

    #[test]
    fn expired_coupon_quotes_zero_regardless_of_percentage() {
        let expired = coupon(90, true);
        assert_eq!(resolve_discount(Some(&expired), 1000), DiscountQuote::none());
    }

    #[test]
    fn zero_percentage_quotes_zero() {
        let zero = coupon(0, false);
        assert_eq!(resolve_discount(Some(&zero), 1000), DiscountQuote::none());
    }

    #[rstest]
    #[case(1000, 10, 100)]
    #[case(105, 10, 11)] // 10.5 rounds half-up
    #[case(104, 10, 10)] // 10.4 rounds down
    #[case(1, 33, 0)] // 0.33 rounds down
    #[case(999, 100, 999)]
    fn saved_amount_rounds_half_up(
        #[case] rent: i64,
        #[case] percentage: u8,
        #[case] expected: i64,
    ) {
        let live = coupon(percentage, false);
        let quote = resolve_discount(Some(&live), rent);
        assert_eq!(quote.discount, percentage);
        assert_eq!(quote.saved, expected);
    }
}
