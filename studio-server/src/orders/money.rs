//! Money arithmetic for orders
//!
//! All calculation runs on `Decimal` and is rounded half-up to 2 decimal
//! places before being stored/serialized as `f64`.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::OrderItemInput;

use crate::utils::{AppError, AppResult};

/// Maximum allowed price per line item
const MAX_PRICE: f64 = 1_000_000.0;

const DECIMAL_PLACES: u32 = 2;

fn require_finite(value: f64, field_name: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field_name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Validate a line item before it is captured onto an order.
pub fn validate_item(item: &OrderItemInput) -> AppResult<()> {
    require_finite(item.price, "price")?;
    if item.price < 0.0 {
        return Err(AppError::validation(format!(
            "price must be non-negative, got {}",
            item.price
        )));
    }
    if item.price > MAX_PRICE {
        return Err(AppError::validation(format!(
            "price exceeds maximum allowed ({MAX_PRICE})"
        )));
    }
    if item.title.trim().is_empty() {
        return Err(AppError::validation("line item title must not be empty"));
    }
    Ok(())
}

/// Round to 2 decimal places, half-up.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `final_amount = sum(items.price) − discount`, on Decimal.
///
/// The discount must be non-negative and must not exceed the subtotal -
/// an order can be free, never negative.
pub fn compute_final_amount(items: &[OrderItemInput], discount: f64) -> AppResult<f64> {
    require_finite(discount, "discount")?;
    if discount < 0.0 {
        return Err(AppError::validation(format!(
            "discount must be non-negative, got {discount}"
        )));
    }

    let mut subtotal = Decimal::ZERO;
    for item in items {
        validate_item(item)?;
        subtotal += Decimal::from_f64(item.price)
            .ok_or_else(|| AppError::validation("price is not representable"))?;
    }

    let discount_dec = Decimal::from_f64(discount)
        .ok_or_else(|| AppError::validation("discount is not representable"))?;

    if discount_dec > subtotal {
        return Err(AppError::validation(format!(
            "discount ({discount}) exceeds order subtotal ({subtotal})"
        )));
    }

    let final_amount = round_money(subtotal - discount_dec);
    final_amount
        .to_f64()
        .ok_or_else(|| AppError::Internal("final amount overflowed f64".to_string()))
}
