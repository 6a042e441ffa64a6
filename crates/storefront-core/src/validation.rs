//! Business-rule validation for catalog and registration commands.
//!
//! Pure, stateless checks invoked by the domain services before
//! persistence. Each function fails fast on the first violated rule
//! with `StorefrontError::Validation`, which the HTTP layer maps to 400.
//! Uniqueness rules (slug, SKU, email) are not checked here — they
//! need a repository existence query and live in the services.

use rust_decimal::Decimal;

use crate::error::{StorefrontError, StorefrontResult};

/// Brand name: non-blank, 2–100 characters.
pub fn validate_brand_name(name: &str) -> StorefrontResult<()> {
    validate_label("Brand name", name, 2, 100)
}

/// Category name: non-blank, 2–100 characters.
pub fn validate_category_name(name: &str) -> StorefrontResult<()> {
    validate_label("Category name", name, 2, 100)
}

/// Product name: non-blank, 3–255 characters.
pub fn validate_product_name(name: &str) -> StorefrontResult<()> {
    validate_label("Product name", name, 3, 255)
}

/// Customer name: non-blank, 2–255 characters.
pub fn validate_customer_name(name: &str) -> StorefrontResult<()> {
    validate_label("Customer name", name, 2, 255)
}

fn validate_label(field: &str, value: &str, min: usize, max: usize) -> StorefrontResult<()> {
    if value.trim().is_empty() {
        return Err(StorefrontError::validation(format!("{field} must not be blank")));
    }
    let len = value.chars().count();
    if len < min {
        return Err(StorefrontError::validation(format!(
            "{field} must have at least {min} characters"
        )));
    }
    if len > max {
        return Err(StorefrontError::validation(format!(
            "{field} must not exceed {max} characters"
        )));
    }
    Ok(())
}

/// Product slug: non-blank, 3–100 characters, lowercase alphanumeric
/// groups separated by single hyphens, no leading/trailing hyphen.
pub fn validate_slug(slug: &str) -> StorefrontResult<()> {
    if slug.trim().is_empty() {
        return Err(StorefrontError::validation("Slug must not be blank"));
    }
    let len = slug.chars().count();
    if !(3..=100).contains(&len) {
        return Err(StorefrontError::validation("Slug must have between 3 and 100 characters"));
    }
    if !is_hyphenated(slug, |c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
        return Err(StorefrontError::validation(
            "Slug is invalid: use lowercase letters, digits and hyphens only",
        ));
    }
    Ok(())
}

/// SKU code: non-blank, 3–50 characters, uppercase alphanumeric groups
/// separated by single hyphens, no leading/trailing hyphen.
pub fn validate_sku_code(sku_code: &str) -> StorefrontResult<()> {
    if sku_code.trim().is_empty() {
        return Err(StorefrontError::validation("SKU code must not be blank"));
    }
    let len = sku_code.chars().count();
    if !(3..=50).contains(&len) {
        return Err(StorefrontError::validation(
            "SKU code must have between 3 and 50 characters",
        ));
    }
    if !is_hyphenated(sku_code, |c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err(StorefrontError::validation(
            "SKU code is invalid: use uppercase letters, digits and hyphens only",
        ));
    }
    Ok(())
}

/// Matches `^G+(-G+)*$` where `G` is the allowed character class —
/// the shape shared by slugs and SKU codes.
fn is_hyphenated(value: &str, allowed: impl Fn(char) -> bool) -> bool {
    if value.starts_with('-') || value.ends_with('-') {
        return false;
    }
    let mut prev_hyphen = false;
    for c in value.chars() {
        if c == '-' {
            if prev_hyphen {
                return false;
            }
            prev_hyphen = true;
        } else if allowed(c) {
            prev_hyphen = false;
        } else {
            return false;
        }
    }
    true
}

/// Price must be strictly positive; the promotional price, when
/// present, must be strictly positive and must not exceed the regular
/// price.
pub fn validate_variant_prices(price: Decimal, promotional_price: Option<Decimal>) -> StorefrontResult<()> {
    if price <= Decimal::ZERO {
        return Err(StorefrontError::validation("Price must be greater than zero"));
    }
    if let Some(promo) = promotional_price {
        if promo <= Decimal::ZERO {
            return Err(StorefrontError::validation(
                "Promotional price must be greater than zero",
            ));
        }
        if promo > price {
            return Err(StorefrontError::validation(
                "Promotional price must not exceed the regular price",
            ));
        }
    }
    Ok(())
}

/// Physical dimensions, when provided, must be non-negative.
pub fn validate_dimensions(
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    width_cm: Option<f64>,
    depth_cm: Option<f64>,
) -> StorefrontResult<()> {
    for (field, value) in [
        ("Weight", weight_kg),
        ("Height", height_cm),
        ("Width", width_cm),
        ("Depth", depth_cm),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(StorefrontError::validation(format!("{field} must not be negative")));
            }
        }
    }
    Ok(())
}

/// Customer email: non-blank, at most 255 characters, with non-empty
/// parts around a single `@`.
pub fn validate_customer_email(email: &str) -> StorefrontResult<()> {
    if email.trim().is_empty() {
        return Err(StorefrontError::validation("Email must not be blank"));
    }
    if email.chars().count() > 255 {
        return Err(StorefrontError::validation("Email must not exceed 255 characters"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(StorefrontError::validation("Email is invalid")),
    }
}

/// Cart item quantity must be at least 1.
pub fn validate_quantity(quantity: u32) -> StorefrontResult<()> {
    if quantity == 0 {
        return Err(StorefrontError::validation("Quantity must be at least 1"));
    }
    Ok(())
}
