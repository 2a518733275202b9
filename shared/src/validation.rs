//! Input validation functions
//!
//! Field-level checks for the measurement form. Each validator returns the
//! user-facing message on failure so callers can attach it to the field.

/// Largest value accepted for the inches field of an imperial height
pub const MAX_INCHES: u32 = 11;

fn validate_number(value: f64, label: &str) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err(format!("{} must be a valid number", label));
    }
    Ok(())
}

fn validate_whole(value: f64, label: &str) -> Result<u32, String> {
    validate_number(value, label)?;
    if value < 0.0 {
        return Err(format!("{} must be non-negative", label));
    }
    if value.fract() != 0.0 {
        return Err(format!("{} must be a whole number", label));
    }
    if value > u32::MAX as f64 {
        return Err(format!("{} is too large", label));
    }
    Ok(value as u32)
}

/// Validate a weight value (kg or lb)
pub fn validate_weight(weight: f64) -> Result<(), String> {
    validate_number(weight, "Weight")?;
    if weight <= 0.0 {
        return Err("Weight must be positive".to_string());
    }
    Ok(())
}

/// Validate a metric height value (meters)
pub fn validate_height_m(height_m: f64) -> Result<(), String> {
    validate_number(height_m, "Height")?;
    if height_m <= 0.0 {
        return Err("Height must be positive".to_string());
    }
    Ok(())
}

/// Validate the feet component of an imperial height
pub fn validate_feet(feet: f64) -> Result<u32, String> {
    validate_whole(feet, "Feet")
}

/// Validate the inches component of an imperial height (0-11)
pub fn validate_inches(inches: f64) -> Result<u32, String> {
    let inches = validate_whole(inches, "Inches")?;
    if inches > MAX_INCHES {
        return Err("Inches must be < 12".to_string());
    }
    Ok(inches)
}

/// Validate a combined imperial height and return it in inches
pub fn validate_total_inches(feet: u32, inches: u32) -> Result<u32, String> {
    let total = feet
        .checked_mul(12)
        .and_then(|f| f.checked_add(inches))
        .ok_or_else(|| "Height is too large".to_string())?;
    if total == 0 {
        return Err("Total height must be positive".to_string());
    }
    Ok(total)
}
