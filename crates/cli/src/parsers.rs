/// Parse a positive `usize` (>= 1) from CLI input.
///
/// # Errors
/// Returns an error if the input string is not a valid number or is less than 1.
pub fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value = s
        .parse::<usize>()
        .map_err(|err| format!("invalid number '{s}': {err}"))?;
    if value < 1 {
        return Err("value must be at least 1".to_string());
    }
    Ok(value)
}
