//! Display helpers for account addresses

/// Shorten an address to `0x1234...abcd` for display
///
/// Addresses too short to shorten are returned unchanged.
///
/// # Examples
///
/// ```
/// use neighbortip_domain::truncate_address;
///
/// assert_eq!(
///     truncate_address("0x71C7656EC7ab88b098defB751B7401B5f6d8976F"),
///     "0x71C7...976F"
/// );
/// ```
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
