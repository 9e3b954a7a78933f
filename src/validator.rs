use tracing::info;

/// Returns `true` iff `email` is present and contains `@`.
///
/// This is a shape check, not an address validator: `"@"` passes and
/// `"abc.com"` fails. Lookups rely on exactly this rule.
pub fn is_valid_email(email: Option<&str>) -> bool {
    let valid = email.is_some_and(|e| e.contains('@'));
    info!(email = ?email, valid, "Validating email");
    valid
}
