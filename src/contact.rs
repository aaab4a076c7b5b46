//! Contact submission entity and field sanitization.
//!
//! A submission is built from an already-validated request body, sanitized
//! so its values are safe to embed in an HTML email, and then discarded
//! after one outgoing message has been built from it.

/// A validated, sanitized contact-form submission.
///
/// All fields are non-empty, trimmed, and HTML-escaped (`email` is
/// normalized instead of escaped). Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    /// Sender's name.
    pub nombre: String,
    /// Sender's email address, normalized.
    pub email: String,
    /// Sender's phone number.
    pub telefono: String,
    /// Message text.
    pub mensaje: String,
}

impl ContactSubmission {
    /// Build a submission from raw field values.
    ///
    /// Trims surrounding whitespace, escapes HTML-significant characters in
    /// the free-text fields, and normalizes the email address. Callers must
    /// have validated presence and email syntax beforehand.
    pub fn from_parts(nombre: &str, email: &str, telefono: &str, mensaje: &str) -> Self {
        Self {
            nombre: escape_html(nombre.trim()),
            email: normalize_email(email),
            telefono: escape_html(telefono.trim()),
            mensaje: escape_html(mensaje.trim()),
        }
    }
}

/// Escape characters meaningful in HTML markup.
///
/// Covers `&`, `<`, `>`, quotes, slashes, and backtick so a value can be
/// embedded in an HTML email body without becoming live markup.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Normalize an email address to canonical form.
///
/// Lowercases the whole address. For Gmail addresses additionally removes
/// dots and any `+suffix` from the local part and canonicalizes
/// `googlemail.com` to `gmail.com`, since those variants all deliver to the
/// same mailbox.
pub fn normalize_email(value: &str) -> String {
    let trimmed = value.trim();
    let Some((local, domain)) = trimmed.rsplit_once('@') else {
        return trimmed.to_lowercase();
    };

    let local = local.to_lowercase();
    let domain = domain.to_lowercase();

    if domain == "gmail.com" || domain == "googlemail.com" {
        let local = match local.split_once('+') {
            Some((base, _)) => base.to_string(),
            None => local,
        };
        let local: String = local.chars().filter(|c| *c != '.').collect();
        return format!("{local}@gmail.com");
    }

    format!("{local}@{domain}")
}
