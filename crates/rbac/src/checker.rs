//! Permission checks against a role document

use crate::document::Document;
use crate::hierarchy;

/// Joins a domain value and a base permission into one permission name.
pub const DOMAIN_SEPARATOR: char = '-';

/// The compound name of a domain-scoped permission: `"<domain>-<permission>"`.
pub fn domain_permission(domain: &str, permission: &str) -> String {
    format!("{}{}{}", domain, DOMAIN_SEPARATOR, permission)
}

/// True iff at least one of `roles` holds `permission`, directly or inherited.
///
/// A permission missing from the document's permission list never matches.
pub fn check<R: AsRef<str>>(doc: &Document, roles: &[R], permission: &str) -> bool {
    if !doc.has_permission(permission) {
        return false;
    }
    roles
        .iter()
        .any(|role| hierarchy::grants(doc, role.as_ref(), permission))
}

/// `check` on the domain-scoped name. Without a domain nothing is granted.
pub fn check_domain<R: AsRef<str>>(
    doc: &Document,
    roles: &[R],
    domain: Option<&str>,
    permission: &str,
) -> bool {
    match domain {
        Some(domain) => check(doc, roles, &domain_permission(domain, permission)),
        None => false,
    }
}
