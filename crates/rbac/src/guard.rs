//! Guard - turns authorization decisions into errors for a calling transport
//!
//! Directives name permissions in enum style (`MOD_STORY`, `RbacQuery`); the
//! guard converts the name to kebab case before asking the [`Authorizer`].

use crate::api::Authorizer;
use regex::Regex;
use shared::{Caller, RbacError, Result};
use std::sync::LazyLock;
use tracing::{debug, warn};

static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));
static ACRONYM_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid regex"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_\-]+").expect("valid regex"));

/// Kebab-case form of a directive's permission name.
///
/// `MOD_STORY` -> `mod-story`, `RbacQuery` -> `rbac-query`,
/// `HTTPServer` -> `http-server`. Kebab-case input is returned unchanged.
pub fn directive_permission(name: &str) -> String {
    let name = LOWER_UPPER.replace_all(name, "${1}-${2}");
    let name = ACRONYM_WORD.replace_all(&name, "${1}-${2}");
    let name = SEPARATORS.replace_all(&name, "-");
    name.trim_matches('-').to_lowercase()
}

#[derive(Debug, Clone)]
pub struct Guard<A> {
    authorizer: A,
}

impl<A: Authorizer> Guard<A> {
    pub fn new(authorizer: A) -> Self {
        Self { authorizer }
    }

    pub fn authorizer(&self) -> &A {
        &self.authorizer
    }

    /// `Ok(())` if any of the caller's roles holds the directive's permission.
    pub fn authorize(&self, caller: &Caller, directive: &str) -> Result<()> {
        let permission = directive_permission(directive);
        if self.authorizer.check(&caller.roles, &permission) {
            debug!(user = %caller.user, %permission, "Access granted");
            return Ok(());
        }
        Err(denied(caller, permission))
    }

    /// Domain-scoped `authorize`. The domain value is used verbatim; only the
    /// directive name is converted.
    pub fn authorize_domain(
        &self,
        caller: &Caller,
        domain: Option<&str>,
        directive: &str,
    ) -> Result<()> {
        let permission = directive_permission(directive);
        if self
            .authorizer
            .check_domain(&caller.roles, domain, &permission)
        {
            debug!(user = %caller.user, ?domain, %permission, "Access granted");
            return Ok(());
        }
        let permission = match domain {
            Some(domain) => crate::checker::domain_permission(domain, &permission),
            None => permission,
        };
        Err(denied(caller, permission))
    }
}

fn denied(caller: &Caller, permission: String) -> RbacError {
    warn!(
        user = %caller.user,
        roles = ?caller.roles,
        %permission,
        "Access denied"
    );
    RbacError::AccessDenied {
        user: caller.user.clone(),
        permission,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RoleStore;
    use crate::RoleMutation;
    use std::cell::RefCell;

    /// Records every permission it is asked about and grants a fixed one.
    struct Recorder {
        grant: &'static str,
        asked: RefCell<Vec<String>>,
    }

    impl Authorizer for Recorder {
        fn check<R: AsRef<str>>(&self, _roles: &[R], permission: &str) -> bool {
            self.asked.borrow_mut().push(permission.to_string());
            permission == self.grant
        }
    }

    fn recorder(grant: &'static str) -> Recorder {
        Recorder {
            grant,
            asked: RefCell::new(Vec::new()),
        }
    }

    mod names {
        use super::*;

        #[test]
        fn test_screaming_snake() {
            assert_eq!(directive_permission("MOD_STORY"), "mod-story");
            assert_eq!(directive_permission("RBAC_QUERY"), "rbac-query");
        }

        #[test]
        fn test_camel_and_pascal() {
            assert_eq!(directive_permission("RbacQuery"), "rbac-query");
            assert_eq!(directive_permission("modStory"), "mod-story");
            assert_eq!(directive_permission("HTTPServer"), "http-server");
        }

        #[test]
        fn test_kebab_unchanged() {
            assert_eq!(directive_permission("add-text"), "add-text");
            assert_eq!(directive_permission("edit-photo"), "edit-photo");
        }

        #[test]
        fn test_separators_collapse() {
            assert_eq!(directive_permission("_del  photo_"), "del-photo");
        }
    }

    #[test]
    fn test_authorize_converts_directive() {
        let guard = Guard::new(recorder("mod-story"));
        let caller = Caller::new("alice", vec!["editor".to_string()]);

        guard.authorize(&caller, "MOD_STORY").unwrap();
        assert_eq!(*guard.authorizer().asked.borrow(), vec!["mod-story"]);
    }

    #[test]
    fn test_authorize_denied() {
        let guard = Guard::new(recorder("mod-story"));
        let caller = Caller::new("bob", vec!["editor".to_string()]);

        let err = guard.authorize(&caller, "DEL_STORY").unwrap_err();
        assert_eq!(err.kind(), shared::ErrorKind::AccessDenied);
        assert!(matches!(
            err,
            RbacError::AccessDenied { ref user, ref permission }
                if user == "bob" && permission == "del-story"
        ));
    }

    #[test]
    fn test_domain_value_kept_verbatim() {
        let guard = Guard::new(recorder("newspaperA-mod-story"));
        let caller = Caller::new("carol", vec!["editor".to_string()]);

        guard
            .authorize_domain(&caller, Some("newspaperA"), "ModStory")
            .unwrap();
        assert_eq!(*guard.authorizer().asked.borrow(), vec!["newspaperA-mod-story"]);
    }

    #[test]
    fn test_domain_denial_names_compound_permission() {
        let guard = Guard::new(recorder("newspaperA-mod-story"));
        let caller = Caller::new("dave", vec!["editor".to_string()]);

        let err = guard
            .authorize_domain(&caller, Some("newspaperB"), "MOD_STORY")
            .unwrap_err();
        assert!(matches!(
            err,
            RbacError::AccessDenied { ref permission, .. } if permission == "newspaperB-mod-story"
        ));
    }

    #[test]
    fn test_missing_domain_denied_without_asking() {
        let guard = Guard::new(recorder("mod-story"));
        let caller = Caller::new("erin", vec!["editor".to_string()]);

        assert!(guard.authorize_domain(&caller, None, "MOD_STORY").is_err());
        assert!(guard.authorizer().asked.borrow().is_empty());
    }

    #[test]
    fn test_anonymous_always_denied() {
        let store = RoleStore::empty();
        store.upsert_role("guest", &["read"], &[] as &[&str]).unwrap();
        let guard = Guard::new(&store);

        let err = guard.authorize(&Caller::anonymous(), "READ").unwrap_err();
        assert_eq!(err.kind(), shared::ErrorKind::AccessDenied);
        guard
            .authorize(&Caller::new("frank", vec!["guest".to_string()]), "READ")
            .unwrap();
    }

    #[test]
    fn test_guard_over_store_with_domains() {
        let store = std::sync::Arc::new(RoleStore::empty());
        store
            .upsert_role("reporter", &["newspaperA-mod-story"], &[] as &[&str])
            .unwrap();
        store.upsert_role("editor", &["publish"], &["reporter"]).unwrap();
        let guard = Guard::new(store.clone());
        let caller = Caller::new("gina", vec!["editor".to_string()]);

        guard
            .authorize_domain(&caller, Some("newspaperA"), "MOD_STORY")
            .unwrap();
        guard.authorize(&caller, "Publish").unwrap();
        assert!(guard.authorize(&caller, "MOD_STORY").is_err());
    }
}
