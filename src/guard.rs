//! Route gating over session state.

use crate::models::{Role, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToLogin,
    RedirectToHome,
}

impl Access {
    /// Where to send the user, if anywhere.
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            Access::Granted => None,
            Access::RedirectToLogin => Some("/login"),
            Access::RedirectToHome => Some("/"),
        }
    }
}

/// Decide whether a gated page may render.
///
/// No token means login. A role list excludes users whose role is known and
/// not listed; a user record without a role is let through.
pub fn evaluate(session: Option<&Session>, roles: Option<&[Role]>) -> Access {
    let Some(session) = session.filter(|s| s.has_token()) else {
        return Access::RedirectToLogin;
    };

    match (roles, session.user.role) {
        (Some(allowed), Some(role)) if !allowed.contains(&role) => Access::RedirectToHome,
        _ => Access::Granted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn session_with(role: Option<Role>) -> Session {
        Session {
            token: "tok".into(),
            user: User {
                role,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_no_session_redirects_to_login() {
        assert_eq!(evaluate(None, None), Access::RedirectToLogin);
        assert_eq!(evaluate(None, Some(&[Role::Admin])), Access::RedirectToLogin);
    }

    #[test]
    fn test_empty_token_redirects_to_login() {
        let session = Session::default();
        assert_eq!(evaluate(Some(&session), None), Access::RedirectToLogin);
    }

    #[test]
    fn test_token_without_roles_granted() {
        let session = session_with(Some(Role::User));
        assert_eq!(evaluate(Some(&session), None), Access::Granted);
    }

    #[test]
    fn test_excluded_role_redirects_home() {
        let session = session_with(Some(Role::User));
        let access = evaluate(Some(&session), Some(&[Role::Admin]));
        assert_eq!(access, Access::RedirectToHome);
        assert_eq!(access.redirect_path(), Some("/"));
    }

    #[test]
    fn test_listed_role_granted() {
        let session = session_with(Some(Role::Admin));
        assert_eq!(evaluate(Some(&session), Some(&[Role::Admin])), Access::Granted);
    }

    #[test]
    fn test_missing_role_granted() {
        let session = session_with(None);
        assert_eq!(evaluate(Some(&session), Some(&[Role::Admin])), Access::Granted);
    }
}
