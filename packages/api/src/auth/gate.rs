use super::RequestContext;

/// Why a request was refused access to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denied {
    NotAuthenticated,
    WrongUser,
}

impl Denied {
    /// Flash shown after redirecting a refused request.
    pub fn message(self) -> &'static str {
        match self {
            Denied::NotAuthenticated => "Please login first!",
            Denied::WrongUser => "Wrong user",
        }
    }
}

/// Decide whether `identity` may act on a resource owned by `owner`.
///
/// `owner = None` admits any authenticated identity.
pub fn authorize(identity: Option<&str>, owner: Option<&str>) -> Result<(), Denied> {
    match (identity, owner) {
        (None, _) => Err(Denied::NotAuthenticated),
        (Some(_), None) => Ok(()),
        (Some(identity), Some(owner)) if identity == owner => Ok(()),
        (Some(_), Some(_)) => Err(Denied::WrongUser),
    }
}

impl RequestContext {
    pub fn authorize(&self, owner: Option<&str>) -> Result<(), Denied> {
        authorize(self.username(), owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_is_never_allowed() {
        assert_eq!(authorize(None, None), Err(Denied::NotAuthenticated));
        assert_eq!(authorize(None, Some("alice")), Err(Denied::NotAuthenticated));
    }

    #[test]
    fn test_owner_match() {
        assert_eq!(authorize(Some("alice"), Some("alice")), Ok(()));
        assert_eq!(authorize(Some("bob"), Some("alice")), Err(Denied::WrongUser));
        // Usernames compare exactly.
        assert_eq!(authorize(Some("Alice"), Some("alice")), Err(Denied::WrongUser));
    }

    #[test]
    fn test_any_authenticated_user() {
        let ctx = RequestContext::signed_in("bob");
        assert_eq!(ctx.authorize(None), Ok(()));
        assert_eq!(
            RequestContext::anonymous().authorize(None),
            Err(Denied::NotAuthenticated)
        );
    }

    #[test]
    fn test_denial_messages() {
        assert_eq!(Denied::NotAuthenticated.message(), "Please login first!");
        assert_eq!(Denied::WrongUser.message(), "Wrong user");
    }
}
