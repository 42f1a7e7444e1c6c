/// Shared-secret gate for the scheduled scan trigger.
///
/// Fails closed: an empty configured secret denies every caller. Comparison
/// is plain equality; this is an operational secret, not a cryptographic
/// credential.
#[derive(Clone)]
pub struct AuthGate {
    secret: String,
}

impl AuthGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// Checks an `Authorization` header against the exact `Bearer <secret>`
    /// form.
    pub fn authorize_header(&self, header: Option<&str>) -> bool {
        if self.secret.is_empty() {
            return false;
        }
        header == Some(format!("Bearer {}", self.secret).as_str())
    }

    /// Checks the bare secret, as passed by the manual `GET /scan?secret=`
    /// alias.
    pub fn authorize_query(&self, secret: Option<&str>) -> bool {
        if self.secret.is_empty() {
            return false;
        }
        secret == Some(self.secret.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_configured_secret_denies_everything() {
        let gate = AuthGate::new("");
        assert!(!gate.authorize_header(Some("Bearer ")));
        assert!(!gate.authorize_header(Some("Bearer secret")));
        assert!(!gate.authorize_header(None));
        assert!(!gate.authorize_query(Some("")));
        assert!(!gate.authorize_query(None));
    }

    #[test]
    fn header_must_match_bearer_form_exactly() {
        let gate = AuthGate::new("s3cret");
        assert!(gate.authorize_header(Some("Bearer s3cret")));
        assert!(!gate.authorize_header(Some("s3cret")));
        assert!(!gate.authorize_header(Some("bearer s3cret")));
        assert!(!gate.authorize_header(Some("Bearer other")));
        assert!(!gate.authorize_header(None));
    }

    #[test]
    fn query_compares_the_bare_secret() {
        let gate = AuthGate::new("s3cret");
        assert!(gate.authorize_query(Some("s3cret")));
        assert!(!gate.authorize_query(Some("Bearer s3cret")));
        assert!(!gate.authorize_query(None));
    }
}
