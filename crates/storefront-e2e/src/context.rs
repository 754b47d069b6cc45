// Suite context - state shared by the serial scenario group
//
// Scenario 1 writes the identity, every later scenario only reads it. The
// context is passed explicitly so that dependency shows up in signatures:
// `&mut SuiteContext` for the writer, `&SuiteContext` for readers.

use crate::error::{Error, Result};
use crate::fixtures::Fixtures;
use crate::identity::Identity;

/// Fixtures, target URL and the identity registered during this run.
#[derive(Debug, Clone)]
pub struct SuiteContext {
    fixtures: Fixtures,
    base_url: String,
    identity: Option<Identity>,
}

impl SuiteContext {
    /// Creates a context targeting the fixture's `testUrl`.
    pub fn new(fixtures: Fixtures) -> Self {
        let base_url = fixtures.test_url.clone();
        Self {
            fixtures,
            base_url,
            identity: None,
        }
    }

    /// Points the suite at a different deployment of the storefront.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The registered identity.
    ///
    /// Fails with [`Error::IdentityNotRegistered`] until
    /// [`register_identity`](Self::register_identity) has run.
    pub fn identity(&self) -> Result<&Identity> {
        self.identity.as_ref().ok_or(Error::IdentityNotRegistered)
    }

    /// Records the identity created by the registration scenario.
    pub fn register_identity(&mut self, identity: Identity) -> &Identity {
        if let Some(previous) = &self.identity {
            tracing::warn!(
                "Replacing registered identity {} with {}",
                previous.email(),
                identity.email()
            );
        }
        self.identity.insert(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::CredentialTemplate;

    fn fixtures() -> Fixtures {
        Fixtures::parse(include_str!("../fixtures/customer_flow.json"))
            .expect("bundled fixtures should parse")
    }

    fn template() -> CredentialTemplate {
        fixtures().shared_data
    }

    #[test]
    fn test_identity_unavailable_before_registration() {
        let ctx = SuiteContext::new(fixtures());
        assert!(matches!(ctx.identity(), Err(Error::IdentityNotRegistered)));
    }

    #[test]
    fn test_register_then_read() {
        let mut ctx = SuiteContext::new(fixtures());
        ctx.register_identity(Identity::derive("ab12cd34", &template()));
        let identity = ctx.identity().expect("identity registered");
        assert_eq!(identity.token(), "ab12cd34");
    }

    #[test]
    fn test_base_url_defaults_to_fixture_and_can_be_overridden() {
        let ctx = SuiteContext::new(fixtures());
        assert_eq!(ctx.base_url(), ctx.fixtures().test_url);

        let ctx = ctx.with_base_url("http://127.0.0.1:4200");
        assert_eq!(ctx.base_url(), "http://127.0.0.1:4200");
    }
}
