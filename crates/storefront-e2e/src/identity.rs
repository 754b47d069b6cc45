// Throwaway customer identity
//
// One random token drives every free-form profile field of the account the
// suite registers. Credentials are plain concatenations of the fixture
// template and the token, nothing else.

use crate::fixtures::CredentialTemplate;
use rand::Rng;

/// Length of the token used by the customer flow.
pub const DEFAULT_TOKEN_LENGTH: usize = 8;

const TOKEN_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Returns a random string of `length` lowercase ASCII letters and digits.
pub fn random_token(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

/// The account registered by the first scenario and reused by the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    token: String,
    email: String,
    password: String,
}

impl Identity {
    /// Derives credentials from an existing token.
    pub fn derive(token: impl Into<String>, template: &CredentialTemplate) -> Self {
        let token = token.into();
        let email = format!("{}{}{}", template.email_start, token, template.email_end);
        let password = format!("{}{}", template.pass_word, token);
        Self {
            token,
            email,
            password,
        }
    }

    /// Generates a fresh token and derives credentials from it.
    pub fn generate(length: usize, template: &CredentialTemplate) -> Self {
        Self::derive(random_token(length), template)
    }

    /// Random token; also used as first name, last name, street, city and state.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Label of the profile menu once logged in ("<first> <last>").
    pub fn display_name(&self) -> String {
        format!("{} {}", self.token, self.token)
    }
}
