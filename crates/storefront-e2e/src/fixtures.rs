// Fixture data - static reference values for the customer flow
//
// The fixture file is JSON with camelCase keys. Every key is required: a
// missing or mistyped entry fails the whole run at load time instead of
// surfacing later as a confusing locator timeout.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Everything the scenarios read but never write.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    /// Landing page every scenario starts from
    pub test_url: String,
    /// Placeholder used before an identity exists
    pub blank_data: String,
    pub shared_data: CredentialTemplate,
    pub register_details: RegisterDetails,
    pub list_of_item: Catalogue,
    pub payment_method: PaymentMethods,
    pub sort: SortOrders,
    pub languages: Languages,
    pub german_keywords: Vec<String>,
    pub spanish_keywords: Vec<String>,
    pub subject: String,
    pub test_message: String,
    pub file: Attachment,
}

/// Pieces wrapped around the random token to build credentials.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialTemplate {
    pub email_start: String,
    pub email_end: String,
    pub pass_word: String,
}

/// Profile fields that are not derived from the random token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDetails {
    pub date_of_birth: String,
    pub postal_code: String,
    pub phone_number: String,
    /// Option value of the country `<select>`
    pub country: String,
}

/// Product names exactly as the storefront renders them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalogue {
    pub combination_pliers: String,
    pub bolt_cutters: String,
    pub thor_hammer: String,
    pub sheet_sander: String,
    pub circular_saw: String,
    pub tool_cabinet: String,
    pub sledge_hammer: String,
    pub court_hammer: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethods {
    pub cash_on_delivery: String,
}

/// Option values of the sort dropdown.
#[derive(Debug, Clone, Deserialize)]
pub struct SortOrders {
    pub ascending: String,
    pub descending: String,
}

/// Language codes offered by the language switcher.
#[derive(Debug, Clone, Deserialize)]
pub struct Languages {
    pub german: String,
    pub spanish: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    /// Relative paths are resolved against the fixture file's directory
    pub path: PathBuf,
}

impl Fixtures {
    /// Loads fixtures from a JSON file.
    ///
    /// A relative attachment path is rewritten to be relative to the fixture
    /// file, so the suite does not depend on the working directory cargo
    /// happens to run it from.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::FixtureIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut fixtures = Self::parse(&raw).map_err(|source| Error::FixtureParse {
            path: path.to_path_buf(),
            source,
        })?;

        if fixtures.file.path.is_relative() {
            if let Some(dir) = path.parent() {
                fixtures.file.path = dir.join(&fixtures.file.path);
            }
        }

        tracing::debug!("Loaded fixtures from {}", path.display());
        Ok(fixtures)
    }

    /// Parses fixtures from a JSON string without touching the filesystem.
    pub fn parse(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "testUrl": "https://shop.test/",
        "blankData": "",
        "sharedData": { "emailStart": "testuser_", "emailEnd": "@example.com", "passWord": "Pa55!" },
        "registerDetails": { "dateOfBirth": "1990-01-01", "postalCode": "1234", "phoneNumber": "0612345678", "country": "NL" },
        "listOfItem": {
            "combinationPliers": "Combination Pliers", "boltCutters": "Bolt Cutters",
            "thorHammer": "Thor Hammer", "sheetSander": "Sheet Sander",
            "circularSaw": "Circular Saw", "toolCabinet": "Tool Cabinet",
            "sledgeHammer": "Sledgehammer", "courtHammer": "Court Hammer"
        },
        "paymentMethod": { "cashOnDelivery": "cash-on-delivery" },
        "sort": { "ascending": "name,asc", "descending": "name,desc" },
        "languages": { "german": "DE", "spanish": "ES" },
        "germanKeywords": ["Sortieren"],
        "spanishKeywords": ["Ordenar"],
        "subject": "customer-service",
        "testMessage": "Hello",
        "file": { "path": "attachments/note.txt" }
    }"#;

    #[test]
    fn test_parse_reads_camel_case_keys() {
        let fixtures = Fixtures::parse(SAMPLE).expect("sample should parse");
        assert_eq!(fixtures.test_url, "https://shop.test/");
        assert_eq!(fixtures.shared_data.pass_word, "Pa55!");
        assert_eq!(fixtures.list_of_item.sledge_hammer, "Sledgehammer");
        assert_eq!(fixtures.payment_method.cash_on_delivery, "cash-on-delivery");
        assert_eq!(fixtures.german_keywords, vec!["Sortieren".to_string()]);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let without_sort = SAMPLE.replace(
            r#""sort": { "ascending": "name,asc", "descending": "name,desc" },"#,
            "",
        );
        let err = Fixtures::parse(&without_sort).expect_err("missing key must fail");
        assert!(err.to_string().contains("sort"), "{}", err);
    }

    #[test]
    fn test_load_resolves_attachment_next_to_fixture_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("customer_flow.json");
        let mut file = std::fs::File::create(&path).expect("create fixture");
        file.write_all(SAMPLE.as_bytes()).expect("write fixture");

        let fixtures = Fixtures::load(&path).expect("load fixture");
        assert_eq!(fixtures.file.path, dir.path().join("attachments/note.txt"));
    }

    #[test]
    fn test_load_reports_path_on_io_error() {
        let err = Fixtures::load("/definitely/not/here.json").expect_err("should fail");
        assert!(matches!(err, Error::FixtureIo { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
