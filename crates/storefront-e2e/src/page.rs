// Customer flow page object
//
// Named locators for every element the customer journeys touch, plus the
// few multi-step actions (login, registration, contact form, search) that
// scenarios share. Locator accessors are pure: they build a Selector and
// never talk to the browser. Actions go through the Driver and propagate
// its failures unchanged.

use crate::driver::Driver;
use crate::error::Result;
use crate::selector::{AriaRole, Selector};
use std::path::PathBuf;

/// Data typed into the registration form.
///
/// No client-side validation is done; the storefront decides what it
/// accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    /// Date of birth in the form's expected format (YYYY-MM-DD)
    pub dob: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    /// Option value of the country dropdown
    pub country: String,
}

/// Data submitted through the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Option value of the subject dropdown
    pub subject: String,
    pub message: String,
    pub attachment: PathBuf,
}

/// Page object for the storefront's customer-facing pages.
#[derive(Debug)]
pub struct CustomerFlowPage<D> {
    driver: D,
}

impl<D: Driver> CustomerFlowPage<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn home(&self) -> Selector {
        Selector::role(AriaRole::Link, "Home")
    }

    pub fn categories(&self) -> Selector {
        Selector::role_matching(AriaRole::Button, "Categories", false)
    }

    pub fn contact(&self) -> Selector {
        Selector::role(AriaRole::Link, "Contact")
    }

    pub fn sign_in_link(&self) -> Selector {
        Selector::role(AriaRole::Link, "Sign in")
    }

    /// Account dropdown, labelled with the customer's full name.
    pub fn profile_menu(&self, display_name: &str) -> Selector {
        Selector::role(AriaRole::Button, display_name)
    }

    pub fn cart_icon(&self) -> Selector {
        Selector::role(AriaRole::Link, "cart")
    }

    pub fn language_button(&self) -> Selector {
        Selector::css("#language")
    }

    /// Entry of the language dropdown for a language code such as `DE`.
    pub fn language_option(&self, language: &str) -> Selector {
        Selector::css(format!(
            "a[data-test=\"lang-{}\"]",
            language.to_lowercase()
        ))
    }

    pub fn hand_tools_link(&self) -> Selector {
        Selector::role(AriaRole::Link, "Hand Tools")
    }

    pub fn next_button(&self) -> Selector {
        Selector::role(AriaRole::Button, "Next")
    }

    // ------------------------------------------------------------------
    // Login and registration
    // ------------------------------------------------------------------

    pub fn login_button(&self) -> Selector {
        Selector::role(AriaRole::Button, "Login")
    }

    pub fn register_link(&self) -> Selector {
        Selector::role(AriaRole::Link, "Register your account")
    }

    pub fn register_button(&self) -> Selector {
        Selector::role(AriaRole::Button, "Register")
    }

    pub fn first_name_field(&self) -> Selector {
        Selector::css("#first_name")
    }

    pub fn last_name_field(&self) -> Selector {
        Selector::css("#last_name")
    }

    pub fn date_of_birth_field(&self) -> Selector {
        Selector::css("#dob")
    }

    pub fn street_field(&self) -> Selector {
        Selector::css("#street")
    }

    pub fn postal_code_field(&self) -> Selector {
        Selector::css("#postal_code")
    }

    pub fn city_field(&self) -> Selector {
        Selector::css("#city")
    }

    pub fn state_field(&self) -> Selector {
        Selector::css("#state")
    }

    pub fn country_dropdown(&self) -> Selector {
        Selector::css("#country")
    }

    pub fn phone_field(&self) -> Selector {
        Selector::css("#phone")
    }

    pub fn email_field(&self) -> Selector {
        Selector::css("#email")
    }

    pub fn password_field(&self) -> Selector {
        Selector::css("#password")
    }

    // ------------------------------------------------------------------
    // Account overview
    // ------------------------------------------------------------------

    pub fn favorites_tab(&self) -> Selector {
        Selector::css("app-overview a[href*='favorite']")
    }

    pub fn profile_tab(&self) -> Selector {
        Selector::css("app-overview a[href*='profile']")
    }

    pub fn invoices_tab(&self) -> Selector {
        Selector::css("app-overview a[href*='invoices']")
    }

    pub fn messages_tab(&self) -> Selector {
        Selector::css("app-overview a[href*='messages']")
    }

    pub fn my_favorites_link(&self) -> Selector {
        Selector::role(AriaRole::Link, "My favorites")
    }

    pub fn product_name_in_favorites(&self, product: &str) -> Selector {
        Selector::role(AriaRole::Heading, product)
    }

    pub fn my_invoices_link(&self) -> Selector {
        Selector::role(AriaRole::Link, "My invoices")
    }

    /// Invoice number cell of the most recent invoice.
    pub fn invoice_number_in_profile(&self) -> Selector {
        Selector::css("table td:first-of-type").first()
    }

    // ------------------------------------------------------------------
    // Catalogue, product and cart
    // ------------------------------------------------------------------

    pub fn search_field(&self) -> Selector {
        Selector::css("input#search-query")
    }

    pub fn search_button(&self) -> Selector {
        Selector::role(AriaRole::Button, "Search")
    }

    /// Product card image for an item in the listing.
    pub fn item_display(&self, item_name: &str) -> Selector {
        Selector::css(format!("a.card img[alt='{}']", item_name))
    }

    pub fn sort_dropdown(&self) -> Selector {
        Selector::role_matching(AriaRole::Combobox, "sort", true)
    }

    pub fn hammer_checkbox(&self) -> Selector {
        Selector::label("Hammer")
    }

    /// Price shown next to a product in the listing.
    pub fn product_price_text(&self) -> Selector {
        Selector::css("[data-test=\"product-price\"]")
    }

    pub fn add_favorite_button(&self) -> Selector {
        Selector::role(AriaRole::Button, "Add to favourites")
    }

    pub fn add_to_cart_button(&self) -> Selector {
        Selector::role(AriaRole::Button, "Add to cart")
    }

    pub fn product_title_in_cart(&self) -> Selector {
        Selector::css(".product-title")
    }

    /// Price shown on the cart page.
    pub fn product_price(&self) -> Selector {
        Selector::css("span[data-test='product-price']")
    }

    pub fn page_titles(&self) -> Selector {
        Selector::css("h2, h3, h4")
    }

    /// Headings whose text contains `text`, ignoring case.
    pub fn heading_containing(&self, text: &str) -> Selector {
        Selector::role(AriaRole::Heading, text)
    }

    // ------------------------------------------------------------------
    // Checkout
    // ------------------------------------------------------------------

    pub fn proceed_to_checkout_button(&self) -> Selector {
        Selector::role_matching(AriaRole::Button, "Proceed to checkout", true)
    }

    pub fn confirm_button(&self) -> Selector {
        Selector::role(AriaRole::Button, "Confirm")
    }

    pub fn payment_method_field(&self) -> Selector {
        Selector::css("#payment-method")
    }

    pub fn payment_successful_text(&self) -> Selector {
        Selector::css(".help-block")
    }

    pub fn order_confirmation_text(&self) -> Selector {
        Selector::css("#order-confirmation")
    }

    // ------------------------------------------------------------------
    // Contact
    // ------------------------------------------------------------------

    pub fn subject_dropdown(&self) -> Selector {
        Selector::css("select[data-test=\"subject\"]")
    }

    pub fn message_text_area(&self) -> Selector {
        Selector::css("#message")
    }

    pub fn upload_file_field(&self) -> Selector {
        Selector::css("#attachment")
    }

    pub fn send_button(&self) -> Selector {
        Selector::role(AriaRole::Button, "Send")
    }

    pub fn contact_success_alert(&self) -> Selector {
        Selector::css(".alert-success")
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Fills `selector` with `value` unless it already holds exactly that.
    pub async fn set_input_value(&self, selector: &Selector, value: &str) -> Result<()> {
        let current = self.driver.input_value(selector).await?;
        if current != value {
            self.driver.fill(selector, value).await?;
        }
        Ok(())
    }

    pub async fn click_element(&self, selector: &Selector) -> Result<()> {
        self.driver.click(selector).await
    }

    /// Opens the sign-in form and submits the credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        tracing::info!("Logging in as {}", email);
        self.driver.click(&self.sign_in_link()).await?;

        self.driver.fill(&self.email_field(), email).await?;
        self.driver.fill(&self.password_field(), password).await?;

        self.driver.click(&self.login_button()).await
    }

    /// Opens the registration form, fills every field and submits it.
    pub async fn register_customer(&self, data: &Registration) -> Result<()> {
        tracing::info!("Registering customer {}", data.email);
        self.driver.click(&self.sign_in_link()).await?;
        self.driver.click(&self.register_link()).await?;

        let fields = [
            (self.first_name_field(), &data.first_name),
            (self.last_name_field(), &data.last_name),
            (self.date_of_birth_field(), &data.dob),
            (self.street_field(), &data.street),
            (self.postal_code_field(), &data.postal_code),
            (self.city_field(), &data.city),
            (self.state_field(), &data.state),
            (self.phone_field(), &data.phone),
            (self.email_field(), &data.email),
            (self.password_field(), &data.password),
        ];
        for (field, value) in &fields {
            self.driver.fill(field, value).await?;
        }
        self.driver
            .select_option(&self.country_dropdown(), &data.country)
            .await?;

        self.driver.click(&self.register_button()).await
    }

    /// Opens the contact page, fills the form, attaches the file and sends it.
    pub async fn fill_up_contact_form(&self, data: &ContactMessage) -> Result<()> {
        tracing::info!("Sending contact form as {}", data.email);
        self.driver.click(&self.contact()).await?;

        let fields = [
            (self.first_name_field(), &data.first_name),
            (self.last_name_field(), &data.last_name),
            (self.email_field(), &data.email),
            (self.message_text_area(), &data.message),
        ];
        for (field, value) in &fields {
            self.driver.fill(field, value).await?;
        }
        self.driver
            .select_option(&self.subject_dropdown(), &data.subject)
            .await?;
        self.driver
            .set_input_files(&self.upload_file_field(), &data.attachment)
            .await?;

        self.driver.click(&self.send_button()).await
    }

    /// Searches the catalogue, typing the term only if it is not already there.
    pub async fn search_item(&self, item_name: &str) -> Result<()> {
        tracing::info!("Searching for '{}'", item_name);
        self.set_input_value(&self.search_field(), item_name).await?;
        self.driver.click(&self.search_button()).await
    }

    /// Whether the listing has a further page to advance to.
    pub async fn has_next_page(&self) -> Result<bool> {
        let next = self.next_button();
        Ok(self.driver.is_visible(&next).await? && self.driver.is_enabled(&next).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::Path;

    // Locator accessors never touch the driver.
    struct Unreachable;

    #[async_trait]
    impl Driver for Unreachable {
        async fn goto(&self, _: &str) -> Result<()> {
            unreachable!()
        }
        async fn click(&self, _: &Selector) -> Result<()> {
            unreachable!()
        }
        async fn fill(&self, _: &Selector, _: &str) -> Result<()> {
            unreachable!()
        }
        async fn input_value(&self, _: &Selector) -> Result<String> {
            unreachable!()
        }
        async fn select_option(&self, _: &Selector, _: &str) -> Result<()> {
            unreachable!()
        }
        async fn set_input_files(&self, _: &Selector, _: &Path) -> Result<()> {
            unreachable!()
        }
        async fn is_visible(&self, _: &Selector) -> Result<bool> {
            unreachable!()
        }
        async fn is_enabled(&self, _: &Selector) -> Result<bool> {
            unreachable!()
        }
        async fn text_content(&self, _: &Selector) -> Result<Option<String>> {
            unreachable!()
        }
        async fn inner_text(&self, _: &Selector) -> Result<String> {
            unreachable!()
        }
        async fn count(&self, _: &Selector) -> Result<usize> {
            unreachable!()
        }
        async fn expect_visible(&self, _: &Selector) -> Result<()> {
            unreachable!()
        }
        async fn expect_hidden(&self, _: &Selector) -> Result<()> {
            unreachable!()
        }
        async fn expect_text(&self, _: &Selector, _: &str) -> Result<()> {
            unreachable!()
        }
        async fn close(&self) -> Result<()> {
            unreachable!()
        }
    }

    fn page() -> CustomerFlowPage<Unreachable> {
        CustomerFlowPage::new(Unreachable)
    }

    #[test]
    fn test_parameterized_locators_interpolate_verbatim() {
        let page = page();
        assert_eq!(
            page.item_display("Bolt Cutters").to_playwright(),
            "a.card img[alt='Bolt Cutters']"
        );
        assert_eq!(
            page.profile_menu("ab12cd34 ab12cd34").to_playwright(),
            r#"internal:role=button[name="ab12cd34 ab12cd34"i]"#
        );
        assert_eq!(
            page.product_name_in_favorites("Combination Pliers")
                .to_playwright(),
            r#"internal:role=heading[name="Combination Pliers"i]"#
        );
    }

    #[test]
    fn test_language_option_lowercases_code() {
        assert_eq!(
            page().language_option("DE").to_playwright(),
            r#"a[data-test="lang-de"]"#
        );
    }

    #[test]
    fn test_accessors_are_stable_between_calls() {
        let page = page();
        assert_eq!(page.search_field(), page.search_field());
        assert_eq!(
            page.invoice_number_in_profile().to_playwright(),
            "table td:first-of-type >> nth=0"
        );
        assert_eq!(
            page.sort_dropdown().to_playwright(),
            "internal:role=combobox[name=/sort/i]"
        );
        assert_eq!(
            page.hammer_checkbox().to_playwright(),
            r#"internal:label="Hammer"i"#
        );
    }
}
