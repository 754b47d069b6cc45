// Customer flow scenarios
//
// Ten journeys that run in declared order against one storefront. The
// first registers a throwaway account; the rest log in with it or browse
// anonymously. Every scenario starts from the landing page on a fresh
// browser context, so nothing carries over except what the storefront
// itself remembers about the account.

use crate::context::SuiteContext;
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::identity::{DEFAULT_TOKEN_LENGTH, Identity};
use crate::page::{ContactMessage, CustomerFlowPage, Registration};
use serde::Serialize;

/// Clicks on "Proceed to checkout" needed to reach the payment step
/// (cart, sign-in, billing address).
pub const CHECKOUT_STEPS: usize = 3;

/// Upper bound on category pages visited before giving up.
pub const MAX_CATEGORY_PAGES: usize = 20;

/// One named journey of the customer flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    RegisterNewCustomer,
    LogInAsCustomer,
    AddItemToFavorites,
    AddItemToCart,
    CheckoutItem,
    VerifyCategoryFeature,
    VerifySortingFeature,
    VerifyFilterFeature,
    VerifyLanguage,
    VerifyContactFeature,
}

impl Scenario {
    /// Declared order of the serial group.
    pub const SERIAL_ORDER: [Scenario; 10] = [
        Scenario::RegisterNewCustomer,
        Scenario::LogInAsCustomer,
        Scenario::AddItemToFavorites,
        Scenario::AddItemToCart,
        Scenario::CheckoutItem,
        Scenario::VerifyCategoryFeature,
        Scenario::VerifySortingFeature,
        Scenario::VerifyFilterFeature,
        Scenario::VerifyLanguage,
        Scenario::VerifyContactFeature,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Scenario::RegisterNewCustomer => "Register as a new Customer",
            Scenario::LogInAsCustomer => "Log in as Customer",
            Scenario::AddItemToFavorites => "Add an item to the Favorite tab",
            Scenario::AddItemToCart => "Add an item to the Cart",
            Scenario::CheckoutItem => "Checkout an item to the Cart",
            Scenario::VerifyCategoryFeature => "Verify Category Feature",
            Scenario::VerifySortingFeature => "Verify Sorting Feature",
            Scenario::VerifyFilterFeature => "Verify Filter Feature",
            Scenario::VerifyLanguage => "Verify Language",
            Scenario::VerifyContactFeature => "Verify Contact Feature",
        }
    }

    /// Whether the scenario needs the account created by registration.
    pub fn requires_identity(&self) -> bool {
        matches!(
            self,
            Scenario::LogInAsCustomer
                | Scenario::AddItemToFavorites
                | Scenario::AddItemToCart
                | Scenario::CheckoutItem
                | Scenario::VerifyContactFeature
        )
    }

    pub async fn run<D: Driver>(
        self,
        page: &CustomerFlowPage<D>,
        ctx: &mut SuiteContext,
    ) -> Result<()> {
        match self {
            Scenario::RegisterNewCustomer => register_new_customer(page, ctx).await,
            Scenario::LogInAsCustomer => log_in_as_customer(page, ctx).await,
            Scenario::AddItemToFavorites => add_item_to_favorites(page, ctx).await,
            Scenario::AddItemToCart => add_item_to_cart(page, ctx).await,
            Scenario::CheckoutItem => checkout_item(page, ctx).await,
            Scenario::VerifyCategoryFeature => verify_category_feature(page, ctx).await,
            Scenario::VerifySortingFeature => verify_sorting_feature(page, ctx).await,
            Scenario::VerifyFilterFeature => verify_filter_feature(page, ctx).await,
            Scenario::VerifyLanguage => verify_language(page, ctx).await,
            Scenario::VerifyContactFeature => verify_contact_feature(page, ctx).await,
        }
    }
}

/// Generates a fresh identity, registers it and stores it in the context.
pub async fn register_new_customer<D: Driver>(
    page: &CustomerFlowPage<D>,
    ctx: &mut SuiteContext,
) -> Result<()> {
    let identity = Identity::generate(DEFAULT_TOKEN_LENGTH, &ctx.fixtures().shared_data);
    register_identity(page, ctx, identity).await
}

/// Registers a given identity. Split out so a known token can be replayed.
pub async fn register_identity<D: Driver>(
    page: &CustomerFlowPage<D>,
    ctx: &mut SuiteContext,
    identity: Identity,
) -> Result<()> {
    let details = &ctx.fixtures().register_details;
    let token = identity.token().to_string();
    let registration = Registration {
        first_name: token.clone(),
        last_name: token.clone(),
        dob: details.date_of_birth.clone(),
        street: token.clone(),
        postal_code: details.postal_code.clone(),
        city: token.clone(),
        state: token,
        phone: details.phone_number.clone(),
        email: identity.email().to_string(),
        password: identity.password().to_string(),
        country: details.country.clone(),
    };

    page.goto(ctx.base_url()).await?;
    page.register_customer(&registration).await?;

    ctx.register_identity(identity);
    Ok(())
}

pub async fn log_in_as_customer<D: Driver>(
    page: &CustomerFlowPage<D>,
    ctx: &SuiteContext,
) -> Result<()> {
    let identity = ctx.identity()?;
    page.goto(ctx.base_url()).await?;
    page.login(identity.email(), identity.password()).await
}

pub async fn add_item_to_favorites<D: Driver>(
    page: &CustomerFlowPage<D>,
    ctx: &SuiteContext,
) -> Result<()> {
    let identity = ctx.identity()?;
    let item = &ctx.fixtures().list_of_item.combination_pliers;
    let driver = page.driver();

    page.goto(ctx.base_url()).await?;
    page.login(identity.email(), identity.password()).await?;
    page.click_element(&page.home()).await?;

    open_search_result(page, item).await?;
    page.click_element(&page.add_favorite_button()).await?;

    page.click_element(&page.profile_menu(&identity.display_name()))
        .await?;
    page.click_element(&page.my_favorites_link()).await?;

    driver
        .expect_visible(&page.product_name_in_favorites(item))
        .await
}

pub async fn add_item_to_cart<D: Driver>(
    page: &CustomerFlowPage<D>,
    ctx: &SuiteContext,
) -> Result<()> {
    let identity = ctx.identity()?;
    let item = &ctx.fixtures().list_of_item.bolt_cutters;
    let driver = page.driver();

    page.goto(ctx.base_url()).await?;
    page.login(identity.email(), identity.password()).await?;
    page.click_element(&page.home()).await?;

    page.search_item(item).await?;
    let listing = page.item_display(item);
    driver.expect_visible(&listing).await?;
    let price_at_listing = driver.text_content(&page.product_price_text()).await?;

    page.click_element(&listing).await?;
    page.click_element(&page.add_to_cart_button()).await?;
    page.click_element(&page.cart_icon()).await?;

    driver
        .expect_text(&page.product_title_in_cart(), item)
        .await?;
    let price_at_cart = driver.text_content(&page.product_price()).await?;

    // Compared as rendered text: currency symbol and formatting must match too.
    match (price_at_listing, price_at_cart) {
        (Some(listing), Some(cart)) if !listing.trim().is_empty() && listing == cart => Ok(()),
        (listing, cart) => Err(Error::Assertion(format!(
            "price of '{}' differs or is missing between listing and cart: listing {:?}, cart {:?}",
            item, listing, cart
        ))),
    }
}

pub async fn checkout_item<D: Driver>(page: &CustomerFlowPage<D>, ctx: &SuiteContext) -> Result<()> {
    let identity = ctx.identity()?;
    let fixtures = ctx.fixtures();
    let item = &fixtures.list_of_item.thor_hammer;
    let driver = page.driver();

    page.goto(ctx.base_url()).await?;
    page.login(identity.email(), identity.password()).await?;
    page.click_element(&page.home()).await?;

    open_search_result(page, item).await?;
    page.click_element(&page.add_to_cart_button()).await?;
    page.click_element(&page.cart_icon()).await?;
    driver
        .expect_text(&page.product_title_in_cart(), item)
        .await?;

    // The wizard exposes no step indicator, so the step count is assumed.
    for step in 1..=CHECKOUT_STEPS {
        tracing::debug!("Proceeding to checkout step {}/{}", step, CHECKOUT_STEPS);
        page.click_element(&page.proceed_to_checkout_button())
            .await?;
    }

    driver
        .select_option(
            &page.payment_method_field(),
            &fixtures.payment_method.cash_on_delivery,
        )
        .await?;
    page.click_element(&page.confirm_button()).await?;
    driver.expect_visible(&page.payment_successful_text()).await?;

    // Second confirm dismisses the payment notice and places the order.
    page.click_element(&page.confirm_button()).await?;
    let confirmation = driver
        .text_content(&page.order_confirmation_text())
        .await?
        .unwrap_or_default();

    page.click_element(&page.profile_menu(&identity.display_name()))
        .await?;
    page.click_element(&page.my_invoices_link()).await?;
    let invoice_number = driver
        .text_content(&page.invoice_number_in_profile())
        .await?
        .unwrap_or_default();
    let invoice_number = invoice_number.trim();

    if invoice_number.is_empty() {
        return Err(Error::Assertion(
            "latest invoice has no invoice number".to_string(),
        ));
    }
    if !confirmation.contains(invoice_number) {
        return Err(Error::Assertion(format!(
            "order confirmation {:?} does not mention invoice {:?}",
            confirmation, invoice_number
        )));
    }
    tracing::info!("Order placed, invoice {}", invoice_number);
    Ok(())
}

pub async fn verify_category_feature<D: Driver>(
    page: &CustomerFlowPage<D>,
    ctx: &SuiteContext,
) -> Result<()> {
    let items = &ctx.fixtures().list_of_item;
    let power_tools = [items.sheet_sander.as_str(), items.circular_saw.as_str()];

    page.goto(ctx.base_url()).await?;
    page.click_element(&page.categories()).await?;
    page.click_element(&page.hand_tools_link()).await?;

    for page_number in 1..=MAX_CATEGORY_PAGES {
        expect_items_hidden(page, &power_tools).await?;

        if !page.has_next_page().await? {
            tracing::debug!("Hand Tools listing ends at page {}", page_number);
            return Ok(());
        }
        page.click_element(&page.next_button()).await?;
    }

    Err(Error::PaginationExhausted {
        pages: MAX_CATEGORY_PAGES,
    })
}

// Positions below assume the default page size of the listing: the first
// page only shows the head of the sorted catalogue.
pub async fn verify_sorting_feature<D: Driver>(
    page: &CustomerFlowPage<D>,
    ctx: &SuiteContext,
) -> Result<()> {
    let fixtures = ctx.fixtures();
    let items = &fixtures.list_of_item;
    let driver = page.driver();

    page.goto(ctx.base_url()).await?;

    driver
        .select_option(&page.sort_dropdown(), &fixtures.sort.ascending)
        .await?;
    expect_items_hidden(page, &[items.sheet_sander.as_str(), items.thor_hammer.as_str()]).await?;
    expect_items_visible(page, &[items.bolt_cutters.as_str(), items.circular_saw.as_str()]).await?;

    driver
        .select_option(&page.sort_dropdown(), &fixtures.sort.descending)
        .await?;
    expect_items_hidden(
        page,
        &[
            items.combination_pliers.as_str(),
            items.bolt_cutters.as_str(),
            items.circular_saw.as_str(),
        ],
    )
    .await?;
    expect_items_visible(page, &[items.thor_hammer.as_str(), items.tool_cabinet.as_str()]).await
}

pub async fn verify_filter_feature<D: Driver>(
    page: &CustomerFlowPage<D>,
    ctx: &SuiteContext,
) -> Result<()> {
    let items = &ctx.fixtures().list_of_item;

    page.goto(ctx.base_url()).await?;
    page.click_element(&page.hammer_checkbox()).await?;

    expect_items_hidden(
        page,
        &[
            items.sheet_sander.as_str(),
            items.combination_pliers.as_str(),
            items.bolt_cutters.as_str(),
            items.circular_saw.as_str(),
            items.tool_cabinet.as_str(),
        ],
    )
    .await?;
    expect_items_visible(
        page,
        &[items.thor_hammer.as_str(), items.sledge_hammer.as_str(), items.court_hammer.as_str()],
    )
    .await
}

pub async fn verify_language<D: Driver>(page: &CustomerFlowPage<D>, ctx: &SuiteContext) -> Result<()> {
    let fixtures = ctx.fixtures();

    page.goto(ctx.base_url()).await?;

    switch_language(page, &fixtures.languages.german).await?;
    expect_keywords_in_headings(page, &fixtures.german_keywords).await?;

    switch_language(page, &fixtures.languages.spanish).await?;
    expect_keywords_in_headings(page, &fixtures.spanish_keywords).await
}

pub async fn verify_contact_feature<D: Driver>(
    page: &CustomerFlowPage<D>,
    ctx: &SuiteContext,
) -> Result<()> {
    let identity = ctx.identity()?;
    let fixtures = ctx.fixtures();
    let message = ContactMessage {
        first_name: identity.token().to_string(),
        last_name: identity.token().to_string(),
        email: identity.email().to_string(),
        subject: fixtures.subject.clone(),
        message: fixtures.test_message.clone(),
        attachment: fixtures.file.path.clone(),
    };

    page.goto(ctx.base_url()).await?;
    page.click_element(&page.contact()).await?;
    page.fill_up_contact_form(&message).await?;

    page.driver()
        .expect_visible(&page.contact_success_alert())
        .await
}

/// Keywords (case-insensitive) that appear in none of the headings.
pub fn missing_keywords<'a>(headings: &[String], keywords: &'a [String]) -> Vec<&'a str> {
    let headings: Vec<String> = headings.iter().map(|h| h.to_lowercase()).collect();
    keywords
        .iter()
        .filter(|keyword| {
            let keyword = keyword.to_lowercase();
            !headings.iter().any(|heading| heading.contains(&keyword))
        })
        .map(String::as_str)
        .collect()
}

async fn open_search_result<D: Driver>(page: &CustomerFlowPage<D>, item: &str) -> Result<()> {
    page.search_item(item).await?;
    let result = page.item_display(item);
    page.driver().expect_visible(&result).await?;
    page.click_element(&result).await
}

async fn expect_items_visible<D: Driver>(page: &CustomerFlowPage<D>, items: &[&str]) -> Result<()> {
    for item in items {
        page.driver().expect_visible(&page.item_display(item)).await?;
    }
    Ok(())
}

async fn expect_items_hidden<D: Driver>(page: &CustomerFlowPage<D>, items: &[&str]) -> Result<()> {
    for item in items {
        page.driver().expect_hidden(&page.item_display(item)).await?;
    }
    Ok(())
}

async fn switch_language<D: Driver>(page: &CustomerFlowPage<D>, language: &str) -> Result<()> {
    tracing::info!("Switching language to {}", language);
    page.click_element(&page.language_button()).await?;
    page.click_element(&page.language_option(language)).await
}

async fn expect_keywords_in_headings<D: Driver>(
    page: &CustomerFlowPage<D>,
    keywords: &[String],
) -> Result<()> {
    // Headings re-render after the switch; wait for a translated one first.
    if let Some(first) = keywords.first() {
        page.driver()
            .expect_visible(&page.heading_containing(first).first())
            .await?;
    }

    let titles = page.page_titles();
    let count = page.driver().count(&titles).await?;

    let mut headings = Vec::with_capacity(count);
    for index in 0..count {
        headings.push(page.driver().inner_text(&titles.clone().nth(index)).await?);
    }

    let missing = missing_keywords(&headings, keywords);
    if !missing.is_empty() {
        return Err(Error::Assertion(format!(
            "keywords {:?} not found in any of {} headings {:?}",
            missing, count, headings
        )));
    }
    Ok(())
}
