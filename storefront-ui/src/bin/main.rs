//! Headless storefront driver.
//!
//! Runs the page controllers against a live backend with an in-memory page,
//! printing what the browser would have shown and where it would have gone.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::{style, Emoji};
use std::process::ExitCode;
use std::rc::Rc;
use storefront_ui::{
    CartButton, CartOutcome, CheckoutForm, Element, HttpApiClient, ManualScheduler,
    MemoryBrowser, MemoryElement, OtpSendForm, OtpVerifyForm, RecordingNotifier, Storefront,
    StorefrontConfig, SubmitOutcome,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static SUCCESS: Emoji<'_, '_> = Emoji("✓", "√");
static FAILURE: Emoji<'_, '_> = Emoji("✗", "x");
static ARROW: Emoji<'_, '_> = Emoji("→", "->");

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Drive storefront actions against a backend.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about)]
struct Cli {
    /// Configuration file (defaults to config/storefront.toml + config/local.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Backend base URL (overrides api.base_url)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// CSRF token to present as the CSRF cookie
    #[arg(long, global = true)]
    csrf_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add one unit of a product to the cart
    AddToCart {
        /// Product identifier (empty behaves like a demo product)
        product_id: String,
    },
    /// Place a guest order
    Checkout {
        /// Contact email
        #[arg(long)]
        email: Option<String>,
        /// Contact phone
        #[arg(long)]
        phone: Option<String>,
        /// Street address
        #[arg(long)]
        address: Option<String>,
        /// City
        #[arg(long)]
        city: Option<String>,
        /// Postal code
        #[arg(long)]
        zip: Option<String>,
    },
    /// Request an OTP for a mobile number (without country code)
    SendOtp {
        /// Mobile number as typed on the login page
        mobile: String,
    },
    /// Verify an OTP for a mobile number (without country code)
    VerifyOtp {
        /// Mobile number as carried in the verification page URL
        mobile: String,
        /// Code received by SMS
        otp: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_ui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => StorefrontConfig::load_from(path),
        None => StorefrontConfig::load(),
    };
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        StorefrontConfig::default()
    });

    let base_url = cli
        .base_url
        .clone()
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let api = HttpApiClient::new(&base_url, &config.api.csrf_header)
        .with_context(|| format!("Invalid backend URL: {base_url}"))?;

    let browser = Rc::new(MemoryBrowser::new());
    if let Some(token) = &cli.csrf_token {
        browser.set_cookies(&format!("{}={token}", config.api.csrf_cookie));
    }
    let notifier = Rc::new(RecordingNotifier::new());
    let storefront = Rc::new(
        Storefront::new(
            config,
            Rc::new(api),
            browser.clone(),
            Rc::new(ManualScheduler::new()),
        )
        .with_notifier(notifier.clone()),
    );

    tracing::info!(base_url = %base_url, "Running {:?}", cli.command);

    let ok = match cli.command {
        Command::AddToCart { product_id } => {
            add_to_cart(&storefront, &product_id, &notifier).await
        }
        Command::Checkout {
            email,
            phone,
            address,
            city,
            zip,
        } => {
            let form = form(&[
                ("email", email),
                ("phone", phone),
                ("address", address),
                ("city", city),
                ("zip", zip),
            ]);
            let (button, error) = controls("Place Order");
            let outcome = CheckoutForm::new(Rc::clone(&storefront), form, button, Some(error.clone()))
                .submit()
                .await;
            report_submit(&outcome, &error)
        }
        Command::SendOtp { mobile } => {
            let input = MemoryElement::new("input").with_value(&mobile);
            let (button, error) = controls("Continue");
            let outcome = OtpSendForm::new(Rc::clone(&storefront), input, button, Some(error.clone()))
                .submit()
                .await;
            report_submit(&outcome, &error)
        }
        Command::VerifyOtp { mobile, otp } => {
            let param = &storefront.config().auth.mobile_param;
            browser.set_search(&storefront_ui::browser::with_query("", param, &mobile));
            let input = MemoryElement::new("input").with_value(&otp);
            let (button, error) = controls("Verify & Login");
            let outcome =
                OtpVerifyForm::new(Rc::clone(&storefront), input, button, Some(error.clone()))
                    .submit()
                    .await;
            report_submit(&outcome, &error)
        }
    };

    if let Some(location) = browser.last_navigation() {
        println!("{ARROW} {}", style(location).cyan());
    }

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn add_to_cart(
    storefront: &Rc<Storefront>,
    product_id: &str,
    notifier: &RecordingNotifier,
) -> bool {
    let button = MemoryElement::new("button")
        .with_attribute("data-product-id", product_id)
        .with_html("Add");
    let counter = MemoryElement::new("span").with_html("0");
    let outcome = CartButton::new(Rc::clone(storefront), button, Some(counter))
        .add_to_cart()
        .await;

    for notification in notifier.notifications() {
        let icon = if notification.severity.is_error() {
            FAILURE
        } else {
            SUCCESS
        };
        println!("{icon} {}", notification.message);
    }

    match outcome {
        CartOutcome::Added { .. } => {
            println!("{SUCCESS} {}", style("Added to cart").green().bold());
            true
        }
        other => {
            println!("{FAILURE} {}", style(format!("{other:?}")).red());
            false
        }
    }
}

fn form(fields: &[(&str, Option<String>)]) -> MemoryElement {
    let form = MemoryElement::new("form");
    for (name, value) in fields {
        if let Some(value) = value {
            form.append(
                &MemoryElement::new("input")
                    .with_attribute("name", name)
                    .with_value(value),
            );
        }
    }
    form
}

fn controls(label: &str) -> (MemoryElement, MemoryElement) {
    (
        MemoryElement::new("button").with_html(label),
        MemoryElement::new("div"),
    )
}

fn report_submit(outcome: &SubmitOutcome, error: &MemoryElement) -> bool {
    match outcome {
        SubmitOutcome::Redirected { .. } => {
            println!("{SUCCESS} {}", style("Accepted").green().bold());
            true
        }
        SubmitOutcome::Busy => false,
        SubmitOutcome::Precondition { .. }
        | SubmitOutcome::Rejected { .. }
        | SubmitOutcome::NetworkError => {
            println!("{FAILURE} {}", style(error.text_content()).red());
            false
        }
    }
}
