//! Subscription screens: package tiers and the two payment paths (hosted
//! checkout redirect, payment-element intent forwarding).

use anyhow::Result;
use shared::{CheckoutPayload, CheckoutSession, FinalizePayload, Package, PaymentInfo, PaymentOutcome};

use crate::term;
use crate::validate::{validate_required, Validator};

use super::{cell, Ctx};

pub const PACKAGES_ENDPOINT: &str = "/packages";

/// Packages are public; prospective HR managers browse them before signup.
pub async fn packages(ctx: &Ctx) -> Result<()> {
    match ctx.api.get::<Vec<Package>>(PACKAGES_ENDPOINT).await {
        Ok(packages) => {
            if packages.is_empty() {
                term::empty_state("packages", "Check back later for available tiers.");
                return Ok(());
            }
            println!(
                "\x1b[1m{} {} {}\x1b[0m",
                cell("PACKAGE", 12),
                cell("PRICE", 8),
                cell("EMPLOYEES", 10),
            );
            for package in &packages {
                println!(
                    "{} {} {}",
                    cell(&package.name, 12),
                    cell(&format!("${:.2}", package.price), 8),
                    cell(&format!("up to {}", package.employee_limit), 10),
                );
                for feature in &package.features {
                    println!("\x1b[90m    - {}\x1b[0m", feature);
                }
            }
        }
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

/// Start the hosted checkout. The server answers with a URL the user opens
/// in a browser; the redirect back carries the session id for `finalize`.
pub async fn checkout(ctx: &Ctx, package_name: String) -> Result<()> {
    let mut validator = Validator::new();
    validator.check("package", validate_required(&package_name, "Package name"));
    if let Err(errors) = validator.finish() {
        term::show_field_errors(&errors);
        return Ok(());
    }

    let payload = CheckoutPayload { package_name };
    match ctx
        .secure
        .post::<CheckoutSession, _>("/payments/create-checkout-session", &payload)
        .await
    {
        Ok(session) => {
            println!();
            println!("\x1b[1;36m🔐 To pay, open this URL in your browser:\x1b[0m");
            println!();
            println!("   \x1b[4m{}\x1b[0m", session.url);
            println!();
            term::notice(
                "After paying you are redirected to payment/success?session_id=...;",
            );
            term::notice("finish with: assetverse subscribe finalize --session-id <id>");
        }
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

/// Finalize a completed checkout: post the session id from the redirect
/// route. A replayed redirect reports `already_processed` and still counts.
pub async fn finalize(ctx: &Ctx, session_id: String) -> Result<()> {
    let mut validator = Validator::new();
    validator.check("session-id", validate_required(&session_id, "Session id"));
    if let Err(errors) = validator.finish() {
        term::show_field_errors(&errors);
        return Ok(());
    }

    let payload = FinalizePayload { session_id };
    match ctx
        .secure
        .post::<PaymentOutcome, _>("/payments/payment-success", &payload)
        .await
    {
        Ok(outcome) if outcome.is_success() => {
            term::success("Payment successful, your package has been upgraded!");
            // the identity carries the package fields; refresh it
            ctx.session.check_user().await;
        }
        Ok(_) => {
            term::failure("Could not verify the payment.");
            term::notice("Run 'assetverse packages' to try again.");
        }
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

/// Payment-element path: the widget confirmed client-side and produced an
/// intent id; forward it with the chosen package for server verification.
pub async fn confirm_intent(ctx: &Ctx, payment_intent: String, package_name: String) -> Result<()> {
    let mut validator = Validator::new();
    validator
        .check("payment-intent", validate_required(&payment_intent, "Payment intent"))
        .check("package", validate_required(&package_name, "Package name"));
    if let Err(errors) = validator.finish() {
        term::show_field_errors(&errors);
        return Ok(());
    }

    // resolve the tier so the payload carries the limit being purchased
    let packages: Vec<Package> = match ctx.api.get(PACKAGES_ENDPOINT).await {
        Ok(packages) => packages,
        Err(err) => {
            term::report_api_error(&err);
            return Ok(());
        }
    };
    let Some(package) = packages.iter().find(|p| p.name.eq_ignore_ascii_case(&package_name)) else {
        term::failure(&format!("Unknown package '{package_name}'."));
        term::notice("Run 'assetverse packages' to list available tiers.");
        return Ok(());
    };

    let payload = PaymentInfo {
        payment_intent_id: payment_intent,
        package_name: package.name.clone(),
        employee_limit: package.employee_limit,
    };
    match ctx
        .secure
        .post::<serde_json::Value, _>("/payments", &payload)
        .await
    {
        Ok(_) => {
            term::success(&format!("Upgraded to the {} package!", package.name));
            ctx.session.check_user().await;
        }
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}
