//! Checkout: totals and the payment redirect.

#![allow(clippy::print_stdout)]

use cartwheel_core::AddressId;
use cartwheel_storefront::{CheckoutSummary, Storefront};

use super::{CliError, CmdResult, money, print_json};

pub async fn run(
    storefront: &Storefront,
    address: Option<String>,
    summary_only: bool,
    json: bool,
) -> CmdResult {
    let summary = storefront.checkout_summary().await;
    if summary_only {
        return print_summary(&summary, json);
    }

    let address_id = match address {
        Some(id) => AddressId::new(id),
        None => default_address(storefront).await?,
    };
    let url = storefront.checkout(&address_id).await?;

    if json {
        return print_json(&serde_json::json!({ "summary": summary, "url": url }));
    }
    print_summary(&summary, false)?;
    println!("\nComplete payment at:\n{url}");
    Ok(())
}

async fn default_address(storefront: &Storefront) -> Result<AddressId, CliError> {
    let addresses = storefront.fetch_addresses().await?;
    addresses
        .iter()
        .find(|address| address.is_default())
        .or_else(|| addresses.first())
        .map(|address| address.id.clone())
        .ok_or_else(|| {
            CliError::Usage("No saved address; add one with `sf address add`".to_string())
        })
}

fn print_summary(summary: &CheckoutSummary, json: bool) -> CmdResult {
    if json {
        return print_json(summary);
    }
    println!("Subtotal:  {:>12}", money(summary.subtotal, summary.currency));
    println!(
        "Delivery:  {:>12}",
        money(summary.delivery_charge, summary.currency)
    );
    println!("Total:     {:>12}", summary.total_price());
    Ok(())
}
