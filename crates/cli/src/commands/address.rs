//! Delivery address commands.

#![allow(clippy::print_stdout)]

use cartwheel_core::{AddressId, AddressInput, DEFAULT_COUNTRY};
use cartwheel_storefront::Storefront;
use clap::{Args, Subcommand};

use super::{CmdResult, print_json};

#[derive(Subcommand)]
pub enum AddressAction {
    /// List saved addresses
    List,
    /// Save a new address
    Add(NewAddress),
    /// Make an address the default
    Default { id: String },
}

#[derive(Args)]
pub struct NewAddress {
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    line1: String,
    #[arg(long, default_value = "")]
    line2: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    postal_code: String,
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    country: String,
    /// Use this address by default
    #[arg(long)]
    default: bool,
}

impl From<NewAddress> for AddressInput {
    fn from(args: NewAddress) -> Self {
        Self {
            full_name: args.full_name,
            phone_number: args.phone,
            address_line1: args.line1,
            address_line2: args.line2,
            city: args.city,
            state: args.state,
            postal_code: args.postal_code,
            country: args.country,
            is_default: args.default,
        }
    }
}

pub async fn run(storefront: &Storefront, action: AddressAction, json: bool) -> CmdResult {
    match action {
        AddressAction::List => {
            let addresses = storefront.fetch_addresses().await?;
            if json {
                return print_json(&addresses);
            }
            if addresses.is_empty() {
                println!("No saved addresses");
            }
            for address in &addresses {
                let marker = if address.is_default() { "*" } else { " " };
                println!("{marker} {:<26} {}", address.id.as_str(), address.one_line());
            }
            Ok(())
        }
        AddressAction::Add(args) => {
            let address = storefront.add_address(&AddressInput::from(args)).await?;
            if json {
                return print_json(&address);
            }
            println!("Saved address {}", address.id);
            Ok(())
        }
        AddressAction::Default { id } => {
            storefront.set_default_address(&AddressId::new(id)).await?;
            println!("Default address updated");
            Ok(())
        }
    }
}
