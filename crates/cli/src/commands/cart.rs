//! Cart commands. The cart lives in local storage between runs.

#![allow(clippy::print_stdout)]

use cartwheel_core::ProductId;
use cartwheel_storefront::Storefront;
use cartwheel_storefront::state::{CartState, QtyChange};
use clap::Subcommand;

use super::{CmdResult, money, print_json};

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart
    Show,
    /// Add a product
    Add {
        /// Product id
        id: u64,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove { id: u64 },
    /// Increase a line's quantity by one
    Inc { id: u64 },
    /// Decrease a line's quantity by one (never below one)
    Dec { id: u64 },
    /// Empty the cart
    Clear,
}

pub async fn run(storefront: &Storefront, action: CartAction, json: bool) -> CmdResult {
    let cart = match action {
        CartAction::Show => storefront.cart().await,
        CartAction::Add { id, quantity } => {
            let product = storefront.fetch_product(ProductId::new(id)).await?;
            let cart = storefront.add_to_cart(&product, quantity).await?;
            if !json {
                println!("Added {quantity} x {}", product.title);
            }
            cart
        }
        CartAction::Remove { id } => storefront.remove_from_cart(ProductId::new(id)).await?,
        CartAction::Inc { id } => {
            storefront
                .toggle_cart_qty(ProductId::new(id), QtyChange::Inc)
                .await?
        }
        CartAction::Dec { id } => {
            storefront
                .toggle_cart_qty(ProductId::new(id), QtyChange::Dec)
                .await?
        }
        CartAction::Clear => storefront.clear_cart().await?,
    };
    show(storefront, &cart, json)
}

fn show(storefront: &Storefront, cart: &CartState, json: bool) -> CmdResult {
    if json {
        return print_json(cart);
    }
    if cart.is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }
    let currency = storefront.config().currency;
    for line in &cart.carts {
        println!(
            "{:>5}  {:<36} {:>3} x {:>10} = {:>11}",
            line.id.get(),
            line.title,
            line.quantity,
            money(line.unit_price(), currency),
            money(line.total_price, currency)
        );
    }
    println!(
        "\n{} item(s), {} unit(s), total {}",
        cart.items_count,
        cart.total_units(),
        money(cart.total_amount, currency)
    );
    Ok(())
}
