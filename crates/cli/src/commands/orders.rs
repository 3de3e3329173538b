//! Order history commands.

#![allow(clippy::print_stdout)]

use cartwheel_core::{Order, OrderFilter, OrderId};
use cartwheel_storefront::Storefront;
use clap::Subcommand;

use super::{CmdResult, money, print_json};

#[derive(Subcommand)]
pub enum OrdersAction {
    /// List your orders
    List {
        /// all, pending, processing, shipped, delivered or cancelled
        #[arg(long, default_value = "all")]
        status: OrderFilter,
    },
    /// Show one order
    Show { id: String },
    /// Cancel a pending or processing order
    Cancel { id: String },
}

pub async fn run(storefront: &Storefront, action: OrdersAction, json: bool) -> CmdResult {
    match action {
        OrdersAction::List { status } => {
            storefront.fetch_user_orders().await?;
            let state = storefront.state().await;
            let orders: Vec<&Order> = state.orders.filtered(status).collect();
            if json {
                return print_json(&orders);
            }
            if orders.is_empty() {
                println!("No orders found");
            }
            for order in orders {
                println!(
                    "{:<16} {:<11} {:>3} item(s) {:>12}",
                    order.order_id.as_str(),
                    order.status.as_str(),
                    order.item_count(),
                    money(order.total_amount, storefront.config().currency)
                );
            }
            Ok(())
        }
        OrdersAction::Show { id } => {
            let order = storefront.fetch_order_details(&OrderId::new(id)).await?;
            show(storefront, &order, json)
        }
        OrdersAction::Cancel { id } => {
            let order = storefront.cancel_order(&OrderId::new(id)).await?;
            if json {
                return print_json(&order);
            }
            println!("Order {} is now {}", order.order_id, order.status);
            Ok(())
        }
    }
}

fn show(storefront: &Storefront, order: &Order, json: bool) -> CmdResult {
    if json {
        return print_json(order);
    }
    let currency = storefront.config().currency;
    println!("Order {} ({})", order.order_id, order.status);
    if let Some(placed) = order.created_at {
        println!("Placed {}", placed.format("%Y-%m-%d %H:%M UTC"));
    }
    for item in &order.items {
        println!(
            "  {:<36} {:>3} x {:>10} = {:>11}",
            item.name,
            item.quantity,
            money(item.price, currency),
            money(item.line_total(), currency)
        );
    }
    println!("Subtotal: {}", money(order.subtotal(), currency));
    println!("Delivery: {}", money(order.delivery_charge, currency));
    println!("Total:    {}", money(order.total_amount, currency));
    if let Some(address) = &order.shipping_address {
        println!(
            "Ship to:  {}, {}, {} {}",
            address.full_name, address.address_line1, address.city, address.postal_code
        );
    }
    if order.status.is_cancellable() {
        println!("\nCancel with `sf orders cancel {}`", order.order_id);
    }
    Ok(())
}
