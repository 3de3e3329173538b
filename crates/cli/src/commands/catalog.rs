//! Browsing commands.

#![allow(clippy::print_stdout)]

use cartwheel_core::{Product, ProductId};
use cartwheel_storefront::Storefront;

use super::{CmdResult, money, print_json};

pub async fn categories(storefront: &Storefront, json: bool) -> CmdResult {
    let categories = storefront.fetch_categories().await?;
    if json {
        return print_json(&categories);
    }
    for category in &categories {
        println!("{:<28} {}", category.slug, category.name);
    }
    Ok(())
}

pub async fn category(storefront: &Storefront, slug: &str, json: bool) -> CmdResult {
    let products = storefront.fetch_products_of_category(slug).await?;
    list(storefront, &products, json)
}

pub async fn products(storefront: &Storefront, limit: u32, skip: u32, json: bool) -> CmdResult {
    let page = storefront.fetch_products(limit, skip).await?;
    if json {
        return print_json(&page);
    }
    list(storefront, &page.products, false)?;
    let shown = u64::from(skip) + page.products.len() as u64;
    println!("\n{shown} of {} products", page.total);
    Ok(())
}

pub async fn search(storefront: &Storefront, term: &str, json: bool) -> CmdResult {
    let products = storefront.search(term).await?;
    if !json && products.is_empty() {
        println!("No products match \"{}\"", term.trim());
        return Ok(());
    }
    list(storefront, &products, json)
}

pub async fn product(storefront: &Storefront, id: u64, json: bool) -> CmdResult {
    let product = storefront.fetch_product(ProductId::new(id)).await?;
    if json {
        return print_json(&product);
    }
    let currency = storefront.config().currency;
    println!("{} (#{})", product.title, product.id);
    if let Some(brand) = &product.brand {
        println!("Brand:    {brand}");
    }
    println!(
        "Price:    {} (was {}, {}% off)",
        money(product.discounted_price(), currency),
        money(product.price, currency),
        product.discount_percentage.round_dp(0)
    );
    match product.stock {
        Some(0) => println!("Stock:    out of stock"),
        Some(stock) => println!("Stock:    {stock}"),
        None => {}
    }
    if let Some(rating) = product.rating {
        println!("Rating:   {rating}");
    }
    if !product.description.is_empty() {
        println!("\n{}", product.description);
    }
    Ok(())
}

fn list(storefront: &Storefront, products: &[Product], json: bool) -> CmdResult {
    if json {
        return print_json(products);
    }
    let currency = storefront.config().currency;
    for product in products {
        println!(
            "{:>5}  {:<40} {:>12}",
            product.id.get(),
            product.title,
            money(product.discounted_price(), currency)
        );
    }
    Ok(())
}
