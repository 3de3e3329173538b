//! Profile commands.

#![allow(clippy::print_stdout)]

use cartwheel_core::{Email, NotificationPreferences, ProfileUpdate};
use cartwheel_storefront::{Storefront, StorefrontError};
use clap::Subcommand;

use super::{CliError, CmdResult, print_json};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Change name and/or email
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change password
    Password {
        #[arg(long, env = "SF_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long, env = "SF_NEW_PASSWORD", hide_env_values = true)]
        new: String,
    },
    /// Choose which emails to receive
    Notifications {
        #[arg(long)]
        order_updates: bool,
        #[arg(long)]
        promotions: bool,
        #[arg(long)]
        newsletter: bool,
    },
    /// Delete the account
    Delete {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(storefront: &Storefront, action: ProfileAction, json: bool) -> CmdResult {
    match action {
        ProfileAction::Update { name, email } => {
            let email = email
                .as_deref()
                .map(Email::parse)
                .transpose()
                .map_err(StorefrontError::from)?;
            let update = ProfileUpdate {
                full_name: name,
                email,
            };
            let user = storefront.update_profile(&update).await?;
            if json {
                return print_json(&user);
            }
            println!("Profile updated: {} <{}>", user.full_name, user.email);
            Ok(())
        }
        ProfileAction::Password { current, new } => {
            storefront.change_password(&current, &new).await?;
            println!("Password changed");
            Ok(())
        }
        ProfileAction::Notifications {
            order_updates,
            promotions,
            newsletter,
        } => {
            let saved = storefront
                .update_notification_preferences(NotificationPreferences {
                    order_updates,
                    promotions,
                    newsletter,
                })
                .await?;
            if json {
                return print_json(&saved);
            }
            println!(
                "Order updates: {}, promotions: {}, newsletter: {}",
                on_off(saved.order_updates),
                on_off(saved.promotions),
                on_off(saved.newsletter)
            );
            Ok(())
        }
        ProfileAction::Delete { yes } => {
            if !yes {
                return Err(CliError::Usage(
                    "Refusing to delete the account without --yes".to_string(),
                ));
            }
            storefront.delete_account().await?;
            println!("Account deleted");
            Ok(())
        }
    }
}

const fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
