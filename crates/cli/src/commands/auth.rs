//! Session commands.

#![allow(clippy::print_stdout)]

use cartwheel_core::{SocialProvider, User};
use cartwheel_storefront::Storefront;
use clap::Subcommand;

use super::{CmdResult, print_json};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "SF_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Signup {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "SF_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Register and receive a verification email
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "SF_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, env = "SF_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm_password: String,
    },
    /// Confirm an email address
    Verify { token: String },
    /// Print the URL that starts a social login
    Social {
        /// google, microsoft or apple
        provider: SocialProvider,
    },
    /// Finish a social login from the redirect URL
    Callback { url: String },
    /// Check the session and show the signed-in user
    Whoami,
    /// Sign out
    Logout,
}

pub async fn run(storefront: &Storefront, action: AuthAction, json: bool) -> CmdResult {
    match action {
        AuthAction::Login { email, password } => {
            let user = storefront.login(&email, &password).await?;
            greet(&user, json)
        }
        AuthAction::Signup {
            name,
            email,
            password,
        } => {
            let user = storefront.signup(&name, &email, &password).await?;
            greet(&user, json)
        }
        AuthAction::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            storefront
                .register_email(&name, &email, &password, &confirm_password)
                .await?;
            println!("Registration successful! Please check your email.");
            Ok(())
        }
        AuthAction::Verify { token } => {
            storefront.verify_email(&token).await?;
            println!("Email verified, you can sign in now");
            Ok(())
        }
        AuthAction::Social { provider } => {
            println!("{}", storefront.social_login_url(provider));
            Ok(())
        }
        AuthAction::Callback { url } => {
            let user = storefront.complete_social_login(&url).await?;
            greet(&user, json)
        }
        AuthAction::Whoami => {
            let user = storefront.check_auth().await?;
            if json {
                return print_json(&user);
            }
            println!("{} <{}> (id {})", user.full_name, user.email, user.id);
            Ok(())
        }
        AuthAction::Logout => {
            storefront.logout().await?;
            println!("Signed out");
            Ok(())
        }
    }
}

fn greet(user: &User, json: bool) -> CmdResult {
    if json {
        return print_json(user);
    }
    println!("Signed in as {} <{}>", user.full_name, user.email);
    Ok(())
}
