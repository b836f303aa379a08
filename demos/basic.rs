//! Basic example demonstrating the FreshBooks API client.
//!
//! Run with:
//! ```
//! FRESHBOOKS_CLIENT_ID=your-id FRESHBOOKS_ACCESS_TOKEN=your-token cargo run --example basic
//! ```
//!
//! Without an access token, the example prints the authorization URL instead
//! (set `FRESHBOOKS_REDIRECT_URI` for that).

use freshbooks::{FreshBooksClient, List, ListParams};

#[tokio::main]
async fn main() -> freshbooks::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating FreshBooks client...");
    let client = FreshBooksClient::from_env()?;
    println!("Connected to: {}", client.api_url());

    if client.access_token().is_none() {
        let url = client.get_auth_request_url(&["user:profile:read", "user:invoices:read"])?;
        println!("\nNo access token. Authorize the application at:\n  {url}");
        return Ok(());
    }

    // Who are we?
    println!("\n--- Current User ---");
    let identity = match client.users().me().await? {
        Ok(identity) => identity,
        Err(error) => {
            eprintln!("FreshBooks refused the request: {error}");
            return Ok(());
        }
    };
    println!(
        "Signed in as {} <{}>",
        identity.full_name().unwrap_or_default(),
        identity.email.as_deref().unwrap_or("unknown")
    );

    // List first page of invoices for each business
    for account_id in identity.account_ids() {
        println!("\n--- Invoices for {account_id} (first page) ---");
        let page = match client
            .invoices()
            .list(account_id, &ListParams::for_page(1, 10))
            .await?
        {
            Ok(page) => page,
            Err(error) => {
                eprintln!("  {error}");
                continue;
            }
        };
        println!("Found {} invoices (total: {})", page.len(), page.pages.total);

        for invoice in &page {
            let number = invoice.invoice_number.as_deref().unwrap_or("-");
            let amount = invoice
                .amount
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();
            let status = if invoice.is_outstanding() { "outstanding" } else { "settled" };
            println!("  - #{number}: {amount} ({status})");
        }
    }

    Ok(())
}
