//! Walks one customer through the whole booking flow against a running
//! server and prints every response as indented JSON.

use anyhow::Context;
use serde::Serialize;

use seatline_api::grpc::{
    AllocateSeatRequest, GetUsersBySectionRequest, ModifySeatRequest, PurchaseRequest,
    RemoveUserRequest, ShowReceiptRequest, TicketServiceClient, User,
};
use seatline_store::app_config::Config;

const EMAIL: &str = "john.doe198@gmail.com";

fn print_json<T: Serialize>(label: &str, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to encode {} response", label))?;
    println!("{} Response:\n{}", label, json);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;

    let mut client = TicketServiceClient::connect(config.client.endpoint.clone())
        .await
        .with_context(|| format!("Failed to connect to {}", config.client.endpoint))?;

    let purchase = client
        .purchase_ticket(PurchaseRequest {
            from: "London".into(),
            to: "France".into(),
            user: Some(User {
                first_name: "John".into(),
                last_name: "Doe".into(),
                email: EMAIL.into(),
            }),
        })
        .await
        .context("PurchaseTicket failed")?
        .into_inner();
    print_json("PurchaseTicket", &purchase)?;

    let allocated = client
        .allocate_seat(AllocateSeatRequest {
            email: EMAIL.into(),
            section: "A".into(),
        })
        .await
        .context("AllocateSeat failed")?
        .into_inner();
    print_json("AllocateSeat", &allocated)?;

    let receipt = client
        .show_receipt(ShowReceiptRequest { email: EMAIL.into() })
        .await
        .context("ShowReceipt failed")?
        .into_inner();
    print_json("ShowReceipt", &receipt)?;

    let section = client
        .get_users_by_section(GetUsersBySectionRequest {
            section: "A".into(),
        })
        .await
        .context("GetUsersBySection failed")?
        .into_inner();
    print_json("GetUsersBySection", &section)?;

    let modified = client
        .modify_seat(ModifySeatRequest {
            email: EMAIL.into(),
            new_section: "B".into(),
            new_seat_number: 5,
        })
        .await
        .context("ModifySeat failed")?
        .into_inner();
    print_json("ModifySeat", &modified)?;

    let receipt = client
        .show_receipt(ShowReceiptRequest { email: EMAIL.into() })
        .await
        .context("ShowReceipt failed")?
        .into_inner();
    print_json("ShowReceipt", &receipt)?;

    let removed = client
        .remove_user(RemoveUserRequest { email: EMAIL.into() })
        .await
        .context("RemoveUser failed")?
        .into_inner();
    print_json("RemoveUser", &removed)?;

    Ok(())
}
