use std::io;

use infobip::domain::whatsapp::{TextContent, WhatsAppRequest};
use infobip::{CancellationToken, Client};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sender = required("IB_WHATSAPP_SENDER")?;
    let phone = required("IB_PHONE")?;

    let client = Client::from_env()?;
    let request = WhatsAppRequest::new(
        sender,
        phone,
        TextContent {
            text: "Hello from the infobip demo.".to_owned(),
            preview_url: None,
        },
    );

    let response = client
        .whatsapp()
        .send_text(&CancellationToken::new(), &request)
        .await?;
    match (response.payload(), response.service_exception()) {
        (Some(sent), _) => println!("message_id: {:?}, status: {:?}", sent.message_id, sent.status),
        (None, Some(err)) => println!("rejected: {} {}", err.message_id, err.text),
        (None, None) => println!("status: {:?}", response.status()),
    }

    Ok(())
}
