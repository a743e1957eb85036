use std::io;

use infobip::domain::sms::{SmsDestination, SmsMessage, SmsRequest};
use infobip::{CancellationToken, Client};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let phone = std::env::var("IB_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "IB_PHONE environment variable is required",
        )
    })?;
    let message =
        std::env::var("IB_MESSAGE").unwrap_or_else(|_| "Hello from the infobip demo.".to_owned());

    let client = Client::from_env()?;
    let request = SmsRequest {
        messages: vec![SmsMessage {
            destinations: vec![SmsDestination::to(phone)],
            from: Some("InfoSMS".to_owned()),
            text: Some(message),
            ..Default::default()
        }],
        ..Default::default()
    };

    let response = client.sms().send(&CancellationToken::new(), &request).await?;
    if let Some(err) = response.service_exception() {
        println!("rejected ({:?}): {} {}", response.status(), err.message_id, err.text);
        return Ok(());
    }
    for sent in response.payload.map(|p| p.messages).unwrap_or_default() {
        println!(
            "to: {:?}, message_id: {:?}, status: {:?}",
            sent.to, sent.message_id, sent.status
        );
    }

    Ok(())
}
