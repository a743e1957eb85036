use std::io::{self, BufRead, Write};

use infobip::domain::tfa::{SendPinParams, SendPinRequest, VerifyPinRequest};
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
    let request = SendPinRequest {
        application_id: required("IB_2FA_APPLICATION_ID")?,
        message_id: required("IB_2FA_MESSAGE_ID")?,
        to: required("IB_PHONE")?,
        ..Default::default()
    };

    let client = Client::from_env()?;
    let cancel = CancellationToken::new();
    let sent = client
        .tfa()
        .send_pin_over_sms(&cancel, &SendPinParams::default(), &request)
        .await?;
    let Some(pin_id) = sent.payload.and_then(|p| p.pin_id) else {
        println!("PIN not sent: {:?}", sent.envelope.service_exception());
        return Ok(());
    };

    print!("PIN: ");
    io::stdout().flush()?;
    let mut pin = String::new();
    io::stdin().lock().read_line(&mut pin)?;

    let verification = client
        .tfa()
        .verify_pin(&cancel, &pin_id, &VerifyPinRequest { pin: pin.trim().to_owned() })
        .await?;
    match verification.payload {
        Some(result) => println!("verified: {}, error: {:?}", result.verified, result.pin_error),
        None => println!("status: {:?}", verification.status()),
    }

    Ok(())
}
