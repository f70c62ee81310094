//! Card reading example

use rfidrw::{codec, Reader};

fn main() -> rfidrw::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(std::io::stderr)
        .init();

    // Change to your reader's device
    let device = std::env::var("RFID_DEVICE").unwrap_or_else(|_| "ttyUSB0".to_string());

    println!("Opening {}...", device);

    let mut reader = Reader::open(&device)?;

    let info = reader.get_info()?;
    println!("✓ Reader: {}", info);

    match reader.read_token_raw()? {
        Some(raw) => {
            println!("✓ Token (hex): {}", codec::bytes_to_hex(&raw));
            println!("✓ Token (dec): {}", codec::bytes_to_token(&raw));
        }
        None => println!("No card present"),
    }

    Ok(())
}
