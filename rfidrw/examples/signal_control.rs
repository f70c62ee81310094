//! Buzzer and indicator example

use std::thread::sleep;
use std::time::Duration;

use rfidrw::{Indicator, Reader};

fn main() -> rfidrw::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let device = std::env::var("RFID_DEVICE").unwrap_or_else(|_| "ttyUSB0".to_string());

    let mut reader = Reader::open(&device)?;

    println!("Reader opened!");

    for indicator in [Indicator::Red, Indicator::Green] {
        println!("Indicator {}...", indicator);
        reader.set_indicator(indicator)?;
        reader.beep(5)?;
        sleep(Duration::from_secs(1));
    }

    reader.set_indicator(Indicator::None)?;

    println!("Done!");

    Ok(())
}
