//! Async validation of a tokio reader.
//!
//! Uses `tokio_util::compat` to bridge tokio's `AsyncRead` into the
//! runtime-agnostic `futures-io` trait.
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::compat::TokioAsyncReadCompatExt;
use utf8stream::{ValidatorConfig, validate_async};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (mut writer, reader) = tokio::io::duplex(16);

    // Producer: trickles text through a small pipe.
    let producer = tokio::spawn(async move {
        let text = "streamed \u{3042}\u{3044}\u{3046} text \u{1f600}\n".repeat(8);
        for piece in text.as_bytes().chunks(5) {
            writer.write_all(piece).await?;
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        }
        writer.shutdown().await?;
        Ok::<(), std::io::Error>(())
    });

    let config = ValidatorConfig::new(32)?;
    let mut stream = validate_async(reader.compat(), config);

    let mut total = 0;
    while let Some(block) = stream.next().await {
        let block = block?;
        total += block.len();
        println!("valid block: {:>3} bytes (total {})", block.len(), total);
    }

    producer.await??;
    println!("\nstream complete: {} bytes of valid UTF-8", total);
    Ok(())
}
