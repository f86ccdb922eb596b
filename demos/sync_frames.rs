//! Validating text frames that arrive in pieces.
//!
//! Each frame is one logical stream. Pieces are cut at arbitrary byte
//! positions, the way reads come off a socket.
//!
//! Run with:
//!     cargo run --example sync_frames

use utf8stream::{Utf8Validator, ValidatorConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let frames: Vec<Vec<u8>> = vec![
        "hello, world".into(),
        "\u{4f60}\u{597d}\u{ff0c}\u{4e16}\u{754c}".into(),
        "emoji \u{1f600} split mid-sequence".into(),
        vec![b'b', b'a', b'd', 0xED, 0xA0, 0x80],
        vec![b'c', b'u', b't', 0xE2, 0x82],
    ];

    let config = ValidatorConfig::default().with_max_len(64 * 1024);
    let mut validator = Utf8Validator::new(config);

    for (i, frame) in frames.iter().enumerate() {
        let mut rejected = None;
        for piece in frame.chunks(3) {
            if let Err(e) = validator.push(piece) {
                rejected = Some(e);
                break;
            }
        }

        // finish() also resets the validator for the next frame.
        let verdict = match rejected {
            Some(e) => {
                validator.reset();
                Err(e)
            }
            None => validator.finish(),
        };

        match verdict {
            Ok(len) => println!("frame {}: valid, {} bytes", i, len),
            Err(e) => println!("frame {}: closing connection ({})", i, e),
        }
    }

    Ok(())
}
