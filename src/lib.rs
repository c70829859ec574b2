//! # truebmp
//!
//! Uncompressed 24-bit (truecolor) BMP encoder and decoder.
//!
//! ## One Format, Done Carefully
//!
//! BITMAPINFOHEADER, 24 bits per pixel, no compression. On disk, rows
//! run bottom-up in BGR byte order, each padded to a 4-byte boundary;
//! this crate converts to and from packed top-down RGB (or BGR, if you
//! ask for native order and skip the swizzle).
//!
//! Decoding rejects everything else — other bit depths, RLE, bitfields,
//! OS/2 headers — with a descriptive error instead of a half-decoded
//! image. Larger info headers (V4/V5) are accepted as long as the pixel
//! data is plain 24-bit; their extra fields are ignored.
//!
//! All entry points are stateless functions: encode and decode freely
//! from multiple threads.
//!
//! ## no_std
//!
//! Works with `alloc` alone. The `std` feature adds the `Read`/`Write`
//! adapters ([`read_bmp`], [`write_bmp`]) and `std::io::Error`
//! conversion.
//!
//! ## Non-Goals
//!
//! - Other bit depths (1/4/8/16/32), palettes, RLE, bitfields
//! - Top-down (negative height) files
//! - Image processing of any kind — this is a codec, nothing more
//!
//! ## Usage
//!
//! ```
//! use truebmp::{decode_bmp, encode_bmp, PixelLayout};
//! use enough::Unstoppable;
//!
//! // 2x2 RGB image, top row first
//! let pixels = [
//!     255, 0, 0, 0, 255, 0, // red, green
//!     0, 0, 255, 255, 255, 255, // blue, white
//! ];
//! let bmp = encode_bmp(&pixels, 2, 2, PixelLayout::Rgb8, Unstoppable)?;
//! assert_eq!(&bmp[0..2], b"BM");
//!
//! let decoded = decode_bmp(&bmp, Unstoppable)?;
//! assert_eq!(decoded.width, 2);
//! assert_eq!(decoded.height, 2);
//! assert_eq!(decoded.pixels(), &pixels[..]);
//! # Ok::<(), truebmp::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod encode;
mod error;
mod header;
mod info;
mod limits;
mod pixel;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest, decode_bmp, decode_bmp_native};
#[cfg(feature = "std")]
pub use decode::{read_bmp, read_bmp_with_limits};
pub use encode::encode_bmp;
#[cfg(feature = "imgref")]
pub use encode::encode_bmp_imgref;
#[cfg(feature = "std")]
pub use encode::write_bmp;
pub use enough::{Stop, Unstoppable};
pub use error::BmpError;
pub use header::row_stride;
pub use info::ImageInfo;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::BmpPixel;
pub use pixel::PixelLayout;
