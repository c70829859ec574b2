use crate::error::BmpError;
use crate::header;

/// Image metadata read from the headers, without decoding pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Offset of the first pixel row within the file.
    pub pixel_data_offset: u32,
}

impl ImageInfo {
    /// Probe the start of a BMP stream.
    ///
    /// Reads at most the first 34 bytes, so a prefix of a longer stream
    /// works. Fails on anything [`decode_bmp`](crate::decode_bmp) would
    /// reject at the header stage.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        let parsed = header::parse_header(data)?;
        Ok(Self {
            width: parsed.width,
            height: parsed.height,
            pixel_data_offset: parsed.pixel_data_offset,
        })
    }

    /// Bytes per row on disk, including padding.
    pub fn row_stride(&self) -> u64 {
        header::row_stride(self.width)
    }

    /// Total pixel array size in bytes.
    pub fn pixel_data_len(&self) -> u64 {
        self.row_stride().saturating_mul(u64::from(self.height))
    }
}
