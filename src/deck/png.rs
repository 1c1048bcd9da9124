use std::fmt;

use crc32fast::Hasher;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, PartialEq, Eq)]
pub enum PngError {
    InvalidSignature,
    TruncatedChunk,
    InvalidChunkLength,
    InvalidCrc { chunk_type: [u8; 4] },
    MissingHeader,
    MissingEnd,
}

impl fmt::Display for PngError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PngError::InvalidSignature => write!(f, "data is not a PNG"),
            PngError::TruncatedChunk => write!(f, "unexpected end of PNG data"),
            PngError::InvalidChunkLength => {
                write!(f, "chunk length exceeds PNG bounds")
            }
            PngError::InvalidCrc { chunk_type } => {
                write!(
                    f,
                    "chunk {} failed CRC validation",
                    display_chunk_type(chunk_type)
                )
            }
            PngError::MissingHeader => write!(f, "first chunk is not IHDR"),
            PngError::MissingEnd => write!(f, "no IEND chunk"),
        }
    }
}

impl std::error::Error for PngError {}

/// Dimensions read from the IHDR chunk of a well-formed PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngInfo {
    pub width: u32,
    pub height: u32,
}

pub fn is_png(data: &[u8]) -> bool {
    data.len() >= PNG_SIGNATURE.len() && data[..PNG_SIGNATURE.len()] == PNG_SIGNATURE
}

/// Walk every chunk, checking lengths and CRCs, and return the image size.
pub fn inspect(data: &[u8]) -> Result<PngInfo, PngError> {
    if !is_png(data) {
        return Err(PngError::InvalidSignature);
    }

    let mut info = None;
    let mut offset = PNG_SIGNATURE.len();
    while offset + 12 <= data.len() {
        let length = read_u32(data, offset) as usize;
        let chunk_type = [
            data[offset + 4],
            data[offset + 5],
            data[offset + 6],
            data[offset + 7],
        ];
        let data_start = offset + 8;
        let data_end = data_start
            .checked_add(length)
            .ok_or(PngError::InvalidChunkLength)?;
        if data_end + 4 > data.len() {
            return Err(PngError::TruncatedChunk);
        }
        let chunk_data = &data[data_start..data_end];
        let actual_crc = read_u32(data, data_end);
        let mut hasher = Hasher::new();
        hasher.update(&chunk_type);
        hasher.update(chunk_data);
        if actual_crc != hasher.finalize() {
            return Err(PngError::InvalidCrc { chunk_type });
        }

        if info.is_none() {
            if &chunk_type != b"IHDR" || chunk_data.len() < 8 {
                return Err(PngError::MissingHeader);
            }
            info = Some(PngInfo {
                width: read_u32(chunk_data, 0),
                height: read_u32(chunk_data, 4),
            });
        }

        if &chunk_type == b"IEND" {
            return info.ok_or(PngError::MissingHeader);
        }
        offset = data_end + 4;
    }

    if offset < data.len() {
        return Err(PngError::TruncatedChunk);
    }
    Err(PngError::MissingEnd)
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn display_chunk_type(chunk_type: &[u8; 4]) -> String {
    chunk_type
        .iter()
        .map(|&b| {
            if (32..=126).contains(&b) {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}
