use thiserror::Error;

/// Errors raised by the palette core and the session that drives it.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    #[error("slot {slot} is outside the palette (size {size})")]
    SlotOutOfRange { slot: usize, size: usize },

    #[error("slot {0} has no color to lock")]
    EmptySlot(usize),

    #[error("no image loaded")]
    NoImage,

    #[error(transparent)]
    ParseColor(#[from] ParseColorError),
}

/// Failure to parse an `rgb(r,g,b)` or `#RRGGBB` color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("empty color string")]
    Empty,

    #[error("invalid hex length")]
    InvalidLength,

    #[error("invalid hex digits")]
    InvalidHex,

    #[error("invalid rgb() function")]
    InvalidFunc,

    #[error("component out of range")]
    OutOfRange,
}

/// Upload validation and decode failures. These happen before the core runs.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Please select a valid image file.")]
    NotAnImage,

    #[error("Image size should be less than 5MB ({size} bytes, max {max}).")]
    TooLarge { size: usize, max: usize },

    #[error("Failed to load the image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Everything the native byte-level API can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Palette(#[from] PaletteError),
}

pub type Result<T, E = PaletteError> = std::result::Result<T, E>;
