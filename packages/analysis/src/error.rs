//! Error types for decoding and spectral analysis

use thiserror::Error;

/// Failures while turning a wire payload into samples
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Payload is not valid standard base64
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Bytes are not a valid zlib stream
    #[error("corrupt compressed stream: {0}")]
    Inflate(#[from] flate2::DecompressError),

    /// Compressed stream ended before its end-of-stream marker
    #[error("compressed stream is truncated")]
    TruncatedStream,

    /// Decompressed byte count is zero or not a multiple of the sample width
    #[error("decompressed length {len} is not a positive multiple of the {width}-byte sample width")]
    SampleAlignment { len: usize, width: usize },
}

/// Errors raised by the analysis pipeline
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Wire payload could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Linear frequency synthesis needs at least two magnitudes
    #[error("frequency range needs at least 2 magnitudes, got {len}")]
    InvalidRange { len: usize },

    /// Transform input has no samples
    #[error("waveform has no samples")]
    EmptyWaveform,

    /// Sample rate cannot be used to map bins to frequencies
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f64),
}

/// Result type for codec operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
