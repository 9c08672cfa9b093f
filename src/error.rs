use thiserror::Error;

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors raised while turning a layout definition into a grid or running the generation
/// pipeline. Degraded road networks and skipped conduits are not errors.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("layout has no rows or an empty first row")]
    EmptyLayout,
    #[error("row {row} has {found} symbols, expected {expected}")]
    MalformedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown symbol `{symbol}` at column {x} of row {y}")]
    UnknownSymbol { symbol: String, x: usize, y: usize },
    #[error("layout definition has no variants")]
    NoVariants,
    #[error("layout has no variant {0}")]
    MissingVariant(usize),
    #[error("variant {0} has no room layers")]
    EmptyVariant(usize),
    #[error("room layer {layer} is {found:?}, expected {expected:?}")]
    LayerSizeMismatch {
        layer: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("no symbol resolver named `{0}`")]
    UnknownResolver(String),
    #[error("bad configuration: {0}")]
    Config(String),
}
