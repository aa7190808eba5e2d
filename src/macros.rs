//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$line`, `$position` - Where the token was read
/// * `$index` - Index in the emitted token sequence
/// * `$builtin` - Optional built-in table the identifier matched
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), 1, 2, 0);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $line:expr, $position:expr, $index:expr) => {
        $crate::MK_TOKEN!($kind, $value, $line, $position, $index, None)
    };
    ($kind:expr, $value:expr, $line:expr, $position:expr, $index:expr, $builtin:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            line: $line,
            position: $position,
            index: $index,
            builtin: $builtin,
        }
    };
}
