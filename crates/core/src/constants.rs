use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Upper bound of a goal's completion percentage
pub const PERCENT_COMPLETE: Decimal = dec!(100);

/// Theme used until the user picks one
pub const DEFAULT_THEME: &str = "light";

/// Currency shown by the presentation layer. Not user-editable.
pub const DEFAULT_CURRENCY: &str = "RUB";

/// Display language. Not user-editable.
pub const DEFAULT_LANGUAGE: &str = "ru";
