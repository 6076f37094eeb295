use serde::{Deserialize, Serialize};

/// Currency an expense was paid in.
///
/// The trip settles in `TWD` (the local currency). `JPY` is the single
/// foreign currency and is converted with one fixed rate, see
/// [`Currency::to_local`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Twd,
    Jpy,
}

impl Currency {
    pub const LOCAL: Currency = Currency::Twd;
    pub const ALL: [Currency; 2] = [Currency::Twd, Currency::Jpy];

    /// Canonical currency code, as stored in the ledger.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Twd => "TWD",
            Currency::Jpy => "JPY",
        }
    }

    /// Symbol used when formatting amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Twd => "NT$",
            Currency::Jpy => "¥",
        }
    }

    #[must_use]
    pub const fn is_foreign(self) -> bool {
        !matches!(self, Currency::Twd)
    }

    /// Converts `amount` into the local currency.
    ///
    /// `rate` is the FOREIGN→LOCAL multiplier; local amounts are returned
    /// unchanged.
    #[must_use]
    pub fn to_local(self, amount: f64, rate: f64) -> f64 {
        if self.is_foreign() {
            amount * rate
        } else {
            amount
        }
    }

    /// Reads the `Currency` cell of a stored row.
    ///
    /// Only the exact foreign code converts; anything else, blank or unknown,
    /// is the local currency.
    #[must_use]
    pub fn from_cell(cell: Option<&str>) -> Currency {
        match cell {
            Some(code) if code == Currency::Jpy.code() => Currency::Jpy,
            _ => Currency::LOCAL,
        }
    }

    /// The other currency; used by selection widgets.
    #[must_use]
    pub const fn toggle(self) -> Currency {
        match self {
            Currency::Twd => Currency::Jpy,
            Currency::Jpy => Currency::Twd,
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_foreign_amounts_are_converted() {
        assert_eq!(Currency::Jpy.to_local(1000.0, 0.2075), 207.5);
        assert_eq!(Currency::Twd.to_local(500.0, 0.2075), 500.0);
    }

    #[test]
    fn only_the_exact_foreign_code_is_foreign() {
        assert_eq!(Currency::from_cell(Some("JPY")), Currency::Jpy);
        assert_eq!(Currency::from_cell(Some("TWD")), Currency::Twd);
        assert_eq!(Currency::from_cell(Some("jpy")), Currency::Twd);
        assert_eq!(Currency::from_cell(Some("NTD")), Currency::Twd);
        assert_eq!(Currency::from_cell(None), Currency::Twd);
    }
}
