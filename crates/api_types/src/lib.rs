use serde::{Deserialize, Deserializer, Serialize};

/// Column headers of a ledger sheet, in storage order.
pub const SHEET_COLUMNS: [&str; 6] = ["Date", "Item", "Amount", "Currency", "Payer", "Involved"];

pub mod sheet {
    use super::*;

    /// One raw row of the shared ledger sheet.
    ///
    /// Every column is optional text: the sheet can be edited by hand, so a
    /// row may be incomplete or hold values that do not parse. Typed parsing
    /// happens in the engine.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SheetRow {
        #[serde(rename = "Date", default)]
        pub date: Option<String>,
        #[serde(rename = "Item", default)]
        pub item: Option<String>,
        #[serde(rename = "Amount", default, deserialize_with = "super::text_or_number")]
        pub amount: Option<String>,
        #[serde(rename = "Currency", default)]
        pub currency: Option<String>,
        #[serde(rename = "Payer", default)]
        pub payer: Option<String>,
        /// Comma separated participant names, e.g. `"Christen, Bill"`.
        #[serde(rename = "Involved", default)]
        pub involved: Option<String>,
    }

    /// Full content of a sheet, used both for reads and overwrites.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SheetRows {
        pub rows: Vec<SheetRow>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SheetWritten {
        pub rows_written: usize,
    }
}

/// Spreadsheet cells holding amounts may arrive as JSON numbers.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Text(String),
        Integer(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(Option::<Cell>::deserialize(deserializer)?.map(|cell| match cell {
        Cell::Text(text) => text,
        Cell::Integer(value) => value.to_string(),
        Cell::Float(value) => value.to_string(),
        Cell::Flag(value) => value.to_string(),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::sheet::{SheetRow, SheetRows};

    #[test]
    fn row_uses_sheet_column_names() {
        let row = SheetRow {
            date: Some("2026-01-03".to_string()),
            item: Some("Ramen".to_string()),
            amount: Some("1200".to_string()),
            currency: Some("JPY".to_string()),
            payer: Some("Bill".to_string()),
            involved: Some("Christen, Bill".to_string()),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Involved"], "Christen, Bill");
        assert_eq!(json["Amount"], "1200");
    }

    #[test]
    fn missing_columns_deserialize_as_none() {
        let rows: SheetRows =
            serde_json::from_str(r#"{"rows":[{"Item":"Taxi","Amount":"30"}]}"#).unwrap();
        assert_eq!(rows.rows.len(), 1);
        assert_eq!(rows.rows[0].payer, None);
        assert_eq!(rows.rows[0].item.as_deref(), Some("Taxi"));
    }

    #[test]
    fn numeric_amount_cells_become_text() {
        let rows: SheetRows =
            serde_json::from_str(r#"{"rows":[{"Amount":1500},{"Amount":207.5},{"Amount":null}]}"#)
                .unwrap();
        assert_eq!(rows.rows[0].amount.as_deref(), Some("1500"));
        assert_eq!(rows.rows[1].amount.as_deref(), Some("207.5"));
        assert_eq!(rows.rows[2].amount, None);
    }
}
