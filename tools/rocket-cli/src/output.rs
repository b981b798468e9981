//! Output formatting for the CLI.

use console::style;
use rocket_cart::prelude::{Cart, NotificationSink};

/// Output handler for CLI messages.
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize + ?Sized>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", format_row(cols, widths));
    }

    /// Print the cart as a table, or as its stored JSON form in JSON mode.
    pub fn cart(&self, cart: &Cart) {
        if self.json {
            self.json(cart);
            return;
        }

        if cart.is_empty() {
            self.info("Your cart is empty");
            return;
        }

        let rows = cart_rows(cart);
        let widths = column_widths(&rows);
        let header: Vec<&str> = CART_COLUMNS.to_vec();
        println!("  {}", style(format_row(&header, &widths)).bold());
        for row in &rows {
            let cols: Vec<&str> = row.iter().map(String::as_str).collect();
            self.table_row(&cols, &widths);
        }

        println!();
        self.kv("Items", &cart.unique_item_count().to_string());
        self.kv("Units", &cart.item_count().to_string());
        match cart.total() {
            Ok(total) => self.kv("Total", &style(total.display()).bold().to_string()),
            Err(e) => self.kv("Total", &style(e.to_string()).red().to_string()),
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

impl NotificationSink for Output {
    fn error(&self, message: &str) {
        Output::error(self, message);
    }
}

const CART_COLUMNS: [&str; 5] = ["ID", "PRODUCT", "PRICE", "QTY", "SUBTOTAL"];

fn cart_rows(cart: &Cart) -> Vec<[String; 5]> {
    cart.iter()
        .map(|item| {
            [
                item.product_id().to_string(),
                item.product.title().unwrap_or("-").to_string(),
                item.product
                    .price()
                    .map(|p| p.display())
                    .unwrap_or_else(|| "-".to_string()),
                item.amount.to_string(),
                item.subtotal()
                    .map(|s| s.display())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect()
}

fn column_widths(rows: &[[String; 5]]) -> Vec<usize> {
    CART_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn format_row(cols: &[&str], widths: &[usize]) -> String {
    let formatted: Vec<String> = cols
        .iter()
        .zip(widths.iter())
        .map(|(col, width)| format!("{:width$}", col, width = width))
        .collect();
    formatted.join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket_cart::prelude::Product;

    fn sample_cart() -> Cart {
        Cart::new()
            .with_product(
                Product::new(1)
                    .with_attribute("title", "Tênis Rocket")
                    .with_attribute("price", 179.9),
            )
            .with_product(Product::new(2))
    }

    #[test]
    fn test_cart_rows() {
        let rows = cart_rows(&sample_cart());
        assert_eq!(rows[0], ["1", "Tênis Rocket", "R$ 179,90", "1", "R$ 179,90"].map(String::from));
        assert_eq!(rows[1], ["2", "-", "-", "1", "-"].map(String::from));
    }

    #[test]
    fn test_column_widths_count_chars() {
        let widths = column_widths(&cart_rows(&sample_cart()));
        // "Tênis Rocket" is 12 chars, 13 bytes
        assert_eq!(widths, vec![2, 12, 9, 3, 9]);
    }

    #[test]
    fn test_format_row() {
        assert_eq!(format_row(&["1", "ab"], &[3, 4]), "1    ab");
    }
}
