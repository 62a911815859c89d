use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketKind {
    Equity,
    Crypto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    #[serde(rename = "simbolo")]
    pub symbol: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "cambio")]
    pub change_percent: f64,
}

impl MarketQuote {
    pub fn new(symbol: impl Into<String>, price: f64, change_percent: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            change_percent,
        }
    }

    pub fn is_gain(&self) -> bool {
        self.change_percent >= 0.0
    }

    /// Crypto prices above 10 get thousands separators, everything else is plain.
    pub fn format_price(&self, kind: MarketKind) -> String {
        match kind {
            MarketKind::Crypto if self.price > 10.0 => format!("${}", group_thousands(self.price)),
            _ => format!("${:.2}", self.price),
        }
    }

    pub fn format_change(&self) -> String {
        if self.change_percent > 0.0 {
            format!("+{:.2}%", self.change_percent)
        } else {
            format!("{:.2}%", self.change_percent)
        }
    }
}

/// Equity and crypto tickers, replaced wholesale on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(rename = "acciones", default)]
    pub equities: Vec<MarketQuote>,
    #[serde(rename = "criptos", default)]
    pub crypto: Vec<MarketQuote>,
}

impl MarketData {
    pub fn quotes(&self, kind: MarketKind) -> &[MarketQuote] {
        match kind {
            MarketKind::Equity => &self.equities,
            MarketKind::Crypto => &self.crypto,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.equities.is_empty() && self.crypto.is_empty()
    }
}

fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}
