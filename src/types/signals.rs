use serde::{Deserialize, Deserializer, Serialize};

/// Canonical three-valued classification every provider annotation is normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl Signal {
    /// +1 bullish, -1 bearish, 0 neutral.
    pub fn direction(&self) -> i8 {
        match self {
            Signal::Bullish => 1,
            Signal::Bearish => -1,
            Signal::Neutral => 0,
        }
    }

    /// Get display label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Bullish => "Bullish",
            Signal::Bearish => "Bearish",
            Signal::Neutral => "Neutral",
        }
    }
}

/// Provider annotation before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawSignal {
    /// Free-form text such as "Strong Bullish" or "bearish crossover".
    Text(String),
    /// Color tag such as "positive" / "negative".
    Color(String),
    /// The provider sent nothing usable.
    Missing,
}

/// A single provider indicator row after field-name adaptation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderIndicator {
    pub name: String,
    pub value: Option<f64>,
    pub raw_signal: RawSignal,
}

/// Row shape used by providers that annotate with a `signal` text field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRecord {
    #[serde(default, alias = "indicator", alias = "label", deserialize_with = "lenient_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    pub signal: String,
}

/// Row shape used by providers that annotate with an `indication` text field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicationRecord {
    #[serde(default, alias = "indicator", alias = "label", deserialize_with = "lenient_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    pub indication: String,
}

/// Row shape used by providers that annotate with a `color` tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorRecord {
    #[serde(default, alias = "indicator", alias = "label", deserialize_with = "lenient_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    pub color: String,
}

/// Row with a name and value but no annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BareRecord {
    #[serde(default, alias = "indicator", alias = "label", deserialize_with = "lenient_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// Indicator names arrive as text from most providers and as bare numbers
/// (periods, ids) from a few. Anything else is treated as unnamed.
fn lenient_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Known upstream row shapes. Variants are tried in declaration order, so a
/// row carrying both `signal` and `color` is read as a `signal` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderRecord {
    Signal(SignalRecord),
    Indication(IndicationRecord),
    Color(ColorRecord),
    Bare(BareRecord),
    /// Anything that is not an object (strings, numbers, null).
    Other(serde_json::Value),
}

/// Ready-made buy/neutral/sell counts supplied by some technical providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSummary {
    #[serde(default)]
    pub buy: u32,
    #[serde(default)]
    pub neutral: u32,
    #[serde(default)]
    pub sell: u32,
}

impl ProviderSummary {
    pub fn new(buy: u32, neutral: u32, sell: u32) -> Self {
        Self { buy, neutral, sell }
    }

    /// Sum of all three counts, widened so provider-sized counts cannot wrap.
    pub fn total(&self) -> u64 {
        u64::from(self.buy) + u64::from(self.neutral) + u64::from(self.sell)
    }
}

/// Bullish/bearish/neutral counts produced by the normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalTally {
    pub bullish: u32,
    pub bearish: u32,
    pub neutral: u32,
}

impl SignalTally {
    /// Record one classified signal.
    pub fn record(&mut self, signal: Signal) {
        match signal {
            Signal::Bullish => self.bullish = self.bullish.saturating_add(1),
            Signal::Bearish => self.bearish = self.bearish.saturating_add(1),
            Signal::Neutral => self.neutral = self.neutral.saturating_add(1),
        }
    }

    pub fn total(&self) -> u64 {
        u64::from(self.bullish) + u64::from(self.bearish) + u64::from(self.neutral)
    }
}

impl FromIterator<Signal> for SignalTally {
    fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
        let mut tally = SignalTally::default();
        for signal in iter {
            tally.record(signal);
        }
        tally
    }
}

impl From<SignalTally> for ProviderSummary {
    fn from(tally: SignalTally) -> Self {
        ProviderSummary {
            buy: tally.bullish,
            neutral: tally.neutral,
            sell: tally.bearish,
        }
    }
}

/// Discrete decision derived from `buy_pct - sell_pct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiasDecision {
    #[serde(rename = "Bullish bias")]
    Bullish,
    #[serde(rename = "Neutral bias")]
    Neutral,
    #[serde(rename = "Bearish bias")]
    Bearish,
}

impl BiasDecision {
    /// Get display label for this decision.
    pub fn label(&self) -> &'static str {
        match self {
            BiasDecision::Bullish => "Bullish bias",
            BiasDecision::Neutral => "Neutral bias",
            BiasDecision::Bearish => "Bearish bias",
        }
    }

    /// Parse a provider decision label ("Bullish bias", "buy", "strong sell", ...).
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_ascii_lowercase();
        if lower.contains("bull") || lower.contains("buy") {
            BiasDecision::Bullish
        } else if lower.contains("bear") || lower.contains("sell") {
            BiasDecision::Bearish
        } else {
            BiasDecision::Neutral
        }
    }

    /// +1 bullish, -1 bearish, 0 neutral.
    pub fn direction(&self) -> i8 {
        match self {
            BiasDecision::Bullish => 1,
            BiasDecision::Neutral => 0,
            BiasDecision::Bearish => -1,
        }
    }
}

/// Where the counts of a [`CompositeSummary`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    /// Provider supplied buy/neutral/sell counts.
    Provider,
    /// Counts tallied from individual indicator rows.
    Tallied,
}

/// Aggregated buy/neutral/sell view of one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeSummary {
    pub buy_count: u32,
    pub neutral_count: u32,
    pub sell_count: u32,
    pub buy_pct: f64,
    pub neutral_pct: f64,
    pub sell_pct: f64,
    /// `buy_pct - sell_pct`.
    pub bias: f64,
    pub decision: BiasDecision,
    pub source: SummarySource,
}

/// Raw technical-analysis payload for one security.
///
/// `summary` is optional; when it is missing or malformed the rows in every
/// category are tallied instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalReport {
    #[serde(default, deserialize_with = "lenient_summary")]
    pub summary: Option<ProviderSummary>,
    /// Provider's own 0-100 technical score, when it publishes one.
    #[serde(default)]
    pub score: Option<f64>,
    /// Provider's own decision label, when it publishes one.
    #[serde(default)]
    pub decision: Option<String>,
    #[serde(default)]
    pub indicators: Vec<ProviderRecord>,
    #[serde(default, alias = "sma")]
    pub sma_table: Vec<ProviderRecord>,
    #[serde(default, alias = "ema")]
    pub ema_table: Vec<ProviderRecord>,
    #[serde(default)]
    pub oscillators: Vec<ProviderRecord>,
    #[serde(default, alias = "candlestickPatterns")]
    pub patterns: Vec<ProviderRecord>,
}

impl TechnicalReport {
    /// Every indicator row across all categories.
    pub fn all_records(&self) -> impl Iterator<Item = &ProviderRecord> {
        self.indicators
            .iter()
            .chain(&self.sma_table)
            .chain(&self.ema_table)
            .chain(&self.oscillators)
            .chain(&self.patterns)
    }
}

fn lenient_summary<'de, D>(deserializer: D) -> Result<Option<ProviderSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}
