use serde::{Deserialize, Serialize};

/// Selectable location entry. `value` is the raw backend token, `label` the
/// display form with the first character upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationOption {
    pub value: String,
    pub label: String,
}

impl LocationOption {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let value = raw.into();
        let label = capitalize_first(&value);
        Self { value, label }
    }

    fn matches(&self, query: &str) -> bool {
        self.value.eq_ignore_ascii_case(query) || self.label.eq_ignore_ascii_case(query)
    }
}

fn capitalize_first(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Countries and towns known to the backend, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationDirectory {
    pub countries: Vec<LocationOption>,
    pub towns: Vec<LocationOption>,
}

impl LocationDirectory {
    pub fn from_raw(countries: Vec<String>, towns: Vec<String>) -> Self {
        Self {
            countries: countries.into_iter().map(LocationOption::from_raw).collect(),
            towns: towns.into_iter().map(LocationOption::from_raw).collect(),
        }
    }

    /// Find a country by value or label, ignoring ASCII case.
    pub fn find_country(&self, query: &str) -> Option<&LocationOption> {
        self.countries.iter().find(|o| o.matches(query.trim()))
    }

    /// Find a town by value or label, ignoring ASCII case.
    pub fn find_town(&self, query: &str) -> Option<&LocationOption> {
        self.towns.iter().find(|o| o.matches(query.trim()))
    }
}

/// The location the next prediction applies to. Either field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub country: String,
    pub town: String,
}

impl ResolvedLocation {
    pub fn new(country: impl Into<String>, town: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            town: town.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.country.is_empty() && self.town.is_empty()
    }

    /// Town when known, otherwise country.
    pub fn display_label(&self) -> &str {
        if self.town.is_empty() {
            &self.country
        } else {
            &self.town
        }
    }

    pub fn clear(&mut self) {
        self.country.clear();
        self.town.clear();
    }
}

/// Body of a successful `/resolve_zip` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ZipResolution {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
}

impl From<ZipResolution> for ResolvedLocation {
    /// Absent fields become empty strings.
    fn from(resolution: ZipResolution) -> Self {
        Self {
            country: resolution.country.unwrap_or_default(),
            town: resolution.town.unwrap_or_default(),
        }
    }
}

/// One temperature reading as sent by the backend.
///
/// Backends may send plain numbers or preformatted strings such as
/// `"12.5 °C"`; both render as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TemperatureValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for TemperatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // f64 Display prints 15.0 as "15", which is what the form shows
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for TemperatureValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Temperature summary returned by `/predict`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemperatureSummary {
    pub average: TemperatureValue,
    pub max: TemperatureValue,
    pub min: TemperatureValue,
    #[serde(default)]
    pub data_points: Option<u64>,
}

/// A summary together with the location label it applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionReport {
    pub location: String,
    pub summary: TemperatureSummary,
}

impl PredictionReport {
    pub fn new(location: &ResolvedLocation, summary: TemperatureSummary) -> Self {
        Self {
            location: location.display_label().to_string(),
            summary,
        }
    }
}

impl std::fmt::Display for PredictionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Prediction for {}:", self.location)?;
        writeln!(f, "Maximum Temperature: {}", self.summary.max)?;
        writeln!(f, "Average Temperature: {}", self.summary.average)?;
        writeln!(f, "Minimum Temperature: {}", self.summary.min)
    }
}

// Wire envelopes

#[derive(Debug, Deserialize)]
pub(crate) struct CountriesResponse {
    pub countries: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TownsResponse {
    pub towns: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PredictResponse {
    pub summary: TemperatureSummary,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
