//! Human-readable planet summaries.

use std::fmt;

use exoscape_classify::PhysicalRecord;

/// Placeholder for an absent value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a measurement with `digits` decimals, or [`NOT_AVAILABLE`].
///
/// Magnitudes of 1000 and above get thousands separators and drop trailing
/// zero decimals.
pub fn format_metric(value: Option<f64>, digits: usize) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };
    if value.abs() < 1000.0 {
        return format!("{value:.digits$}");
    }

    let fixed = format!("{:.digits$}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 2);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// One labelled line of a summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metric {
    /// Row label.
    pub label: &'static str,
    /// Formatted value.
    pub value: String,
}

/// Tooltip-style card of a featured planet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanetSummary {
    /// Planet name.
    pub name: String,
    /// Labelled rows in display order.
    pub metrics: Vec<Metric>,
}

impl PlanetSummary {
    /// Summarize a record.
    pub fn new(record: &PhysicalRecord) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let year = record
            .discovery_year
            .filter(|y| y.is_finite())
            .map(|y| format!("{y:.0}"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let metrics = [
            ("Host Star", text(&record.host_name)),
            ("Discovery Method", text(&record.discovery_method)),
            ("Discovery Year", year),
            ("Orbital Period (days)", format_metric(record.orbital_period, 2)),
            ("Planet Radius (Earth = 1)", format_metric(record.radius, 2)),
            ("Planet Mass (Earth = 1)", format_metric(record.mass, 2)),
            ("Star Spectral Type", text(&record.spectral_type)),
            ("Star Temperature (K)", format_metric(record.star_temperature, 0)),
            ("Star Radius (Solar = 1)", format_metric(record.star_radius, 2)),
            ("Star Mass (Solar = 1)", format_metric(record.star_mass, 2)),
        ]
        .into_iter()
        .map(|(label, value)| Metric { label, value })
        .collect();

        Self {
            name: record.name.clone(),
            metrics,
        }
    }
}

impl fmt::Display for PlanetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for metric in &self.metrics {
            writeln!(f, "  {:<26} {}", metric.label, metric.value)?;
        }
        Ok(())
    }
}
