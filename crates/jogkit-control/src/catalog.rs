//! Jog step sizes
//!
//! The catalog is a fixed, ordered list of `(label, millimeters)` pairs. The
//! millimeter value is extracted from the label once, when the catalog is
//! built; selection afterwards only looks entries up.

use jogkit_core::InputError;
use regex::Regex;
use std::sync::OnceLock;

/// Step sizes offered on the jog panel
pub const STANDARD_JOG_DISTANCES: [(&str, f64); 9] = [
    ("0.01mm", 0.01),
    ("0.05mm", 0.05),
    ("0.1mm", 0.1),
    ("0.5mm", 0.5),
    ("1mm", 1.0),
    ("5mm", 5.0),
    ("10mm", 10.0),
    ("20mm", 20.0),
    ("50mm", 50.0),
];

/// Index of the step size selected when the panel opens (`10mm`)
pub const DEFAULT_JOG_INDEX: usize = 6;

/// Extract the step length from a label of the form `<number><unit>`
///
/// The first contiguous run of digits and dots is the value. Labels without
/// one, or whose value is not a positive finite number, are rejected.
pub fn parse_jog_label(label: &str) -> Result<f64, InputError> {
    let unparseable = || InputError::UnparseableJogDistance {
        label: label.to_string(),
    };

    static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    let number =
        NUMBER_REGEX.get_or_init(|| Regex::new(r"[.0-9]+").expect("invalid number regex"));

    let token = number.find(label).ok_or_else(unparseable)?;
    match token.as_str().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(unparseable()),
    }
}

/// One selectable step size
#[derive(Debug, Clone, PartialEq)]
pub struct JogDistance {
    /// Label shown to the operator
    pub label: String,
    /// Step length in millimeters
    pub millimeters: f64,
}

/// Ordered step sizes with exactly one active entry
#[derive(Debug, Clone, PartialEq)]
pub struct JogDistanceCatalog {
    entries: Vec<JogDistance>,
    active: usize,
}

impl JogDistanceCatalog {
    /// The standard catalog with `10mm` active
    pub fn standard() -> Self {
        let entries = STANDARD_JOG_DISTANCES
            .iter()
            .map(|(label, millimeters)| JogDistance {
                label: (*label).to_string(),
                millimeters: *millimeters,
            })
            .collect();
        Self {
            entries,
            active: DEFAULT_JOG_INDEX,
        }
    }

    /// Build a catalog from labels, parsing each one
    ///
    /// `default_index` is clamped to the last entry. Fails on an empty list or
    /// on the first label without a usable number.
    pub fn from_labels<S: AsRef<str>>(
        labels: &[S],
        default_index: usize,
    ) -> Result<Self, InputError> {
        let entries = labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                parse_jog_label(label).map(|millimeters| JogDistance {
                    label: label.to_string(),
                    millimeters,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if entries.is_empty() {
            return Err(InputError::UnparseableJogDistance {
                label: String::new(),
            });
        }

        let active = default_index.min(entries.len() - 1);
        Ok(Self { entries, active })
    }

    /// Step length of the active entry, in millimeters
    pub fn active_distance(&self) -> f64 {
        self.entries[self.active].millimeters
    }

    /// Label of the active entry
    pub fn active_label(&self) -> &str {
        &self.entries[self.active].label
    }

    /// Position of the active entry in the catalog
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// All entries in display order
    pub fn entries(&self) -> &[JogDistance] {
        &self.entries
    }

    /// Make the entry matching `label` active
    ///
    /// Matches the label exactly, or failing that by its numeric value (so
    /// `"5 mm"` selects `5mm`). On failure the previous selection is kept.
    pub fn select(&mut self, label: &str) -> Result<f64, InputError> {
        let label = label.trim();
        let index = match self.entries.iter().position(|e| e.label == label) {
            Some(index) => index,
            None => {
                let value = parse_jog_label(label)?;
                self.entries
                    .iter()
                    .position(|e| e.millimeters == value)
                    .ok_or_else(|| InputError::UnparseableJogDistance {
                        label: label.to_string(),
                    })?
            }
        };

        self.active = index;
        Ok(self.active_distance())
    }

    /// Make the entry at `index` active, keeping the selection if out of range
    pub fn select_index(&mut self, index: usize) -> Option<f64> {
        if index < self.entries.len() {
            self.active = index;
            Some(self.active_distance())
        } else {
            None
        }
    }
}

impl Default for JogDistanceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_defaults_to_10mm() {
        let catalog = JogDistanceCatalog::standard();
        assert_eq!(catalog.entries().len(), 9);
        assert_eq!(catalog.active_label(), "10mm");
        assert_eq!(catalog.active_distance(), 10.0);
    }

    #[test]
    fn test_standard_values_match_labels() {
        for (label, value) in STANDARD_JOG_DISTANCES {
            assert_eq!(parse_jog_label(label), Ok(value));
        }
    }

    #[test]
    fn test_parse_takes_first_number() {
        assert_eq!(parse_jog_label("0.5mm"), Ok(0.5));
        assert_eq!(parse_jog_label("step 2.5mm (fine)"), Ok(2.5));
        assert_eq!(parse_jog_label("12mm 3mm"), Ok(12.0));
    }

    #[test]
    fn test_parse_rejects_labels_without_number() {
        assert!(parse_jog_label("bogus").is_err());
        assert!(parse_jog_label("").is_err());
        assert!(parse_jog_label(".mm").is_err());
        assert!(parse_jog_label("1.2.3mm").is_err());
        assert!(parse_jog_label("0mm").is_err());
    }

    #[test]
    fn test_last_valid_selection_wins() {
        let mut catalog = JogDistanceCatalog::standard();
        assert_eq!(catalog.select("5mm"), Ok(5.0));

        let err = catalog.select("bogus").unwrap_err();
        assert_eq!(
            err,
            InputError::UnparseableJogDistance {
                label: "bogus".to_string()
            }
        );
        assert_eq!(catalog.active_distance(), 5.0);
        assert_eq!(catalog.active_label(), "5mm");
    }

    #[test]
    fn test_select_by_value() {
        let mut catalog = JogDistanceCatalog::standard();
        assert_eq!(catalog.select("0.10 mm"), Ok(0.1));
        assert_eq!(catalog.active_label(), "0.1mm");
    }

    #[test]
    fn test_select_numeric_label_outside_catalog_is_rejected() {
        let mut catalog = JogDistanceCatalog::standard();
        assert!(catalog.select("7mm").is_err());
        assert_eq!(catalog.active_distance(), 10.0);
    }

    #[test]
    fn test_select_index() {
        let mut catalog = JogDistanceCatalog::standard();
        assert_eq!(catalog.select_index(0), Some(0.01));
        assert_eq!(catalog.select_index(42), None);
        assert_eq!(catalog.active_index(), 0);
    }

    #[test]
    fn test_from_labels() {
        let catalog = JogDistanceCatalog::from_labels(&["0.1in", "1in"], 9).unwrap();
        assert_eq!(catalog.active_label(), "1in");
        assert_eq!(catalog.active_distance(), 1.0);

        assert!(JogDistanceCatalog::from_labels(&["1mm", "coarse"], 0).is_err());
        assert!(JogDistanceCatalog::from_labels::<&str>(&[], 0).is_err());
    }
}
