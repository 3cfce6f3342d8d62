use super::{CropKind, SoilKind, SystemKind};
use crate::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};

/// Cycle range the wizard falls back to when step 3 is missing.
pub const DEFAULT_CYCLE_RANGE: &str = "100_150";
/// Soil option the wizard falls back to when step 5 is missing.
pub const DEFAULT_SOIL_OPTION: &str = "arenoso";

/// Parse a `"min_max"` cycle range into its mean duration in days.
pub fn parse_cycle_range(range: &str) -> Result<f64> {
    let (min, max) = range.trim().split_once('_').ok_or_else(|| {
        AdvisorError::invalid_input(format!(
            "cycle range '{}' must look like 'min_max' (e.g. 100_150)",
            range
        ))
    })?;

    let parse = |part: &str| {
        part.trim().parse::<f64>().map_err(|_| {
            AdvisorError::invalid_input(format!(
                "cycle range '{}' has a non-numeric bound '{}'",
                range, part
            ))
        })
    };
    let (min, max) = (parse(min)?, parse(max)?);

    let days = (min + max) / 2.0;
    if !days.is_finite() || days <= 0.0 {
        return Err(AdvisorError::invalid_input(format!(
            "cycle range '{}' yields a non-positive duration",
            range
        )));
    }
    Ok(days)
}

/// One run's worth of wizard answers, already mapped to model enums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormAnswers {
    pub crop: CropKind,
    /// Label shown back to the user; the wizard's own text when available.
    pub crop_label: String,
    pub cycle_duration_days: f64,
    /// `None` when the submitted texture was not recognized.
    pub soil_texture: Option<SoilKind>,
    pub irrigation_system: Option<SystemKind>,
}

impl FormAnswers {
    pub fn new(crop: CropKind, cycle_duration_days: f64, soil_texture: Option<SoilKind>) -> Self {
        Self {
            crop,
            crop_label: crop.as_str().to_string(),
            cycle_duration_days,
            soil_texture,
            irrigation_system: None,
        }
    }

    /// Build answers from raw option values, parsing the cycle range.
    pub fn from_options(crop: &str, cycle_range: &str, soil: &str) -> Result<Self> {
        let crop_kind = CropKind::from_str(crop).unwrap_or_else(|| {
            let known: Vec<&str> = CropKind::all().iter().map(|c| c.as_str()).collect();
            tracing::warn!(
                "Unrecognized crop '{}' - using default coefficients (known: {})",
                crop,
                known.join(", ")
            );
            CropKind::Other
        });
        let soil_texture = SoilKind::from_str(soil);
        if soil_texture.is_none() {
            tracing::warn!("Unrecognized soil texture '{}' - using table defaults", soil);
        }

        let mut answers = Self::new(crop_kind, parse_cycle_range(cycle_range)?, soil_texture);
        if !crop.trim().is_empty() {
            answers.crop_label = crop.trim().to_string();
        }
        Ok(answers)
    }

    pub fn with_system(mut self, system: SystemKind) -> Self {
        self.irrigation_system = Some(system);
        self
    }

    /// Map a wizard submission onto model inputs.
    ///
    /// The wizard has no irrigation-system step, so `assumed_system` is always
    /// substituted here rather than surfacing a missing selection to the user.
    pub fn from_wizard(submission: &WizardSubmission, assumed_system: SystemKind) -> Result<Self> {
        if !submission.has_data {
            return Err(AdvisorError::NotFound(
                "initial form has not been filled in".into(),
            ));
        }

        let answers = &submission.answers;
        let crop_value = answers
            .crop
            .as_ref()
            .map(|a| a.value.as_str())
            .unwrap_or("");
        let cycle_value = answers
            .cycle
            .as_ref()
            .map(|a| a.value.as_str())
            .unwrap_or(DEFAULT_CYCLE_RANGE);
        let soil_value = answers
            .soil
            .as_ref()
            .map(|a| a.value.as_str())
            .unwrap_or(DEFAULT_SOIL_OPTION);

        let mut form = Self::from_options(crop_value, cycle_value, soil_value)?;
        if let Some(text) = answers.crop.as_ref().and_then(|a| a.text.as_deref()) {
            if !text.trim().is_empty() {
                form.crop_label = text.trim().to_string();
            }
        }

        tracing::info!(
            "Wizard has no irrigation system step - assuming {}",
            assumed_system
        );
        Ok(form.with_system(assumed_system))
    }
}

/// JSON shape served by the initial-form endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WizardSubmission {
    #[serde(rename = "tem_dados", default = "default_has_data")]
    pub has_data: bool,
    #[serde(rename = "respostas", default)]
    pub answers: WizardAnswers,
}

fn default_has_data() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WizardAnswers {
    #[serde(rename = "etapa_1", default)]
    pub crop: Option<WizardAnswer>,
    #[serde(rename = "etapa_3", default)]
    pub cycle: Option<WizardAnswer>,
    #[serde(rename = "etapa_5", default)]
    pub soil: Option<WizardAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WizardAnswer {
    #[serde(rename = "valor", default)]
    pub value: String,
    #[serde(rename = "texto", default)]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_range_mean() {
        assert!((parse_cycle_range("100_150").unwrap() - 125.0).abs() < 1e-9);
        assert!((parse_cycle_range("90_90").unwrap() - 90.0).abs() < 1e-9);
        assert!((parse_cycle_range(" 60_121 ").unwrap() - 90.5).abs() < 1e-9);
    }

    #[test]
    fn cycle_range_malformed_is_invalid_input() {
        assert!(matches!(
            parse_cycle_range("100-150"),
            Err(AdvisorError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_cycle_range("abc_150"),
            Err(AdvisorError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_cycle_range(""),
            Err(AdvisorError::InvalidInput(_))
        ));
    }

    #[test]
    fn cycle_range_non_positive_is_invalid_input() {
        assert!(matches!(
            parse_cycle_range("0_0"),
            Err(AdvisorError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_cycle_range("-10_5"),
            Err(AdvisorError::InvalidInput(_))
        ));
    }

    #[test]
    fn from_options_maps_enums() {
        let form = FormAnswers::from_options("feijao", "100_150", "arenoso").unwrap();
        assert_eq!(form.crop, CropKind::Bean);
        assert_eq!(form.soil_texture, Some(SoilKind::Sandy));
        assert_eq!(form.crop_label, "feijao");
        assert!(form.irrigation_system.is_none());
    }

    #[test]
    fn from_options_unknown_soil_is_none() {
        let form = FormAnswers::from_options("milho", "80_100", "pedregoso").unwrap();
        assert_eq!(form.crop, CropKind::Corn);
        assert!(form.soil_texture.is_none());
    }

    #[test]
    fn from_options_unknown_crop_keeps_label() {
        let form = FormAnswers::from_options("cana-de-acucar", "300_400", "argiloso").unwrap();
        assert_eq!(form.crop, CropKind::Other);
        assert_eq!(form.crop_label, "cana-de-acucar");
        assert!((form.cycle_duration_days - 350.0).abs() < 1e-9);
    }

    #[test]
    fn wizard_submission_substitutes_system() {
        let json = r#"{
            "tem_dados": true,
            "respostas": {
                "etapa_1": {"valor": "Feijão", "texto": "Feijão carioca"},
                "etapa_3": {"valor": "100_150"},
                "etapa_5": {"valor": "arenoso"}
            },
            "coordenadas": {"latitude": "-10.5", "longitude": -50.2}
        }"#;
        let submission: WizardSubmission = serde_json::from_str(json).unwrap();
        let form = FormAnswers::from_wizard(&submission, SystemKind::FixedSprinkler).unwrap();

        assert_eq!(form.crop, CropKind::Bean);
        assert_eq!(form.crop_label, "Feijão carioca");
        assert!((form.cycle_duration_days - 125.0).abs() < 1e-9);
        assert_eq!(form.soil_texture, Some(SoilKind::Sandy));
        assert_eq!(form.irrigation_system, Some(SystemKind::FixedSprinkler));
    }

    #[test]
    fn wizard_submission_missing_steps_use_defaults() {
        let submission: WizardSubmission = serde_json::from_str(r#"{"respostas": {}}"#).unwrap();
        let form = FormAnswers::from_wizard(&submission, SystemKind::Drip).unwrap();

        assert_eq!(form.crop, CropKind::Other);
        assert!((form.cycle_duration_days - 125.0).abs() < 1e-9);
        assert_eq!(form.soil_texture, Some(SoilKind::Sandy));
        assert_eq!(form.irrigation_system, Some(SystemKind::Drip));
    }

    #[test]
    fn wizard_submission_without_data_is_not_found() {
        let submission: WizardSubmission = serde_json::from_str(r#"{"tem_dados": false}"#).unwrap();
        assert!(matches!(
            FormAnswers::from_wizard(&submission, SystemKind::FixedSprinkler),
            Err(AdvisorError::NotFound(_))
        ));
    }

    #[test]
    fn wizard_submission_malformed_cycle_is_invalid_input() {
        let json = r#"{"respostas": {"etapa_3": {"valor": "100150"}}}"#;
        let submission: WizardSubmission = serde_json::from_str(json).unwrap();
        assert!(matches!(
            FormAnswers::from_wizard(&submission, SystemKind::FixedSprinkler),
            Err(AdvisorError::InvalidInput(_))
        ));
    }
}
