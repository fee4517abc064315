//! Placeholder soil classifier.
//!
//! The uploaded image is stored with the result but never inspected: the soil
//! type is drawn uniformly from [`SOIL_PROFILES`]. Repeated calls with the same
//! image may disagree. The draw goes through [`RandomSource`] so callers can
//! pin it.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct SoilProfile {
    pub label: &'static str,
    pub crops: [&'static str; 4],
}

pub static SOIL_PROFILES: [SoilProfile; 5] = [
    SoilProfile {
        label: "ಕೆಂಪು ಮಣ್ಣು (Red Soil)",
        crops: [
            "ರಾಗಿ (Ragi)",
            "ಕಬ್ಬು (Sugarcane)",
            "ಹತ್ತಿ (Cotton)",
            "ಕಡಲೆಕಾಯಿ (Groundnut)",
        ],
    },
    SoilProfile {
        label: "ಕಪ್ಪು ಮಣ್ಣು (Black Soil)",
        crops: [
            "ಹತ್ತಿ (Cotton)",
            "ಗೋಧಿ (Wheat)",
            "ಕಡಲೆ (Gram)",
            "ಸೋಯಾಬೀನ್ (Soybean)",
        ],
    },
    SoilProfile {
        label: "ಲೇಟರೈಟ್ ಮಣ್ಣು (Laterite Soil)",
        crops: [
            "ಗೋಧಿ (Wheat)",
            "ಬತ್ತ (Rice)",
            "ರಾಗಿ (Ragi)",
            "ಕಾಶ್ಯೂ (Cashew)",
        ],
    },
    SoilProfile {
        label: "ಮರಳು ಮಣ್ಣು (Sandy Soil)",
        crops: [
            "ಕಡಲೆಕಾಯಿ (Groundnut)",
            "ತೆಂಗಿನಕಾಯಿ (Coconut)",
            "ತಿಲ (Sesame)",
            "ಕಡಲೆ (Gram)",
        ],
    },
    SoilProfile {
        label: "ಮಟ್ಟಿ ಮಣ್ಣು (Clay Soil)",
        crops: [
            "ಬತ್ತ (Rice)",
            "ಗೋಧಿ (Wheat)",
            "ಜೋಳ (Maize)",
            "ಕಬ್ಬು (Sugarcane)",
        ],
    },
];

/// Chooses an index below `len`; `len` is never zero.
pub trait RandomSource: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

/// Thread-local entropy; the production source.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible sequence from a fixed seed.
pub struct SeededRandom(Mutex<StdRng>);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl RandomSource for SeededRandom {
    fn pick(&self, len: usize) -> usize {
        match self.0.lock() {
            Ok(mut rng) => rng.gen_range(0..len),
            Err(poisoned) => poisoned.into_inner().gen_range(0..len),
        }
    }
}

/// Always returns the same index.
pub struct FixedPick(pub usize);

impl RandomSource for FixedPick {
    fn pick(&self, _len: usize) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoilReport {
    pub soil_type: String,
    pub crops: Vec<String>,
    pub recommendations: String,
}

pub struct SoilClassifier {
    random: Box<dyn RandomSource>,
}

impl SoilClassifier {
    pub fn new(random: impl RandomSource + 'static) -> Self {
        Self {
            random: Box::new(random),
        }
    }

    pub fn classify(&self) -> SoilReport {
        let index = self.random.pick(SOIL_PROFILES.len());
        // An out-of-range pick falls back to the first profile.
        let profile = SOIL_PROFILES.get(index).unwrap_or(&SOIL_PROFILES[0]);
        SoilReport {
            soil_type: profile.label.to_owned(),
            crops: profile.crops.iter().map(|c| (*c).to_owned()).collect(),
            recommendations: recommendation_for(profile.label),
        }
    }
}

impl Default for SoilClassifier {
    fn default() -> Self {
        Self::new(ThreadRandom)
    }
}

pub fn recommendation_for(soil_type: &str) -> String {
    format!(
        "ನಿಮ್ಮ ಮಣ್ಣು {soil_type} ಆಗಿದೆ. ಈ ಮಣ್ಣಿನಲ್ಲಿ ಉತ್ತಮ ಬೆಳೆ ಇಳುವರಿಗಾಗಿ:

1. ಸಾವಯವ ಗೊಬ್ಬರವನ್ನು ಬಳಸಿ (Use organic fertilizers)
2. ನೀರಾವರಿಯನ್ನು ಸರಿಯಾಗಿ ನಿರ್ವಹಿಸಿ (Maintain proper irrigation)
3. ಮಣ್ಣಿನ pH ಮಟ್ಟವನ್ನು 6.5-7.5 ನಡುವೆ ಇರಿಸಿ (Keep soil pH between 6.5-7.5)
4. ಬೆಳೆ ಸರದಿಯನ್ನು ಅಳವಡಿಸಿ (Practice crop rotation)
5. ಮಳೆಗಾಲದ ಮೊದಲು ನೆಟ್ಟು ಮಾಡಿ (Plant before monsoon season)

ಈ ಮಣ್ಣು ಉತ್ತಮ ಒಳಚರಂಡಿ ಮತ್ತು ಪೋಷಕಾಂಶಗಳನ್ನು ಹೊಂದಿದೆ."
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "ಕೆಂಪು ಮಣ್ಣು (Red Soil)")]
    #[case(1, "ಕಪ್ಪು ಮಣ್ಣು (Black Soil)")]
    #[case(4, "ಮಟ್ಟಿ ಮಣ್ಣು (Clay Soil)")]
    fn pinned_pick_is_deterministic(#[case] index: usize, #[case] label: &str) {
        let classifier = SoilClassifier::new(FixedPick(index));
        let first = classifier.classify();
        assert_eq!(first.soil_type, label);
        assert_eq!(first, classifier.classify());
    }

    #[test]
    fn report_carries_four_crops_and_label() {
        let report = SoilClassifier::new(FixedPick(3)).classify();
        assert_eq!(
            report.crops,
            vec![
                "ಕಡಲೆಕಾಯಿ (Groundnut)",
                "ತೆಂಗಿನಕಾಯಿ (Coconut)",
                "ತಿಲ (Sesame)",
                "ಕಡಲೆ (Gram)",
            ]
        );
        assert!(report
            .recommendations
            .starts_with("ನಿಮ್ಮ ಮಣ್ಣು ಮರಳು ಮಣ್ಣು (Sandy Soil) ಆಗಿದೆ."));
    }

    #[test]
    fn out_of_range_pick_uses_first_profile() {
        let report = SoilClassifier::new(FixedPick(99)).classify();
        assert_eq!(report.soil_type, SOIL_PROFILES[0].label);
        assert_eq!(report.crops.len(), 4);
    }

    #[test]
    fn seeded_sources_agree() {
        let a = SoilClassifier::new(SeededRandom::new(7));
        let b = SoilClassifier::new(SeededRandom::new(7));
        for _ in 0..20 {
            assert_eq!(a.classify(), b.classify());
        }
    }

    #[test]
    fn unpinned_classifier_varies() {
        let classifier = SoilClassifier::default();
        let seen: HashSet<String> = (0..200).map(|_| classifier.classify().soil_type).collect();
        assert!(seen.len() > 1, "200 draws produced a single soil type");
    }
}
