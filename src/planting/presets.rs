/// Default input and dosage for a crop, used to prefill a planting plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropPreset {
    pub crop: &'static str,
    pub aliases: &'static [&'static str],
    pub input_name: &'static str,
    /// kg (or L) per m²
    pub rate_per_m2: f64,
}

pub const CROP_PRESETS: &[CropPreset] = &[
    CropPreset {
        crop: "Soy",
        aliases: &["soja", "soybean"],
        input_name: "NPK fertilizer",
        rate_per_m2: 0.50,
    },
    CropPreset {
        crop: "Corn",
        aliases: &["milho", "maize"],
        input_name: "Urea",
        rate_per_m2: 0.80,
    },
    CropPreset {
        crop: "Beans",
        aliases: &["feijão", "feijao", "bean"],
        input_name: "Organic compost",
        rate_per_m2: 0.40,
    },
    CropPreset {
        crop: "Sugarcane",
        aliases: &["cana-de-açúcar", "cana-de-acucar", "cana"],
        input_name: "Limestone",
        rate_per_m2: 1.20,
    },
    CropPreset {
        crop: "Cotton",
        aliases: &["algodão", "algodao"],
        input_name: "Pesticide X",
        rate_per_m2: 0.65,
    },
];

pub fn find_preset(name: &str) -> Option<&'static CropPreset> {
    let needle = name.trim().to_lowercase();
    CROP_PRESETS
        .iter()
        .find(|p| p.crop.to_lowercase() == needle || p.aliases.contains(&needle.as_str()))
}
