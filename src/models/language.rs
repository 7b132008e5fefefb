use serde::{Deserialize, Serialize};

/// Languages offered by the language selector. Codes match the keys used in
/// `CropRecord::local_names`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Mr,
    Bn,
    Te,
    Ta,
    Kn,
    Gu,
    Pa,
    Ml,
    Or,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[
            Language::En,
            Language::Hi,
            Language::Mr,
            Language::Bn,
            Language::Te,
            Language::Ta,
            Language::Kn,
            Language::Gu,
            Language::Pa,
            Language::Ml,
            Language::Or,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Mr => "mr",
            Language::Bn => "bn",
            Language::Te => "te",
            Language::Ta => "ta",
            Language::Kn => "kn",
            Language::Gu => "gu",
            Language::Pa => "pa",
            Language::Ml => "ml",
            Language::Or => "or",
        }
    }

    /// Name of the language in its own script.
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
            Language::Mr => "मराठी",
            Language::Bn => "বাংলা",
            Language::Te => "తెలుగు",
            Language::Ta => "தமிழ்",
            Language::Kn => "ಕನ್ನಡ",
            Language::Gu => "ગુજરાતી",
            Language::Pa => "ਪੰਜਾਬੀ",
            Language::Ml => "മലയാളം",
            Language::Or => "ଓଡ଼ିଆ",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        Language::all().iter().copied().find(|l| l.code() == code)
    }

    pub fn next(&self) -> Self {
        let all = Language::all();
        let idx = all.iter().position(|l| l == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
