//! Keyword-based specialist classification.
//!
//! A static ordered rule table maps symptom keywords to a medical specialty.
//! Matching is deliberately naive: case-insensitive substring search over the
//! raw message, no tokenization or word boundaries, first rule in table order
//! wins. Downstream, a recommendation is only surfaced when the message also
//! contains a generic symptom trigger word (see [`has_symptom_trigger`]).

use serde::Serialize;

/// The fixed set of specialties the classifier can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specialty {
    Dentist,
    Dermatologist,
    Neurologist,
    Ophthalmologist,
    Ent,
    Gastroenterologist,
}

impl Specialty {
    /// Display label, as surfaced to the caller.
    pub fn label(self) -> &'static str {
        match self {
            Specialty::Dentist => "Dentiste",
            Specialty::Dermatologist => "Dermatologue",
            Specialty::Neurologist => "Neurologue",
            Specialty::Ophthalmologist => "Ophtalmologue",
            Specialty::Ent => "ORL",
            Specialty::Gastroenterologist => "Gastro-entérologue",
        }
    }

    /// Human-readable referral description.
    pub fn description(self) -> &'static str {
        match self {
            Specialty::Dentist => {
                "Un dentiste sera le mieux placé pour examiner vos problèmes bucco-dentaires."
            }
            Specialty::Dermatologist => {
                "Un dermatologue peut diagnostiquer et traiter les problèmes de peau avec précision."
            }
            Specialty::Neurologist => {
                "Un neurologue spécialisé pourra identifier l'origine de vos maux de tête."
            }
            Specialty::Ophthalmologist => {
                "Un ophtalmologue est expert pour les problèmes de vision et de santé oculaire."
            }
            Specialty::Ent => {
                "Un ORL (Oto-Rhino-Laryngologiste) est spécialisé dans ces zones sensibles."
            }
            Specialty::Gastroenterologist => {
                "Un gastro-entérologue peut explorer en profondeur vos troubles digestifs."
            }
        }
    }

    /// Wire-format referral record.
    pub fn info(self) -> SpecialistInfo {
        SpecialistInfo {
            kind: self.label(),
            description: self.description(),
        }
    }
}

/// Specialist referral as returned over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialistInfo {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
}

/// One classifier rule: keyword set plus the specialty it maps to.
struct CategoryRule {
    keywords: &'static [&'static str],
    specialty: Specialty,
}

/// Ordered rule table. Order is priority order: the first matching rule wins.
const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &["dent", "gencive", "carie", "dentaire"],
        specialty: Specialty::Dentist,
    },
    CategoryRule {
        keywords: &["peau", "bouton", "éruption", "acné", "démangeaison"],
        specialty: Specialty::Dermatologist,
    },
    CategoryRule {
        keywords: &["tête", "migraine", "mal de tête", "vertiges"],
        specialty: Specialty::Neurologist,
    },
    CategoryRule {
        keywords: &["œil", "oeil", "vision", "vue"],
        specialty: Specialty::Ophthalmologist,
    },
    CategoryRule {
        keywords: &["oreille", "gorge", "nez", "rhume", "sinusite"],
        specialty: Specialty::Ent,
    },
    CategoryRule {
        keywords: &["ventre", "estomac", "digestion", "douleur abdominale"],
        specialty: Specialty::Gastroenterologist,
    },
];

/// Generic trigger words gating whether a referral is surfaced at all.
const SYMPTOM_TRIGGERS: &[&str] = &["symptôme", "mal", "douleur", "problème"];

/// Classify a raw user message into at most one specialty.
///
/// Pure and total: lowercases the message once, scans the rule table in
/// order, returns the first rule with any keyword occurring as a substring.
pub fn classify(message: &str) -> Option<Specialty> {
    let symptoms = message.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| symptoms.contains(keyword)))
        .map(|rule| rule.specialty)
}

/// Whether the message contains at least one generic symptom trigger word.
///
/// A classifier match is necessary but not sufficient for a referral; this
/// gate must also pass. Substring semantics, same as [`classify`].
pub fn has_symptom_trigger(message: &str) -> bool {
    let lowered = message.to_lowercase();
    SYMPTOM_TRIGGERS.iter().any(|trigger| lowered.contains(trigger))
}
